//! Framescope Stack Inspection Library
//!
//! The core of the machine-oriented stack commands: deciding which symbols in
//! a frame's lexical scope chain are listable, resolving each to a value (or
//! a captured read failure) under a requested verbosity mode, and choosing
//! between the built-in enumerator and the pluggable frame-filter chain for
//! range commands.

pub mod classify;
pub mod enumerate;
pub mod range;
pub mod resolve;
pub mod scope;
pub mod session;

pub use classify::{is_listable, selected_for, ListScope};
pub use enumerate::{enumerate, ValueText, VariableRecord};
pub use range::{depth, frame_info, list_frame_args, list_frames, list_variables,
    FrameArgsRecord, FrameRecord, Listing};
pub use resolve::{resolve, EntryKind, FrameArg, ValueOutcome};
pub use scope::ScopeChain;
pub use session::{EntryValues, Session};
