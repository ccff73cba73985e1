//! Framescope Target Library
//!
//! Target-side vocabulary for the stack-inspection layer: the frame, block
//! and symbol data model, the collaborator traits behind which the unwinder,
//! debug-info reader, value reader and frame-filter mechanism live, the
//! command error taxonomy, and a serde-backed snapshot target for post-mortem
//! inspection and testing.

// Core modules
mod error;
mod filter;
mod frame;
mod interrupt;
mod modes;
mod symbol;
mod value;

pub mod snapshot;

pub use error::{Result, StackError};

pub use filter::{FilterFlags, FilterOutcome, FrameFilterChain, NullFilterChain};

pub use frame::{FrameChain, FrameHandle, FramePrinter, FrameSummary};

pub use interrupt::InterruptToken;

pub use modes::PrintMode;

pub use symbol::{Block, BlockId, ScopeSource, StorageClass, Symbol, SymbolId, TypeClass};

pub use value::{ReadError, ValueSource};

pub use snapshot::{SnapshotError, SnapshotTarget};
