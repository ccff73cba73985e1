//! Framescope Machine Interface
//!
//! The machine-oriented command surface over the stack-inspection layer:
//! each command line is checked against its argument-shape contract,
//! dispatched into the core layer, and answered with one JSON object.

pub mod command;
pub mod dispatch;
pub mod output;

pub use command::Command;
pub use dispatch::{execute, Response};
pub use output::render;
