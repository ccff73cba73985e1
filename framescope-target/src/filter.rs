//! Frame-filter plugin chain interface

use crate::{FrameHandle, PrintMode};

bitflags::bitflags! {
    /// Printing selection handed to the filter chain: which pieces of each
    /// frame the plugins are expected to render.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FilterFlags: u32 {
        const LEVEL      = 0b0001;
        const FRAME_INFO = 0b0010;
        const ARGS       = 0b0100;
        const LOCALS     = 0b1000;
    }
}

/// What the filter chain did with a request.
///
/// A tagged result rather than an error: only `NoFilters` (and an explicit
/// per-request opt-out) falls back to the built-in path. `Error` surfaces to
/// the caller as a command failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Plugins rendered the requested range through their own mechanism.
    Handled,
    /// No filters are installed; the built-in path should run.
    NoFilters,
    /// The filter mechanism failed.
    Error(String),
}

/// The optional, pluggable frame-filtering mechanism.
///
/// Invocation contract only; execution semantics belong to the plugin host.
/// `low` has already been adjusted by the caller: `-1` (whole stack) becomes
/// `0`, since `-1` is reserved in the plugin protocol for tail-relative
/// ranges. `high` of `-1` still means "to the outermost frame".
pub trait FrameFilterChain {
    fn apply(
        &mut self,
        start: FrameHandle,
        flags: FilterFlags,
        mode: PrintMode,
        low: i32,
        high: i32,
    ) -> FilterOutcome;
}

/// A filter chain with nothing installed. Always reports `NoFilters`, so
/// every request falls back to the built-in path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFilterChain;

impl FrameFilterChain for NullFilterChain {
    fn apply(
        &mut self,
        _start: FrameHandle,
        _flags: FilterFlags,
        _mode: PrintMode,
        _low: i32,
        _high: i32,
    ) -> FilterOutcome {
        FilterOutcome::NoFilters
    }
}
