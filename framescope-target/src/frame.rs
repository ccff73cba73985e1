//! Frame handles and the unwinder-facing frame chain interface

use serde::{Deserialize, Serialize};

use crate::Result;

/// Opaque handle to one stack activation, minted by the unwinder.
///
/// Handles are only valid for the duration of a single inspection request;
/// they are never cached across requests. The frame's ordinal level
/// (0 = innermost) is positional and derived by stepping from the innermost
/// frame, not stored in the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Location summary for one frame, produced by the frame-printing
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Resume address; present when the caller requested the address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pc: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Read-only access to the frame chain of the process under inspection,
/// supplied by the unwinder.
///
/// The chain links frames from innermost to outermost; `caller_of` steps one
/// frame outward and returns `None` past the outermost frame.
pub trait FrameChain {
    /// The innermost frame, or `None` when the target has no stack.
    fn current_frame(&self) -> Option<FrameHandle>;

    /// The caller of `frame`, or `None` when `frame` is outermost.
    fn caller_of(&self, frame: FrameHandle) -> Option<FrameHandle>;

    /// The session's selected frame, or `None` when the target has no stack.
    fn selected_frame(&self) -> Option<FrameHandle>;

    /// Re-designate the selected frame from a textual frame specification.
    fn select_frame(&mut self, spec: &str) -> Result<()>;
}

/// Source-level location rendering for frames.
pub trait FramePrinter {
    /// Summarize one frame's location. The address is filled in only when
    /// `include_address` is set.
    fn frame_summary(&self, frame: FrameHandle, include_address: bool) -> FrameSummary;
}
