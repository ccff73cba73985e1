//! Frame-range commands: backtrace listing, argument sweep, depth
//!
//! Range commands take one of two paths: delegation to the frame-filter
//! chain, attempted first, or the built-in per-frame printer/enumerator,
//! which resolves the inclusive frame-level range against the live chain.
//! The decision is a small state machine evaluated once per invocation,
//! disabled (explicit per-request opt-out), no plugins registered (fall
//! back), or delegated, driven by the tagged outcome of the filter call
//! rather than exceptions.

use serde::Serialize;
use tracing::debug;

use framescope_target::{
    FilterFlags, FilterOutcome, FrameChain, FrameFilterChain, FrameHandle, FramePrinter,
    FrameSummary, PrintMode, Result, ScopeSource, StackError, ValueSource,
};

use crate::classify::ListScope;
use crate::enumerate::{enumerate, VariableRecord};
use crate::session::Session;

/// One frame entry in a backtrace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub level: u32,
    #[serde(flatten)]
    pub summary: FrameSummary,
}

/// Per-frame argument records from a range sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameArgsRecord {
    pub level: u32,
    pub args: Vec<VariableRecord>,
}

/// Result of a command that may delegate: rendered records, or confirmation
/// that the filter chain produced the output through its own mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<R> {
    Rendered(Vec<R>),
    Filtered,
}

/// List stack frames with their locations, levels `low..=high`. Both bounds
/// `-1` means the whole stack; equal bounds mean a single frame.
pub fn list_frames<T, F>(
    target: &T,
    filters: &mut F,
    session: &Session,
    low: i32,
    high: i32,
    no_filters: bool,
) -> Result<Listing<FrameRecord>>
where
    T: FrameChain + FramePrinter,
    F: FrameFilterChain + ?Sized,
{
    if let Some(listing) = try_delegate(
        target,
        filters,
        session,
        no_filters,
        FilterFlags::LEVEL | FilterFlags::FRAME_INFO,
        PrintMode::NoValues,
        low,
        high,
    )? {
        return Ok(listing);
    }

    let (mut level, start) = seek_frame(target, session, low, "list-frames")?;

    let mut records = Vec::new();
    let mut cursor = Some(start);
    while let Some(frame) = cursor {
        if high != -1 && level as i32 > high {
            break;
        }
        session.interrupt.check()?;
        // The location and the address are printed always, even for level 0.
        records.push(FrameRecord {
            level,
            summary: target.frame_summary(frame, true),
        });
        level += 1;
        cursor = target.caller_of(frame);
    }
    Ok(Listing::Rendered(records))
}

/// List the arguments of every frame in `low..=high`, one record group per
/// frame.
pub fn list_frame_args<T, F>(
    target: &T,
    filters: &mut F,
    session: &Session,
    mode: PrintMode,
    low: i32,
    high: i32,
    no_filters: bool,
) -> Result<Listing<FrameArgsRecord>>
where
    T: FrameChain + ScopeSource + ValueSource,
    F: FrameFilterChain + ?Sized,
{
    if let Some(listing) = try_delegate(
        target,
        filters,
        session,
        no_filters,
        FilterFlags::LEVEL | FilterFlags::ARGS,
        mode,
        low,
        high,
    )? {
        return Ok(listing);
    }

    let (mut level, start) = seek_frame(target, session, low, "list-args")?;

    let mut records = Vec::new();
    let mut cursor = Some(start);
    while let Some(frame) = cursor {
        if high != -1 && level as i32 > high {
            break;
        }
        session.interrupt.check()?;
        records.push(FrameArgsRecord {
            level,
            args: enumerate(target, session, frame, ListScope::Arguments, mode)?,
        });
        level += 1;
        cursor = target.caller_of(frame);
    }
    Ok(Listing::Rendered(records))
}

/// List the variables of the selected frame under the requested scope.
pub fn list_variables<T, F>(
    target: &T,
    filters: &mut F,
    session: &Session,
    what: ListScope,
    mode: PrintMode,
    no_filters: bool,
) -> Result<Listing<VariableRecord>>
where
    T: FrameChain + ScopeSource + ValueSource,
    F: FrameFilterChain + ?Sized,
{
    let frame = target
        .selected_frame()
        .ok_or_else(|| StackError::Structural("No stack.".to_string()))?;

    if !no_filters && session.frame_filters_enabled() {
        let flags = FilterFlags::LEVEL
            | match what {
                ListScope::Locals => FilterFlags::LOCALS,
                ListScope::Arguments => FilterFlags::ARGS,
                ListScope::All => FilterFlags::ARGS | FilterFlags::LOCALS,
            };
        match filters.apply(frame, flags, mode, 0, 0) {
            FilterOutcome::Handled => return Ok(Listing::Filtered),
            FilterOutcome::Error(message) => return Err(StackError::Plugin(message)),
            FilterOutcome::NoFilters => {
                debug!("No frame filters installed; using built-in enumeration");
            }
        }
    }

    enumerate(target, session, frame, what, mode).map(Listing::Rendered)
}

/// Locate the selected frame in the current chain and summarize it.
///
/// The level is positional, so the chain is walked from the innermost frame
/// until the selected handle is met.
pub fn frame_info<T>(target: &T, session: &Session) -> Result<FrameRecord>
where
    T: FrameChain + FramePrinter,
{
    let selected = target
        .selected_frame()
        .ok_or_else(|| StackError::Structural("No stack.".to_string()))?;
    let mut frame = target
        .current_frame()
        .ok_or_else(|| StackError::Structural("No stack.".to_string()))?;
    let mut level = 0u32;
    while frame != selected {
        session.interrupt.check()?;
        frame = target.caller_of(frame).ok_or_else(|| {
            StackError::Structural("Selected frame is not in the current frame chain.".to_string())
        })?;
        level += 1;
    }
    Ok(FrameRecord {
        level,
        summary: target.frame_summary(selected, true),
    })
}

/// Count stack frames, walking at most `max` of them (`-1` for all). No
/// value resolution happens here.
pub fn depth<T: FrameChain>(target: &T, session: &Session, max: i32) -> Result<u32> {
    let mut count = 0u32;
    let mut cursor = Some(
        target
            .current_frame()
            .ok_or_else(|| StackError::Structural("No stack.".to_string()))?,
    );
    while let Some(frame) = cursor {
        if max != -1 && count as i32 >= max {
            break;
        }
        session.interrupt.check()?;
        count += 1;
        cursor = target.caller_of(frame);
    }
    Ok(count)
}

/// Step from the innermost frame outward `low` times. Exhausting the chain
/// before reaching `low` is an error; a `low` of `-1` (whole stack) starts
/// at the innermost frame.
fn seek_frame<T: FrameChain>(
    target: &T,
    session: &Session,
    low: i32,
    command: &str,
) -> Result<(u32, FrameHandle)> {
    let mut frame = target
        .current_frame()
        .ok_or_else(|| StackError::Structural("No stack.".to_string()))?;
    let mut level = 0u32;
    while (level as i32) < low {
        session.interrupt.check()?;
        frame = target.caller_of(frame).ok_or_else(|| {
            StackError::Structural(format!("{command}: Not enough frames in stack."))
        })?;
        level += 1;
    }
    Ok((level, frame))
}

/// Offer a range request to the filter chain. Returns `Some(Filtered)` when
/// a plugin rendered it, `None` when the built-in path should run, and an
/// error when the chain failed (plugin errors never fall back).
#[allow(clippy::too_many_arguments)]
fn try_delegate<T, F, R>(
    target: &T,
    filters: &mut F,
    session: &Session,
    no_filters: bool,
    flags: FilterFlags,
    mode: PrintMode,
    low: i32,
    high: i32,
) -> Result<Option<Listing<R>>>
where
    T: FrameChain,
    F: FrameFilterChain + ?Sized,
{
    if no_filters || !session.frame_filters_enabled() {
        return Ok(None);
    }

    // The chain always receives the innermost frame plus the bounds. A low
    // of -1 must not be passed through verbatim: in the plugin protocol it
    // means a tail-relative range, so it becomes 0 here.
    let start = target
        .current_frame()
        .ok_or_else(|| StackError::Structural("No stack.".to_string()))?;
    let plugin_low = if low == -1 { 0 } else { low };

    match filters.apply(start, flags, mode, plugin_low, high) {
        FilterOutcome::Handled => {
            debug!("Frame filters handled range [{plugin_low}, {high}]");
            Ok(Some(Listing::Filtered))
        }
        FilterOutcome::Error(message) => Err(StackError::Plugin(message)),
        FilterOutcome::NoFilters => {
            debug!("No frame filters installed; using built-in backtrace");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framescope_target::{NullFilterChain, SnapshotTarget};

    const THREE_FRAMES: &str = r#"{
        "frames": [
            { "block": 0, "pc": 4096, "function": "leaf", "file": "demo.c", "line": 5 },
            { "block": 0, "pc": 8192, "function": "middle", "file": "demo.c", "line": 15 },
            { "block": 0, "pc": 12288, "function": "main", "file": "demo.c", "line": 25 }
        ],
        "blocks": [ { "function_owned": true, "symbols": [] } ]
    }"#;

    /// Filter chain double with a scripted outcome.
    struct ScriptedChain {
        outcome: FilterOutcome,
        calls: Vec<(FilterFlags, PrintMode, i32, i32)>,
    }

    impl ScriptedChain {
        fn new(outcome: FilterOutcome) -> Self {
            Self {
                outcome,
                calls: Vec::new(),
            }
        }
    }

    impl FrameFilterChain for ScriptedChain {
        fn apply(
            &mut self,
            _start: FrameHandle,
            flags: FilterFlags,
            mode: PrintMode,
            low: i32,
            high: i32,
        ) -> FilterOutcome {
            self.calls.push((flags, mode, low, high));
            self.outcome.clone()
        }
    }

    #[test]
    fn test_whole_stack_listing() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        let listing =
            list_frames(&target, &mut NullFilterChain, &session, -1, -1, false).unwrap();
        let Listing::Rendered(records) = listing else {
            panic!("expected rendered records");
        };
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].level, 0);
        assert_eq!(records[0].summary.function.as_deref(), Some("leaf"));
        assert_eq!(records[2].level, 2);
        assert_eq!(records[2].summary.function.as_deref(), Some("main"));
        // The address is included even for level 0.
        assert_eq!(records[0].summary.pc, Some(4096));
    }

    #[test]
    fn test_single_frame_range() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        let listing = list_frames(&target, &mut NullFilterChain, &session, 1, 1, false).unwrap();
        let Listing::Rendered(records) = listing else {
            panic!("expected rendered records");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, 1);
        assert_eq!(records[0].summary.function.as_deref(), Some("middle"));
    }

    #[test]
    fn test_range_clipped_by_stack_end() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        let listing = list_frames(&target, &mut NullFilterChain, &session, 1, 10, false).unwrap();
        let Listing::Rendered(records) = listing else {
            panic!("expected rendered records");
        };
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_not_enough_frames() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        let err = list_frames(&target, &mut NullFilterChain, &session, 5, 7, false).unwrap_err();
        assert_eq!(
            err,
            StackError::Structural("list-frames: Not enough frames in stack.".into())
        );
    }

    #[test]
    fn test_no_stack() {
        let target = SnapshotTarget::from_json("{}").unwrap();
        let session = Session::new();
        let err = list_frames(&target, &mut NullFilterChain, &session, -1, -1, false).unwrap_err();
        assert_eq!(err, StackError::Structural("No stack.".into()));
    }

    #[test]
    fn test_depth_counting() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        assert_eq!(depth(&target, &session, -1).unwrap(), 3);
        assert_eq!(depth(&target, &session, 2).unwrap(), 2);
        assert_eq!(depth(&target, &session, 10).unwrap(), 3);
        assert_eq!(depth(&target, &session, 0).unwrap(), 0);
    }

    #[test]
    fn test_frame_info_reports_selected_level() {
        let mut target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();

        let record = frame_info(&target, &session).unwrap();
        assert_eq!(record.level, 0);
        assert_eq!(record.summary.function.as_deref(), Some("leaf"));
        assert_eq!(record.summary.pc, Some(4096));

        target.select_frame("2").unwrap();
        let record = frame_info(&target, &session).unwrap();
        assert_eq!(record.level, 2);
        assert_eq!(record.summary.function.as_deref(), Some("main"));
    }

    #[test]
    fn test_frame_info_without_stack() {
        let target = SnapshotTarget::from_json("{}").unwrap();
        let session = Session::new();
        let err = frame_info(&target, &session).unwrap_err();
        assert_eq!(err, StackError::Structural("No stack.".into()));
    }

    #[test]
    fn test_delegation_handled() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let mut session = Session::new();
        session.enable_frame_filters();
        let mut chain = ScriptedChain::new(FilterOutcome::Handled);

        let listing = list_frames(&target, &mut chain, &session, -1, -1, false).unwrap();
        assert_eq!(listing, Listing::Filtered);

        // -1 low is adjusted to 0 before handoff; -1 high passes through.
        assert_eq!(chain.calls.len(), 1);
        let (flags, mode, low, high) = chain.calls[0];
        assert_eq!(flags, FilterFlags::LEVEL | FilterFlags::FRAME_INFO);
        assert_eq!(mode, PrintMode::NoValues);
        assert_eq!(low, 0);
        assert_eq!(high, -1);
    }

    #[test]
    fn test_delegation_requires_latch() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        let mut chain = ScriptedChain::new(FilterOutcome::Handled);

        let listing = list_frames(&target, &mut chain, &session, -1, -1, false).unwrap();
        assert!(matches!(listing, Listing::Rendered(_)));
        assert!(chain.calls.is_empty());
    }

    #[test]
    fn test_no_filters_flag_skips_chain() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let mut session = Session::new();
        session.enable_frame_filters();
        let mut chain = ScriptedChain::new(FilterOutcome::Error("should not run".into()));

        let listing = list_frames(&target, &mut chain, &session, -1, -1, true).unwrap();
        assert!(matches!(listing, Listing::Rendered(_)));
        assert!(chain.calls.is_empty());
    }

    #[test]
    fn test_no_filters_outcome_falls_back() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let mut session = Session::new();
        session.enable_frame_filters();
        let mut chain = ScriptedChain::new(FilterOutcome::NoFilters);

        let listing = list_frames(&target, &mut chain, &session, -1, -1, false).unwrap();
        let Listing::Rendered(records) = listing else {
            panic!("expected fallback to built-in path");
        };
        assert_eq!(records.len(), 3);
        assert_eq!(chain.calls.len(), 1);
    }

    #[test]
    fn test_plugin_error_surfaces_without_fallback() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let mut session = Session::new();
        session.enable_frame_filters();
        let mut chain = ScriptedChain::new(FilterOutcome::Error("plugin exploded".into()));

        let err = list_frames(&target, &mut chain, &session, -1, -1, false).unwrap_err();
        assert_eq!(err, StackError::Plugin("plugin exploded".into()));
    }

    #[test]
    fn test_interrupt_aborts_walk() {
        let target = SnapshotTarget::from_json(THREE_FRAMES).unwrap();
        let session = Session::new();
        session.interrupt.raise();
        let err = list_frames(&target, &mut NullFilterChain, &session, -1, -1, false).unwrap_err();
        assert_eq!(err, StackError::Interrupted);
    }
}
