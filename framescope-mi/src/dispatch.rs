//! Command dispatch into the inspection layer

use serde::Serialize;
use tracing::debug;

use framescope_stack::{
    depth, frame_info, list_frame_args, list_frames, list_variables, FrameArgsRecord, FrameRecord,
    ListScope, Listing, Session, VariableRecord,
};
use framescope_target::{
    FrameChain, FrameFilterChain, FramePrinter, PrintMode, Result, ScopeSource, ValueSource,
};

use crate::command::Command;

/// Successful command outcome, serialized as one JSON object tagged with a
/// result class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class", rename_all = "kebab-case")]
pub enum Response {
    /// The command completed without producing records.
    Done,
    /// The frame-filter chain rendered the output through its own mechanism.
    Filtered,
    Depth { depth: u32 },
    Frames { frames: Vec<FrameRecord> },
    Frame { frame: FrameRecord },
    Variables { variables: Vec<VariableRecord> },
    FrameArgs { frames: Vec<FrameArgsRecord> },
}

/// Execute one parsed command against the target under inspection.
///
/// The target is the bundle of collaborator interfaces one inspection
/// request borrows; only `select-frame` mutates it.
pub fn execute<T, F>(
    target: &mut T,
    filters: &mut F,
    session: &mut Session,
    command: Command,
) -> Result<Response>
where
    T: FrameChain + ScopeSource + ValueSource + FramePrinter,
    F: FrameFilterChain + ?Sized,
{
    debug!("Executing command: {command:?}");
    match command {
        Command::EnableFrameFilters => {
            session.enable_frame_filters();
            Ok(Response::Done)
        }
        Command::ListFrames { no_filters, bounds } => {
            let (low, high) = bounds.unwrap_or((-1, -1));
            match list_frames(target, filters, session, low, high, no_filters)? {
                Listing::Rendered(frames) => Ok(Response::Frames { frames }),
                Listing::Filtered => Ok(Response::Filtered),
            }
        }
        Command::InfoDepth { max } => Ok(Response::Depth {
            depth: depth(target, session, max)?,
        }),
        Command::ListLocals { no_filters, mode } => {
            list_selected(target, filters, session, ListScope::Locals, mode, no_filters)
        }
        Command::ListVariables { no_filters, mode } => {
            list_selected(target, filters, session, ListScope::All, mode, no_filters)
        }
        Command::ListArgs {
            no_filters,
            mode,
            bounds,
        } => {
            let (low, high) = bounds.unwrap_or((-1, -1));
            match list_frame_args(target, filters, session, mode, low, high, no_filters)? {
                Listing::Rendered(frames) => Ok(Response::FrameArgs { frames }),
                Listing::Filtered => Ok(Response::Filtered),
            }
        }
        Command::SelectFrame { spec } => {
            target.select_frame(&spec)?;
            Ok(Response::Done)
        }
        Command::InfoFrame => Ok(Response::Frame {
            frame: frame_info(target, session)?,
        }),
    }
}

fn list_selected<T, F>(
    target: &T,
    filters: &mut F,
    session: &Session,
    what: ListScope,
    mode: PrintMode,
    no_filters: bool,
) -> Result<Response>
where
    T: FrameChain + ScopeSource + ValueSource,
    F: FrameFilterChain + ?Sized,
{
    match list_variables(target, filters, session, what, mode, no_filters)? {
        Listing::Rendered(variables) => Ok(Response::Variables { variables }),
        Listing::Filtered => Ok(Response::Filtered),
    }
}
