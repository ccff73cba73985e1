//! Variable enumeration for one frame
//!
//! Walks the frame's scope chain, filters symbols through the
//! classification rules, resolves values under the requested mode, and
//! emits the ordered record list. A read failure on one symbol becomes
//! error text on that symbol's record; only a frame with no resolvable
//! scope aborts the listing.

use serde::Serialize;
use tracing::debug;

use framescope_target::{
    FrameHandle, PrintMode, Result, ScopeSource, StackError, ValueSource,
};

use crate::classify::{is_listable, selected_for, ListScope};
use crate::resolve::{resolve, EntryKind, FrameArg, ValueOutcome};
use crate::scope::ScopeChain;
use crate::session::Session;

/// Rendered value text, or the read failure that took its place; a record
/// carries at most one of them, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueText {
    Value(String),
    Error(String),
}

/// One emitted variable listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableRecord {
    /// Display name; the entry-time variant carries an `@entry` suffix.
    pub name: String,
    /// Set only when listing all variables and the symbol is an argument.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub arg: bool,
    /// Present in simple-values mode, whether or not a value was fetched.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    #[serde(flatten)]
    pub value: Option<ValueText>,
}

/// List the variables visible at `frame` under the requested scope and
/// verbosity mode.
///
/// Iteration order is blocks innermost to outermost, declaration order
/// within each block. The same name may appear more than once when an inner
/// declaration shadows an outer one; both are listed.
pub fn enumerate<T>(
    target: &T,
    session: &Session,
    frame: FrameHandle,
    what: ListScope,
    mode: PrintMode,
) -> Result<Vec<VariableRecord>>
where
    T: ScopeSource + ValueSource,
{
    if target.block_at(frame, false).is_none() {
        return Err(StackError::Structural(
            "No symbol table info available.".to_string(),
        ));
    }

    let mut records = Vec::new();
    for (block_id, block) in ScopeChain::for_frame(target, frame) {
        for symbol in &block.symbols {
            session.interrupt.check()?;

            if !is_listable(symbol.storage) || !selected_for(what, symbol) {
                continue;
            }

            // Arguments may appear as placeholder symbols; the canonical
            // definition lives under the same linkage name in the enclosing
            // block. Its absence is a defect in the supplied debug
            // information, not a recoverable condition for this layer.
            let symbol = if symbol.is_argument {
                target
                    .lookup_by_linkage_name(&symbol.linkage_name, block_id)
                    .unwrap_or_else(|| {
                        panic!(
                            "no canonical definition for argument '{}' in its enclosing block",
                            symbol.name
                        )
                    })
            } else {
                symbol
            };

            let (current, entry) = resolve(target, symbol, frame, mode, session.entry_values);
            if current.entry_kind != EntryKind::Only {
                records.push(build_record(target, &current, what, mode, false));
            }
            if entry.entry_kind != EntryKind::No {
                records.push(build_record(target, &entry, what, mode, true));
            }
        }
    }

    debug!(
        "Enumerated {} records for frame {:?} ({:?}, {:?})",
        records.len(),
        frame,
        what,
        mode
    );
    Ok(records)
}

fn build_record<T: ValueSource>(
    target: &T,
    arg: &FrameArg<'_, T::Value>,
    what: ListScope,
    mode: PrintMode,
    entry: bool,
) -> VariableRecord {
    let mut name = arg.symbol.name.clone();
    if entry {
        name.push_str("@entry");
    }

    // The type is rendered in simple-values mode even when the value fetch
    // was skipped (names-plus-types is the point of that mode).
    let type_text =
        (mode == PrintMode::SimpleValues).then(|| target.render_type(arg.symbol));

    let value = arg.outcome.as_ref().map(|outcome| match outcome {
        ValueOutcome::Value(value) => match target.render_value(value) {
            Ok(text) => ValueText::Value(text),
            Err(err) => ValueText::Error(err.0),
        },
        ValueOutcome::Error(message) => ValueText::Error(message.clone()),
    });

    VariableRecord {
        name,
        arg: what == ListScope::All && arg.symbol.is_argument,
        type_text,
        value,
    }
}
