//! Failure-tolerant current/entry value resolution
//!
//! A symbol resolves to at most two printable variants: its current value in
//! the frame, and the value it held at function entry (relevant for
//! arguments that optimized code has overwritten). Read failures are data
//! here, never errors: one inaccessible symbol must not abort the listing of
//! its siblings.

use framescope_target::{FrameHandle, PrintMode, Symbol, ValueSource};

use crate::session::EntryValues;

/// Role of a resolved variant in record emission.
///
/// On the current-value side, `Only` marks a deliberately unread current
/// value whose `@entry` variant stands in for it. On the entry side, `Only`
/// marks a probe that produced something to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKind {
    #[default]
    No,
    Only,
}

/// A value, or the read failure captured in its place. The tagged variant
/// makes the value/error mutual-exclusivity invariant hold by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueOutcome<V> {
    Value(V),
    Error(String),
}

/// One resolved (symbol, outcome) pair, ready for record emission.
///
/// Carries no outcome at all when the print mode asked for none (names-only
/// listings, and aggregates in simple-values mode).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameArg<'a, V> {
    pub symbol: &'a Symbol,
    pub entry_kind: EntryKind,
    pub outcome: Option<ValueOutcome<V>>,
}

impl<'a, V> FrameArg<'a, V> {
    fn empty(symbol: &'a Symbol) -> Self {
        FrameArg {
            symbol,
            entry_kind: EntryKind::No,
            outcome: None,
        }
    }
}

/// Resolve the current and entry-time variants for one symbol.
///
/// No value is fetched in names-only mode, nor for aggregate types in
/// simple-values mode; the entry probe is skipped under the same
/// conditions. Otherwise the current value is read (unless the entry-only
/// policy replaces it) and the entry value is probed independently, each
/// failure being captured on its own variant.
pub fn resolve<'a, T: ValueSource>(
    target: &T,
    symbol: &'a Symbol,
    frame: FrameHandle,
    mode: PrintMode,
    entry_values: EntryValues,
) -> (FrameArg<'a, T::Value>, FrameArg<'a, T::Value>) {
    let mut current = FrameArg::empty(symbol);
    let mut entry = FrameArg::empty(symbol);

    let fetch = match mode {
        PrintMode::NoValues => false,
        PrintMode::SimpleValues => !symbol.type_class.is_aggregate(),
        PrintMode::AllValues => true,
    };
    if !fetch {
        return (current, entry);
    }

    if entry_values != EntryValues::No {
        match target.read_entry_value(symbol, frame) {
            Ok(Some(value)) => {
                entry.entry_kind = EntryKind::Only;
                entry.outcome = Some(ValueOutcome::Value(value));
            }
            // Probe inapplicable for this symbol; nothing to emit.
            Ok(None) => {}
            Err(err) => {
                entry.entry_kind = EntryKind::Only;
                entry.outcome = Some(ValueOutcome::Error(err.0));
            }
        }
    }

    if entry_values == EntryValues::Only && entry.outcome.is_some() {
        // The entry variant stands in for the current value entirely.
        current.entry_kind = EntryKind::Only;
    } else {
        current.outcome = Some(match target.read_current_value(symbol, frame) {
            Ok(value) => ValueOutcome::Value(value),
            Err(err) => ValueOutcome::Error(err.0),
        });
    }

    (current, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use framescope_target::{FrameChain, ScopeSource, SnapshotTarget};

    const SNAPSHOT: &str = r#"{
        "frames": [ { "block": 0, "pc": 100 } ],
        "blocks": [
            { "function_owned": true, "symbols": [
                { "name": "n", "storage": "stack_local", "type": "int",
                  "values": { "0": { "value": "41" } },
                  "entry_values": { "0": { "value": "40" } } },
                { "name": "buf", "storage": "stack_local", "type": "char [16]",
                  "type_class": "array",
                  "values": { "0": { "value": "\"hi\"" } } },
                { "name": "gone", "storage": "register", "type": "long",
                  "values": { "0": { "error": "optimized out" } } }
            ] }
        ]
    }"#;

    fn fixture() -> (SnapshotTarget, FrameHandle) {
        let target = SnapshotTarget::from_json(SNAPSHOT).unwrap();
        let frame = target.current_frame().unwrap();
        (target, frame)
    }

    fn symbol<'a>(target: &'a SnapshotTarget, name: &str) -> &'a Symbol {
        let block = target.block(framescope_target::BlockId(0)).unwrap();
        block.symbols.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_no_values_mode_reads_nothing() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "n");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::NoValues, EntryValues::Both);
        assert_eq!(current.outcome, None);
        assert_eq!(entry.outcome, None);
        assert_eq!(entry.entry_kind, EntryKind::No);
    }

    #[test]
    fn test_simple_mode_skips_aggregates() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "buf");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::SimpleValues, EntryValues::Both);
        assert_eq!(current.outcome, None);
        assert_eq!(entry.outcome, None);

        // All-values mode fetches aggregates regardless.
        let (current, _) = resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::Both);
        assert_eq!(
            current.outcome,
            Some(ValueOutcome::Value("\"hi\"".to_string()))
        );
    }

    #[test]
    fn test_both_resolves_current_and_entry() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "n");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::Both);
        assert_eq!(current.entry_kind, EntryKind::No);
        assert_eq!(current.outcome, Some(ValueOutcome::Value("41".to_string())));
        assert_eq!(entry.entry_kind, EntryKind::Only);
        assert_eq!(entry.outcome, Some(ValueOutcome::Value("40".to_string())));
    }

    #[test]
    fn test_read_failure_is_captured_not_propagated() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "gone");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::Both);
        assert_eq!(
            current.outcome,
            Some(ValueOutcome::Error("optimized out".to_string()))
        );
        assert_eq!(entry.outcome, None);
    }

    #[test]
    fn test_entry_only_policy_suppresses_current() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "n");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::Only);
        assert_eq!(current.entry_kind, EntryKind::Only);
        assert_eq!(current.outcome, None);
        assert_eq!(entry.outcome, Some(ValueOutcome::Value("40".to_string())));

        // Without an entry value the current value is still read.
        let sym = symbol(&target, "gone");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::Only);
        assert_eq!(current.entry_kind, EntryKind::No);
        assert!(current.outcome.is_some());
        assert_eq!(entry.outcome, None);
    }

    #[test]
    fn test_no_entry_policy_skips_probe() {
        let (target, frame) = fixture();
        let sym = symbol(&target, "n");
        let (current, entry) =
            resolve(&target, sym, frame, PrintMode::AllValues, EntryValues::No);
        assert_eq!(current.outcome, Some(ValueOutcome::Value("41".to_string())));
        assert_eq!(entry.entry_kind, EntryKind::No);
        assert_eq!(entry.outcome, None);
    }
}
