//! Session-scoped inspection state
//!
//! One `Session` is created when the command interface comes up and is
//! threaded through every command entry point; there is no global state.

use framescope_target::InterruptToken;

/// How entry-time values participate in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryValues {
    /// Never probe for entry values.
    No,
    /// Probe for entry values independently of the current value; emit the
    /// `@entry` variant alongside the current record when the probe yields
    /// a value or an error.
    #[default]
    Both,
    /// Prefer the entry value: when the probe yields one, the current value
    /// is not read and only the `@entry` record is emitted.
    Only,
}

/// Per-session inspection context.
#[derive(Debug, Clone, Default)]
pub struct Session {
    frame_filters: bool,
    pub entry_values: EntryValues,
    pub interrupt: InterruptToken,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow frame-filter delegation for the rest of the session. One-way
    /// latch: there is deliberately no way to switch it back off, only the
    /// per-request opt-out.
    pub fn enable_frame_filters(&mut self) {
        self.frame_filters = true;
    }

    pub fn frame_filters_enabled(&self) -> bool {
        self.frame_filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_filters_latch() {
        let mut session = Session::new();
        assert!(!session.frame_filters_enabled());
        session.enable_frame_filters();
        assert!(session.frame_filters_enabled());
        // Enabling again is idempotent.
        session.enable_frame_filters();
        assert!(session.frame_filters_enabled());
    }
}
