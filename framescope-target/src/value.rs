//! Value reading and rendering interfaces

use crate::{FrameHandle, Symbol};

/// A failed memory/register/type access while reading or rendering one
/// value. Recoverable by design: the enumeration layer captures it as error
/// text on the affected record and moves on to the next symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ReadError(pub String);

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        ReadError(message.into())
    }
}

/// Access to variable values in the target, supplied by the value-reading
/// collaborator.
///
/// Values are opaque to the inspection layer; only `render_value` interprets
/// them. Reads are synchronous and may be expensive (memory or register
/// access against a live process).
pub trait ValueSource {
    /// Opaque value payload produced by this source.
    type Value;

    /// Read the symbol's value in the given frame.
    fn read_current_value(&self, symbol: &Symbol, frame: FrameHandle)
        -> Result<Self::Value, ReadError>;

    /// Probe for the value the symbol held at function entry. `Ok(None)`
    /// means the probe is inapplicable for this symbol (language or
    /// debug-info combination does not track entry values).
    fn read_entry_value(
        &self,
        symbol: &Symbol,
        frame: FrameHandle,
    ) -> Result<Option<Self::Value>, ReadError>;

    /// Render the symbol's type as source-level text.
    fn render_type(&self, symbol: &Symbol) -> String;

    /// Render a value as source-level text.
    fn render_value(&self, value: &Self::Value) -> Result<String, ReadError>;
}
