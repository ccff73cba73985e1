//! Error taxonomy for the stack-inspection layer
//!
//! Only errors that abort a whole command live here. A failed read of one
//! symbol's value is not an error in this sense: it is captured as error text
//! on the affected record and enumeration continues.

/// Command-fatal errors raised by the inspection layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// Malformed command arguments; nothing was executed.
    #[error("{0}")]
    Usage(String),
    /// The frame chain or scope data cannot satisfy the request.
    #[error("{0}")]
    Structural(String),
    /// The frame-filter chain reported a failure (distinct from reporting
    /// that no filters are installed, which falls back to the built-in path).
    #[error("frame filters failed: {0}")]
    Plugin(String),
    /// An external interrupt was observed while walking frames or symbols.
    #[error("interrupted")]
    Interrupted,
}

impl StackError {
    /// Short class tag used by machine-oriented output.
    pub fn class(&self) -> &'static str {
        match self {
            StackError::Usage(_) => "usage",
            StackError::Structural(_) => "structural",
            StackError::Plugin(_) => "plugin",
            StackError::Interrupted => "interrupted",
        }
    }
}

/// Result type used throughout the inspection layer.
pub type Result<T> = std::result::Result<T, StackError>;
