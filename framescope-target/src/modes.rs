//! Listing verbosity modes

use serde::{Deserialize, Serialize};

/// Verbosity of a variable listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    /// Names only; no type or value is produced and no read is attempted.
    NoValues,
    /// Names and types; values only for non-aggregate types.
    SimpleValues,
    /// Values are attempted unconditionally, regardless of type.
    AllValues,
}

impl PrintMode {
    /// Parse a machine-interface print-mode token. Both the numeric and the
    /// long-option spellings are accepted.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "0" | "--no-values" => Some(PrintMode::NoValues),
            "1" | "--all-values" => Some(PrintMode::AllValues),
            "2" | "--simple-values" => Some(PrintMode::SimpleValues),
            _ => None,
        }
    }
}
