//! JSON result framing
//!
//! One command in, one JSON object out: the tagged [`Response`] on success,
//! or an error object carrying the taxonomy class and message.

use framescope_target::StackError;
use serde_json::json;

use crate::dispatch::Response;

/// Render a command outcome as its wire object.
pub fn render(outcome: &Result<Response, StackError>) -> serde_json::Value {
    match outcome {
        Ok(response) => serde_json::to_value(response).unwrap_or_else(|err| {
            json!({ "class": "error", "kind": "internal", "message": err.to_string() })
        }),
        Err(err) => json!({
            "class": "error",
            "kind": err.class(),
            "message": err.to_string(),
        }),
    }
}
