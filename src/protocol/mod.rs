//! Protocol Module
//!
//! Defines the wire contract for client-server communication: a UTF-8
//! command text in, a JSON envelope out.
//!
//! ## Request Format
//!
//! The request body is the command text itself, passed to the parser
//! unmodified:
//!
//! ```text
//! <line>  ::= <OP> <SP> <arg> (<SP> <arg>)*
//! <OP>    ::= "GET" | "PUT" | "COUNT" | "INC"
//! <text>  ::= <line> ("\n" <line>)*
//! ```
//!
//! No escaping; argument values must not contain a space or newline.
//!
//! ## Response Format
//!
//! One JSON object per request:
//!
//! ```text
//! {"results": ["", "$ok", "value"]}   on success, one string per operation
//! {"error": "line 2: unknown operation \"FOO\""}   on failure
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DiviError, Result};
use crate::plan::OpResult;

/// Decode a request body into command text.
///
/// Rejects oversized bodies before parsing and bodies that are not valid
/// UTF-8. The text is otherwise handed to the parser byte-for-byte.
pub fn decode_body(body: Vec<u8>, max_bytes: usize) -> Result<String> {
    if body.len() > max_bytes {
        return Err(DiviError::Protocol(format!(
            "request body too large: {} bytes (max {})",
            body.len(),
            max_bytes
        )));
    }

    String::from_utf8(body)
        .map_err(|e| DiviError::Protocol(format!("request body is not valid UTF-8: {}", e)))
}

/// A response envelope, rendered as a single JSON object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Successful plan execution: one rendered string per operation, in
    /// plan order
    Ok { results: Vec<String> },

    /// The request failed before execution; no state was touched
    Err { error: String },
}

impl Response {
    /// Build a success response from executor results.
    pub fn from_results(results: &[OpResult]) -> Self {
        Response::Ok {
            results: results.iter().map(OpResult::to_string).collect(),
        }
    }

    /// Build an error response from a request-handling failure.
    pub fn from_error(err: &DiviError) -> Self {
        Response::Err {
            error: err.to_string(),
        }
    }
}
