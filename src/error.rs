//! Error types for DiVI
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DiviError
pub type Result<T> = std::result::Result<T, DiviError>;

/// Unified error type for DiVI operations
#[derive(Debug, Error)]
pub enum DiviError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Compile Errors
    // -------------------------------------------------------------------------
    #[error("line {line}: empty operation")]
    MalformedLine { line: usize },

    #[error("line {line}: unknown operation {op:?}")]
    UnknownOp { op: String, line: usize },

    #[error("line {line}: {op} takes {expected} argument(s), got {actual}")]
    Arity {
        op: &'static str,
        expected: usize,
        actual: usize,
        line: usize,
    },

    #[error("empty plan")]
    EmptyPlan,

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DiviError {
    /// Whether the error is the caller's fault (bad request text) rather
    /// than a server-side failure. The front end uses this to pick the
    /// response it sends back.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DiviError::MalformedLine { .. }
                | DiviError::UnknownOp { .. }
                | DiviError::Arity { .. }
                | DiviError::EmptyPlan
                | DiviError::Protocol(_)
        )
    }
}
