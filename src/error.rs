//! Error types for nkv-client
//!
//! Provides a unified error type for all operations.
//!
//! The taxonomy mirrors the wire contract: `Io` covers transport failures
//! (dial/write/read), while `Framing`, `Payload`, and `Status` are the three
//! distinguishable ways a single decode can fail.

use thiserror::Error;

/// Result type alias using NkvError
pub type Result<T> = std::result::Result<T, NkvError>;

/// Unified error type for nkv-client operations
#[derive(Debug, Error)]
pub enum NkvError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// A line had too few whitespace-separated fields
    #[error("framing error: expected at least {expected} fields, got {got}")]
    Framing { expected: usize, got: usize },

    /// A payload field was not valid base64
    #[error("invalid base64 payload: {0}")]
    Payload(#[from] base64::DecodeError),

    /// A response status token was neither OK nor FAILED
    #[error("unrecognized response status: expected OK or FAILED, got {0}")]
    Status(String),
}
