//! Error types for parsing persisted values.

/// Errors that can occur while parsing persisted value types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// A fingerprint field was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A fingerprint had the wrong digest length.
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A ledger line did not have the expected field layout.
    #[error("malformed ledger record: {0}")]
    MalformedRecord(String),

    /// The status marker field held an unrecognized value.
    #[error("unknown status marker: {0}")]
    UnknownMarker(String),
}

/// Convenience alias for parse results.
pub type TypeResult<T> = Result<T, TypeError>;
