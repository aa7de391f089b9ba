//! Error types for status computation.

/// Errors from status computation.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// Walking or reading the working tree failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for status results.
pub type StatusResult<T> = Result<T, StatusError>;
