//! Error types for the staging ledger.

use kv_types::TypeError;

/// Errors from staging ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The path given to `stage` does not exist in the working tree.
    /// Callers report this and continue with their remaining paths.
    #[error("cannot stage {0}: file does not exist")]
    FileMissing(String),

    /// The path cannot be represented in the ledger line format.
    #[error("invalid path for staging: {0:?}")]
    InvalidPath(String),

    /// A persisted ledger line failed to parse.
    #[error("ledger line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: TypeError,
    },

    /// Fingerprinting the staged file failed.
    #[error(transparent)]
    Hash(#[from] kv_hash::HashError),

    /// Reading or writing the ledger file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for ledger results.
pub type IndexResult<T> = Result<T, IndexError>;
