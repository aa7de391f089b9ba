//! Error types for fingerprinting operations.

use std::path::PathBuf;

/// Errors from hashing operations.
///
/// A failed hash means the fingerprint for that call is absent. Callers must
/// treat it that way; there is no all-zero "valid" fallback.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The file could not be opened, statted, or read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for hashing results.
pub type HashResult<T> = Result<T, HashError>;
