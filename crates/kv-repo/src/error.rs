//! Error types for repository discovery and locking.

use std::path::PathBuf;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No metadata subtree was found at the start directory or any of the
    /// searched ancestor levels.
    #[error("no kv repository found (searched {} and its ancestors)", .start.display())]
    NotFound { start: PathBuf },

    /// Another process holds the repository lock.
    #[error("repository is locked ({} exists; another kv process may be running)", .lock.display())]
    Locked { lock: PathBuf },

    /// The given path does not live under the repository root.
    #[error("path is outside the repository: {}", .path.display())]
    OutsideRoot { path: PathBuf },

    /// Filesystem failure while discovering, bootstrapping, or locking.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for repository results.
pub type RepoResult<T> = Result<T, RepoError>;
