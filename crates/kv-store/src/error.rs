//! Error types for the snapshot store.

/// Errors from snapshot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A commit failed after its snapshot directory was created. The
    /// directory may be partially populated; the staging ledger has NOT
    /// been cleared, so the commit can be retried once the cause is fixed.
    #[error("commit v{version} aborted, snapshot may be partially written: {reason}")]
    PartialCommit { version: u32, reason: String },

    /// Fingerprinting a snapshot file failed.
    #[error(transparent)]
    Hash(#[from] kv_hash::HashError),

    /// Filesystem failure outside the partial-commit window.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
