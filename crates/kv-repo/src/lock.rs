//! Exclusive repository lock.
//!
//! The ledger is read, rewritten in memory, and saved back; two concurrent
//! mutating invocations would race on it (and on snapshot directory
//! creation). Mutating commands therefore hold an exclusive lock file for
//! their whole run. `status` is read-only and does not lock.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RepoError, RepoResult};

/// Guard for the repository lock file. The lock is released on drop.
#[derive(Debug)]
pub struct RepoLock {
    path: PathBuf,
}

impl RepoLock {
    /// Acquire the lock by creating the lock file exclusively.
    ///
    /// Fails with [`RepoError::Locked`] when the file already exists. A
    /// stale lock left behind by a killed process must be removed by the
    /// operator.
    pub fn acquire(path: &Path) -> RepoResult<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    RepoError::Locked {
                        lock: path.to_path_buf(),
                    }
                } else {
                    RepoError::Io(e)
                }
            })?;
        let _ = writeln!(file, "{}", std::process::id());
        debug!(lock = %path.display(), "lock acquired");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(lock = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock");
        let _guard = RepoLock::acquire(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn second_acquire_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock");
        let _guard = RepoLock::acquire(&path).unwrap();
        assert!(matches!(
            RepoLock::acquire(&path),
            Err(RepoError::Locked { .. })
        ));
    }

    #[test]
    fn drop_releases_the_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock");
        {
            let _guard = RepoLock::acquire(&path).unwrap();
        }
        assert!(!path.exists());
        let _guard = RepoLock::acquire(&path).unwrap();
    }
}
