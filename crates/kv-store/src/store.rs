use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use kv_hash::ContentHasher;
use kv_types::{Fingerprint, StageEntry};

use crate::error::{StoreError, StoreResult};

/// What a successful commit wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// The snapshot version that was created.
    pub version: u32,
    /// Number of staged files overlaid into the snapshot.
    pub staged: usize,
    /// Number of files carried forward from the previous snapshot.
    pub carried: u64,
}

/// Store of numbered full-copy snapshot directories.
///
/// Version `N` lives at `<commits_dir>/v<N>`, mirroring working-tree
/// relative paths exactly. Snapshots are immutable once fully written;
/// nothing in the engine ever mutates or deletes one.
#[derive(Debug)]
pub struct SnapshotStore {
    commits_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store over the given commits directory.
    pub fn new(commits_dir: impl Into<PathBuf>) -> Self {
        Self {
            commits_dir: commits_dir.into(),
        }
    }

    /// Count of existing snapshot directories (0 if none).
    pub fn commit_number(&self) -> StoreResult<u32> {
        let dir = match fs::read_dir(&self.commits_dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let mut count = 0;
        for entry in dir {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let is_version = name
                .to_str()
                .and_then(|n| n.strip_prefix('v'))
                .map(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false);
            if is_version {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Directory of snapshot `version`.
    pub fn version_dir(&self, version: u32) -> PathBuf {
        self.commits_dir.join(format!("v{version}"))
    }

    /// Recursively copy every file of snapshot `from` into snapshot `to`,
    /// preserving subdirectory structure. No-op when `from` is 0. Returns
    /// the number of files copied.
    pub fn carry_forward(&self, from: u32, to: u32) -> StoreResult<u64> {
        if from == 0 {
            return Ok(0);
        }
        let from_dir = self.version_dir(from);
        let to_dir = self.version_dir(to);
        let mut copied = 0;
        for entry in WalkDir::new(&from_dir) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&from_dir)
                .map_err(io::Error::other)?;
            let dest = to_dir.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            copied += 1;
        }
        debug!(from, to, copied, "carry-forward complete");
        Ok(copied)
    }

    /// Commit the staged entries as the next snapshot.
    ///
    /// Carries the previous snapshot forward, then overlays each staged
    /// path with its *current* working-tree content under `root`. Any
    /// failure after the snapshot directory exists aborts with
    /// [`StoreError::PartialCommit`]; the caller must not clear the
    /// staging ledger in that case.
    pub fn commit(&self, root: &Path, entries: &[StageEntry]) -> StoreResult<CommitSummary> {
        let version = self.commit_number()? + 1;
        let dir = self.version_dir(version);
        fs::create_dir_all(&dir)?;

        let partial = |reason: String| StoreError::PartialCommit { version, reason };

        let carried = if version > 1 {
            self.carry_forward(version - 1, version)
                .map_err(|e| partial(e.to_string()))?
        } else {
            0
        };

        for entry in entries {
            let source = root.join(&entry.path);
            if !source.is_file() {
                return Err(partial(format!(
                    "staged file {} is missing from the working tree",
                    entry.path
                )));
            }
            let dest = dir.join(&entry.path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| partial(format!("creating parents for {}: {e}", entry.path)))?;
            }
            fs::copy(&source, &dest)
                .map_err(|e| partial(format!("copying {}: {e}", entry.path)))?;
        }

        debug!(version, staged = entries.len(), carried, "snapshot written");
        Ok(CommitSummary {
            version,
            staged: entries.len(),
            carried,
        })
    }

    /// File set of the latest snapshot as tree-relative path →
    /// fingerprint, or `None` when no commit exists yet.
    pub fn manifest(&self) -> StoreResult<Option<BTreeMap<String, Fingerprint>>> {
        match self.commit_number()? {
            0 => Ok(None),
            n => self.manifest_of(n).map(Some),
        }
    }

    /// File set of snapshot `version`, with the version path segment
    /// stripped so paths compare as tree-relative.
    pub fn manifest_of(&self, version: u32) -> StoreResult<BTreeMap<String, Fingerprint>> {
        let dir = self.version_dir(version);
        let mut files = BTreeMap::new();
        for entry in WalkDir::new(&dir) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(&dir).map_err(io::Error::other)?;
            let rel: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let fingerprint = ContentHasher::fingerprint_file(entry.path())?;
            files.insert(rel.join("/"), fingerprint);
        }
        Ok(files)
    }
}
