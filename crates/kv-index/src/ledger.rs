use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use kv_hash::ContentHasher;
use kv_types::StageEntry;

use crate::error::{IndexError, IndexResult};

/// The staging ledger, loaded into memory.
///
/// Entries keep insertion order, which is also display order for status
/// reporting. At most one entry exists per path: re-staging replaces the
/// old entry and moves the path to the end, matching the ledger's
/// historical delete-then-append behavior.
#[derive(Debug)]
pub struct StagingLedger {
    path: PathBuf,
    entries: Vec<StageEntry>,
}

impl StagingLedger {
    /// Load the ledger file at `path`. A missing or zero-byte file loads
    /// as an empty ledger.
    pub fn load(path: impl Into<PathBuf>) -> IndexResult<Self> {
        let path = path.into();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(IndexError::Io(e)),
        };

        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let entry = StageEntry::parse_line(line).map_err(|source| IndexError::Parse {
                line: i + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(Self { path, entries })
    }

    /// Stage the working-tree file at `rel_path` (relative to `root`).
    ///
    /// Fingerprints the file's current content and upserts a record marked
    /// `created`. A missing file is [`IndexError::FileMissing`]; callers
    /// report it and continue with their remaining paths.
    pub fn stage(&mut self, root: &Path, rel_path: &str) -> IndexResult<&StageEntry> {
        if rel_path.is_empty() || rel_path.contains(';') || rel_path.contains('\n') {
            return Err(IndexError::InvalidPath(rel_path.to_string()));
        }
        let file = root.join(rel_path);
        if !file.is_file() {
            return Err(IndexError::FileMissing(rel_path.to_string()));
        }
        let fingerprint = ContentHasher::fingerprint_file(&file)?;
        debug!(path = rel_path, fingerprint = %fingerprint.short_hex(), "staged");
        self.upsert(StageEntry::new(rel_path, fingerprint));
        Ok(self.entries.last().expect("entry just pushed"))
    }

    /// Insert an entry, replacing any existing entry for the same path.
    pub fn upsert(&mut self, entry: StageEntry) {
        self.entries.retain(|e| e.path != entry.path);
        self.entries.push(entry);
    }

    /// The staged entry for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&StageEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the ledger back to disk atomically: the new content goes to a
    /// temporary file in the same directory, which then replaces the ledger
    /// in one rename.
    pub fn save(&self) -> IndexResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| IndexError::InvalidPath(self.path.display().to_string()))?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        for entry in &self.entries {
            writeln!(tmp, "{}", entry.to_line())?;
        }
        tmp.persist(&self.path).map_err(|e| IndexError::Io(e.error))?;
        Ok(())
    }

    /// Truncate the ledger to empty, in memory and on disk. Invoked only
    /// after a successful commit.
    pub fn clear(&mut self) -> IndexResult<()> {
        self.entries.clear();
        self.save()
    }
}
