//! Persisted fingerprint cache keyed by mtime and size.
//!
//! Status walks the whole working tree on every invocation; without a cache
//! every file would be re-hashed every time. The cache stores one
//! `path;mtime_ns;size;fingerprintHex` line per file and returns the cached
//! fingerprint when both mtime and size still match.
//!
//! The cache is advisory. A missing or unparsable cache file degrades to an
//! empty cache with a logged warning, and deleting the file is always safe.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::{debug, warn};

use kv_types::Fingerprint;

use crate::error::{HashError, HashResult};
use crate::hasher::ContentHasher;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheEntry {
    mtime_ns: u128,
    size: u64,
    fingerprint: Fingerprint,
}

/// Path → (mtime, size, fingerprint) cache persisted in the metadata
/// directory.
#[derive(Debug)]
pub struct HashCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl HashCache {
    /// Load the cache at `path`, degrading to an empty cache on any error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match parse(&text) {
                Some(entries) => entries,
                None => {
                    warn!(cache = %path.display(), "hash cache unparsable; starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!(cache = %path.display(), error = %e, "hash cache unreadable; starting empty");
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Fingerprint the file at `file`, reusing the cached value when the
    /// file's mtime and size both still match the entry under `rel_path`.
    pub fn fingerprint_file(&mut self, rel_path: &str, file: &Path) -> HashResult<Fingerprint> {
        let meta = fs::metadata(file).map_err(|e| HashError::io(file, e))?;
        let stat = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| (d.as_nanos(), meta.len()));

        if let Some((mtime_ns, size)) = stat {
            if let Some(entry) = self.entries.get(rel_path) {
                if entry.mtime_ns == mtime_ns && entry.size == size {
                    debug!(path = rel_path, "fingerprint cache hit");
                    return Ok(entry.fingerprint);
                }
            }
            let fingerprint = ContentHasher::fingerprint_file(file)?;
            self.entries.insert(
                rel_path.to_string(),
                CacheEntry {
                    mtime_ns,
                    size,
                    fingerprint,
                },
            );
            return Ok(fingerprint);
        }

        // No usable mtime on this platform: hash without caching.
        ContentHasher::fingerprint_file(file)
    }

    /// Drop cache entries for paths not in `live`, so deleted files do not
    /// accumulate forever.
    pub fn retain_paths(&mut self, live: &[&str]) {
        let keep: std::collections::HashSet<&str> = live.iter().copied().collect();
        self.entries.retain(|path, _| keep.contains(path.as_str()));
    }

    /// Persist the cache. Entries are written in sorted path order.
    pub fn save(&self) -> HashResult<()> {
        let mut paths: Vec<&String> = self.entries.keys().collect();
        paths.sort();
        let mut out = String::new();
        for path in paths {
            let entry = &self.entries[path];
            out.push_str(&format!(
                "{};{};{};{}\n",
                path,
                entry.mtime_ns,
                entry.size,
                entry.fingerprint.to_hex()
            ));
        }
        fs::write(&self.path, out).map_err(|e| HashError::io(&self.path, e))
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse(text: &str) -> Option<HashMap<String, CacheEntry>> {
    let mut entries = HashMap::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 4 {
            return None;
        }
        let mtime_ns: u128 = fields[1].parse().ok()?;
        let size: u64 = fields[2].parse().ok()?;
        let fingerprint = Fingerprint::from_hex(fields[3]).ok()?;
        entries.insert(
            fields[0].to_string(),
            CacheEntry {
                mtime_ns,
                size,
                fingerprint,
            },
        );
    }
    Some(entries)
}
