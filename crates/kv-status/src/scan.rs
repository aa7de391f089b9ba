//! Working-tree scan: build the path → fingerprint map for classification.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use kv_hash::HashCache;
use kv_types::Fingerprint;

use crate::error::StatusResult;

/// Recursively fingerprint every file under `root`, excluding any directory
/// whose name appears in `excludes` (the metadata subtree and
/// version-control directories).
///
/// Fingerprints go through the [`HashCache`], so unchanged files are not
/// re-read across invocations. A file that vanishes or turns unreadable
/// mid-walk is skipped with a warning rather than failing the whole scan.
pub fn scan_working_tree(
    root: &Path,
    excludes: &[&str],
    cache: &mut HashCache,
) -> StatusResult<BTreeMap<String, Fingerprint>> {
    let mut files = BTreeMap::new();
    let walker = WalkDir::new(root).min_depth(1).into_iter();
    for entry in walker.filter_entry(|e| {
        !(e.file_type().is_dir()
            && e.file_name()
                .to_str()
                .map(|name| excludes.contains(&name))
                .unwrap_or(false))
    }) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel: Vec<String> = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let rel = rel.join("/");
        match cache.fingerprint_file(&rel, entry.path()) {
            Ok(fingerprint) => {
                files.insert(rel, fingerprint);
            }
            Err(e) => {
                warn!(path = %rel, error = %e, "skipping unreadable file");
            }
        }
    }
    Ok(files)
}
