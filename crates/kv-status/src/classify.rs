//! Three-way classification of working tree, staging ledger, and latest
//! snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use kv_types::{Fingerprint, StageEntry};

use crate::report::{ChangeKind, ChangedFile, StagedFile, StagedState, StatusReport};

/// Classify every path across the three inputs.
///
/// `snapshot` is `None` when no commit exists yet; the snapshot comparison
/// is then skipped entirely and the changes section stays empty (there is
/// no baseline to call anything modified or untracked against). The
/// deletion pass always runs: a path in the ledger or the snapshot that is
/// gone from the working tree is reported deleted, once.
pub fn classify(
    working: &BTreeMap<String, Fingerprint>,
    staged: &[StageEntry],
    snapshot: Option<&BTreeMap<String, Fingerprint>>,
) -> StatusReport {
    let staged_by_path: HashMap<&str, &Fingerprint> = staged
        .iter()
        .map(|e| (e.path.as_str(), &e.fingerprint))
        .collect();

    // Ledger section, in insertion order, with states derived against the
    // snapshot rather than read from the persisted marker.
    let staged_files = staged
        .iter()
        .map(|entry| {
            let state = match snapshot.and_then(|snap| snap.get(&entry.path)) {
                None => StagedState::Created,
                Some(f) if *f == entry.fingerprint => StagedState::Unchanged,
                Some(_) => StagedState::Modified,
            };
            StagedFile {
                path: entry.path.clone(),
                timestamp: entry.timestamp.clone(),
                fingerprint: entry.fingerprint,
                state,
            }
        })
        .collect();

    // Per working path, staged fingerprints win over snapshot fingerprints.
    let mut changes = Vec::new();
    if let Some(snap) = snapshot {
        for (path, fingerprint) in working {
            if let Some(staged_fp) = staged_by_path.get(path.as_str()) {
                if *staged_fp != fingerprint {
                    changes.push(ChangedFile {
                        path: path.clone(),
                        kind: ChangeKind::Modified,
                    });
                }
                continue;
            }
            match snap.get(path) {
                Some(f) if f == fingerprint => {}
                Some(_) => changes.push(ChangedFile {
                    path: path.clone(),
                    kind: ChangeKind::Modified,
                }),
                None => changes.push(ChangedFile {
                    path: path.clone(),
                    kind: ChangeKind::Untracked,
                }),
            }
        }
    }

    // Deletion pass over staged ∪ snapshot; the set de-duplicates paths
    // present in both.
    let mut candidates: BTreeSet<&str> = staged_by_path.keys().copied().collect();
    if let Some(snap) = snapshot {
        candidates.extend(snap.keys().map(String::as_str));
    }
    let deleted = candidates
        .into_iter()
        .filter(|path| !working.contains_key(*path))
        .map(str::to_string)
        .collect();

    StatusReport {
        staged: staged_files,
        changes,
        deleted,
        has_commits: snapshot.is_some(),
    }
}
