//! Status report types.
//!
//! The report is ordered the way it is rendered: ledger entries first (when
//! any are staged), then modified/untracked changes (only once a commit
//! exists to compare against), then deleted paths (always).

use serde::Serialize;

use kv_types::Fingerprint;

/// State of a staged entry, derived at report time by comparing its
/// fingerprint against the latest snapshot. The persisted marker field is
/// ignored here: it always says `created`, whatever the path's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StagedState {
    /// The path does not exist in the latest snapshot (or there is none).
    Created,
    /// The path exists in the latest snapshot with different content.
    Modified,
    /// The staged content is identical to the latest snapshot's.
    Unchanged,
}

impl StagedState {
    /// Lowercase label used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            StagedState::Created => "created",
            StagedState::Modified => "modified",
            StagedState::Unchanged => "unchanged",
        }
    }
}

/// One ledger entry with its derived state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StagedFile {
    pub path: String,
    pub timestamp: String,
    pub fingerprint: Fingerprint,
    pub state: StagedState,
}

/// Kind of an unstaged change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Content differs from the staged or snapshot fingerprint.
    Modified,
    /// Present in the working tree, absent from ledger and snapshot.
    Untracked,
}

impl ChangeKind {
    /// Lowercase label used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Modified => "modified",
            ChangeKind::Untracked => "untracked",
        }
    }
}

/// A modified or untracked working-tree path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    pub path: String,
    pub kind: ChangeKind,
}

/// Complete status classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Ledger entries in insertion order, with derived states.
    pub staged: Vec<StagedFile>,
    /// Modified and untracked paths. Empty when no commit exists yet;
    /// there is nothing to compare the tree against.
    pub changes: Vec<ChangedFile>,
    /// Paths present in the ledger or the latest snapshot but gone from
    /// the working tree. Each path appears once.
    pub deleted: Vec<String>,
    /// Whether at least one snapshot exists.
    pub has_commits: bool,
}

impl StatusReport {
    /// Returns `true` if there is nothing to report.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.changes.is_empty() && self.deleted.is_empty()
    }
}
