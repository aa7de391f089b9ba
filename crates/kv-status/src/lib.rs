//! Status engine for the kv change-tracking engine.
//!
//! Classifies every path across the working tree, the staging ledger, and
//! the latest snapshot into a [`StatusReport`]: staged entries with their
//! derived state, modified/untracked changes, and deleted paths. The staged and
//! snapshot maps win over each other in that priority order; a path absent
//! from both is untracked.
//!
//! # Key Types
//!
//! - [`StatusReport`] -- the full classification result
//! - [`StagedFile`] / [`StagedState`] -- ledger entries with derived state
//! - [`ChangedFile`] / [`ChangeKind`] -- modified and untracked paths
//! - [`scan_working_tree`] -- fingerprint map of the working tree

pub mod classify;
pub mod error;
pub mod report;
pub mod scan;

pub use classify::classify;
pub use error::{StatusError, StatusResult};
pub use report::{ChangeKind, ChangedFile, StagedFile, StagedState, StatusReport};
pub use scan::scan_working_tree;
