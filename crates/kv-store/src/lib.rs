//! Snapshot store for the kv change-tracking engine.
//!
//! Snapshots are numbered directories (`commit/v1`, `commit/v2`, ...), each
//! a complete full copy of the tracked tree at commit time. Committing
//! carries every file of the previous snapshot forward, then overlays the
//! staged files with their current working-tree content. Full-copy storage
//! is a deliberate scope decision; there is no delta or content-addressed
//! layer.
//!
//! # Key Types
//!
//! - [`SnapshotStore`] -- commit numbering, carry-forward, commit, manifest
//! - [`CommitSummary`] -- what a successful commit wrote
//! - [`StoreError`] -- including the partial-commit failure surface

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{CommitSummary, SnapshotStore};
