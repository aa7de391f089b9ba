//! Repository discovery and metadata layout for the kv engine.
//!
//! A repository root is any directory containing the `.kv` metadata subtree.
//! Discovery checks the starting directory and up to five ancestor levels;
//! absence is the distinct [`RepoError::NotFound`], never an empty path.
//! Every other component receives its paths from a [`Repository`] value;
//! nothing in the engine reads or mutates the process-wide current directory
//! after discovery.
//!
//! # Key Types
//!
//! - [`Repository`] -- discovered root plus derived metadata paths
//! - [`InitOutcome`] -- idempotent bootstrap result
//! - [`RepoLock`] -- exclusive lock held by mutating operations

pub mod error;
pub mod lock;
pub mod repo;

pub use error::{RepoError, RepoResult};
pub use lock::RepoLock;
pub use repo::{InitOutcome, Repository, CACHE_FILE, COMMITS_DIR, LEDGER_FILE, LOCK_FILE, META_DIR};
