//! Staging ledger for the kv change-tracking engine.
//!
//! The ledger is loaded into memory as an ordered collection of
//! [`StageEntry`](kv_types::StageEntry) records, mutated there, and saved
//! back atomically. On disk it stays the line format it has always been:
//! one `;`-delimited record per staged path.
//!
//! # Key Types
//!
//! - [`StagingLedger`] -- the in-memory ledger with path-keyed upsert
//! - [`IndexError`] -- staging and persistence failures

pub mod error;
pub mod ledger;

pub use error::{IndexError, IndexResult};
pub use ledger::StagingLedger;
