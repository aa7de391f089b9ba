//! Shared value types for the kv change-tracking engine.
//!
//! Everything persisted by kv is built from the types here: the content
//! [`Fingerprint`] used as a change-detection key, the [`StageEntry`] record
//! that makes up the staging ledger, and the wall-clock timestamp format the
//! ledger has always used.
//!
//! # Key Types
//!
//! - [`Fingerprint`] -- 20-byte content digest, hex-encoded when persisted
//! - [`StageEntry`] -- one `;`-delimited ledger record
//! - [`StageMarker`] -- the persisted status marker field
//! - [`TypeError`] -- parse failures for any of the above

pub mod entry;
pub mod error;
pub mod fingerprint;
pub mod timestamp;

pub use entry::{StageEntry, StageMarker};
pub use error::{TypeError, TypeResult};
pub use fingerprint::Fingerprint;
pub use timestamp::{now_string, TIMESTAMP_FORMAT};
