//! Content fingerprinting for the kv change-tracking engine.
//!
//! Fingerprints are whole-file SHA-1 digests, order-sensitive over the full
//! byte content. They only need determinism and a low accidental-collision
//! probability; nothing here defends against adversarial input.
//!
//! # Key Types
//!
//! - [`ContentHasher`] -- streaming whole-file hashing
//! - [`HashCache`] -- persisted mtime+size cache that skips re-hashing
//!   unchanged files
//! - [`HashError`] -- I/O failures carrying the offending path

pub mod cache;
pub mod error;
pub mod hasher;

pub use cache::HashCache;
pub use error::{HashError, HashResult};
pub use hasher::ContentHasher;
