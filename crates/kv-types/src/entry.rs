//! Staging ledger records.
//!
//! Each staged file is one line in the ledger:
//! `relativePath;timestamp;fingerprintHex;statusMarker`. The path field can
//! never contain `;` or a newline (staging rejects such paths), so a plain
//! field split is unambiguous.

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::fingerprint::Fingerprint;
use crate::timestamp;

/// The persisted status marker field of a ledger record.
///
/// Staging always writes [`StageMarker::Created`], whatever the path's
/// history; the field is format compatibility, not truth. The real
/// created/modified classification is derived at status time by comparing
/// fingerprints against the latest snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageMarker {
    Created,
    Modified,
}

impl StageMarker {
    /// The marker as persisted in the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageMarker::Created => "created",
            StageMarker::Modified => "modified",
        }
    }

    /// Parse a persisted marker field.
    pub fn parse(s: &str) -> TypeResult<Self> {
        match s {
            "created" => Ok(StageMarker::Created),
            "modified" => Ok(StageMarker::Modified),
            other => Err(TypeError::UnknownMarker(other.to_string())),
        }
    }
}

/// One record in the staging ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntry {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    /// Wall-clock time the path was staged, in ledger format.
    pub timestamp: String,
    /// Fingerprint of the file content at stage time.
    pub fingerprint: Fingerprint,
    /// Persisted status marker (always `created` when written by staging).
    pub marker: StageMarker,
}

impl StageEntry {
    /// Create a record for a path staged right now.
    pub fn new(path: impl Into<String>, fingerprint: Fingerprint) -> Self {
        Self {
            path: path.into(),
            timestamp: timestamp::now_string(),
            fingerprint,
            marker: StageMarker::Created,
        }
    }

    /// Encode as one ledger line (without trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{};{};{};{}",
            self.path,
            self.timestamp,
            self.fingerprint.to_hex(),
            self.marker.as_str()
        )
    }

    /// Parse one ledger line.
    pub fn parse_line(line: &str) -> TypeResult<Self> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() != 4 {
            return Err(TypeError::MalformedRecord(format!(
                "expected 4 fields, got {}",
                fields.len()
            )));
        }
        if fields[0].is_empty() {
            return Err(TypeError::MalformedRecord("empty path field".to_string()));
        }
        Ok(Self {
            path: fields[0].to_string(),
            timestamp: fields[1].to_string(),
            fingerprint: Fingerprint::from_hex(fields[2])?,
            marker: StageMarker::parse(fields[3])?,
        })
    }
}
