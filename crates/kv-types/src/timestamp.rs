//! Wall-clock timestamps in the format the ledger has always persisted.

use chrono::{Local, NaiveDateTime};

/// Format of every timestamp written to the staging ledger.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time, formatted for the ledger.
pub fn now_string() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Returns `true` if `s` parses in the ledger timestamp format.
pub fn is_valid(s: &str) -> bool {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).is_ok()
}
