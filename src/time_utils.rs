// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time as RFC3339 with a `Z` suffix.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Format an RFC3339 timestamp as a human-readable date ("January 5, 2026").
///
/// Falls back to the raw string if it does not parse.
pub fn format_display_date(rfc3339: &str) -> String {
    match DateTime::parse_from_rfc3339(rfc3339) {
        Ok(dt) => dt.format("%B %-d, %Y").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}
