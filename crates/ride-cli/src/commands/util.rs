//! Shared formatting and parsing helpers for CLI commands.

use chrono::{DateTime, SecondsFormat, Utc};

/// Parse an RFC 3339 timestamp such as `2026-01-15T10:30:00Z`.
pub fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s.trim()) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => anyhow::bail!("Invalid datetime: {s} ({e}). Use RFC 3339, e.g. 2026-01-15T10:30:00Z"),
    }
}

/// Format a timestamp as RFC 3339 with second precision and a `Z` suffix.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format seconds as `Xh YYm ZZs`.
pub fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours}h {minutes:02}m {secs:02}s")
}
