//! Reset timestamps reported by provider quota APIs.
//!
//! Providers report when a quota window resets as an ISO 8601 string. This
//! module parses those strings and renders them either as a countdown
//! ("1h 30m", "now") or as a local date and time.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::time::Duration;

/// An absolute reset instant in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResetTimestamp(DateTime<Utc>);

impl ResetTimestamp {
    #[cfg(test)]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Parses an RFC 3339 timestamp ("2026-01-25T14:35:08Z").
    ///
    /// A bare date ("2026-02-01") is accepted as midnight UTC, which is how
    /// GitHub reports monthly quota resets.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
    }

    #[cfg(test)]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the time left until this timestamp, or None if already past.
    pub fn duration_from(&self, now: DateTime<Utc>) -> Option<Duration> {
        (self.0 - now).to_std().ok().filter(|d| !d.is_zero())
    }

    /// Renders the reset instant in the local time zone, e.g. "2/1/2026 09:00 AM".
    pub fn format_local(&self) -> String {
        self.0
            .with_timezone(&Local)
            .format("%-m/%-d/%Y %I:%M %p")
            .to_string()
    }
}

/// Formats the time remaining until `iso_time` as "Xh Ym", "Ym" or "now".
///
/// Strings that don't parse as a timestamp are returned unchanged.
pub fn format_reset_time(iso_time: &str) -> String {
    format_reset_time_at(iso_time, Utc::now())
}

pub fn format_reset_time_at(iso_time: &str, now: DateTime<Utc>) -> String {
    let Some(reset) = ResetTimestamp::parse(iso_time) else {
        return iso_time.to_string();
    };
    match reset.duration_from(now) {
        Some(remaining) => format_remaining(remaining),
        None => "now".to_string(),
    }
}

/// Hours are only shown when at least one full hour remains; minutes are
/// truncated, not rounded.
fn format_remaining(remaining: Duration) -> String {
    let total_secs = remaining.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
#[path = "tests/usage_reset_tests.rs"]
mod tests;
