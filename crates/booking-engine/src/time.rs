//! Interval overlap, timestamp parsing, and timezone-aware rendering.
//!
//! All comparisons happen on `DateTime<Utc>`. The display timezone only
//! enters when a wall-clock value is needed (peak windows, calendar dates,
//! human-readable messages).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{BookingError, Result};

/// Naive layouts accepted by [`parse_timestamp`], tried in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Returns `true` when the half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` share at least one instant.
///
/// Adjacent intervals, where one ends exactly when the other starts, do not
/// overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Render an instant as `hh:mm am` (12-hour clock, two-digit hour) in `zone`.
pub fn to_local_display(timestamp: DateTime<Utc>, zone: Tz) -> String {
    timestamp.with_timezone(&zone).format("%I:%M %P").to_string()
}

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset, e.g. `2026-03-16T10:00:00+05:30` or a
/// trailing `Z`) and naive datetimes (`2026-03-16T10:00:00`, `2026-03-16T10:00`),
/// which are interpreted as UTC.
///
/// # Errors
/// Returns `BookingError::MissingField` for blank input and
/// `BookingError::InvalidTimestamp` for anything unparsable.
pub fn parse_timestamp(raw: &str, field: &'static str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BookingError::MissingField(field));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| BookingError::InvalidTimestamp {
            input: trimmed.to_string(),
            reason: "expected an ISO 8601 datetime such as 2026-03-16T10:00:00Z".to_string(),
        })
}

/// Parse a calendar date (`YYYY-MM-DD`).
///
/// A full datetime is also accepted and yields the date it falls on in
/// `zone`.
pub fn parse_date(raw: &str, zone: Tz) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_timestamp(trimmed, "date")
        .map(|dt| dt.with_timezone(&zone).date_naive())
        .map_err(|_| BookingError::InvalidDate(trimmed.to_string()))
}

/// Resolve a wall-clock time in `zone` to a UTC instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times that do
/// not exist (DST spring-forward gap) are shifted forward by one hour.
pub fn resolve_local(zone: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            match zone.from_local_datetime(&shifted).earliest() {
                Some(dt) => dt.with_timezone(&Utc),
                // No zone in the tz database has back-to-back gaps; treat the
                // wall-clock value as UTC rather than fail.
                None => naive.and_utc(),
            }
        }
    }
}
