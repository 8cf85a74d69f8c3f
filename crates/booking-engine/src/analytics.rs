//! Per-room usage and revenue over a calendar date range.
//!
//! A pure fold over a bookings snapshot joined with the room catalog. Stored
//! booking values are never modified; rounding is applied only to the output.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};
use crate::catalog::Room;
use crate::error::{BookingError, Result};
use crate::pricing::round_to;
use crate::time::{parse_date, resolve_local};

/// Aggregated usage for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUsage {
    pub room_id: String,
    pub room_name: String,
    /// Booked hours, rounded to 1 decimal place.
    pub total_hours: f64,
    /// Revenue, rounded to 2 decimal places.
    pub total_revenue: f64,
}

/// Inclusive calendar date range for an analytics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl AnalyticsRange {
    /// Parse raw `from`/`to` query values. Datetime values are reduced to
    /// their calendar date in `zone`.
    ///
    /// # Errors
    /// `BookingError::MissingDateRange` if either is absent or blank,
    /// `BookingError::InvalidDate` if either does not parse.
    pub fn parse(from: Option<&str>, to: Option<&str>, zone: Tz) -> Result<Self> {
        let (from, to) = match (from, to) {
            (Some(f), Some(t)) if !f.trim().is_empty() && !t.trim().is_empty() => (f, t),
            _ => return Err(BookingError::MissingDateRange),
        };
        Ok(Self {
            from: parse_date(from, zone)?,
            to: parse_date(to, zone)?,
        })
    }

    /// The instants bounding this range in `zone`: local midnight of `from`
    /// through 23:59:59.999 local on `to`, both inclusive.
    pub fn bounds(&self, zone: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = resolve_local(zone, self.from.and_time(NaiveTime::default()));
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
        let end = resolve_local(zone, self.to.and_time(end_of_day));
        (start, end)
    }
}

#[derive(Default)]
struct Totals {
    hours: f64,
    revenue: f64,
}

/// Aggregate confirmed bookings whose start falls inside `range`.
///
/// Groups are joined against `rooms`; groups whose room id is unknown are
/// dropped. Output is sorted by room id.
pub fn generate_analytics(
    bookings: &[Booking],
    rooms: &[Room],
    range: AnalyticsRange,
    zone: Tz,
) -> Vec<RoomUsage> {
    let (window_start, window_end) = range.bounds(zone);

    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();
    for booking in bookings
        .iter()
        .filter(|b| b.status() == BookingStatus::Confirmed)
        .filter(|b| b.start_time() >= window_start && b.start_time() <= window_end)
    {
        let entry = totals.entry(booking.room_id()).or_default();
        entry.hours += booking.duration_hours();
        entry.revenue += booking.total_price();
    }

    totals
        .into_iter()
        .filter_map(|(room_id, t)| {
            let Some(room) = rooms.iter().find(|r| r.id == room_id) else {
                tracing::warn!(room_id, "analytics group has no catalog entry; dropped");
                return None;
            };
            Some(RoomUsage {
                room_id: room_id.to_string(),
                room_name: room.name.clone(),
                total_hours: round_to(t.hours, 1),
                total_revenue: round_to(t.revenue, 2),
            })
        })
        .collect()
}
