//! Time-banded pricing.
//!
//! The interval `[start, end)` is cut into slots at every wall-clock hour mark
//! of the policy's display timezone. Each slot is charged at the base hourly
//! rate, times the peak multiplier when the slot's start instant is peak, and
//! prorated by the slot's length. The total is rounded once, at the end.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;

use crate::error::{BookingError, Result};
use crate::policy::BookingPolicy;

const SECONDS_PER_HOUR: i64 = 3600;

/// One hour-aligned piece of a priced interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Slot length in (fractional) hours.
    pub hours: f64,
    pub peak: bool,
    /// Effective hourly rate for this slot.
    pub rate: f64,
    /// `rate * hours`, unrounded.
    pub amount: f64,
}

/// Full price breakdown for an interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_hourly_rate: f64,
    pub slots: Vec<PriceSlot>,
    /// Sum of slot amounts rounded to 2 decimal places.
    pub total: f64,
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Price `[start, end)` at `base_hourly_rate`, with the per-slot breakdown.
///
/// The breakdown holds one slot per hour, so the interval is capped at the
/// policy's maximum booking duration.
///
/// # Errors
/// Returns `BookingError::StartNotBeforeEnd` when `end <= start` and
/// `BookingError::DurationExceeded` when the interval is longer than
/// `policy.max_duration()`.
pub fn quote(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    base_hourly_rate: f64,
    policy: &BookingPolicy,
) -> Result<PriceQuote> {
    if end <= start {
        return Err(BookingError::StartNotBeforeEnd);
    }
    if end - start > policy.max_duration() {
        return Err(BookingError::DurationExceeded {
            max_hours: policy.max_duration().num_hours(),
        });
    }

    let slots: Vec<PriceSlot> = slots(start, end, base_hourly_rate, policy).collect();
    let total = round_to(slots.iter().map(|s| s.amount).sum(), 2);
    Ok(PriceQuote {
        base_hourly_rate,
        slots,
        total,
    })
}

/// Total price of `[start, end)`, rounded to 2 decimal places.
///
/// Unlike [`quote`] this keeps no breakdown and accepts intervals of any
/// length.
///
/// # Errors
/// Returns `BookingError::StartNotBeforeEnd` when `end <= start`.
pub fn calculate_price(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    base_hourly_rate: f64,
    policy: &BookingPolicy,
) -> Result<f64> {
    if end <= start {
        return Err(BookingError::StartNotBeforeEnd);
    }
    let sum: f64 = slots(start, end, base_hourly_rate, policy)
        .map(|s| s.amount)
        .sum();
    Ok(round_to(sum, 2))
}

/// Lazily cut `[start, end)` at local hour marks and price each piece.
fn slots(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    base_hourly_rate: f64,
    policy: &BookingPolicy,
) -> impl Iterator<Item = PriceSlot> + '_ {
    let mut cursor = start;
    std::iter::from_fn(move || {
        if cursor >= end {
            return None;
        }
        let slot_end = next_hour_mark(cursor, policy).min(end);
        let hours = (slot_end - cursor).num_milliseconds() as f64 / 3_600_000.0;
        let peak = policy.is_peak(cursor);
        let rate = if peak {
            base_hourly_rate * policy.peak_multiplier()
        } else {
            base_hourly_rate
        };
        let slot = PriceSlot {
            start: cursor,
            end: slot_end,
            hours,
            peak,
            rate,
            amount: rate * hours,
        };
        cursor = slot_end;
        Some(slot)
    })
}

/// The first local hour mark strictly after `instant`.
///
/// Works on elapsed time within the local hour so that zones with
/// half-hour offsets (Asia/Kolkata) cut at their own hour marks.
fn next_hour_mark(instant: DateTime<Utc>, policy: &BookingPolicy) -> DateTime<Utc> {
    let local = instant.with_timezone(&policy.display_timezone());
    let elapsed = Duration::seconds(i64::from(local.minute() * 60 + local.second()))
        + Duration::nanoseconds(i64::from(local.nanosecond() % 1_000_000_000));
    instant + (Duration::seconds(SECONDS_PER_HOUR) - elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kolkata_hour_marks_fall_on_utc_half_hours() {
        let policy = BookingPolicy::default();
        // 04:00Z is 09:30 IST; the next IST hour mark is 10:00 IST = 04:30Z.
        let t = Utc.with_ymd_and_hms(2026, 3, 16, 4, 0, 0).unwrap();
        assert_eq!(
            next_hour_mark(t, &policy),
            Utc.with_ymd_and_hms(2026, 3, 16, 4, 30, 0).unwrap()
        );
    }

    #[test]
    fn exact_hour_mark_advances_a_full_hour() {
        let policy = BookingPolicy::default();
        let t = Utc.with_ymd_and_hms(2026, 3, 16, 4, 30, 0).unwrap();
        assert_eq!(next_hour_mark(t, &policy), t + Duration::hours(1));
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(12.345_678, 1), 12.3);
    }
}
