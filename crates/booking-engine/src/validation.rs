//! Booking-time and cancellation-window rules.
//!
//! Both checks are pure functions of the booking's times, an injected `now`,
//! and the policy limits.

use chrono::{DateTime, Utc};

use crate::error::{BookingError, Result};
use crate::policy::BookingPolicy;

/// Check a requested `[start, end)` against the booking rules.
///
/// Rules, in order: `start` must precede `end`; `start` must not be before
/// `now`; the duration must not exceed the policy maximum (a booking of
/// exactly the maximum is allowed).
pub fn validate_booking_times(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &BookingPolicy,
) -> Result<()> {
    if start >= end {
        return Err(BookingError::StartNotBeforeEnd);
    }
    if start < now {
        return Err(BookingError::StartInPast);
    }
    if end - start > policy.max_duration() {
        return Err(BookingError::DurationExceeded {
            max_hours: policy.max_duration().num_hours(),
        });
    }
    Ok(())
}

/// Check whether a booking starting at `start` may still be cancelled.
///
/// Rejected when the remaining notice is at or below the policy minimum.
pub fn can_cancel(start: DateTime<Utc>, now: DateTime<Utc>, policy: &BookingPolicy) -> Result<()> {
    if start - now <= policy.min_cancellation_notice() {
        return Err(BookingError::CancellationWindowClosed {
            min_hours: policy.min_cancellation_notice().num_hours(),
        });
    }
    Ok(())
}
