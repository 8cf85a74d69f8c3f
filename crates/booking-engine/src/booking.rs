//! The booking record and its status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, Result};

/// Lifecycle state of a booking. The only transition is
/// `Confirmed -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_active(self) -> bool {
        self == BookingStatus::Confirmed
    }
}

/// An accepted booking.
///
/// Fields are read-only outside the crate. Bookings are produced by
/// [`BookingLedger::create_booking`](crate::ledger::BookingLedger::create_booking)
/// and the only mutation is cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    booking_id: Uuid,
    room_id: String,
    user_name: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    total_price: f64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    pub(crate) fn confirmed(
        room_id: String,
        user_name: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        total_price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            booking_id: Uuid::new_v4(),
            room_id,
            user_name,
            start_time,
            end_time,
            total_price,
            status: BookingStatus::Confirmed,
            created_at,
        }
    }

    /// Move to `Cancelled`. Fails if already cancelled; nothing else changes.
    pub(crate) fn cancel(&mut self) -> Result<()> {
        match self.status {
            BookingStatus::Confirmed => {
                self.status = BookingStatus::Cancelled;
                Ok(())
            }
            BookingStatus::Cancelled => Err(BookingError::AlreadyCancelled),
        }
    }

    pub fn booking_id(&self) -> Uuid {
        self.booking_id
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Length of the booking in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 3_600_000.0
    }
}

/// A create request as it arrives from the outside: raw strings, any of
/// which may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub room_id: String,
    pub user_name: String,
    pub start_time: String,
    pub end_time: String,
}

impl BookingRequest {
    pub fn new(
        room_id: impl Into<String>,
        user_name: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            user_name: user_name.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Reject blank required fields, reporting the first one found.
    pub fn require_fields(&self) -> Result<()> {
        let fields: [(&'static str, &str); 4] = [
            ("roomId", &self.room_id),
            ("userName", &self.user_name),
            ("startTime", &self.start_time),
            ("endTime", &self.end_time),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(BookingError::MissingField(*name)),
            None => Ok(()),
        }
    }
}
