//! Error types for booking-engine operations.
//!
//! Every expected outcome of a booking operation that is not a success is a
//! variant here: malformed input, business-rule rejections, and lookups that
//! found nothing. The `Display` text is the human-readable reason surfaced to
//! callers.

use thiserror::Error;

/// Coarse classification of a [`BookingError`], used by outer layers to pick
/// a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unparsable or missing input. No state was touched.
    BadInput,
    /// The request was well formed but a booking rule rejected it.
    BusinessRule,
    /// An unknown room or booking id.
    NotFound,
    /// Invalid configuration or a broken internal invariant.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("Missing from or to date parameters")]
    MissingDateRange,

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Booking not found")]
    BookingNotFound(String),

    #[error("Start time must be before end time")]
    StartNotBeforeEnd,

    #[error("Start time cannot be in the past")]
    StartInPast,

    #[error("Booking duration cannot exceed {max_hours} hours")]
    DurationExceeded { max_hours: i64 },

    #[error("Room already booked from {start} to {end}")]
    Overlap { start: String, end: String },

    #[error("Booking already cancelled")]
    AlreadyCancelled,

    #[error("Cancellation must be at least {min_hours} hours before start time")]
    CancellationWindowClosed { min_hours: i64 },

    #[error("Cannot move clock by {minutes} minutes")]
    ClockOutOfRange { minutes: i64 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid room catalog: {0}")]
    InvalidCatalog(String),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::MissingField(_)
            | BookingError::InvalidTimestamp { .. }
            | BookingError::InvalidDate(_)
            | BookingError::MissingDateRange
            | BookingError::ClockOutOfRange { .. } => ErrorKind::BadInput,
            BookingError::RoomNotFound(_) | BookingError::BookingNotFound(_) => {
                ErrorKind::NotFound
            }
            BookingError::StartNotBeforeEnd
            | BookingError::StartInPast
            | BookingError::DurationExceeded { .. }
            | BookingError::Overlap { .. }
            | BookingError::AlreadyCancelled
            | BookingError::CancellationWindowClosed { .. } => ErrorKind::BusinessRule,
            BookingError::InvalidTimezone(_)
            | BookingError::InvalidPolicy(_)
            | BookingError::InvalidCatalog(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
