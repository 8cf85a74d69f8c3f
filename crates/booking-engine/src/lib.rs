//! # booking-engine
//!
//! Meeting-room booking core: per-room conflict detection, time-banded
//! dynamic pricing, and cancellation-window enforcement over an in-memory
//! ledger, plus a usage/revenue aggregator.
//!
//! ## Quick start
//!
//! ```rust
//! use booking_engine::{BookingLedger, BookingPolicy, BookingRequest, FixedClock, RoomCatalog};
//! use chrono::{TimeZone, Utc};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
//! let ledger = BookingLedger::with_clock(BookingPolicy::default(), clock);
//! let catalog = RoomCatalog::default();
//!
//! // Monday 09:00-11:00 IST in Cabin 1: one off-peak hour, one peak hour.
//! let request = BookingRequest::new("101", "Asha", "2026-03-16T03:30:00Z", "2026-03-16T05:30:00Z");
//! let booking = ledger.book(&request, &catalog).unwrap();
//! assert_eq!(booking.total_price(), 750.0);
//! ```
//!
//! ## Modules
//!
//! - [`time`]: interval overlap, timestamp parsing, local rendering
//! - [`policy`]: peak windows, multiplier, display timezone, limits
//! - [`pricing`]: hour-slot pricing with a per-slot breakdown
//! - [`validation`]: booking-time and cancellation-window rules
//! - [`ledger`]: the stateful booking store
//! - [`analytics`]: per-room hours and revenue over a date range
//! - [`catalog`]: room reference data
//! - [`clock`]: injectable "now"
//! - [`error`]: error types

pub mod analytics;
pub mod booking;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod policy;
pub mod pricing;
pub mod time;
pub mod validation;

pub use analytics::{generate_analytics, AnalyticsRange, RoomUsage};
pub use booking::{Booking, BookingRequest, BookingStatus};
pub use catalog::{Room, RoomCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BookingError, ErrorKind};
pub use ledger::BookingLedger;
pub use policy::{BookingPolicy, PeakWindow, PolicyConfig};
pub use pricing::{calculate_price, quote, PriceQuote, PriceSlot};
pub use time::overlaps;
