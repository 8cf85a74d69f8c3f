//! The booking ledger: the only writer of booking state.
//!
//! Bookings live in an append-only `Vec` (insertion order is creation order)
//! with an id index and a per-room index of positions. Everything sits behind
//! one `RwLock`: `create_booking` and `cancel_booking` hold the write lock for
//! their whole check-then-commit sequence, so two overlapping creates can
//! never both pass the conflict check. Readers clone a snapshot under the read
//! lock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analytics::{generate_analytics, AnalyticsRange, RoomUsage};
use crate::booking::{Booking, BookingRequest};
use crate::catalog::{Room, RoomCatalog};
use crate::clock::{Clock, SystemClock};
use crate::error::{BookingError, Result};
use crate::policy::BookingPolicy;
use crate::time::{overlaps, parse_timestamp, to_local_display};
use crate::{pricing, validation};

#[derive(Debug, Default)]
struct LedgerState {
    bookings: Vec<Booking>,
    by_id: HashMap<Uuid, usize>,
    by_room: HashMap<String, Vec<usize>>,
}

impl LedgerState {
    /// First active booking in `room_id` (creation order) overlapping
    /// `[start, end)`.
    fn first_conflict(&self, room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<&Booking> {
        self.by_room
            .get(room_id)?
            .iter()
            .map(|&idx| &self.bookings[idx])
            .filter(|b| b.status().is_active())
            .find(|b| overlaps(start, end, b.start_time(), b.end_time()))
    }

    fn push(&mut self, booking: Booking) {
        let idx = self.bookings.len();
        self.by_id.insert(booking.booking_id(), idx);
        self.by_room
            .entry(booking.room_id().to_string())
            .or_default()
            .push(idx);
        self.bookings.push(booking);
    }

    fn position(&self, booking_id: &str) -> Option<usize> {
        let id = Uuid::parse_str(booking_id.trim()).ok()?;
        self.by_id.get(&id).copied()
    }
}

/// In-memory booking ledger.
#[derive(Debug)]
pub struct BookingLedger<C = SystemClock> {
    policy: BookingPolicy,
    clock: C,
    state: RwLock<LedgerState>,
}

impl BookingLedger<SystemClock> {
    /// A ledger on the wall clock.
    pub fn new(policy: BookingPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }
}

impl Default for BookingLedger<SystemClock> {
    fn default() -> Self {
        Self::new(BookingPolicy::default())
    }
}

impl<C: Clock> BookingLedger<C> {
    pub fn with_clock(policy: BookingPolicy, clock: C) -> Self {
        Self {
            policy,
            clock,
            state: RwLock::new(LedgerState::default()),
        }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Create a booking for `room`.
    ///
    /// Checks required fields, that `room` is the requested room, timestamp
    /// syntax, the booking-time rules, and overlap with the room's active
    /// bookings (the first conflict in creation order is reported). On
    /// success the booking is priced, stored as `CONFIRMED`, and returned.
    /// No state changes on any rejection.
    pub fn create_booking(&self, request: &BookingRequest, room: &Room) -> Result<Booking> {
        request.require_fields()?;
        let room_id = request.room_id.trim();
        if room.id != room_id {
            return Err(BookingError::RoomNotFound(room_id.to_string()));
        }

        let start = parse_timestamp(&request.start_time, "startTime")?;
        let end = parse_timestamp(&request.end_time, "endTime")?;

        let mut state = self.write();
        let now = self.clock.now();
        validation::validate_booking_times(start, end, now, &self.policy)?;

        if let Some(existing) = state.first_conflict(room_id, start, end) {
            let zone = self.policy.display_timezone();
            debug!(
                room_id,
                conflicting_booking = %existing.booking_id(),
                "booking rejected: overlap"
            );
            return Err(BookingError::Overlap {
                start: to_local_display(existing.start_time(), zone),
                end: to_local_display(existing.end_time(), zone),
            });
        }

        let total_price = pricing::calculate_price(start, end, room.base_hourly_rate, &self.policy)?;
        let booking = Booking::confirmed(
            room_id.to_string(),
            request.user_name.trim().to_string(),
            start,
            end,
            total_price,
            now,
        );
        info!(
            booking_id = %booking.booking_id(),
            room_id,
            %start,
            %end,
            total_price,
            "booking confirmed"
        );
        state.push(booking.clone());
        Ok(booking)
    }

    /// Resolve the request's room in `catalog`, then [`create_booking`](Self::create_booking).
    pub fn book(&self, request: &BookingRequest, catalog: &RoomCatalog) -> Result<Booking> {
        request.require_fields()?;
        let room = catalog.get(request.room_id.trim())?;
        self.create_booking(request, room)
    }

    /// Cancel a confirmed booking that is still outside the cancellation
    /// window. Only `status` changes.
    pub fn cancel_booking(&self, booking_id: &str) -> Result<()> {
        let mut state = self.write();
        let idx = state
            .position(booking_id)
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))?;

        let booking = &mut state.bookings[idx];
        if !booking.status().is_active() {
            return Err(BookingError::AlreadyCancelled);
        }
        validation::can_cancel(booking.start_time(), self.clock.now(), &self.policy)?;
        booking.cancel()?;
        info!(booking_id = %booking.booking_id(), room_id = booking.room_id(), "booking cancelled");
        Ok(())
    }

    /// All bookings, any status, in creation order.
    pub fn list_bookings(&self) -> Vec<Booking> {
        self.read().bookings.clone()
    }

    /// Look up a booking by id. Ids that are not valid UUIDs are simply not
    /// found.
    pub fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        let state = self.read();
        state
            .position(booking_id)
            .map(|idx| state.bookings[idx].clone())
            .ok_or_else(|| BookingError::BookingNotFound(booking_id.to_string()))
    }

    /// Per-room usage over `range`, computed from a consistent snapshot.
    pub fn analytics(&self, catalog: &RoomCatalog, range: AnalyticsRange) -> Vec<RoomUsage> {
        let state = self.read();
        generate_analytics(
            &state.bookings,
            catalog.all(),
            range,
            self.policy.display_timezone(),
        )
    }

    pub fn len(&self) -> usize {
        self.read().bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock means a panic mid-operation; every mutation is a single
    // push or status flip after all checks pass, so the state is still whole.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
