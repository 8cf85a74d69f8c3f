//! Source of "now" for validation and `createdAt` stamps.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::error::{BookingError, Result};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests and `roombook replay`.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock by `minutes` (negative moves it back).
    ///
    /// # Errors
    /// Returns `BookingError::ClockOutOfRange` when the step or the resulting
    /// instant is outside chrono's representable range. The clock is unchanged.
    pub fn advance_minutes(&self, minutes: i64) -> Result<()> {
        let out_of_range = BookingError::ClockOutOfRange { minutes };
        let step = Duration::try_minutes(minutes).ok_or_else(|| out_of_range.clone())?;
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = now
            .checked_add_signed(step)
            .ok_or(out_of_range)?;
        Ok(())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
