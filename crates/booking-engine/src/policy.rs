//! Booking policy: peak windows, peak multiplier, display timezone, and the
//! duration/cancellation limits.
//!
//! [`PolicyConfig`] is the serde-facing shape (every field optional, with
//! defaults). [`BookingPolicy`] is the validated form consumed by pricing,
//! validation, the ledger, and analytics, so all of them agree on what
//! "peak" and "local time" mean.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

pub const DEFAULT_DISPLAY_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_PEAK_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_MAX_DURATION_HOURS: i64 = 12;
pub const DEFAULT_MIN_CANCELLATION_NOTICE_HOURS: i64 = 2;

/// A half-open range of local hours `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl PeakWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

/// Default peak windows: 10:00-13:00 and 16:00-19:00.
pub const DEFAULT_PEAK_WINDOWS: [PeakWindow; 2] = [PeakWindow::new(10, 13), PeakWindow::new(16, 19)];

/// Policy as read from a JSON config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyConfig {
    /// IANA timezone used for peak detection, calendar dates, and messages.
    pub display_timezone: String,
    pub peak_multiplier: f64,
    pub peak_windows: Vec<PeakWindow>,
    pub max_duration_hours: i64,
    pub min_cancellation_notice_hours: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            display_timezone: DEFAULT_DISPLAY_TIMEZONE.to_string(),
            peak_multiplier: DEFAULT_PEAK_MULTIPLIER,
            peak_windows: DEFAULT_PEAK_WINDOWS.to_vec(),
            max_duration_hours: DEFAULT_MAX_DURATION_HOURS,
            min_cancellation_notice_hours: DEFAULT_MIN_CANCELLATION_NOTICE_HOURS,
        }
    }
}

impl PolicyConfig {
    /// Parse a policy from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BookingError::InvalidPolicy(e.to_string()))
    }
}

/// Validated booking policy.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPolicy {
    display_timezone: Tz,
    peak_multiplier: f64,
    peak_windows: Vec<PeakWindow>,
    max_duration: Duration,
    min_cancellation_notice: Duration,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            display_timezone: chrono_tz::Asia::Kolkata,
            peak_multiplier: DEFAULT_PEAK_MULTIPLIER,
            peak_windows: DEFAULT_PEAK_WINDOWS.to_vec(),
            max_duration: Duration::hours(DEFAULT_MAX_DURATION_HOURS),
            min_cancellation_notice: Duration::hours(DEFAULT_MIN_CANCELLATION_NOTICE_HOURS),
        }
    }
}

impl TryFrom<PolicyConfig> for BookingPolicy {
    type Error = BookingError;

    fn try_from(config: PolicyConfig) -> Result<Self> {
        let display_timezone: Tz = config
            .display_timezone
            .parse()
            .map_err(|_| BookingError::InvalidTimezone(config.display_timezone.clone()))?;

        if !(config.peak_multiplier.is_finite() && config.peak_multiplier > 0.0) {
            return Err(BookingError::InvalidPolicy(format!(
                "peakMultiplier must be positive, got {}",
                config.peak_multiplier
            )));
        }
        for window in &config.peak_windows {
            if window.start_hour >= window.end_hour || window.end_hour > 24 {
                return Err(BookingError::InvalidPolicy(format!(
                    "peak window [{}, {}) is not a valid hour range",
                    window.start_hour, window.end_hour
                )));
            }
        }
        if config.max_duration_hours <= 0 {
            return Err(BookingError::InvalidPolicy(
                "maxDurationHours must be positive".to_string(),
            ));
        }
        if config.min_cancellation_notice_hours < 0 {
            return Err(BookingError::InvalidPolicy(
                "minCancellationNoticeHours cannot be negative".to_string(),
            ));
        }

        Ok(Self {
            display_timezone,
            peak_multiplier: config.peak_multiplier,
            peak_windows: config.peak_windows,
            max_duration: Duration::hours(config.max_duration_hours),
            min_cancellation_notice: Duration::hours(config.min_cancellation_notice_hours),
        })
    }
}

impl BookingPolicy {
    pub fn display_timezone(&self) -> Tz {
        self.display_timezone
    }

    pub fn peak_multiplier(&self) -> f64 {
        self.peak_multiplier
    }

    pub fn peak_windows(&self) -> &[PeakWindow] {
        &self.peak_windows
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    pub fn min_cancellation_notice(&self) -> Duration {
        self.min_cancellation_notice
    }

    /// Whether `instant` falls inside a peak window.
    ///
    /// Peak requires a Monday-Friday local weekday and a local hour inside one
    /// of the configured windows. Weekends are never peak.
    pub fn is_peak(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.display_timezone);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let hour = local.hour();
        self.peak_windows.iter().any(|w| w.contains(hour))
    }
}
