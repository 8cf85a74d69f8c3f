//! WASM bindings for booking-engine.
//!
//! Exposes price quotes, overlap checks, local time rendering, and usage
//! analytics to JavaScript via `wasm-bindgen`. Complex types cross the
//! boundary as JSON strings. All functions use the default booking policy.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p booking-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/booking-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/booking_engine_wasm.wasm
//! ```

use booking_engine::time::{parse_timestamp, to_local_display};
use booking_engine::{AnalyticsRange, Booking, BookingPolicy, Room};
use chrono_tz::Tz;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Boundary-independent implementations (errors as plain strings)
// ---------------------------------------------------------------------------

fn quote_json(start: &str, end: &str, base_hourly_rate: f64) -> Result<String, String> {
    let start = parse_timestamp(start, "start").map_err(|e| e.to_string())?;
    let end = parse_timestamp(end, "end").map_err(|e| e.to_string())?;
    let quote = booking_engine::quote(start, end, base_hourly_rate, &BookingPolicy::default())
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&quote).map_err(|e| format!("Serialization error: {}", e))
}

fn price(start: &str, end: &str, base_hourly_rate: f64) -> Result<f64, String> {
    let start = parse_timestamp(start, "start").map_err(|e| e.to_string())?;
    let end = parse_timestamp(end, "end").map_err(|e| e.to_string())?;
    booking_engine::calculate_price(start, end, base_hourly_rate, &BookingPolicy::default())
        .map_err(|e| e.to_string())
}

fn overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool, String> {
    let parse = |s: &str| parse_timestamp(s, "timestamp").map_err(|e| e.to_string());
    Ok(booking_engine::overlaps(
        parse(a_start)?,
        parse(a_end)?,
        parse(b_start)?,
        parse(b_end)?,
    ))
}

fn local_display(timestamp: &str, zone: Option<&str>) -> Result<String, String> {
    let instant = parse_timestamp(timestamp, "timestamp").map_err(|e| e.to_string())?;
    let zone: Tz = match zone {
        Some(z) => z.parse().map_err(|_| format!("Invalid timezone: {}", z))?,
        None => BookingPolicy::default().display_timezone(),
    };
    Ok(to_local_display(instant, zone))
}

fn analytics_json(bookings_json: &str, rooms_json: &str, from: &str, to: &str) -> Result<String, String> {
    let bookings: Vec<Booking> = serde_json::from_str(bookings_json)
        .map_err(|e| format!("Invalid bookings JSON: {}", e))?;
    let rooms: Vec<Room> =
        serde_json::from_str(rooms_json).map_err(|e| format!("Invalid rooms JSON: {}", e))?;
    let zone = BookingPolicy::default().display_timezone();
    let range = AnalyticsRange::parse(Some(from), Some(to), zone).map_err(|e| e.to_string())?;

    let usage = booking_engine::generate_analytics(&bookings, &rooms, range, zone);
    serde_json::to_string(&usage).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Price an interval and return the JSON breakdown
/// `{baseHourlyRate, slots: [{start, end, hours, peak, rate, amount}], total}`.
#[wasm_bindgen(js_name = "quotePrice")]
pub fn quote_price(start: &str, end: &str, base_hourly_rate: f64) -> Result<String, JsValue> {
    quote_json(start, end, base_hourly_rate).map_err(|e| JsValue::from_str(&e))
}

/// Total price of an interval, rounded to 2 decimal places.
#[wasm_bindgen(js_name = "calculatePrice")]
pub fn calculate_price(start: &str, end: &str, base_hourly_rate: f64) -> Result<f64, JsValue> {
    price(start, end, base_hourly_rate).map_err(|e| JsValue::from_str(&e))
}

/// Half-open interval overlap. Touching intervals do not overlap.
#[wasm_bindgen(js_name = "overlaps")]
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool, JsValue> {
    overlap(a_start, a_end, b_start, b_end).map_err(|e| JsValue::from_str(&e))
}

/// Render an instant as `hh:mm am` in `zone` (the booking display timezone if
/// omitted).
#[wasm_bindgen(js_name = "toLocalDisplay")]
pub fn to_local(timestamp: &str, zone: Option<String>) -> Result<String, JsValue> {
    local_display(timestamp, zone.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Per-room usage over `[from, to]` (calendar dates).
///
/// `bookings_json` is an array of booking records as produced by the engine;
/// `rooms_json` is the room catalog array. Returns a JSON array of
/// `{roomId, roomName, totalHours, totalRevenue}`.
#[wasm_bindgen(js_name = "generateAnalytics")]
pub fn generate_analytics(
    bookings_json: &str,
    rooms_json: &str,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    analytics_json(bookings_json, rooms_json, from, to).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_json_reports_total() {
        let json = quote_json("2026-03-16T04:00:00Z", "2026-03-16T05:00:00Z", 300.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 375.0);
    }

    #[test]
    fn price_rejects_inverted_interval() {
        assert_eq!(
            price("2026-03-16T05:00:00Z", "2026-03-16T04:00:00Z", 300.0),
            Err("Start time must be before end time".to_string())
        );
    }

    #[test]
    fn quote_json_rejects_intervals_past_max_duration() {
        assert_eq!(
            quote_json("1000-01-01T00:00:00Z", "9000-01-01T00:00:00Z", 300.0),
            Err("Booking duration cannot exceed 12 hours".to_string())
        );
    }

    #[test]
    fn overlap_is_half_open() {
        assert_eq!(
            overlap(
                "2026-03-16T10:00:00Z",
                "2026-03-16T11:00:00Z",
                "2026-03-16T11:00:00Z",
                "2026-03-16T12:00:00Z"
            ),
            Ok(false)
        );
    }

    #[test]
    fn local_display_defaults_to_kolkata() {
        assert_eq!(local_display("2026-03-16T04:30:00Z", None), Ok("10:00 am".to_string()));
        assert_eq!(
            local_display("2026-03-16T04:30:00Z", Some("UTC")),
            Ok("04:30 am".to_string())
        );
    }

    #[test]
    fn analytics_over_exported_bookings() {
        let bookings = r#"[{
            "bookingId": "0d7c4a8e-2f51-4b61-9a57-3c8e0b6f1d22",
            "roomId": "101",
            "userName": "Asha",
            "startTime": "2026-03-16T03:30:00Z",
            "endTime": "2026-03-16T05:30:00Z",
            "totalPrice": 750.0,
            "status": "CONFIRMED",
            "createdAt": "2026-03-01T00:00:00Z"
        }]"#;
        let rooms = r#"[{"id": "101", "name": "Cabin 1", "baseHourlyRate": 300, "capacity": 4}]"#;

        let json = analytics_json(bookings, rooms, "2026-03-16", "2026-03-16").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["totalHours"], 2.0);
        assert_eq!(value[0]["totalRevenue"], 750.0);
    }
}
