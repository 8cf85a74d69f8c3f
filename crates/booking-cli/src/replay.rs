//! Replay a scripted session of booking operations against a fresh ledger.
//!
//! A script is a JSON array of operations, each tagged by `op`. Later
//! operations can refer to a booking created earlier with `ref`, the
//! zero-based index of the `create` operation in the script.

use booking_engine::{
    AnalyticsRange, BookingError, BookingLedger, BookingRequest, ErrorKind, FixedClock,
    RoomCatalog,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    Create(BookingRequest),
    Cancel(BookingTarget),
    Get(BookingTarget),
    List,
    Analytics {
        from: Option<String>,
        to: Option<String>,
    },
    SetClock { now: String },
    AdvanceClock { minutes: i64 },
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Create(_) => "create",
            Operation::Cancel(_) => "cancel",
            Operation::Get(_) => "get",
            Operation::List => "list",
            Operation::Analytics { .. } => "analytics",
            Operation::SetClock { .. } => "setClock",
            Operation::AdvanceClock { .. } => "advanceClock",
        }
    }
}

/// Which booking an operation targets: an explicit id, or the booking
/// created by an earlier operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTarget {
    booking_id: Option<String>,
    #[serde(rename = "ref")]
    reference: Option<usize>,
}

/// Run `operations` in order and collect one JSON result per operation.
///
/// Rejections are reported inline; they never stop the replay.
pub fn run(
    operations: Vec<Operation>,
    ledger: &BookingLedger<FixedClock>,
    catalog: &RoomCatalog,
) -> Vec<Value> {
    // Booking id created by each operation index, if any.
    let mut created: Vec<Option<String>> = Vec::with_capacity(operations.len());

    operations
        .into_iter()
        .map(|op| {
            let name = op.name();
            let outcome = apply(&op, ledger, catalog, &created);
            created.push(match (&op, &outcome) {
                (Operation::Create(_), Ok(value)) => {
                    value["bookingId"].as_str().map(str::to_string)
                }
                _ => None,
            });
            match outcome {
                Ok(value) => json!({ "op": name, "ok": value }),
                Err(e) => {
                    tracing::debug!(op = name, error = %e, "operation rejected");
                    json!({ "op": name, "error": e.to_string(), "kind": kind_label(e.kind()) })
                }
            }
        })
        .collect()
}

fn apply(
    op: &Operation,
    ledger: &BookingLedger<FixedClock>,
    catalog: &RoomCatalog,
    created: &[Option<String>],
) -> Result<Value, BookingError> {
    match op {
        Operation::Create(request) => ledger.book(request, catalog).map(to_value),
        Operation::Cancel(target) => {
            let id = resolve(target, created)?;
            ledger.cancel_booking(&id)?;
            Ok(json!({ "message": "Booking cancelled successfully", "bookingId": id }))
        }
        Operation::Get(target) => {
            let id = resolve(target, created)?;
            ledger.get_booking(&id).map(to_value)
        }
        Operation::List => Ok(to_value(ledger.list_bookings())),
        Operation::Analytics { from, to } => {
            let zone = ledger.policy().display_timezone();
            let range = AnalyticsRange::parse(from.as_deref(), to.as_deref(), zone)?;
            Ok(to_value(ledger.analytics(catalog, range)))
        }
        Operation::SetClock { now } => {
            let now = booking_engine::time::parse_timestamp(now, "now")?;
            ledger.clock().set(now);
            Ok(json!({ "now": now }))
        }
        Operation::AdvanceClock { minutes } => {
            ledger.clock().advance_minutes(*minutes)?;
            Ok(json!({ "now": booking_engine::Clock::now(ledger.clock()) }))
        }
    }
}

fn resolve(target: &BookingTarget, created: &[Option<String>]) -> Result<String, BookingError> {
    if let Some(id) = &target.booking_id {
        return Ok(id.clone());
    }
    match target.reference {
        Some(idx) => created
            .get(idx)
            .cloned()
            .flatten()
            .ok_or_else(|| BookingError::BookingNotFound(format!("ref {idx}"))),
        None => Err(BookingError::MissingField("bookingId")),
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Value {
    // Every type serialized here is plain data with string keys.
    serde_json::to_value(value).unwrap_or(Value::Null)
}

pub fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::BadInput => "badInput",
        ErrorKind::BusinessRule => "businessRule",
        ErrorKind::NotFound => "notFound",
        ErrorKind::Internal => "internal",
    }
}
