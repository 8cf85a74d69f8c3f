//! Room reference data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// A bookable room. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub base_hourly_rate: f64,
    pub capacity: u32,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_hourly_rate: f64, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_hourly_rate,
            capacity,
        }
    }
}

/// Read-only lookup table of rooms, in load order.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Build a catalog, rejecting duplicate ids and non-positive rates or
    /// capacities.
    pub fn new(rooms: Vec<Room>) -> Result<Self> {
        let mut seen = HashSet::new();
        for room in &rooms {
            if room.id.trim().is_empty() {
                return Err(BookingError::InvalidCatalog("room id cannot be empty".to_string()));
            }
            if !seen.insert(room.id.as_str()) {
                return Err(BookingError::InvalidCatalog(format!(
                    "duplicate room id '{}'",
                    room.id
                )));
            }
            if !(room.base_hourly_rate.is_finite() && room.base_hourly_rate > 0.0) {
                return Err(BookingError::InvalidCatalog(format!(
                    "room '{}' must have a positive base hourly rate",
                    room.id
                )));
            }
            if room.capacity == 0 {
                return Err(BookingError::InvalidCatalog(format!(
                    "room '{}' must have a positive capacity",
                    room.id
                )));
            }
        }
        Ok(Self { rooms })
    }

    /// Load a catalog from a JSON array of rooms.
    pub fn from_json(json: &str) -> Result<Self> {
        let rooms: Vec<Room> =
            serde_json::from_str(json).map_err(|e| BookingError::InvalidCatalog(e.to_string()))?;
        Self::new(rooms)
    }

    pub fn all(&self) -> &[Room] {
        &self.rooms
    }

    /// Look up a room by id.
    ///
    /// # Errors
    /// Returns `BookingError::RoomNotFound` for an unknown id.
    pub fn get(&self, id: &str) -> Result<&Room> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| BookingError::RoomNotFound(id.to_string()))
    }
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self {
            rooms: vec![
                Room::new("101", "Cabin 1", 300.0, 4),
                Room::new("102", "Cabin 2", 450.0, 8),
                Room::new("103", "Conference Hall", 600.0, 20),
                Room::new("104", "Board Room", 500.0, 12),
                Room::new("105", "Meeting Pod", 200.0, 2),
            ],
        }
    }
}
