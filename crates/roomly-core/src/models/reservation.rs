//! Reservation model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{wire_id, RoomId, TimeWindow};

/// A unique identifier for a reservation, assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(#[serde(deserialize_with = "wire_id")] String);

impl ReservationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room name joined onto a reservation row (`rooms: { name }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName {
    pub name: String,
}

/// A persisted booking of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier
    pub id: ReservationId,
    /// Booked room
    pub room_id: RoomId,
    /// Inclusive start
    pub start_time: DateTime<Utc>,
    /// Exclusive end
    pub end_time: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
    /// Denormalized room name, present only on joined queries
    #[serde(rename = "rooms", default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomName>,
}

impl Reservation {
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    #[must_use]
    pub fn room_name(&self) -> Option<&str> {
        self.room.as_ref().map(|room| room.name.as_str())
    }
}

/// Insert payload for a reservation.
///
/// Identity and creation time are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub room_id: RoomId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewReservation {
    #[must_use]
    pub fn new(room_id: RoomId, window: TimeWindow, title: impl Into<String>) -> Self {
        Self {
            room_id,
            start_time: window.start,
            end_time: window.end,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_decodes_joined_room_name() {
        let payload = r#"{
            "id": 1,
            "room_id": "1",
            "title": "Test Meeting",
            "start_time": "2025-03-28T10:00:00Z",
            "end_time": "2025-03-28T11:00:00Z",
            "description": "Test Description",
            "created_at": "2025-03-28T09:00:00Z",
            "rooms": { "name": "Test Room" }
        }"#;

        let reservation: Reservation = serde_json::from_str(payload).unwrap();
        assert_eq!(reservation.id.as_str(), "1");
        assert_eq!(reservation.room_name(), Some("Test Room"));
        assert_eq!(reservation.description.as_deref(), Some("Test Description"));
    }

    #[test]
    fn reservation_without_join_has_no_room_name() {
        let payload = r#"{
            "id": "abc",
            "room_id": 3,
            "title": "Standup",
            "start_time": "2025-03-28T10:00:00Z",
            "end_time": "2025-03-28T10:15:00Z",
            "description": null,
            "created_at": "2025-03-28T09:00:00Z"
        }"#;

        let reservation: Reservation = serde_json::from_str(payload).unwrap();
        assert_eq!(reservation.room_id, RoomId::new("3"));
        assert_eq!(reservation.room_name(), None);
        assert_eq!(reservation.description, None);
    }

    #[test]
    fn new_reservation_omits_missing_description() {
        let window = TimeWindow::new(
            "2025-03-28T10:00:00Z".parse().unwrap(),
            "2025-03-28T11:00:00Z".parse().unwrap(),
        );
        let payload = NewReservation::new(RoomId::new("1"), window, "T");

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["room_id"], "1");
        assert_eq!(value["title"], "T");
        assert_eq!(value["start_time"], "2025-03-28T10:00:00Z");
        assert!(value.get("description").is_none());
    }
}
