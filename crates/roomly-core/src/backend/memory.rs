//! In-memory backend evaluating the same queries over local rows.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{BackendError, BackendResult, BookingBackend};
use crate::clock::{Clock, SystemClock};
use crate::models::{
    NewReservation, Reservation, ReservationId, Room, RoomId, RoomName, TimeWindow,
};

/// Backend holding rooms and reservations in process.
///
/// Mirrors the constraints a hosted project would enforce: a reservation must
/// reference an existing room and must not overlap another reservation of
/// the same room.
pub struct InMemoryBackend {
    rooms: Mutex<Vec<Room>>,
    reservations: Mutex<Vec<Reservation>>,
    clock: Box<dyn Clock>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Backend stamping `created_at` from the given clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            rooms: Mutex::new(Vec::new()),
            reservations: Mutex::new(Vec::new()),
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub fn with_rooms(self, rooms: impl IntoIterator<Item = Room>) -> Self {
        lock(&self.rooms).extend(rooms);
        self
    }

    /// Store a reservation as-is, bypassing the insert constraints.
    pub fn seed_reservation(&self, reservation: Reservation) {
        lock(&self.reservations).push(reservation);
    }

    pub fn rooms(&self) -> Vec<Room> {
        lock(&self.rooms).clone()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        lock(&self.reservations).clone()
    }

    fn room_name(&self, room_id: &RoomId) -> Option<RoomName> {
        lock(&self.rooms)
            .iter()
            .find(|room| &room.id == room_id)
            .map(|room| RoomName {
                name: room.name.clone(),
            })
    }
}

impl BookingBackend for InMemoryBackend {
    async fn list_rooms(&self) -> BackendResult<Vec<Room>> {
        Ok(self.rooms())
    }

    async fn list_conflicting_room_ids(&self, window: TimeWindow) -> BackendResult<Vec<RoomId>> {
        Ok(lock(&self.reservations)
            .iter()
            .filter(|reservation| reservation.window().overlaps(&window))
            .map(|reservation| reservation.room_id.clone())
            .collect())
    }

    async fn insert_reservation(&self, reservation: &NewReservation) -> BackendResult<Reservation> {
        if self.room_name(&reservation.room_id).is_none() {
            return Err(BackendError::api(
                409,
                format!(
                    "insert or update on table \"reservations\" violates foreign key constraint [23503]: room {} does not exist",
                    reservation.room_id
                ),
            ));
        }

        let mut reservations = lock(&self.reservations);
        let requested = reservation.window();
        if reservations.iter().any(|existing| {
            existing.room_id == reservation.room_id && existing.window().overlaps(&requested)
        }) {
            return Err(BackendError::api(
                409,
                "conflicting key value violates exclusion constraint [23P01]",
            ));
        }

        let stored = Reservation {
            id: ReservationId::new(Uuid::now_v7().to_string()),
            room_id: reservation.room_id.clone(),
            start_time: reservation.start_time,
            end_time: reservation.end_time,
            title: reservation.title.clone(),
            description: reservation.description.clone(),
            created_at: self.clock.now(),
            room: None,
        };
        reservations.push(stored.clone());
        Ok(stored)
    }

    async fn list_reservations_from(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> BackendResult<Vec<Reservation>> {
        let mut upcoming = lock(&self.reservations)
            .iter()
            .filter(|reservation| reservation.start_time >= from)
            .cloned()
            .collect::<Vec<_>>();
        upcoming.sort_by_key(|reservation| reservation.start_time);
        upcoming.truncate(limit);

        for reservation in &mut upcoming {
            reservation.room = self.room_name(&reservation.room_id);
        }
        Ok(upcoming)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendErrorKind;
    use crate::clock::FixedClock;
    use crate::models::Equipment;

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn room(id: &str, name: &str) -> Room {
        Room {
            id: RoomId::new(id),
            name: name.to_string(),
            description: String::new(),
            capacity: 8,
            equipment: vec![Equipment {
                name: "Screen".to_string(),
            }],
            created_at: at("2025-01-01T00:00:00Z"),
            updated_at: at("2025-01-01T00:00:00Z"),
        }
    }

    fn backend() -> InMemoryBackend {
        InMemoryBackend::with_clock(FixedClock::new(at("2025-03-28T09:00:00Z")))
            .with_rooms([room("1", "Aurora"), room("2", "Borealis")])
    }

    fn booking(room_id: &str, start: &str, end: &str) -> NewReservation {
        NewReservation::new(RoomId::new(room_id), TimeWindow::new(at(start), at(end)), "Sync")
    }

    #[tokio::test(flavor = "current_thread")]
    async fn insert_assigns_identity_and_creation_time() {
        let backend = backend();

        let stored = backend
            .insert_reservation(&booking("1", "2025-03-28T10:00:00Z", "2025-03-28T11:00:00Z"))
            .await
            .unwrap();

        assert!(!stored.id.as_str().is_empty());
        assert_eq!(stored.created_at, at("2025-03-28T09:00:00Z"));
        assert_eq!(backend.reservations(), vec![stored]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn insert_rejects_overlap_in_same_room_only() {
        let backend = backend();
        backend
            .insert_reservation(&booking("1", "2025-03-28T10:00:00Z", "2025-03-28T11:00:00Z"))
            .await
            .unwrap();

        let clash = backend
            .insert_reservation(&booking("1", "2025-03-28T10:30:00Z", "2025-03-28T11:30:00Z"))
            .await
            .unwrap_err();
        assert!(clash.is_conflict());

        backend
            .insert_reservation(&booking("2", "2025-03-28T10:30:00Z", "2025-03-28T11:30:00Z"))
            .await
            .unwrap();
        backend
            .insert_reservation(&booking("1", "2025-03-28T11:00:00Z", "2025-03-28T12:00:00Z"))
            .await
            .unwrap();
        assert_eq!(backend.reservations().len(), 3);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn insert_rejects_unknown_room() {
        let backend = backend();

        let error = backend
            .insert_reservation(&booking("404", "2025-03-28T10:00:00Z", "2025-03-28T11:00:00Z"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), BackendErrorKind::Api { status: 409 });
        assert!(backend.reservations().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn upcoming_is_sorted_limited_and_joined() {
        let backend = backend();
        for hour in [15, 11, 9, 13, 12, 14, 10] {
            backend
                .insert_reservation(&booking(
                    "1",
                    &format!("2025-03-28T{hour:02}:00:00Z"),
                    &format!("2025-03-28T{hour:02}:30:00Z"),
                ))
                .await
                .unwrap();
        }

        let upcoming = backend
            .list_reservations_from(at("2025-03-28T10:00:00Z"), 5)
            .await
            .unwrap();

        let starts = upcoming
            .iter()
            .map(|reservation| reservation.start_time.format("%H:%M").to_string())
            .collect::<Vec<_>>();
        assert_eq!(starts, vec!["10:00", "11:00", "12:00", "13:00", "14:00"]);
        assert!(upcoming
            .iter()
            .all(|reservation| reservation.room_name() == Some("Aurora")));
    }
}
