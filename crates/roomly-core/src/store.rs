//! Application state store.
//!
//! One [`RoomStore`] is created per session and handed to every view that
//! needs it. Actions are async and may overlap; state is only touched in the
//! short synchronous sections around the backend call.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::backend::{BackendError, BackendErrorKind, BookingBackend};
use crate::clock::Clock;
use crate::models::{NewReservation, Reservation, Room, TimeWindow};
use crate::services::{ReservationService, RoomService};
use crate::state::{ActionResult, RoomState};

/// The four store actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FetchRooms,
    CreateReservation,
    GetAvailableRooms,
    GetUpcomingMeetings,
}

impl StoreOperation {
    /// User-facing message shown when the operation fails.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::FetchRooms => "Failed to fetch rooms",
            Self::CreateReservation => "Failed to create reservation",
            Self::GetAvailableRooms => "Failed to fetch available rooms",
            Self::GetUpcomingMeetings => "Failed to fetch upcoming meetings",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchRooms => "fetch_rooms",
            Self::CreateReservation => "create_reservation",
            Self::GetAvailableRooms => "get_available_rooms",
            Self::GetUpcomingMeetings => "get_upcoming_meetings",
        };
        f.write_str(name)
    }
}

/// A failed store action: which operation, and the backend error behind it.
///
/// Displays as the operation's fixed user-facing message.
#[derive(Debug, Clone, Error)]
#[error("{}", .operation.failure_message())]
pub struct StoreError {
    pub operation: StoreOperation,
    pub source: Arc<BackendError>,
}

impl StoreError {
    pub fn new(operation: StoreOperation, source: BackendError) -> Self {
        Self {
            operation,
            source: Arc::new(source),
        }
    }

    pub fn kind(&self) -> BackendErrorKind {
        self.source.kind()
    }
}

/// Session store driving the remote access layer.
pub struct RoomStore<B> {
    rooms: RoomService<B>,
    reservations: ReservationService<B>,
    state: Mutex<RoomState>,
}

impl<B: BookingBackend> RoomStore<B> {
    pub fn new(backend: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self::from_services(
            RoomService::new(Arc::clone(&backend)),
            ReservationService::new(backend, clock),
        )
    }

    pub fn from_services(rooms: RoomService<B>, reservations: ReservationService<B>) -> Self {
        Self {
            rooms,
            reservations,
            state: Mutex::new(RoomState::default()),
        }
    }

    /// Copy of the whole state at this instant.
    pub fn snapshot(&self) -> RoomState {
        self.lock_state().clone()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.lock_state().rooms.clone()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.lock_state().reservations.clone()
    }

    pub fn error(&self) -> Option<StoreError> {
        self.lock_state().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().is_loading()
    }

    pub fn refresh_trigger(&self) -> u64 {
        self.lock_state().refresh_trigger
    }

    /// Drop the displayed error (external UI reset).
    pub fn clear_error(&self) {
        self.lock_state().error = None;
    }

    /// Replace `rooms` with every room from the backend.
    pub async fn fetch_rooms(&self) -> ActionResult<()> {
        let ticket = self.lock_state().begin(StoreOperation::FetchRooms);
        let result = self.rooms.get_all_rooms().await;
        self.lock_state().complete_fetch_rooms(ticket, result)
    }

    /// Insert a reservation; on success it is appended and the refresh
    /// trigger is bumped.
    pub async fn create_reservation(
        &self,
        reservation: NewReservation,
    ) -> ActionResult<Reservation> {
        let ticket = self.lock_state().begin(StoreOperation::CreateReservation);
        let result = self.reservations.create_reservation(&reservation).await;
        if let Ok(created) = &result {
            tracing::info!(id = %created.id, room_id = %created.room_id, "Reservation created");
        }
        self.lock_state().complete_create_reservation(ticket, result)
    }

    /// Rooms free for the whole window. Leaves `rooms` untouched.
    pub async fn get_available_rooms(&self, window: TimeWindow) -> ActionResult<Vec<Room>> {
        let ticket = self.lock_state().begin(StoreOperation::GetAvailableRooms);
        let result = self.rooms.get_available_rooms(window).await;
        self.lock_state().complete_query(ticket, result)
    }

    /// The next meetings, soonest first.
    pub async fn get_upcoming_meetings(&self) -> ActionResult<Vec<Reservation>> {
        let ticket = self.lock_state().begin(StoreOperation::GetUpcomingMeetings);
        let result = self.reservations.get_upcoming_meetings().await;
        self.lock_state().complete_query(ticket, result)
    }

    fn lock_state(&self) -> MutexGuard<'_, RoomState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
