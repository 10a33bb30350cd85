//! Reservation queries.

use std::sync::Arc;

use crate::backend::{BackendResult, BookingBackend};
use crate::clock::Clock;
use crate::models::{NewReservation, Reservation};

/// How many upcoming meetings are fetched at most.
pub const UPCOMING_MEETINGS_LIMIT: usize = 5;

/// Reservation queries against the backend.
pub struct ReservationService<B> {
    backend: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<B> Clone for ReservationService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B: BookingBackend> ReservationService<B> {
    pub fn new(backend: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Insert a reservation and return the stored record.
    ///
    /// Overlap with existing bookings is not checked here; the backend may
    /// reject the insert.
    pub async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> BackendResult<Reservation> {
        self.backend.insert_reservation(reservation).await
    }

    /// The soonest reservations starting now or later, with room names.
    pub async fn get_upcoming_meetings(&self) -> BackendResult<Vec<Reservation>> {
        let now = self.clock.now();
        let mut upcoming = self
            .backend
            .list_reservations_from(now, UPCOMING_MEETINGS_LIMIT)
            .await?;
        upcoming.truncate(UPCOMING_MEETINGS_LIMIT);
        Ok(upcoming)
    }
}
