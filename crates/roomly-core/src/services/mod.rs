//! Remote access layer shared across clients.

mod reservations;
mod rooms;

pub use reservations::{ReservationService, UPCOMING_MEETINGS_LIMIT};
pub use rooms::RoomService;
