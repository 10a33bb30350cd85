//! roomly-core - Core library for Roomly
//!
//! This crate contains the models, backend access, services, reactive store
//! and presentation views shared by every Roomly front end.

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod views;

pub use backend::{BookingBackend, InMemoryBackend, SupabaseBackend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BackendConfig, DisplayConfig};
pub use error::{BackendError, BackendErrorKind, Error, Result};
pub use models::{NewReservation, Reservation, ReservationId, Room, RoomId, TimeWindow};
pub use state::{ActionResult, RequestTicket, RoomState};
pub use store::{RoomStore, StoreError, StoreOperation};
