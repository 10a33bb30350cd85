//! Access to the hosted backend.
//!
//! [`BookingBackend`] is the query surface the services need from the
//! backend-as-a-service: row fetches over the `rooms` and `reservations`
//! tables, the overlap filter and a single insert. [`SupabaseBackend`] talks to
//! a PostgREST endpoint; [`InMemoryBackend`] evaluates the same queries over
//! local vectors (primarily for tests).

mod memory;
mod supabase;

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewReservation, Reservation, Room, RoomId, TimeWindow};

pub use memory::InMemoryBackend;
pub use supabase::SupabaseBackend;

/// Broad classification of a backend failure.
///
/// Callers branch on this instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Request never produced a response (DNS, TLS, timeout, connection reset)
    Transport,
    /// Backend answered with a non-success status
    Api { status: u16 },
    /// Response body did not match the expected shape
    Decode,
    /// Client is not set up to reach the backend
    Configuration,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Backend API error: {message} ({status})")]
    Api { status: u16, message: String },
    #[error("Invalid backend configuration: {0}")]
    Configuration(String),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> BackendErrorKind {
        match self {
            Self::Http(error) if error.is_decode() => BackendErrorKind::Decode,
            Self::Http(error) => error.status().map_or(BackendErrorKind::Transport, |status| {
                BackendErrorKind::Api {
                    status: status.as_u16(),
                }
            }),
            Self::Json(_) => BackendErrorKind::Decode,
            Self::Api { status, .. } => BackendErrorKind::Api { status: *status },
            Self::Configuration(_) => BackendErrorKind::Configuration,
        }
    }

    /// The backend refused the write because it conflicts with stored rows.
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind(), BackendErrorKind::Api { status: 409 })
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Query surface consumed from the backend.
pub trait BookingBackend: Send + Sync {
    /// Every room row, in backend order.
    fn list_rooms(&self) -> impl Future<Output = BackendResult<Vec<Room>>> + Send;

    /// Room ids of reservations with `start_time < window.end AND end_time > window.start`.
    ///
    /// One entry per conflicting reservation; duplicates are expected.
    fn list_conflicting_room_ids(
        &self,
        window: TimeWindow,
    ) -> impl Future<Output = BackendResult<Vec<RoomId>>> + Send;

    /// Insert one reservation and return the stored row.
    fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> impl Future<Output = BackendResult<Reservation>> + Send;

    /// Reservations with `start_time >= from`, ascending by start, at most
    /// `limit`, joined with their room name.
    fn list_reservations_from(
        &self,
        from: DateTime<Utc>,
        limit: usize,
    ) -> impl Future<Output = BackendResult<Vec<Reservation>>> + Send;
}
