//! Room queries.

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::{BackendResult, BookingBackend};
use crate::models::{Room, RoomId, TimeWindow};

/// Room queries against the backend.
pub struct RoomService<B> {
    backend: Arc<B>,
}

impl<B> Clone for RoomService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: BookingBackend> RoomService<B> {
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Every room record.
    pub async fn get_all_rooms(&self) -> BackendResult<Vec<Room>> {
        self.backend.list_rooms().await
    }

    /// Rooms with no reservation overlapping `window`, in fetch order.
    ///
    /// No check that `window.start < window.end` is made here.
    pub async fn get_available_rooms(&self, window: TimeWindow) -> BackendResult<Vec<Room>> {
        let rooms = self.backend.list_rooms().await?;
        let reserved = self
            .backend
            .list_conflicting_room_ids(window)
            .await?
            .into_iter()
            .collect::<HashSet<RoomId>>();

        tracing::debug!(
            total = rooms.len(),
            reserved = reserved.len(),
            "Filtering available rooms"
        );
        Ok(rooms
            .into_iter()
            .filter(|room| !reserved.contains(&room.id))
            .collect())
    }
}
