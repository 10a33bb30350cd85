//! Room list view

use serde::Serialize;

use crate::backend::BookingBackend;
use crate::models::Room;
use crate::state::{ActionResult, RoomState};
use crate::store::RoomStore;

pub const LOADING_LABEL: &str = "Loading...";

/// Display data for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub equipment: Vec<String>,
}

impl From<&Room> for RoomCard {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            name: room.name.clone(),
            description: room.description.clone(),
            capacity: room.capacity,
            equipment: room.equipment_names().map(str::to_string).collect(),
        }
    }
}

/// What the room list shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomListView {
    Loading,
    Error(String),
    Rooms(Vec<RoomCard>),
}

impl RoomListView {
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            Self::Loading => vec![LOADING_LABEL.to_string()],
            Self::Error(message) => vec![message.clone()],
            Self::Rooms(cards) => cards.iter().flat_map(render_card).collect(),
        }
    }
}

fn render_card(card: &RoomCard) -> Vec<String> {
    let mut lines = vec![card.name.clone()];
    if !card.description.is_empty() {
        lines.push(format!("  {}", card.description));
    }
    lines.push(format!("  Capacity: {}", card.capacity));
    if !card.equipment.is_empty() {
        lines.push(format!("  Equipment: {}", card.equipment.join(", ")));
    }
    lines
}

/// Room list component.
pub struct RoomList;

impl RoomList {
    /// Load rooms into the store.
    pub async fn mount<B: BookingBackend>(store: &RoomStore<B>) -> ActionResult<()> {
        store.fetch_rooms().await
    }

    /// Loading wins over error, error wins over rooms.
    pub fn view(state: &RoomState) -> RoomListView {
        if state.is_loading() {
            RoomListView::Loading
        } else if let Some(error) = &state.error {
            RoomListView::Error(error.to_string())
        } else {
            RoomListView::Rooms(state.rooms.iter().map(RoomCard::from).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::{BackendError, InMemoryBackend};
    use crate::clock::SystemClock;
    use crate::models::{Equipment, RoomId};
    use crate::store::StoreOperation;

    fn test_room() -> Room {
        let created: DateTime<Utc> = "2025-03-28T10:00:00Z".parse().unwrap();
        Room {
            id: RoomId::new("1"),
            name: "Test Room".to_string(),
            description: "Test Description".to_string(),
            capacity: 10,
            equipment: vec![Equipment {
                name: "Projector".to_string(),
            }],
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn shows_loading_while_an_action_is_outstanding() {
        let mut state = RoomState::default();
        state.begin(StoreOperation::FetchRooms);

        let view = RoomList::view(&state);

        assert_eq!(view, RoomListView::Loading);
        assert_eq!(view.render_lines(), vec!["Loading..."]);
    }

    #[test]
    fn shows_error_message_when_set() {
        let mut state = RoomState::default();
        let ticket = state.begin(StoreOperation::FetchRooms);
        state.complete_fetch_rooms(ticket, Err(BackendError::api(500, "boom")));

        assert_eq!(
            RoomList::view(&state).render_lines(),
            vec!["Failed to fetch rooms"]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn mount_fetches_and_renders_rooms() {
        let backend = Arc::new(InMemoryBackend::new().with_rooms([test_room()]));
        let store = RoomStore::new(backend, Arc::new(SystemClock));

        RoomList::mount(&store).await;
        let lines = RoomList::view(&store.snapshot()).render_lines();

        assert_eq!(
            lines,
            vec![
                "Test Room",
                "  Test Description",
                "  Capacity: 10",
                "  Equipment: Projector",
            ]
        );
    }

    #[test]
    fn empty_room_list_renders_nothing() {
        assert!(RoomList::view(&RoomState::default())
            .render_lines()
            .is_empty());
    }
}
