use roomly_core::views::{RoomList, RoomListView};
use roomly_core::{BookingBackend, RoomStore};

use crate::commands::common::render_json;
use crate::error::CliError;

pub const NO_ROOMS: &str = "No rooms";

/// Mount the room list and print what it shows for the resulting state.
pub async fn run_rooms<B: BookingBackend>(
    store: &RoomStore<B>,
    as_json: bool,
) -> Result<Vec<String>, CliError> {
    let mounted = RoomList::mount(store).await;
    let view = RoomList::view(&store.snapshot());
    mounted.into_result()?;

    match view {
        RoomListView::Rooms(cards) if as_json => Ok(vec![render_json(&cards)?]),
        RoomListView::Rooms(cards) if cards.is_empty() => Ok(vec![NO_ROOMS.to_string()]),
        view => Ok(view.render_lines()),
    }
}
