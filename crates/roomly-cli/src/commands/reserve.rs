use roomly_core::views::{format_date_time, MeetingDuration, ReservationForm};
use roomly_core::{BookingBackend, DisplayConfig, Room, RoomId, RoomStore};

use crate::commands::common::ensure_no_store_error;
use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct ReserveRequest {
    pub start: String,
    pub duration: MeetingDuration,
    pub room: String,
    pub title: String,
    pub description: Option<String>,
}

/// Find a free room by exact id, falling back to a case-insensitive name.
pub fn match_room<'a>(rooms: &'a [Room], query: &str) -> Option<&'a Room> {
    let query = query.trim();
    rooms
        .iter()
        .find(|room| room.id.as_str() == query)
        .or_else(|| {
            rooms
                .iter()
                .find(|room| room.name.eq_ignore_ascii_case(query))
        })
}

pub async fn run_reserve<B: BookingBackend>(
    store: &RoomStore<B>,
    display: &DisplayConfig,
    request: ReserveRequest,
) -> Result<Vec<String>, CliError> {
    let mut form = ReservationForm::new(display);
    form.set_start_time_input(&request.start)?;
    form.select_duration(request.duration);

    form.search_rooms(store).await?;
    ensure_no_store_error(store)?;
    let (room_id, room_name): (RoomId, String) = match_room(form.available_rooms(), &request.room)
        .map(|room| (room.id.clone(), room.name.clone()))
        .ok_or_else(|| CliError::RoomNotFound(request.room.clone()))?;
    form.select_room(&room_id)?;
    form.set_title(request.title);
    form.set_description(request.description);

    let created = form.submit(store).await?;
    tracing::info!(id = %created.id, room = %room_name, "Booked room");

    let timezone = display.timezone();
    Ok(vec![
        format!("Reserved {room_name}: {}", created.title),
        format!(
            "  {} - {}",
            format_date_time(created.start_time, timezone),
            format_date_time(created.end_time, timezone)
        ),
        format!("  id: {}", created.id),
    ])
}
