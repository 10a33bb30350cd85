use roomly_core::views::{format_date_time, FormError, MeetingDuration, ReservationForm};
use roomly_core::{BookingBackend, DisplayConfig, RoomStore};

use crate::commands::common::{ensure_no_store_error, render_json, render_room_lines, room_cards};
use crate::error::CliError;

pub async fn run_available<B: BookingBackend>(
    store: &RoomStore<B>,
    display: &DisplayConfig,
    start: &str,
    duration: MeetingDuration,
    as_json: bool,
) -> Result<Vec<String>, CliError> {
    let mut form = ReservationForm::new(display);
    form.set_start_time_input(start)?;
    form.select_duration(duration);
    let window = form.window().ok_or(FormError::MissingStartTime)?;

    form.search_rooms(store).await?;
    ensure_no_store_error(store)?;
    let rooms = form.available_rooms();

    if as_json {
        return Ok(vec![render_json(&room_cards(rooms))?]);
    }

    let timezone = display.timezone();
    let mut lines = vec![format!(
        "Free from {} to {} ({duration}):",
        format_date_time(window.start, timezone),
        format_date_time(window.end, timezone)
    )];
    if rooms.is_empty() {
        lines.push("No rooms available".to_string());
    } else {
        lines.extend(render_room_lines(rooms));
    }
    Ok(lines)
}
