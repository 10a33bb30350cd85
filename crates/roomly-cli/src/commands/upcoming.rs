use roomly_core::views::UpcomingMeetings;
use roomly_core::{BookingBackend, DisplayConfig, RoomStore};

use crate::commands::common::{ensure_no_store_error, render_json};
use crate::error::CliError;

pub async fn run_upcoming<B: BookingBackend>(
    store: &RoomStore<B>,
    display: &DisplayConfig,
    as_json: bool,
) -> Result<Vec<String>, CliError> {
    let mut view = UpcomingMeetings::new(display);
    view.mount(store).await;
    ensure_no_store_error(store)?;

    if as_json {
        Ok(vec![render_json(&view.cards())?])
    } else {
        Ok(view.render_lines())
    }
}
