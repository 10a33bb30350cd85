//! Upcoming meetings view

use chrono::FixedOffset;
use serde::Serialize;

use super::format::format_date_time;
use crate::backend::BookingBackend;
use crate::config::DisplayConfig;
use crate::models::Reservation;
use crate::state::ActionResult;
use crate::store::RoomStore;

pub const NO_UPCOMING_MEETINGS: &str = "No upcoming meetings";

/// Display data for one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingCard {
    pub title: String,
    pub room: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Upcoming meetings component.
///
/// Holds its own copy of the list and re-fetches whenever the store's
/// refresh trigger moves past the value it last saw.
#[derive(Debug, Clone)]
pub struct UpcomingMeetings {
    meetings: Vec<Reservation>,
    seen_trigger: Option<u64>,
    applied_request: Option<u64>,
    timezone: FixedOffset,
}

impl UpcomingMeetings {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            meetings: Vec::new(),
            seen_trigger: None,
            applied_request: None,
            timezone: display.timezone(),
        }
    }

    /// Initial load.
    pub async fn mount<B: BookingBackend>(&mut self, store: &RoomStore<B>) {
        self.refresh(store).await;
    }

    /// Re-fetch if a reservation was created since the last load.
    ///
    /// Returns true when a fetch was issued.
    pub async fn sync<B: BookingBackend>(&mut self, store: &RoomStore<B>) -> bool {
        if self.seen_trigger == Some(store.refresh_trigger()) {
            return false;
        }
        self.refresh(store).await;
        true
    }

    async fn refresh<B: BookingBackend>(&mut self, store: &RoomStore<B>) {
        let trigger = store.refresh_trigger();
        let result = store.get_upcoming_meetings().await;
        self.seen_trigger = Some(trigger);
        self.apply(result);
    }

    /// Apply a fetch result unless a later request was already applied.
    ///
    /// Failures show as an empty list. Returns whether the result was used.
    pub fn apply(&mut self, result: ActionResult<Vec<Reservation>>) -> bool {
        if self
            .applied_request
            .is_some_and(|applied| applied > result.ticket.id)
        {
            tracing::debug!(request = result.ticket.id, "Ignoring stale upcoming meetings");
            return false;
        }
        self.applied_request = Some(result.ticket.id);
        self.meetings = result.value_or_default();
        true
    }

    pub fn meetings(&self) -> &[Reservation] {
        &self.meetings
    }

    pub fn cards(&self) -> Vec<MeetingCard> {
        self.meetings
            .iter()
            .map(|meeting| MeetingCard {
                title: meeting.title.clone(),
                room: meeting.room_name().map(str::to_string),
                start: format_date_time(meeting.start_time, self.timezone),
                end: format_date_time(meeting.end_time, self.timezone),
                description: meeting.description.clone(),
            })
            .collect()
    }

    pub fn render_lines(&self) -> Vec<String> {
        if self.meetings.is_empty() {
            return vec![NO_UPCOMING_MEETINGS.to_string()];
        }
        let mut lines = Vec::new();
        for card in self.cards() {
            lines.push(card.title);
            if let Some(room) = card.room {
                lines.push(format!("  Room: {room}"));
            }
            lines.push(format!("  {} - {}", card.start, card.end));
            if let Some(description) = card.description {
                lines.push(format!("  {description}"));
            }
        }
        lines
    }
}
