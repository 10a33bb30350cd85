//! Reservation form

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use thiserror::Error;

use super::format::parse_start_time;
use crate::backend::BookingBackend;
use crate::config::{normalize_text_option, DisplayConfig};
use crate::models::{NewReservation, Reservation, Room, RoomId, TimeWindow};
use crate::store::{RoomStore, StoreError};

/// Meeting lengths offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeetingDuration {
    Minutes15,
    #[default]
    Minutes30,
    Minutes45,
    Minutes60,
}

impl MeetingDuration {
    pub const ALL: [Self; 4] = [
        Self::Minutes15,
        Self::Minutes30,
        Self::Minutes45,
        Self::Minutes60,
    ];

    pub const fn minutes(self) -> u32 {
        match self {
            Self::Minutes15 => 15,
            Self::Minutes30 => 30,
            Self::Minutes45 => 45,
            Self::Minutes60 => 60,
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|duration| duration.minutes() == minutes)
    }

    pub fn length(self) -> Duration {
        Duration::minutes(i64::from(self.minutes()))
    }
}

impl fmt::Display for MeetingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.minutes())
    }
}

impl FromStr for MeetingDuration {
    type Err = FormError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_suffix("minutes")
            .or_else(|| trimmed.strip_suffix("min"))
            .or_else(|| trimmed.strip_suffix('m'))
            .unwrap_or(trimmed)
            .trim();
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::from_minutes)
            .ok_or_else(|| FormError::InvalidDuration(value.to_string()))
    }
}

/// Why the form refused an input or a submit.
#[derive(Debug, Clone, Error)]
pub enum FormError {
    #[error("Choose a start time first")]
    MissingStartTime,

    #[error("{0}")]
    InvalidStartTime(String),

    #[error("Duration must be one of 15, 30, 45 or 60 minutes (got '{0}')")]
    InvalidDuration(String),

    #[error("Choose a room")]
    MissingRoom,

    #[error("Room {0} is not available for this slot")]
    RoomUnavailable(RoomId),

    #[error("A title is required")]
    MissingTitle,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Form state for booking a room.
///
/// Changing the start time or duration invalidates the last availability
/// search; a successful submit resets the meeting details.
#[derive(Debug, Clone)]
pub struct ReservationForm {
    start_time: Option<DateTime<Utc>>,
    duration: MeetingDuration,
    available_rooms: Vec<Room>,
    searched_window: Option<TimeWindow>,
    selected_room: Option<RoomId>,
    title: String,
    description: Option<String>,
    timezone: FixedOffset,
}

impl ReservationForm {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            start_time: None,
            duration: MeetingDuration::default(),
            available_rooms: Vec::new(),
            searched_window: None,
            selected_room: None,
            title: String::new(),
            description: None,
            timezone: display.timezone(),
        }
    }

    pub const fn durations() -> [MeetingDuration; 4] {
        MeetingDuration::ALL
    }

    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) {
        if self.start_time != Some(start_time) {
            self.start_time = Some(start_time);
            self.invalidate_search();
        }
    }

    /// Set the start time from text typed in the display timezone.
    pub fn set_start_time_input(&mut self, input: &str) -> Result<(), FormError> {
        let start = parse_start_time(input, self.timezone)
            .map_err(|error| FormError::InvalidStartTime(error.to_string()))?;
        self.set_start_time(start);
        Ok(())
    }

    pub const fn duration(&self) -> MeetingDuration {
        self.duration
    }

    pub fn select_duration(&mut self, duration: MeetingDuration) {
        if self.duration != duration {
            self.duration = duration;
            self.invalidate_search();
        }
    }

    /// The slot being booked, once a start time is set.
    pub fn window(&self) -> Option<TimeWindow> {
        self.start_time
            .map(|start| TimeWindow::starting_at(start, self.duration.length()))
    }

    pub const fn can_search(&self) -> bool {
        self.start_time.is_some()
    }

    /// Submission stays disabled until a start time is chosen.
    pub const fn can_submit(&self) -> bool {
        self.start_time.is_some()
    }

    /// Look up rooms free for the current slot.
    ///
    /// A failed lookup leaves the list empty; the store carries the error.
    pub async fn search_rooms<B: BookingBackend>(
        &mut self,
        store: &RoomStore<B>,
    ) -> Result<&[Room], FormError> {
        let window = self.window().ok_or(FormError::MissingStartTime)?;
        let rooms = store.get_available_rooms(window).await.value_or_default();

        if let Some(selected) = &self.selected_room {
            if !rooms.iter().any(|room| &room.id == selected) {
                self.selected_room = None;
            }
        }
        self.available_rooms = rooms;
        self.searched_window = Some(window);
        Ok(&self.available_rooms)
    }

    pub fn available_rooms(&self) -> &[Room] {
        &self.available_rooms
    }

    /// Pick a room from the last search result.
    pub fn select_room(&mut self, room_id: &RoomId) -> Result<(), FormError> {
        if !self.available_rooms.iter().any(|room| &room.id == room_id) {
            return Err(FormError::RoomUnavailable(room_id.clone()));
        }
        self.selected_room = Some(room_id.clone());
        Ok(())
    }

    pub const fn selected_room(&self) -> Option<&RoomId> {
        self.selected_room.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = normalize_text_option(description);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Build the insert payload from the current fields.
    pub fn to_new_reservation(&self) -> Result<NewReservation, FormError> {
        let window = self.window().ok_or(FormError::MissingStartTime)?;
        let room_id = self.selected_room.clone().ok_or(FormError::MissingRoom)?;
        if self.searched_window != Some(window) {
            return Err(FormError::RoomUnavailable(room_id));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        Ok(NewReservation::new(room_id, window, title).with_description(self.description.clone()))
    }

    /// Create the reservation, then clear the form.
    ///
    /// On failure every field is kept so the user can retry.
    pub async fn submit<B: BookingBackend>(
        &mut self,
        store: &RoomStore<B>,
    ) -> Result<Reservation, FormError> {
        let reservation = self.to_new_reservation()?;
        let created = store.create_reservation(reservation).await.into_result()?;
        self.reset();
        Ok(created)
    }

    pub fn reset(&mut self) {
        self.start_time = None;
        self.duration = MeetingDuration::default();
        self.selected_room = None;
        self.title.clear();
        self.description = None;
        self.invalidate_search();
    }

    fn invalidate_search(&mut self) {
        self.available_rooms.clear();
        self.searched_window = None;
        self.selected_room = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::clock::FixedClock;
    use crate::models::{ReservationId, RoomName};

    fn at(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn room(id: &str, name: &str) -> Room {
        Room {
            id: RoomId::new(id),
            name: name.to_string(),
            description: String::new(),
            capacity: 4,
            equipment: Vec::new(),
            created_at: at("2025-03-01T00:00:00Z"),
            updated_at: at("2025-03-01T00:00:00Z"),
        }
    }

    fn fixture() -> (RoomStore<InMemoryBackend>, Arc<InMemoryBackend>) {
        let clock = FixedClock::new(at("2025-03-28T08:00:00Z"));
        let backend = Arc::new(
            InMemoryBackend::with_clock(clock)
                .with_rooms([room("1", "Alpha"), room("2", "Beta")]),
        );
        (
            RoomStore::new(Arc::clone(&backend), Arc::new(clock)),
            backend,
        )
    }

    fn form() -> ReservationForm {
        ReservationForm::new(&DisplayConfig::default())
    }

    #[test]
    fn offers_four_durations() {
        let minutes: Vec<u32> = ReservationForm::durations()
            .into_iter()
            .map(MeetingDuration::minutes)
            .collect();
        assert_eq!(minutes, vec![15, 30, 45, 60]);
    }

    #[test]
    fn parses_duration_labels() {
        assert_eq!("15".parse::<MeetingDuration>().unwrap(), MeetingDuration::Minutes15);
        assert_eq!("45m".parse::<MeetingDuration>().unwrap(), MeetingDuration::Minutes45);
        assert_eq!(
            "60 minutes".parse::<MeetingDuration>().unwrap(),
            MeetingDuration::Minutes60
        );
        assert!("20".parse::<MeetingDuration>().is_err());
    }

    #[test]
    fn submit_is_disabled_without_start_time() {
        let mut form = form();
        assert!(!form.can_submit());
        assert!(!form.can_search());

        form.set_start_time(at("2025-03-28T10:00:00Z"));
        assert!(form.can_submit());
        assert!(form.can_search());
    }

    #[test]
    fn selecting_a_duration_updates_the_window() {
        let mut form = form();
        form.set_start_time(at("2025-03-28T10:00:00Z"));
        form.select_duration(MeetingDuration::Minutes15);

        assert_eq!(form.duration(), MeetingDuration::Minutes15);
        assert_eq!(
            form.window().map(|window| window.end),
            Some(at("2025-03-28T10:15:00Z"))
        );
    }

    #[test]
    fn rejects_bad_start_input() {
        let mut form = form();
        assert!(matches!(
            form.set_start_time_input("tomorrow"),
            Err(FormError::InvalidStartTime(_))
        ));
        assert!(form.start_time().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn search_without_start_time_fails() {
        let (store, _) = fixture();
        let mut form = form();

        let result = form.search_rooms(&store).await;

        assert!(matches!(result, Err(FormError::MissingStartTime)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn search_lists_only_free_rooms() {
        let (store, backend) = fixture();
        backend.seed_reservation(Reservation {
            id: ReservationId::new("busy"),
            room_id: RoomId::new("1"),
            start_time: at("2025-03-28T10:15:00Z"),
            end_time: at("2025-03-28T10:45:00Z"),
            title: "Busy".to_string(),
            description: None,
            created_at: at("2025-03-27T00:00:00Z"),
            room: Some(RoomName {
                name: "Alpha".to_string(),
            }),
        });
        let mut form = form();
        form.set_start_time_input("2025-03-28T10:00").unwrap();

        let names: Vec<String> = form
            .search_rooms(&store)
            .await
            .unwrap()
            .iter()
            .map(|room| room.name.clone())
            .collect();

        assert_eq!(names, vec!["Beta"]);
        assert!(matches!(
            form.select_room(&RoomId::new("1")),
            Err(FormError::RoomUnavailable(_))
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn changing_the_slot_clears_the_search() {
        let (store, _) = fixture();
        let mut form = form();
        form.set_start_time(at("2025-03-28T10:00:00Z"));
        form.search_rooms(&store).await.unwrap();
        form.select_room(&RoomId::new("2")).unwrap();

        form.select_duration(MeetingDuration::Minutes60);

        assert!(form.available_rooms().is_empty());
        assert!(form.selected_room().is_none());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submit_creates_reservation_and_resets() {
        let (store, backend) = fixture();
        let mut form = form();
        form.set_start_time(at("2025-03-28T10:00:00Z"));
        form.select_duration(MeetingDuration::Minutes45);
        form.search_rooms(&store).await.unwrap();
        form.select_room(&RoomId::new("2")).unwrap();
        form.set_title("  Retro  ");
        form.set_description(Some("   ".to_string()));

        let created = form.submit(&store).await.unwrap();

        assert_eq!(created.title, "Retro");
        assert_eq!(created.description, None);
        assert_eq!(created.end_time, at("2025-03-28T10:45:00Z"));
        assert_eq!(backend.reservations().len(), 1);
        assert_eq!(store.refresh_trigger(), 1);
        assert!(form.start_time().is_none());
        assert!(form.title().is_empty());
        assert!(form.selected_room().is_none());
        assert!(!form.can_submit());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submit_requires_title() {
        let (store, _) = fixture();
        let mut form = form();
        form.set_start_time(at("2025-03-28T10:00:00Z"));
        form.search_rooms(&store).await.unwrap();
        form.select_room(&RoomId::new("1")).unwrap();

        let result = form.submit(&store).await;

        assert!(matches!(result, Err(FormError::MissingTitle)));
        assert!(store.reservations().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_submit_keeps_fields() {
        let (store, backend) = fixture();
        let mut form = form();
        form.set_start_time(at("2025-03-28T10:00:00Z"));
        form.search_rooms(&store).await.unwrap();
        form.select_room(&RoomId::new("1")).unwrap();
        form.set_title("Planning");
        backend.seed_reservation(Reservation {
            id: ReservationId::new("late"),
            room_id: RoomId::new("1"),
            start_time: at("2025-03-28T10:00:00Z"),
            end_time: at("2025-03-28T10:30:00Z"),
            title: "Booked meanwhile".to_string(),
            description: None,
            created_at: at("2025-03-28T07:59:00Z"),
            room: None,
        });

        let error = form.submit(&store).await.unwrap_err();

        assert_eq!(error.to_string(), "Failed to create reservation");
        assert_eq!(form.title(), "Planning");
        assert_eq!(form.selected_room(), Some(&RoomId::new("1")));
        assert_eq!(
            store.error().map(|error| error.to_string()).as_deref(),
            Some("Failed to create reservation")
        );
    }
}
