//! Presentation views.
//!
//! Each view reads store state, calls store actions on "user" events, and
//! renders itself as plain lines that a front end prints or wraps in widgets.

mod format;
mod reservation_form;
mod room_list;
mod upcoming_meetings;

pub use format::{format_date_time, parse_start_time, DISPLAY_FORMAT};
pub use reservation_form::{FormError, MeetingDuration, ReservationForm};
pub use room_list::{RoomCard, RoomList, RoomListView, LOADING_LABEL};
pub use upcoming_meetings::{MeetingCard, UpcomingMeetings, NO_UPCOMING_MEETINGS};
