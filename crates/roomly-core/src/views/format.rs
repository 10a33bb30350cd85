//! Timestamp formatting and parsing for display.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// `DD/MM/YYYY HH:mm`
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Accepted shapes for a start time typed without an offset.
const LOCAL_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Render a timestamp in the fixed display timezone.
pub fn format_date_time(value: DateTime<Utc>, timezone: FixedOffset) -> String {
    value
        .with_timezone(&timezone)
        .format(DISPLAY_FORMAT)
        .to_string()
}

/// Parse a start time from user input.
///
/// RFC 3339 input keeps its own offset; `YYYY-MM-DDTHH:MM` (the shape of a
/// `datetime-local` field) is read in the display timezone.
pub fn parse_start_time(input: &str, timezone: FixedOffset) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .and_then(|naive| timezone.from_local_datetime(&naive).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "start time '{input}' is not RFC 3339 or YYYY-MM-DDTHH:MM"
            ))
        })
}
