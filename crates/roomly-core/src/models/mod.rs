//! Data models for Roomly

mod reservation;
mod room;
mod window;

use serde::{Deserialize, Deserializer};

pub use reservation::{NewReservation, Reservation, ReservationId, RoomName};
pub use room::{Equipment, Room, RoomId};
pub use window::{format_timestamp, TimeWindow};

/// Identifier as it appears on the wire.
///
/// Backends hand out either text keys (uuid) or integer keys (bigserial);
/// both are kept as text on our side.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

/// Deserialize an identifier given either as text or as an integer.
fn wire_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireId::deserialize(deserializer)? {
        WireId::Text(text) => text,
        WireId::Number(number) => number.to_string(),
    })
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
