//! Room model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, wire_id};

/// A unique identifier for a room, assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(#[serde(deserialize_with = "wire_id")] String);

impl RoomId {
    /// Wrap a backend-assigned identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// A piece of equipment installed in a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
}

/// A bookable meeting room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Number of seats
    pub capacity: u32,
    /// Installed equipment, in backend order
    #[serde(rename = "equipements", default, deserialize_with = "null_as_default")]
    pub equipment: Vec<Equipment>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Names of the installed equipment, in order
    pub fn equipment_names(&self) -> impl Iterator<Item = &str> {
        self.equipment.iter().map(|item| item.name.as_str())
    }
}
