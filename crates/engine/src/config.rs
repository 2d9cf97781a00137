use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Environment variable naming the property configuration file.
pub const PROPERTY_FILE_ENV: &str = "ORBI_PROPERTY_FILE";

// ---------------------------------------------------------------------------
// Room inventory
// ---------------------------------------------------------------------------

/// The physical units of the property, in display order.
/// Never empty, never contains the same room twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInventory {
    rooms: Vec<String>,
}

impl RoomInventory {
    pub fn new(rooms: Vec<String>) -> Result<Self, EngineError> {
        if rooms.is_empty() {
            return Err(EngineError::EmptyInventory);
        }
        let mut seen: HashSet<&str> = HashSet::with_capacity(rooms.len());
        for room in &rooms {
            if !seen.insert(room.as_str()) {
                return Err(EngineError::DuplicateRoom(room.clone()));
            }
        }
        Ok(Self { rooms })
    }

    /// Consecutively numbered rooms `first..=last`, e.g. `501..=560`.
    pub fn numbered(first: u32, last: u32) -> Result<Self, EngineError> {
        Self::new((first..=last).map(|n| n.to_string()).collect())
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn contains(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r == room)
    }
}

// ---------------------------------------------------------------------------
// Property configuration file
// ---------------------------------------------------------------------------

/// Inclusive run of numbered rooms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomRange {
    pub first: u32,
    pub last: u32,
}

/// Property setup as stored in a JSON file:
///
/// ```json
/// { "name": "ORBI City", "rooms": ["A101"], "roomRanges": [{ "first": 501, "last": 560 }] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default)]
    pub room_ranges: Vec<RoomRange>,
}

impl PropertyConfig {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| EngineError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Load the file named by `ORBI_PROPERTY_FILE`.
    pub fn from_env() -> Result<Self, EngineError> {
        let path = std::env::var(PROPERTY_FILE_ENV).map_err(|_| {
            EngineError::Config(format!(
                "no room inventory supplied and {} is not set",
                PROPERTY_FILE_ENV
            ))
        })?;
        tracing::debug!(path = %path, "loading property configuration");
        Self::load(Path::new(&path))
    }

    /// Explicit rooms first, then each numbered range, in declaration order.
    pub fn inventory(&self) -> Result<RoomInventory, EngineError> {
        let mut rooms = self.rooms.clone();
        for range in &self.room_ranges {
            if range.first > range.last {
                return Err(EngineError::Config(format!(
                    "room range {}..{} is descending",
                    range.first, range.last
                )));
            }
            rooms.extend((range.first..=range.last).map(|n| n.to_string()));
        }
        RoomInventory::new(rooms)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
