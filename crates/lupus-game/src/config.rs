//! Game timing configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::GameError;

/// How long each timed part of the game lasts.
///
/// Stored as milliseconds so the JSON form stays flat and readable:
///
/// ```json
/// { "night_discussion_ms": 10000, "day_discussion_ms": 20000, "stale_drain_ms": 500 }
/// ```
///
/// Every field is optional in JSON; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// The werewolves' private discussion before they pick a victim.
    pub night_discussion_ms: u64,

    /// The public discussion before the vote.
    pub day_discussion_ms: u64,

    /// How long to read and discard stray lines before each direct
    /// prompt. 0 disables draining.
    pub stale_drain_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            night_discussion_ms: 10_000,
            day_discussion_ms: 20_000,
            stale_drain_ms: 500,
        }
    }
}

impl GameConfig {
    pub fn night_discussion(&self) -> Duration {
        Duration::from_millis(self.night_discussion_ms)
    }

    pub fn day_discussion(&self) -> Duration {
        Duration::from_millis(self.day_discussion_ms)
    }

    pub fn stale_drain(&self) -> Duration {
        Duration::from_millis(self.stale_drain_ms)
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
