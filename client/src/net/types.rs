//! Wire types for the game REST API that are not part of the board schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use wheel::board::BoardConfig;

/// Body of `PUT /rooms/{room}/teams/{team}/energy`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct EnergyChange {
    pub change: i64,
}

/// Response of both energy endpoints.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct EnergyReply {
    pub current_energy: i64,
}

impl EnergyReply {
    /// Balance as the engine stores it; negative values clamp to zero.
    pub fn balance(self) -> u32 {
        u32::try_from(self.current_energy.max(0)).unwrap_or(u32::MAX)
    }
}

/// Body of `PUT /rooms/{room}/teams/{team}/board`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BoardUpdate<'a> {
    pub board_state: &'a BoardConfig,
}

/// One team as listed in a room.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TeamInfo {
    pub team_name: String,
    #[serde(default)]
    pub circumstance: String,
}

fn default_time_remaining() -> u64 {
    30
}

/// Room metadata from `GET /rooms/{room}`; only the fields the game view uses.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_code: String,
    /// Game length in minutes.
    #[serde(default = "default_time_remaining")]
    pub time_remaining: u64,
    #[serde(default)]
    pub game_started: bool,
    /// ISO-8601 start timestamp.
    #[serde(default)]
    pub game_started_at: Option<String>,
    #[serde(default)]
    pub game_paused: bool,
    /// ISO-8601 timestamp of the current pause.
    #[serde(default)]
    pub paused_at: Option<String>,
    /// Seconds spent paused before the current pause.
    #[serde(default)]
    pub accumulated_pause_time: u64,
    #[serde(default)]
    pub teams: Vec<TeamInfo>,
}

impl RoomInfo {
    /// Circumstance assigned to `team_name`, if any.
    pub fn circumstance_of(&self, team_name: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|t| t.team_name == team_name)
            .map(|t| t.circumstance.as_str())
            .filter(|c| !c.is_empty())
    }
}
