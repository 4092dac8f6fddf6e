//! Per-view game state: team, balance, timer, and view chrome.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use wheel::board::Circumstance;
use wheel::clock::{GameClock, format_remaining};
use wheel::engine::EngineCore;
use wheel::sync::TeamRef;

use crate::net::types::RoomInfo;

/// View change requested by the chrome and applied by the wheel host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewRequest {
    ZoomIn,
    ZoomOut,
    Reset,
}

/// Lifecycle of the initial board load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub team: Option<TeamRef>,
    /// Spectator views render and poll but never mutate the board.
    pub read_only: bool,
    pub status: LoadStatus,
    pub balance: u32,
    pub zoom: f64,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    /// `None` until room metadata arrives.
    pub clock: Option<GameClock>,
    pub now_ms: u64,
    /// Latest room metadata.
    pub room: Option<RoomInfo>,
    /// Circumstances defined by the loaded board.
    pub circumstances: Vec<Circumstance>,
    /// Hover text for the tile under the pointer.
    pub tooltip: Option<String>,
    pub view_request: Option<ViewRequest>,
    /// Bumped on every request so repeated clicks re-trigger the host.
    pub view_request_seq: u64,
}

impl GameState {
    pub fn for_team(team: TeamRef, read_only: bool) -> Self {
        Self { team: Some(team), read_only, zoom: 1.0, can_zoom_in: true, can_zoom_out: true, ..Self::default() }
    }

    pub fn request_view(&mut self, request: ViewRequest) {
        self.view_request = Some(request);
        self.view_request_seq = self.view_request_seq.wrapping_add(1);
    }

    /// Copy the engine-owned values the chrome displays.
    pub fn sync_from_engine(&mut self, engine: &EngineCore) {
        let camera = engine.camera();
        self.balance = engine.balance();
        self.zoom = camera.zoom;
        self.can_zoom_in = engine.can_zoom_in();
        self.can_zoom_out = engine.can_zoom_out();
        if self.circumstances != engine.board.circumstances {
            self.circumstances.clone_from(&engine.board.circumstances);
        }
    }

    /// The circumstance the room assigns to this team, resolved against the
    /// board's definitions.
    pub fn circumstance(&self) -> Option<&Circumstance> {
        let room = self.room.as_ref()?;
        let team = self.team.as_ref()?;
        circumstance_for(&self.circumstances, room, &team.team_name)
    }

    /// Timer text: `Loading...` before room metadata, else `m:ss`.
    pub fn timer_label(&self) -> String {
        match self.clock {
            Some(clock) => format_remaining(clock.remaining_ms(self.now_ms)),
            None => "Loading...".to_owned(),
        }
    }

    pub fn time_expired(&self) -> bool {
        self.clock.is_some_and(|clock| clock.is_expired(self.now_ms))
    }

    pub fn zoom_percent(&self) -> String {
        format!("{:.0}%", self.zoom * 100.0)
    }
}

/// Build the countdown from room metadata. `parse_ms` turns an ISO-8601
/// timestamp into epoch milliseconds; unparsable timestamps count as absent.
pub fn clock_from_room(room: &RoomInfo, parse_ms: impl Fn(&str) -> Option<u64>) -> GameClock {
    let mut clock = GameClock::from_minutes(room.time_remaining);
    if !room.game_started {
        return clock;
    }
    if let Some(started) = room.game_started_at.as_deref().and_then(&parse_ms) {
        clock.start(started);
    }
    clock.accumulated_pause_ms = room.accumulated_pause_time.saturating_mul(1000);
    if let Some(paused) = room.paused_at.as_deref().filter(|_| room.game_paused).and_then(&parse_ms) {
        clock.pause(paused);
    }
    clock
}

/// The circumstance matching the room's assignment for `team_name`.
pub fn circumstance_for<'a>(
    circumstances: &'a [Circumstance],
    room: &RoomInfo,
    team_name: &str,
) -> Option<&'a Circumstance> {
    let assigned = room.circumstance_of(team_name)?;
    circumstances.iter().find(|c| c.title == assigned || c.id == assigned)
}
