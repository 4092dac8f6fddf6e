//! The wheel engine.
//!
//! [`EngineCore`] owns all board state and interprets host input. Every
//! handler returns a list of [`Action`]s; the host renders, pushes to the
//! store, or updates the cursor accordingly. The engine itself never touches
//! the network or the DOM.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::board::{BoardConfig, RingId};
use crate::camera::{Camera, Point};
use crate::config::EngineConfig;
use crate::economy::{ClickOutcome, Economy, MarkerKey, Rejection};
use crate::gate::ClickGate;
use crate::geometry::angle_from_center;
use crate::input::{Button, DragSession, TileRef};
use crate::markers::{MarkerPlacement, place_markers};
use crate::render::{Scene, SceneLayout};
use crate::rotation::{RingDrag, RotationState};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// State visible on screen changed.
    RenderNeeded,
    /// Persist this board snapshot.
    PushBoard(BoardConfig),
    /// Persist a signed balance change. `seq` identifies the push so a late
    /// acknowledgement can be matched.
    PushEnergyDelta { seq: u64, delta: i64 },
    /// Set the board container's CSS cursor.
    SetCursor(String),
}

/// Core engine state. Browser-free so it can be driven from tests and the CLI.
pub struct EngineCore {
    pub board: BoardConfig,
    pub economy: Economy,
    pub rotations: RotationState,
    pub camera: Camera,
    pub session: DragSession,
    pub gate: ClickGate,
    pub config: EngineConfig,
    /// Spectator views rotate and pan but never toggle markers.
    pub read_only: bool,
    pub time_expired: bool,
    /// Unpanned on-screen position of the board center, in CSS pixels.
    layout_center: Point,
    energy_seq: u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default(), false)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig, read_only: bool) -> Self {
        Self {
            board: BoardConfig::default(),
            economy: Economy::default(),
            rotations: RotationState::new(),
            camera: Camera::default(),
            session: DragSession::Idle,
            gate: ClickGate::new(),
            config,
            read_only,
            time_expired: false,
            layout_center: Point::default(),
            energy_seq: 0,
        }
    }

    // --- Data inputs ---

    /// Replace the board and balance with a store snapshot. Markers are
    /// rebuilt from the tiles' active flags; rotation and pan/zoom persist.
    pub fn load_snapshot(&mut self, board: BoardConfig, balance: u32) -> Vec<Action> {
        self.economy = Economy::from_board(&board, balance);
        self.board = board;
        vec![Action::RenderNeeded]
    }

    /// Adopt the store's balance from an energy acknowledgement, unless a
    /// newer local change has been issued since.
    pub fn apply_energy_ack(&mut self, seq: u64, balance: u32) -> Vec<Action> {
        if seq != self.energy_seq || balance == self.economy.balance() {
            return Vec::new();
        }
        log::debug!("adopting store balance {balance} (local {})", self.economy.balance());
        self.economy.set_balance(balance);
        vec![Action::RenderNeeded]
    }

    pub fn set_time_expired(&mut self, expired: bool) {
        self.time_expired = expired;
    }

    /// Record the center of the transformed board element as measured on
    /// screen. Scaling about the center leaves it in place, so only the
    /// current pan is taken back out.
    pub fn set_rendered_center(&mut self, center: Point) {
        self.layout_center = self.camera.layout_center_of(center);
    }

    // --- Pointer input ---

    /// Pointer pressed. `target` is the tile under the pointer, if any.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, target: Option<TileRef>) -> Vec<Action> {
        if self.session.is_active() {
            return Vec::new();
        }
        match (button, target) {
            (Button::Primary, Some(tile)) => {
                if self.board.ring(tile.ring_id).is_none() {
                    return Vec::new();
                }
                let angle = angle_from_center(self.board_center(), screen);
                let drag = RingDrag::begin(tile.ring_id, angle, self.rotations.get(tile.ring_id));
                self.session = DragSession::Rotating { drag, origin: screen, moved: false };
                vec![Action::SetCursor("grabbing".into())]
            }
            (Button::Secondary, _) => {
                self.session = DragSession::Panning { start_pointer: screen, start_pan: self.camera.pan(), moved: false };
                vec![Action::SetCursor("move".into())]
            }
            _ => Vec::new(),
        }
    }

    /// Pointer moved anywhere in the window.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let center = self.board_center();
        match &mut self.session {
            DragSession::Idle => Vec::new(),
            DragSession::Rotating { drag, origin, moved } => {
                if screen != *origin {
                    *moved = true;
                }
                let rotation = drag.update(angle_from_center(center, screen));
                self.rotations.set(drag.ring_id, rotation);
                vec![Action::RenderNeeded]
            }
            DragSession::Panning { start_pointer, start_pan, moved } => {
                if screen != *start_pointer {
                    *moved = true;
                }
                let pan = Point::new(start_pan.x + screen.x - start_pointer.x, start_pan.y + screen.y - start_pointer.y);
                self.camera.set_pan(pan);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Pointer released anywhere in the window. Ends the drag session; if it
    /// moved, clicks are suppressed for the configured window.
    pub fn on_pointer_up(&mut self, now_ms: u64) -> Vec<Action> {
        let session = std::mem::take(&mut self.session);
        if !session.is_active() {
            return Vec::new();
        }
        if session.moved() {
            self.gate.arm(now_ms, self.config.drag_suppress_ms);
        }
        vec![Action::SetCursor("default".into())]
    }

    /// Decide a tile click without producing host actions.
    pub fn click_tile(&mut self, tile: TileRef, now_ms: u64) -> ClickOutcome {
        if !self.gate.allows(&self.session, now_ms) {
            return ClickOutcome::Rejected(Rejection::Suppressed);
        }
        if self.read_only {
            return ClickOutcome::Rejected(Rejection::ReadOnly);
        }
        self.economy.toggle(&mut self.board, tile, self.time_expired)
    }

    /// Tile clicked. On success the local state is already updated and the
    /// returned actions push the new board and the balance change.
    pub fn on_tile_click(&mut self, tile: TileRef, now_ms: u64) -> Vec<Action> {
        let outcome = self.click_tile(tile, now_ms);
        let Some(delta) = outcome.energy_delta() else {
            log::debug!("tile {} click rejected: {outcome:?}", MarkerKey::from(tile));
            return Vec::new();
        };
        self.energy_seq += 1;
        vec![
            Action::PushBoard(self.board.clone()),
            Action::PushEnergyDelta { seq: self.energy_seq, delta },
            Action::RenderNeeded,
        ]
    }

    // --- View controls ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_in(self.config.zoom_limits());
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_out(self.config.zoom_limits());
        vec![Action::RenderNeeded]
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn balance(&self) -> u32 {
        self.economy.balance()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn rotation(&self, ring_id: RingId) -> f64 {
        self.rotations.get(ring_id)
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.camera.can_zoom_in(self.config.zoom_limits())
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.camera.can_zoom_out(self.config.zoom_limits())
    }

    /// On-screen board center: layout position plus pan.
    #[must_use]
    pub fn board_center(&self) -> Point {
        self.camera.board_center_on_screen(self.layout_center)
    }

    /// Hover text for a tile, hidden while a drag is in progress.
    #[must_use]
    pub fn tooltip(&self, tile: TileRef) -> Option<String> {
        if self.session.is_active() {
            return None;
        }
        let t = self.board.tile(tile.ring_id, tile.tile_id)?;
        if !t.is_interactive() {
            return None;
        }
        if self.economy.is_active(MarkerKey::from(tile)) {
            Some(format!("Refund: {}", t.energy_value))
        } else {
            Some(format!("Energy cost: {}", t.energy_value))
        }
    }

    #[must_use]
    pub fn scene_layout(&self) -> SceneLayout {
        SceneLayout::for_board(&self.board)
    }

    /// Active markers with their current placement.
    #[must_use]
    pub fn marker_placements(&self) -> Vec<MarkerPlacement> {
        place_markers(
            &self.board,
            self.economy.markers(),
            &self.rotations,
            self.scene_layout().center,
            self.config.marker_radius_factor,
        )
    }

    /// Render the current state as an SVG document.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let markers = self.marker_placements();
        Scene {
            board: &self.board,
            active: self.economy.markers(),
            rotations: &self.rotations,
            markers: &markers,
            text: &self.config.text,
            layout: self.scene_layout(),
            asset_base: &self.config.marker_asset_base,
        }
        .to_svg()
    }
}
