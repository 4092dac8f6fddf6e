//! Input model: pointer buttons, tile references, and the drag session.
//!
//! At most one [`DragSession`] exists for the whole board. It is created on
//! pointer-down, fed every window-level pointer-move, and dropped on
//! pointer-up, at which point the click gate decides whether the trailing
//! click still counts.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::board::{RingId, TileId};
use crate::camera::Point;
use crate::rotation::RingDrag;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap). Rotates rings.
    Primary,
    /// Middle mouse button. Ignored.
    Middle,
    /// Right mouse button. Pans the board.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A tile addressed by ring and tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRef {
    pub ring_id: RingId,
    pub tile_id: TileId,
}

impl TileRef {
    #[must_use]
    pub fn new(ring_id: RingId, tile_id: TileId) -> Self {
        Self { ring_id, tile_id }
    }
}

/// The active drag gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    /// Primary-button drag started on a tile.
    Rotating { drag: RingDrag, origin: Point, moved: bool },
    /// Secondary-button drag anywhere on the board.
    Panning { start_pointer: Point, start_pan: Point, moved: bool },
}

impl DragSession {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether any pointer-move arrived during this session.
    #[must_use]
    pub fn moved(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Rotating { moved, .. } | Self::Panning { moved, .. } => *moved,
        }
    }

    /// Ring being rotated, if this is a rotate session.
    #[must_use]
    pub fn rotating_ring(&self) -> Option<RingId> {
        match self {
            Self::Rotating { drag, .. } => Some(drag.ring_id),
            _ => None,
        }
    }
}
