//! Board model: rings of tiles, their wire format, and load-time validation.
//!
//! A [`BoardConfig`] is fetched once per view and then mutated only by
//! validated tile clicks. Its JSON shape is shared with the remote store, so
//! field names follow the store (`ringData`, `innerRadius`, `labels`,
//! `energyvalue`, ...) while the Rust side uses snake case.
//!
//! [`BoardConfig::from_json`] and [`BoardConfig::validate`] are the only
//! gates: everything downstream (geometry, economy, rendering) assumes a
//! validated board.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::RING_TITLE_UNITS;
use crate::economy::MarkerKey;

/// Ring identifier, unique within a board.
pub type RingId = u32;

/// Tile identifier, unique within its ring.
pub type TileId = u32;

/// Schema violations detected while loading a board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("ring {ring}: radii must satisfy outer ({outer}) > inner ({inner}) > 0")]
    InvalidRadii { ring: RingId, inner: f64, outer: f64 },
    #[error("ring {ring} overlaps or precedes ring {previous}")]
    RingOverlap { ring: RingId, previous: RingId },
    #[error("duplicate ring id {0}")]
    DuplicateRing(RingId),
    #[error("ring {ring}: duplicate tile id {tile}")]
    DuplicateTile { ring: RingId, tile: TileId },
    #[error("ring {ring}: title tile {tile} must be the first tile")]
    MisplacedTitle { ring: RingId, tile: TileId },
}

/// Whether a tile takes part in the economy or labels its ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    /// Clickable tile with an energy cost.
    #[default]
    Action,
    /// Non-interactive ring label occupying two partition units.
    RingTitle,
}

/// Scenario card embedded in a board. Carried, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circumstance {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// A single wedge on a ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub text: String,
    /// CSS fill color.
    #[serde(default)]
    pub color: String,
    /// Energy spent to activate this tile.
    #[serde(rename = "energyvalue", default)]
    pub energy_value: u32,
    /// Whether an energy marker currently sits on this tile.
    #[serde(rename = "energypoint", default)]
    pub energy_point: bool,
    /// Circumstance names this tile is relevant to.
    #[serde(default)]
    pub required_for: Vec<String>,
    #[serde(rename = "tileType", default)]
    pub tile_type: TileType,
}

impl Tile {
    /// Partition units this tile consumes.
    #[must_use]
    pub fn units(&self) -> u32 {
        match self.tile_type {
            TileType::Action => 1,
            TileType::RingTitle => RING_TITLE_UNITS,
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.tile_type == TileType::Action
    }
}

/// One concentric band of tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub id: RingId,
    #[serde(rename = "innerRadius")]
    pub inner_radius: f64,
    #[serde(rename = "outerRadius")]
    pub outer_radius: f64,
    #[serde(rename = "labels", default)]
    pub tiles: Vec<Tile>,
}

/// Angular extent of one tile, in degrees clockwise from the top, before
/// ring rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpan {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl TileSpan {
    #[must_use]
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    #[must_use]
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

impl Ring {
    #[must_use]
    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Total partition units across all tiles.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.tiles.iter().map(Tile::units).sum()
    }

    /// Angular spans of every tile, in tile order. Empty for a ring with no tiles.
    #[must_use]
    pub fn tile_spans(&self) -> Vec<TileSpan> {
        let total = self.total_units();
        if total == 0 {
            return Vec::new();
        }
        let unit = 360.0 / f64::from(total);
        let mut cursor = 0u32;
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let start = f64::from(cursor) * unit;
                cursor += tile.units();
                TileSpan { index, start_deg: start, end_deg: f64::from(cursor) * unit }
            })
            .collect()
    }

    /// Angular span of the tile with the given id.
    #[must_use]
    pub fn span_of(&self, tile_id: TileId) -> Option<TileSpan> {
        let index = self.tiles.iter().position(|t| t.id == tile_id)?;
        self.tile_spans().get(index).copied()
    }

    #[must_use]
    pub fn tile(&self, tile_id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == tile_id)
    }

    pub fn tile_mut(&mut self, tile_id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == tile_id)
    }
}

/// The complete board: metadata plus rings ordered inner to outer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub circumstances: Vec<Circumstance>,
    #[serde(rename = "ringData", default)]
    pub rings: Vec<Ring>,
}

impl BoardConfig {
    /// Parse and validate a board from its wire JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Parse`] for malformed JSON, or the first schema
    /// violation found by [`BoardConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, BoardError> {
        let board: Self = serde_json::from_str(raw)?;
        board.validate()?;
        Ok(board)
    }

    /// Validate an already-deserialized board.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: bad radii, overlapping or
    /// misordered rings, duplicate ids, or a title tile that is not first.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut ring_ids = HashSet::new();
        let mut previous: Option<&Ring> = None;
        for ring in &self.rings {
            let (inner, outer) = (ring.inner_radius, ring.outer_radius);
            if !(inner.is_finite() && outer.is_finite() && inner > 0.0 && outer > inner) {
                return Err(BoardError::InvalidRadii { ring: ring.id, inner, outer });
            }
            if !ring_ids.insert(ring.id) {
                return Err(BoardError::DuplicateRing(ring.id));
            }
            if let Some(prev) = previous {
                if inner < prev.outer_radius {
                    return Err(BoardError::RingOverlap { ring: ring.id, previous: prev.id });
                }
            }
            let mut tile_ids = HashSet::new();
            for (index, tile) in ring.tiles.iter().enumerate() {
                if !tile_ids.insert(tile.id) {
                    return Err(BoardError::DuplicateTile { ring: ring.id, tile: tile.id });
                }
                if tile.tile_type == TileType::RingTitle && index != 0 {
                    return Err(BoardError::MisplacedTitle { ring: ring.id, tile: tile.id });
                }
            }
            previous = Some(ring);
        }
        Ok(())
    }

    #[must_use]
    pub fn ring(&self, ring_id: RingId) -> Option<&Ring> {
        self.rings.iter().find(|r| r.id == ring_id)
    }

    pub fn ring_mut(&mut self, ring_id: RingId) -> Option<&mut Ring> {
        self.rings.iter_mut().find(|r| r.id == ring_id)
    }

    #[must_use]
    pub fn tile(&self, ring_id: RingId, tile_id: TileId) -> Option<&Tile> {
        self.ring(ring_id)?.tile(tile_id)
    }

    pub fn tile_mut(&mut self, ring_id: RingId, tile_id: TileId) -> Option<&mut Tile> {
        self.ring_mut(ring_id)?.tile_mut(tile_id)
    }

    /// Keys of every tile whose active flag is set, in board order.
    #[must_use]
    pub fn marker_keys(&self) -> Vec<MarkerKey> {
        self.rings
            .iter()
            .flat_map(|ring| {
                ring.tiles
                    .iter()
                    .filter(|t| t.energy_point)
                    .map(move |t| MarkerKey::new(ring.id, t.id))
            })
            .collect()
    }

    /// Largest outer radius on the board, or zero when there are no rings.
    #[must_use]
    pub fn outer_extent(&self) -> f64 {
        self.rings.iter().map(|r| r.outer_radius).fold(0.0, f64::max)
    }
}
