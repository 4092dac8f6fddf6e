//! Energy marker placement.
//!
//! A marker sits on its tile's angular midpoint, at a fraction of the ring's
//! mid-radius, and turns with the ring: the placement carries the un-rotated
//! position plus the ring's current rotation, which the renderer applies as
//! a group transform about the board center.

#[cfg(test)]
#[path = "markers_test.rs"]
mod markers_test;

use crate::board::BoardConfig;
use crate::camera::Point;
use crate::economy::{ActiveMarkerSet, MarkerKey};
use crate::geometry::polar_to_cartesian;
use crate::rotation::RotationState;

/// Which icon a marker shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyGlyph {
    One,
    Two,
    Three,
    Four,
    /// Any other cost: blank token with the number drawn on top.
    Numbered(u32),
}

impl EnergyGlyph {
    #[must_use]
    pub fn for_cost(cost: u32) -> Self {
        match cost {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            other => Self::Numbered(other),
        }
    }

    /// Image file name for this glyph.
    #[must_use]
    pub fn asset(self) -> &'static str {
        match self {
            Self::One => "energy01.png",
            Self::Two => "energy02.png",
            Self::Three => "energy03.png",
            Self::Four => "energy04.png",
            Self::Numbered(_) => "energyEmpty.png",
        }
    }

    /// Number drawn over the icon, for costs without a dedicated image.
    #[must_use]
    pub fn overlay(self) -> Option<String> {
        match self {
            Self::Numbered(cost) => Some(cost.to_string()),
            _ => None,
        }
    }
}

/// Where and how to draw one active marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    pub key: MarkerKey,
    /// Position before ring rotation.
    pub position: Point,
    /// Tile midpoint angle before ring rotation.
    pub mid_angle_deg: f64,
    /// Current rotation of the owning ring.
    pub ring_rotation_deg: f64,
    pub cost: u32,
    pub glyph: EnergyGlyph,
}

/// Placements for every active marker. Keys that no longer resolve to a tile
/// are skipped.
#[must_use]
pub fn place_markers(
    board: &BoardConfig,
    markers: &ActiveMarkerSet,
    rotations: &RotationState,
    center: Point,
    radius_factor: f64,
) -> Vec<MarkerPlacement> {
    markers
        .iter()
        .filter_map(|key| {
            let ring = board.ring(key.ring_id)?;
            let tile = ring.tile(key.tile_id)?;
            let span = ring.span_of(key.tile_id)?;
            let mid_angle_deg = span.mid_deg();
            let radius = ring.mid_radius() * radius_factor;
            Some(MarkerPlacement {
                key,
                position: polar_to_cartesian(center, radius, mid_angle_deg),
                mid_angle_deg,
                ring_rotation_deg: rotations.get(key.ring_id),
                cost: tile.energy_value,
                glyph: EnergyGlyph::for_cost(tile.energy_value),
            })
        })
        .collect()
}
