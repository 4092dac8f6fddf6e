//! Per-ring rotation state and the rotate-drag accumulator.

#[cfg(test)]
#[path = "rotation_test.rs"]
mod rotation_test;

use std::collections::HashMap;

use crate::board::RingId;

/// Fold an angular difference into `(-180, 180]` with a single ±360 shift.
///
/// Inputs are differences of two `atan2` angles, so they already lie in
/// `(-360, 360)` and one shift is enough.
#[must_use]
pub fn normalize_delta(delta_deg: f64) -> f64 {
    if delta_deg > 180.0 {
        delta_deg - 360.0
    } else if delta_deg <= -180.0 {
        delta_deg + 360.0
    } else {
        delta_deg
    }
}

/// Signed rotation in degrees for every ring. Unbounded; rings never seen
/// are at 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotationState {
    angles: HashMap<RingId, f64>,
}

impl RotationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, ring_id: RingId) -> f64 {
        self.angles.get(&ring_id).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, ring_id: RingId, degrees: f64) {
        self.angles.insert(ring_id, degrees);
    }

    /// Every ring back to 0.
    pub fn clear(&mut self) {
        self.angles.clear();
    }
}

/// Bookkeeping for one rotate drag.
///
/// Each pointer move adds the normalized step since the previous move, so the
/// ring follows the pointer continuously through any number of turns instead
/// of snapping when the pointer crosses the ±180° seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDrag {
    pub ring_id: RingId,
    /// Pointer angle at pointer-down.
    pub start_angle: f64,
    /// Ring rotation at pointer-down.
    pub start_rotation: f64,
    last_angle: f64,
    accumulated: f64,
}

impl RingDrag {
    #[must_use]
    pub fn begin(ring_id: RingId, pointer_angle: f64, current_rotation: f64) -> Self {
        Self {
            ring_id,
            start_angle: pointer_angle,
            start_rotation: current_rotation,
            last_angle: pointer_angle,
            accumulated: 0.0,
        }
    }

    /// Feed a new pointer angle; returns the ring's new rotation.
    pub fn update(&mut self, pointer_angle: f64) -> f64 {
        self.accumulated += normalize_delta(pointer_angle - self.last_angle);
        self.last_angle = pointer_angle;
        self.rotation()
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.start_rotation + self.accumulated
    }
}
