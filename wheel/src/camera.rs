#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in screen or board space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Zoom bounds and step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: crate::consts::MIN_ZOOM,
            max: crate::consts::MAX_ZOOM,
            step: crate::consts::ZOOM_STEP,
        }
    }
}

/// Pan/zoom state for the whole board.
///
/// `pan_x` / `pan_y` are raw CSS pixels, not divided by zoom.
/// `zoom` is a scale factor about the board center (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan_x = pan.x;
        self.pan_y = pan.y;
    }

    /// Step zoom up, clamped to the upper bound.
    pub fn zoom_in(&mut self, limits: ZoomLimits) {
        self.zoom = snap(self.zoom + limits.step).min(limits.max);
    }

    /// Step zoom down, clamped to the lower bound.
    pub fn zoom_out(&mut self, limits: ZoomLimits) {
        self.zoom = snap(self.zoom - limits.step).max(limits.min);
    }

    #[must_use]
    pub fn can_zoom_in(&self, limits: ZoomLimits) -> bool {
        self.zoom < limits.max
    }

    #[must_use]
    pub fn can_zoom_out(&self, limits: ZoomLimits) -> bool {
        self.zoom > limits.min
    }

    /// Back to zoom 1 and no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// CSS transform for the board container: translate first, then scale
    /// about the container center.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.pan_x, self.pan_y, self.zoom)
    }

    /// Where the board center lands on screen, given its unpanned layout
    /// position. Scaling about the center leaves it fixed, so only pan moves it.
    #[must_use]
    pub fn board_center_on_screen(&self, layout_center: Point) -> Point {
        Point::new(layout_center.x + self.pan_x, layout_center.y + self.pan_y)
    }

    /// Inverse of [`Camera::board_center_on_screen`]: the unpanned layout
    /// position of a board whose transformed center was measured on screen.
    #[must_use]
    pub fn layout_center_of(&self, rendered_center: Point) -> Point {
        Point::new(rendered_center.x - self.pan_x, rendered_center.y - self.pan_y)
    }
}

/// Round away accumulated float error from repeated steps.
fn snap(zoom: f64) -> f64 {
    (zoom * 1e6).round() / 1e6
}
