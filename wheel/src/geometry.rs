//! Polar math and annular-sector path construction.
//!
//! Angles are degrees measured clockwise from the top of the board (12
//! o'clock), which is what tile spans and ring rotations use. They are
//! shifted by -90° before conversion so that 0° lands at the top in SVG's
//! y-down coordinate system.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use crate::camera::Point;
use crate::consts::FULL_CIRCLE_EPSILON_DEG;

/// Convert a board angle and radius to a cartesian point around `center`.
#[must_use]
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// SVG large-arc flag for an arc from `start_deg` to `end_deg`.
#[must_use]
pub fn large_arc_flag(start_deg: f64, end_deg: f64) -> bool {
    end_deg - start_deg > 180.0
}

/// Pointer angle around `center` in degrees, `atan2` convention
/// (0° = +x axis, positive toward +y).
#[must_use]
pub fn angle_from_center(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

/// One SVG path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc (equal radii, no x-axis rotation).
    Arc { radius: f64, large_arc: bool, clockwise: bool, to: Point },
    Close,
}

/// An SVG path as a command list. `Display` renders the `d` attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgPath {
    commands: Vec<PathCommand>,
}

impl SvgPath {
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    fn push(&mut self, command: PathCommand) -> &mut Self {
        self.commands.push(command);
        self
    }
}

impl fmt::Display for SvgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::Arc { radius, large_arc, clockwise, to } => write!(
                    f,
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(large_arc),
                    u8::from(clockwise),
                    fmt_num(to.x),
                    fmt_num(to.y),
                    r = fmt_num(radius),
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Clamp a sweep so a full circle does not collapse to coincident endpoints.
fn effective_end(start_deg: f64, end_deg: f64) -> f64 {
    if end_deg - start_deg >= 360.0 {
        start_deg + 360.0 - FULL_CIRCLE_EPSILON_DEG
    } else {
        end_deg
    }
}

/// Closed outline of the annular sector between two radii and two angles.
///
/// Inner start, outer start, clockwise outer arc, inner end, counter-clockwise
/// inner arc back, close. Returns `None` for malformed input (non-finite
/// values, `outer <= inner`, negative inner radius, or a negative sweep),
/// in which case the wedge is simply not drawn.
#[must_use]
pub fn annular_sector_path(center: Point, inner_r: f64, outer_r: f64, start_deg: f64, end_deg: f64) -> Option<SvgPath> {
    let finite = [inner_r, outer_r, start_deg, end_deg].iter().all(|v| v.is_finite());
    if !finite || inner_r < 0.0 || outer_r <= inner_r || end_deg < start_deg {
        return None;
    }
    let end_deg = effective_end(start_deg, end_deg);
    let large_arc = large_arc_flag(start_deg, end_deg);

    let inner_start = polar_to_cartesian(center, inner_r, start_deg);
    let outer_start = polar_to_cartesian(center, outer_r, start_deg);
    let outer_end = polar_to_cartesian(center, outer_r, end_deg);
    let inner_end = polar_to_cartesian(center, inner_r, end_deg);

    let mut path = SvgPath::default();
    path.push(PathCommand::MoveTo(inner_start))
        .push(PathCommand::LineTo(outer_start))
        .push(PathCommand::Arc { radius: outer_r, large_arc, clockwise: true, to: outer_end })
        .push(PathCommand::LineTo(inner_end))
        .push(PathCommand::Arc { radius: inner_r, large_arc, clockwise: false, to: inner_start })
        .push(PathCommand::Close);
    Some(path)
}

/// Open clockwise arc at `radius` from `start_deg` to `end_deg`, used as the
/// baseline of one text line. A zero sweep yields a degenerate arc.
#[must_use]
pub fn text_arc_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> Option<SvgPath> {
    let finite = [radius, start_deg, end_deg].iter().all(|v| v.is_finite());
    if !finite || radius <= 0.0 || end_deg < start_deg {
        return None;
    }
    let end_deg = effective_end(start_deg, end_deg);
    let mut path = SvgPath::default();
    path.push(PathCommand::MoveTo(polar_to_cartesian(center, radius, start_deg)))
        .push(PathCommand::Arc {
            radius,
            large_arc: large_arc_flag(start_deg, end_deg),
            clockwise: true,
            to: polar_to_cartesian(center, radius, end_deg),
        });
    Some(path)
}
