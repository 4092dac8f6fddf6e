//! SVG scene builder.
//!
//! Produces the whole board as one SVG document string: a rotated group per
//! ring holding its wedges and curved labels, separator circles between
//! rings, and the marker layer on top. Wedges carry `data-ring` /
//! `data-tile` attributes so the host can resolve pointer targets with a
//! single `closest("[data-tile]")` lookup.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use crate::board::{BoardConfig, Ring, TileType};
use crate::camera::Point;
use crate::consts::{
    BOARD_HALF_EXTENT, MARKER_OVERLAY_FONT_SIZE, MARKER_SIZE, SEPARATOR_STROKE_WIDTH, TEXT_BASELINE_SHIFT,
    TILE_STROKE_WIDTH,
};
use crate::economy::{ActiveMarkerSet, MarkerKey};
use crate::geometry::{annular_sector_path, fmt_num};
use crate::markers::MarkerPlacement;
use crate::rotation::RotationState;
use crate::text::{TextLayout, layout_label};

const TILE_STROKE: &str = "#f5f5f3";
const SEPARATOR_STROKE: &str = "#000";
const LABEL_FILL: &str = "#000";
const OVERLAY_FILL: &str = "#d5b14e";

/// Size and center of the drawing area for a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    /// Side length of the square view box.
    pub size: f64,
    pub center: Point,
}

impl SceneLayout {
    /// The view box fits the largest ring (at least the default board radius)
    /// plus the tile stroke on every side.
    #[must_use]
    pub fn for_board(board: &BoardConfig) -> Self {
        let half = board.outer_extent().max(BOARD_HALF_EXTENT) + TILE_STROKE_WIDTH;
        Self { size: half * 2.0, center: Point::new(half, half) }
    }
}

/// Everything the renderer reads.
pub struct Scene<'a> {
    pub board: &'a BoardConfig,
    pub active: &'a ActiveMarkerSet,
    pub rotations: &'a RotationState,
    pub markers: &'a [MarkerPlacement],
    pub text: &'a TextLayout,
    pub layout: SceneLayout,
    /// Prefix for marker image URLs.
    pub asset_base: &'a str,
}

impl Scene<'_> {
    /// Render the complete SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let size = fmt_num(self.layout.size);
        let mut out = String::new();
        push_line(
            &mut out,
            format_args!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="100%" height="100%" data-testid="wheel-board">"#
            ),
        );
        for ring in &self.board.rings {
            self.write_ring(&mut out, ring);
        }
        self.write_separators(&mut out);
        self.write_markers(&mut out);
        out.push_str("</svg>\n");
        out
    }

    fn rotate_about_center(&self, degrees: f64) -> String {
        let c = self.layout.center;
        format!("rotate({} {} {})", fmt_num(degrees), fmt_num(c.x), fmt_num(c.y))
    }

    fn write_ring(&self, out: &mut String, ring: &Ring) {
        let transform = self.rotate_about_center(self.rotations.get(ring.id));
        push_line(out, format_args!(r#"  <g data-testid="ring-group-{}" transform="{transform}">"#, ring.id));

        for span in ring.tile_spans() {
            let Some(tile) = ring.tiles.get(span.index) else {
                continue;
            };
            let Some(path) = annular_sector_path(
                self.layout.center,
                ring.inner_radius,
                ring.outer_radius,
                span.start_deg,
                span.end_deg,
            ) else {
                continue;
            };
            let mut class = String::from(match tile.tile_type {
                TileType::Action => "tile tile-action",
                TileType::RingTitle => "tile tile-title",
            });
            if self.active.contains(MarkerKey::new(ring.id, tile.id)) {
                class.push_str(" tile-active");
            }
            push_line(
                out,
                format_args!(
                    r#"    <path d="{path}" fill="{}" stroke="{TILE_STROKE}" stroke-width="{}" class="{class}" data-ring="{}" data-tile="{}"/>"#,
                    escape_xml(&tile.color),
                    fmt_num(TILE_STROKE_WIDTH),
                    ring.id,
                    tile.id,
                ),
            );

            let lines = layout_label(
                &tile.text,
                self.layout.center,
                ring.inner_radius,
                ring.outer_radius,
                span.start_deg,
                span.end_deg,
                self.text,
            );
            for line in lines {
                let id = format!("textPath-{}-{}-{}", ring.id, span.index, line.line_index);
                push_line(out, format_args!(r#"    <defs><path id="{id}" d="{}"/></defs>"#, line.path));
                push_line(
                    out,
                    format_args!(
                        r##"    <text dy="{}" font-size="{}" font-weight="600" fill="{LABEL_FILL}" pointer-events="none"><textPath href="#{id}" startOffset="50%" text-anchor="middle">{}</textPath></text>"##,
                        fmt_num(TEXT_BASELINE_SHIFT),
                        fmt_num(self.text.font_size),
                        escape_xml(&line.text),
                    ),
                );
            }
        }
        out.push_str("  </g>\n");
    }

    fn write_separators(&self, out: &mut String) {
        let c = self.layout.center;
        let mut radii: Vec<f64> = self.board.rings.iter().map(|r| r.inner_radius).collect();
        if let Some(last) = self.board.rings.last() {
            radii.push(last.outer_radius);
        }
        for r in radii {
            push_line(
                out,
                format_args!(
                    r#"  <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{SEPARATOR_STROKE}" stroke-width="{}" pointer-events="none"/>"#,
                    fmt_num(c.x),
                    fmt_num(c.y),
                    fmt_num(r),
                    fmt_num(SEPARATOR_STROKE_WIDTH),
                ),
            );
        }
    }

    fn write_markers(&self, out: &mut String) {
        out.push_str("  <g data-testid=\"markers\" pointer-events=\"none\">\n");
        let half = MARKER_SIZE / 2.0;
        for marker in self.markers {
            let p = marker.position;
            push_line(
                out,
                format_args!(
                    r#"    <g data-marker="{}" transform="{}">"#,
                    marker.key,
                    self.rotate_about_center(marker.ring_rotation_deg)
                ),
            );
            push_line(
                out,
                format_args!(
                    r#"      <g transform="rotate({} {} {})">"#,
                    fmt_num(marker.mid_angle_deg),
                    fmt_num(p.x),
                    fmt_num(p.y)
                ),
            );
            push_line(
                out,
                format_args!(
                    r#"        <image href="{}{}" x="{}" y="{}" width="{size}" height="{size}"/>"#,
                    escape_xml(self.asset_base),
                    marker.glyph.asset(),
                    fmt_num(p.x - half),
                    fmt_num(p.y - half),
                    size = fmt_num(MARKER_SIZE),
                ),
            );
            if let Some(overlay) = marker.glyph.overlay() {
                push_line(
                    out,
                    format_args!(
                        r#"        <text x="{}" y="{}" text-anchor="middle" font-size="{}" font-weight="700" fill="{OVERLAY_FILL}">{overlay}</text>"#,
                        fmt_num(p.x),
                        fmt_num(p.y + TEXT_BASELINE_SHIFT),
                        fmt_num(MARKER_OVERLAY_FONT_SIZE),
                    ),
                );
            }
            out.push_str("      </g>\n    </g>\n");
        }
        out.push_str("  </g>\n");
    }
}

fn push_line(out: &mut String, args: fmt::Arguments<'_>) {
    out.push_str(&args.to_string());
    out.push('\n');
}

/// Escape text for use in XML content and attribute values.
#[must_use]
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
