//! Shared numeric defaults for the wheel crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom increment applied by a single zoom-in / zoom-out control press.
pub const ZOOM_STEP: f64 = 0.2;

// ── Interaction timing ──────────────────────────────────────────

/// Clicks arriving this many milliseconds after a drag ends are ignored.
pub const DRAG_SUPPRESS_MS: u64 = 100;

/// Refresh interval for read-only (spectator) views.
pub const POLL_INTERVAL_MS: u64 = 2000;

// ── Text layout ─────────────────────────────────────────────────

/// Estimated width of one glyph along the arc, in board units.
pub const GLYPH_WIDTH: f64 = 12.0;

/// Radial distance between stacked text lines.
pub const LINE_HEIGHT: f64 = 20.0;

/// Lines closer than this to a ring edge are dropped.
pub const TEXT_MARGIN: f64 = 15.0;

/// Upper bound on lines per tile.
pub const MAX_TEXT_LINES: usize = 6;

/// Label font size.
pub const FONT_SIZE: f64 = 20.0;

/// Baseline shift applied to each text path so glyphs sit centered on the arc.
pub const TEXT_BASELINE_SHIFT: f64 = 8.0;

// ── Board drawing ───────────────────────────────────────────────

/// Minimum half-extent of the drawing area (board radius).
pub const BOARD_HALF_EXTENT: f64 = 800.0;

/// Width of the light stroke between tiles.
pub const TILE_STROKE_WIDTH: f64 = 14.0;

/// Width of the dark separator circles between rings.
pub const SEPARATOR_STROKE_WIDTH: f64 = 8.0;

/// Arc sweep removed from a full-circle wedge so its endpoints stay distinct.
pub const FULL_CIRCLE_EPSILON_DEG: f64 = 1e-3;

// ── Markers ─────────────────────────────────────────────────────

/// Marker distance from the center as a fraction of the tile's mid-radius.
pub const MARKER_RADIUS_FACTOR: f64 = 0.85;

/// Side length of a marker glyph image.
pub const MARKER_SIZE: f64 = 60.0;

/// Font size of the numeric overlay on high-cost markers.
pub const MARKER_OVERLAY_FONT_SIZE: f64 = 28.0;

/// Units of the 360° partition consumed by a ring title tile.
pub const RING_TITLE_UNITS: u32 = 2;

// ── Economy ─────────────────────────────────────────────────────

/// Starting energy for a new team.
pub const DEFAULT_STARTING_ENERGY: u32 = 32;
