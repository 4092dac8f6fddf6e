//! Curved label layout inside a wedge.
//!
//! A label is wrapped into whole-word lines sized to the arc length at the
//! ring's mid-radius, then stacked symmetrically around that radius. Lines
//! that would sit too close to either ring edge are dropped rather than
//! squeezed, so a wedge that is too thin simply shows less text.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{FONT_SIZE, GLYPH_WIDTH, LINE_HEIGHT, MAX_TEXT_LINES, TEXT_MARGIN};
use crate::geometry::{SvgPath, text_arc_path};

/// Text metrics used by [`layout_label`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayout {
    /// Estimated glyph advance along the arc.
    pub glyph_width: f64,
    /// Radial spacing between stacked lines.
    pub line_height: f64,
    /// Minimum distance from either ring edge.
    pub margin: f64,
    pub max_lines: usize,
    pub font_size: f64,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            glyph_width: GLYPH_WIDTH,
            line_height: LINE_HEIGHT,
            margin: TEXT_MARGIN,
            max_lines: MAX_TEXT_LINES,
            font_size: FONT_SIZE,
        }
    }
}

/// One placed line of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Position of this line in the wrapped sequence, before margin drops.
    pub line_index: usize,
    pub radius: f64,
    pub path: SvgPath,
}

/// How many glyphs fit along the arc of `sweep_deg` at `mid_radius`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn char_budget(mid_radius: f64, sweep_deg: f64, glyph_width: f64) -> usize {
    let arc = mid_radius * sweep_deg.to_radians();
    if !(arc.is_finite() && arc > 0.0 && glyph_width > 0.0) {
        return 0;
    }
    (arc / glyph_width).floor() as usize
}

/// Greedy word wrap.
///
/// Text within `budget` stays on one line. Otherwise words are packed into
/// lines of at most `budget` characters, never splitting a word; a word longer
/// than the budget gets a line to itself, so a zero budget puts one word on
/// each line. Words beyond `max_lines` are dropped.
#[must_use]
pub fn wrap_words(text: &str, budget: usize, max_lines: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || max_lines == 0 {
        return Vec::new();
    }
    if text.chars().count() <= budget {
        return vec![text.to_owned()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                return lines;
            }
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out `text` inside the wedge `[start_deg, end_deg]` of the ring between
/// `inner_r` and `outer_r`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout_label(
    text: &str,
    center: Point,
    inner_r: f64,
    outer_r: f64,
    start_deg: f64,
    end_deg: f64,
    layout: &TextLayout,
) -> Vec<TextLine> {
    let mid = (inner_r + outer_r) / 2.0;
    let budget = char_budget(mid, end_deg - start_deg, layout.glyph_width);
    let lines = wrap_words(text, budget, layout.max_lines);
    let centre_index = (lines.len() as f64 - 1.0) / 2.0;

    lines
        .into_iter()
        .enumerate()
        .filter_map(|(line_index, text)| {
            let radius = mid - (line_index as f64 - centre_index) * layout.line_height;
            if radius > outer_r - layout.margin || radius < inner_r + layout.margin {
                return None;
            }
            let path = text_arc_path(center, radius, start_deg, end_deg)?;
            Some(TextLine { text, line_index, radius, path })
        })
        .collect()
}
