//! Tunable engine configuration.
//!
//! Every field has a default matching the shipped board, so an empty JSON
//! object or no file at all yields a working engine. Hosts that run outside
//! the browser can layer `WHEEL_*` environment overrides on top.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomLimits;
use crate::consts::{
    DRAG_SUPPRESS_MS, MARKER_RADIUS_FACTOR, MAX_ZOOM, MIN_ZOOM, POLL_INTERVAL_MS, ZOOM_STEP,
};
use crate::text::TextLayout;

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document was not valid JSON for this schema.
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Zoom bounds are non-positive or inverted.
    #[error("zoom bounds must satisfy 0 < min ({min}) <= max ({max})")]
    ZoomBounds { min: f64, max: f64 },
    /// Zoom step is zero or negative.
    #[error("zoom step must be positive, got {0}")]
    ZoomStep(f64),
    /// Poll interval of zero would spin.
    #[error("poll interval must be at least 1 ms")]
    PollInterval,
    /// Text layout metrics are non-positive.
    #[error("text layout metrics must be positive")]
    TextLayout,
    /// Marker radius factor outside `(0, 1]`.
    #[error("marker radius factor must be in (0, 1], got {0}")]
    MarkerRadius(f64),
}

/// Engine-wide tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Click suppression window after a drag, in milliseconds.
    pub drag_suppress_ms: u64,
    /// Spectator refresh interval, in milliseconds.
    pub poll_interval_ms: u64,
    pub text: TextLayout,
    /// Marker distance as a fraction of the tile mid-radius.
    pub marker_radius_factor: f64,
    /// Prefix prepended to marker glyph file names.
    pub marker_asset_base: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            drag_suppress_ms: DRAG_SUPPRESS_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            text: TextLayout::default(),
            marker_radius_factor: MARKER_RADIUS_FACTOR,
            marker_asset_base: "/assets/".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation variant for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `WHEEL_*` environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the overrides produce an unusable config.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `WHEEL_*` environment overrides. Unset or unparsable values keep
    /// the current setting.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        self.min_zoom = env_parse("WHEEL_MIN_ZOOM", self.min_zoom);
        self.max_zoom = env_parse("WHEEL_MAX_ZOOM", self.max_zoom);
        self.zoom_step = env_parse("WHEEL_ZOOM_STEP", self.zoom_step);
        self.drag_suppress_ms = env_parse("WHEEL_DRAG_SUPPRESS_MS", self.drag_suppress_ms);
        self.poll_interval_ms = env_parse("WHEEL_POLL_INTERVAL_MS", self.poll_interval_ms);
        self.text.max_lines = env_parse("WHEEL_MAX_TEXT_LINES", self.text.max_lines);
        self.marker_radius_factor = env_parse("WHEEL_MARKER_RADIUS_FACTOR", self.marker_radius_factor);
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(ConfigError::ZoomBounds { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.zoom_step > 0.0 && self.zoom_step.is_finite()) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::PollInterval);
        }
        let text = &self.text;
        if !(text.glyph_width > 0.0 && text.line_height > 0.0 && text.margin >= 0.0 && text.font_size > 0.0)
            || text.max_lines == 0
        {
            return Err(ConfigError::TextLayout);
        }
        if !(self.marker_radius_factor > 0.0 && self.marker_radius_factor <= 1.0) {
            return Err(ConfigError::MarkerRadius(self.marker_radius_factor));
        }
        Ok(())
    }

    /// Zoom limits derived from this config.
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits { min: self.min_zoom, max: self.max_zoom, step: self.zoom_step }
    }
}

/// Read `key` from the environment and parse it, falling back to `default`.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("ignoring unparsable {key}={raw:?}");
            default
        }
    }
}
