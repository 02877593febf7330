//! Engine configuration.

use crate::attachment::ATTACH_TOLERANCE;
use crate::color::Rgba;
use crate::snap::SNAP_THRESHOLD;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable distances and styling for the editor.
///
/// Missing fields fall back to their defaults, so a partial JSON document is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vertex snap distance (strict).
    pub snap_threshold: f64,
    /// Distance to the first vertex that closes a polyline on press.
    pub closure_tolerance: f64,
    /// Distance within which a line endpoint attaches to another line.
    pub attach_tolerance: f64,
    /// Radius of drag handles.
    pub handle_radius: f64,
    /// Stroke color for every outline.
    pub stroke_color: Rgba,
    pub line_stroke_width: f64,
    pub room_stroke_width: f64,
    /// Side length of rectangles created with `add_rectangle`.
    pub new_rectangle_size: f64,
    /// Endpoints of lines created with `add_line`.
    pub new_line: (Point, Point),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            closure_tolerance: 5.0,
            attach_tolerance: ATTACH_TOLERANCE,
            handle_radius: 5.0,
            stroke_color: Rgba::outline(),
            line_stroke_width: 3.0,
            room_stroke_width: 2.0,
            new_rectangle_size: 100.0,
            new_line: (Point::new(50.0, 50.0), Point::new(150.0, 150.0)),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
