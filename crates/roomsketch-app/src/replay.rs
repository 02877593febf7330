//! Scripted replay of editor input.
//!
//! A script is a JSON array of commands:
//! ```json
//! [
//!   { "op": "add_rectangle", "x": 0, "y": 0 },
//!   { "op": "down", "x": 10, "y": 10 },
//!   { "op": "move", "x": 60, "y": 60 },
//!   { "op": "up", "x": 60, "y": 60 }
//! ]
//! ```
//! `down` presses on empty canvas; `press` hit-tests first and grabs the
//! handle or rectangle under the pointer.

use kurbo::Point;
use roomsketch_core::{ConfigError, Editor, Effect, Frame, PointerEvent, Renderer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("usage: roomsketch <script.json> [config.json]")]
    Usage,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Script error: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddRectangle { x: f64, y: f64 },
    AddLine,
    /// Untargeted pointer-down.
    Down { x: f64, y: f64 },
    /// Pointer-down on whatever handle is under the pointer.
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
}

/// Outcome of [`apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub commands: usize,
    pub rooms_created: usize,
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> ReplayResult<Vec<Command>> {
    serde_json::from_str(json).map_err(|e| ReplayError::Parse(e.to_string()))
}

/// Read and parse a script file.
pub fn load_script(path: impl AsRef<Path>) -> ReplayResult<Vec<Command>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| ReplayError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_script(&json)
}

/// Run every command against `editor` in order.
pub fn apply(editor: &mut Editor, commands: &[Command]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for command in commands {
        let effect = match *command {
            Command::AddRectangle { x, y } => {
                editor.add_rectangle(Point::new(x, y));
                Effect::None
            }
            Command::AddLine => {
                editor.add_line();
                Effect::None
            }
            Command::Down { x, y } => editor.handle_pointer_event(PointerEvent::Down {
                position: Point::new(x, y),
                target: None,
            }),
            Command::Press { x, y } => editor.press_at(Point::new(x, y)),
            Command::Move { x, y } => editor.handle_pointer_event(PointerEvent::Move {
                position: Point::new(x, y),
            }),
            Command::Up { x, y } => editor.handle_pointer_event(PointerEvent::Up {
                position: Point::new(x, y),
            }),
            Command::Cancel => {
                editor.cancel();
                Effect::None
            }
        };
        if matches!(effect, Effect::RoomCreated(_)) {
            summary.rooms_created += 1;
        }
        summary.commands += 1;
    }
    summary
}

/// Renderer that serializes each frame to pretty JSON.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    output: String,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON of the last frame.
    pub fn output(&self) -> &str {
        &self.output
    }
}

impl Renderer for JsonRenderer {
    fn build_scene(&mut self, frame: &Frame) {
        if frame.is_empty() {
            log::debug!("Rendering empty frame");
        }
        match serde_json::to_string_pretty(frame) {
            Ok(json) => self.output = json,
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    }
}
