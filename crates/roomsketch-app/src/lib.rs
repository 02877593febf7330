//! RoomSketch replay shell
//!
//! Drives the core editor from a scripted list of pointer events and editor
//! commands, and renders the resulting frame as JSON.

mod replay;

pub use replay::{Command, JsonRenderer, ReplayError, ReplayResult, ReplaySummary, apply, load_script, parse_script};
