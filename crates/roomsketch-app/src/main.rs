//! Replay entry point: `roomsketch <script.json> [config.json]`.

use roomsketch_app::{JsonRenderer, ReplayError, ReplayResult, apply, load_script};
use roomsketch_core::{Editor, EngineConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting RoomSketch replay");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("roomsketch: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> ReplayResult<()> {
    let mut args = std::env::args().skip(1);
    let script_path = args.next().ok_or(ReplayError::Usage)?;
    let config = match args.next() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let commands = load_script(&script_path)?;
    let mut editor = Editor::with_config(config);
    let summary = apply(&mut editor, &commands);
    log::info!(
        "Replayed {} commands from {script_path}, {} rooms created",
        summary.commands,
        summary.rooms_created
    );

    let mut renderer = JsonRenderer::new();
    editor.render(&mut renderer);
    println!("{}", renderer.output());
    Ok(())
}
