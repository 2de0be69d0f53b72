//! Application entry point: Simple Writer.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the speech engine from config (silent engine if unavailable).
//! 5. Open the document store.
//! 6. Run [`eframe::run_native`]; blocks the main thread until the window
//!    is closed.

use anyhow::Context;
use eframe::egui;
use simple_writer::{
    app::WriterSession,
    config::{AppConfig, AppPaths},
    speech::engine_from_config,
    ui::WriterApp,
    workspace::Workspace,
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Simple Writer starting up");

    // 2. Configuration
    let paths = AppPaths::new();
    let config = AppConfig::load_from(&paths.settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (speech worker + spawned TTS processes)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 4. Speech
    let engine = engine_from_config(&config.speech, rt.handle());
    let engine_name = engine.name().to_string();
    log::info!("Speaking through {engine_name}");
    let session = WriterSession::new(engine, config);

    // 5. Document store
    let workspace = Workspace::open(session, &paths)?;

    // 6. Window
    let app = WriterApp::new(workspace, engine_name);
    eframe::run_native(
        "Simple Writer",
        native_options(),
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))?;

    // Speech worker runs until the window has closed.
    drop(rt);
    Ok(())
}

fn native_options() -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title("Simple Writer")
        .with_inner_size([1000.0, 700.0])
        .with_min_inner_size([720.0, 480.0]);

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}
