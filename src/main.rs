// Hide console window on Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;
use std::sync::Arc;
use tabshell::config::Config;
use tabshell::{app, cli, debug};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let options = cli::process_cli();

    // CLI --log-level takes highest precedence, then TABSHELL_LOG, then config (applied below)
    debug::init_log_bridge(options.log_level);
    log::info!("Starting tabshell {}", tabshell::VERSION);

    // A broken config file is reported and replaced by defaults; it never stops startup
    let config = match &options.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    debug::apply_config_level(config.log_level.to_level_filter());

    // Runtime for per-tab background work
    let runtime = Arc::new(Runtime::new()?);

    let result = app::run(config, options, Arc::clone(&runtime));

    // Background tasks were signalled during shutdown, not joined. Give them
    // a bounded window to wind down.
    log::info!("Event loop exited, shutting down runtime");
    if let Ok(rt) = Arc::try_unwrap(runtime) {
        rt.shutdown_timeout(std::time::Duration::from_secs(2));
    }

    if let Err(ref e) = result {
        eprintln!("tabshell: error: {e:#}");
    }
    result
}
