//! Tracker Desk - desktop client for a GPS tracking server

use tracing::{error, info};
use tracker_desk::{
    api::ApiClient,
    config::ConfigManager,
    error::Result,
    logging::{init_logging, LogLevel},
    ui::TrackerDeskApp,
};

/// Loads configuration, starts logging and the async runtime, then blocks
/// on the window
///
/// # Errors
///
/// Returns error if configuration, the runtime, the client or the window
/// cannot be set up
fn run() -> Result<()> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load_or_create_default()?;

    init_logging(config.logging.level.parse().unwrap_or(LogLevel::Info));
    info!("Starting Tracker Desk v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {:?}", config_manager.config_directory());
    info!("Server: {}", config.server.base_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let api = ApiClient::new(&config.server)?;

    TrackerDeskApp::new(
        runtime.handle().clone(),
        api,
        &config,
        config_manager.preference_store(),
    )
    .run()?;

    info!("Tracker Desk stopped.");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet if configuration failed
        eprintln!("Tracker Desk failed: {}", e);
        error!("Tracker Desk failed: {}", e);
        std::process::exit(1);
    }
}
