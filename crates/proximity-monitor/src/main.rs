//! Obstacle Proximity Monitor - Main Entry Point

use proximity_monitor::{init_logging, run, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    init_logging(settings.log_level(), settings.log_json)?;

    info!("=== Obstacle Proximity Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    run(&settings).await?;

    Ok(())
}
