use std::sync::Arc;

use reserves_sync::canvas::CanvasHttpClient;
use reserves_sync::config::SyncConfig;
use reserves_sync::leganto::LegantoHttpClient;
use reserves_sync::services::SyncService;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "reserves_sync=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SyncConfig::new_from_env()?;
    info!(
        "Syncing {} Canvas account(s) for {} into Leganto",
        config.run.accounts.len(),
        config.run.search_term
    );

    let canvas = Arc::new(CanvasHttpClient::new(config.canvas.clone())?);
    let leganto = Arc::new(LegantoHttpClient::new(config.leganto.clone())?);
    let service = SyncService::new(canvas, leganto, config.run);

    let report = service.sync_all().await;

    let summary = serde_json::to_string(&report)?;
    if report.has_failures() {
        warn!("Sync finished with failures: {}", summary);
    } else {
        info!("Sync finished: {}", summary);
    }

    Ok(())
}
