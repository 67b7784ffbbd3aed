//! EBookStore API server binary.

use anyhow::Context;
use ebookstore_api_rest::Application;
use ebookstore_common::{config::AppConfig, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init_from_config(&config.telemetry)?;

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting EBookStore API"
    );

    Application::build(config).await?.run().await
}
