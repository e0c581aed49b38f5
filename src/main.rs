mod bot;
mod config;
mod llm;
mod prompt;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::AppState;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,txrelay_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A local .env is optional; deployments set the environment directly.
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config = Config::from_env().context("Failed to load configuration from environment")?;

    info!("Configuration loaded successfully");
    info!("  Model: {}", llm::MODEL);
    info!("  API base: {}", config.llm.base_url);

    let state = Arc::new(AppState::new(config));

    info!("Bot is starting...");
    bot::run(state).await?;

    Ok(())
}
