pub mod api;
pub mod core;
pub mod providers;
pub mod rates;

pub use crate::core::config;

use anyhow::{Context, Result};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::providers::HttpUpstream;
use crate::rates::{RateService, RateSettings};

pub enum AppCommand {
    Serve { address: Option<String> },
}

/// Builds the full router for a configuration, wired to the live provider.
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let settings = RateSettings::from_config(config)?;
    let rates = RateService::new(Arc::new(HttpUpstream::new()), settings);
    Ok(api::router(rates, Path::new(&config.server.static_dir)))
}

pub async fn serve(config: AppConfig) -> Result<()> {
    let app = build_app(&config)?;
    let listener = tokio::net::TcpListener::bind(&config.server.address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.address))?;

    info!(
        address = %config.server.address,
        upstream = %config.provider.base_url,
        "Cambio listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve { address } => {
            if let Some(address) = address {
                config.server.address = address;
            }
            serve(config).await
        }
    }
}
