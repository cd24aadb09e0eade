//! Remote Jobs Dashboard
//!
//! Serves the scraped jobs from data/jobs.json as an HTML page with search
//! and a JSON API, using Axum.

mod routes;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use routes::{DashboardConfig, router};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Web dashboard over scraped remote jobs")]
struct Cli {
    /// JSON file written by the scraper.
    #[arg(long, env = "DASHBOARD_STORE", default_value = "data/jobs.json")]
    store: PathBuf,

    /// Interface to listen on.
    #[arg(long, env = "DASHBOARD_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "DASHBOARD_PORT", default_value_t = 5000)]
    port: u16,

    /// Verbose request logging; local development only.
    #[arg(long, env = "DASHBOARD_DEBUG", default_value_t = true, action = clap::ArgAction::Set)]
    debug: bool,
}

impl From<Cli> for DashboardConfig {
    fn from(cli: Cli) -> Self {
        Self {
            store_path: cli.store,
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from(Cli::parse());

    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("🚀 Starting Remote Jobs Dashboard...");
    if !config.store_path.exists() {
        tracing::warn!("⚠️  No {:?} found. Run the scraper first!", config.store_path);
        tracing::warn!("   cargo run -p wwr-scraper");
    }

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("🌐 Server running at http://{}", addr);
    if config.debug {
        tracing::warn!("debug mode is on; do not expose this server publicly");
    }

    axum::serve(listener, router(config))
        .await
        .context("server error")?;

    Ok(())
}
