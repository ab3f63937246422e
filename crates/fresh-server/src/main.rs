//! freshline origin server.
//!
//! Serves the revalidation endpoint and its companion routes:
//! - `GET /api/data` - versioned resource behind conditional GET
//! - `POST /api/data/refresh` - force a new resource version
//! - `GET /cached-logo.png` - immutable static asset
//! - `GET /healthz` - liveness probe

mod config;
mod http;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fresh_origin::ResourceEndpoint;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use routes::Router;

/// ETag revalidation origin for the freshline platform.
#[derive(Parser)]
#[command(name = "freshline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (TOML).
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address; overrides the config file.
    #[arg(short, long)]
    addr: Option<SocketAddr>,

    /// Churn probability; overrides the config file.
    #[arg(long)]
    churn: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(churn) = cli.churn {
        config.origin.churn_probability = churn;
    }

    let addr = match cli.addr {
        Some(addr) => addr,
        None => config
            .listen
            .parse()
            .with_context(|| format!("invalid listen address: {}", config.listen))?,
    };

    tracing::info!(
        churn = config.origin.churn_probability,
        max_age = config.origin.resource_max_age_secs,
        "starting origin"
    );

    let endpoint = ResourceEndpoint::with_random_churn(&config.origin)?;
    http::serve(addr, Arc::new(Router::new(endpoint))).await
}
