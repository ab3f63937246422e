//! Offline demo: the cache-first worker against a live origin.
//!
//! Run the origin first (`freshline`), then this workload. It walks through
//! the interceptor's states: a cache miss that populates the partition, a
//! hit that never touches the network, and a fresh worker pointed at an
//! unreachable origin that serves the offline placeholder.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use fresh_cache::{MemoryStore, PartitionStore};
use fresh_core::WorkerConfig;
use fresh_http::{FetchError, Network, Request, Response};
use fresh_worker::Interceptor;
use tracing_subscriber::EnvFilter;

/// reqwest-backed [`Network`] rooted at one origin.
struct HttpNetwork {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNetwork {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, req: &Request) -> Result<Response, FetchError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), req.path());
        let method = reqwest::Method::from_bytes(req.method.as_str().as_bytes())
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let mut builder = self.client.request(method, &url);
        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &req.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(e.to_string())
            } else {
                FetchError::Unreachable(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?
            .to_vec();

        Ok(Response::new(status, headers, body))
    }
}

/// Demo workload for the cache-first worker.
#[derive(Parser)]
#[command(name = "offline-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the running origin.
    #[arg(long, default_value = "http://127.0.0.1:8787")]
    origin: String,

    /// Base URL used for the offline leg; should be unreachable.
    #[arg(long, default_value = "http://127.0.0.1:9")]
    dead_origin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = Arc::new(MemoryStore::new());
    let worker = Interceptor::new(
        Arc::clone(&store) as Arc<dyn PartitionStore>,
        Arc::new(HttpNetwork::new(cli.origin.as_str())),
        WorkerConfig::default(),
    );

    worker.install().await;
    worker.activate().await;
    println!(
        "worker {} with partitions {:?}",
        worker.phase(),
        store.partition_names().await?
    );

    let req = Request::get("/api/data");

    let first = worker.handle_fetch(&req).await?;
    println!(
        "[1] {} ({}): {}",
        first.source,
        first.source.cache_status(),
        first.response.text()?
    );

    let second = worker.handle_fetch(&req).await?;
    println!(
        "[2] {} ({}): {}",
        second.source,
        second.source.cache_status(),
        second.response.text()?
    );

    // A worker with nothing cached and no reachable network serves the
    // offline placeholder instead of failing.
    let offline = Interceptor::new(
        Arc::new(MemoryStore::new()),
        Arc::new(HttpNetwork::new(cli.dead_origin.as_str())),
        WorkerConfig::default(),
    );
    offline.install().await;
    offline.activate().await;

    let fallback = offline.handle_fetch(&req).await?;
    println!(
        "[3] {} ({}): {} bytes of {}",
        fallback.source,
        fallback.source.cache_status(),
        fallback.response.body.len(),
        fallback.response.content_type().unwrap_or("unknown")
    );

    Ok(())
}
