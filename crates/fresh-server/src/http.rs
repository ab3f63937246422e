//! Hyper serving loop.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use fresh_cache::header_names;
use fresh_http::Method;

use crate::routes::Router;

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, router: Arc<Router>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "origin listening");

    loop {
        let (stream, peer) = listener.accept().await.context("accept failed")?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |req: hyper::Request<Incoming>| {
                let router = Arc::clone(&router);
                async move { Ok::<_, Infallible>(handle(&router, req)) }
            });

            if let Err(error) = http1::Builder::new().serve_connection(io, service).await {
                tracing::debug!(%peer, %error, "connection closed with error");
            }
        });
    }
}

/// Translate a hyper exchange into the platform's HTTP model and back.
fn handle(router: &Router, req: hyper::Request<Incoming>) -> hyper::Response<Full<Bytes>> {
    let method = Method::parse(req.method().as_str());
    let path = req.uri().path().to_string();
    let if_none_match = req
        .headers()
        .get(header_names::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = match method {
        Some(method) => router.dispatch(method, &path, if_none_match.as_deref()),
        None => fresh_http::Response::with_status(405),
    };

    to_hyper(response)
}

fn to_hyper(response: fresh_http::Response) -> hyper::Response<Full<Bytes>> {
    let mut builder = hyper::Response::builder().status(response.status);
    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|error| {
            tracing::error!(%error, "failed to build response");
            hyper::Response::new(Full::new(Bytes::new()))
        })
}
