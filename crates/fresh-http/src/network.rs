//! The outbound network boundary.

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// The network a request-interceptor fetches through.
///
/// Implementations decide what "the network" is: a real HTTP client in a
/// deployed worker, an in-process loopback onto origin handlers, or a
/// scripted fake in tests. Status codes are never mapped to errors here;
/// a `FetchError` means the exchange itself failed.
#[async_trait]
pub trait Network: Send + Sync {
    /// Issue the request and return the response.
    async fn fetch(&self, req: &Request) -> Result<Response, FetchError>;
}
