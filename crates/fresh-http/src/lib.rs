//! Transport-agnostic HTTP model for the freshline platform.
//!
//! The origin endpoint and the cache-first worker both speak in terms of
//! these types rather than any concrete server or client library, so the
//! same handlers run under a real socket, an in-process loopback, or a test
//! harness.
//!
//! This crate provides:
//! - `Method`, `Request`, `Response` - the request/response model
//! - `FetchError` - outbound fetch failures as values, never panics
//! - `Network` - the trait the worker fetches through
//!
//! # Example
//!
//! ```ignore
//! use fresh_http::{Request, Response};
//!
//! let req = Request::get("/api/data").with_header("Accept", "application/json");
//! let resp = Response::new(200, Default::default(), b"{}".to_vec());
//! assert!(resp.is_success());
//! ```

mod error;
mod network;
mod request;
mod response;

pub use error::FetchError;
pub use network::Network;
pub use request::{Method, Request};
pub use response::Response;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchError, Method, Network, Request, Response};
}
