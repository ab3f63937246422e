//! The cache-first request interceptor.
//!
//! An [`Interceptor`] sits between a page and the network. For one designated
//! path it checks its reserved cache partition before any network call,
//! stores successful responses opportunistically, and synthesizes an offline
//! placeholder when the network itself fails. Every other path is forwarded
//! network-first with no caching.
//!
//! The browser-style lifecycle (`install` / `activate` / `fetch`) is an
//! explicit state machine with injectable triggers, so the decision logic
//! runs under any host: a real event loop, a demo binary, or a plain test.

mod fallback;
mod interceptor;
mod lifecycle;

pub use fallback::{offline_fallback, OFFLINE_FALLBACK_HTML};
pub use interceptor::{Interceptor, Served, ServeSource};
pub use lifecycle::WorkerPhase;
