//! Core context and configuration for the freshline platform.
//!
//! This crate provides:
//! - `RequestId` - per-request correlation IDs for logs
//! - `OriginConfig` / `WorkerConfig` - serde-backed configuration

mod config;
mod context;

pub use config::{OriginConfig, WorkerConfig};
pub use context::RequestId;
