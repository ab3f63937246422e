//! The named-partition storage interface.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fresh_http::Response;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::RequestIdentity;

/// Errors from partition storage.
///
/// None of these are fatal to the caller: a worker that cannot open or write
/// its partition degrades to fetching from the network every time.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open or create a partition.
    #[error("failed to open partition: {0}")]
    Open(String),

    /// A lookup or store operation failed.
    #[error("partition operation failed: {0}")]
    Store(String),

    /// Failed to delete a partition.
    #[error("failed to delete partition: {0}")]
    Delete(String),
}

/// Outcome of a cache lookup, for logs and debug output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from the partition.
    Hit,
    /// Not present; the network was consulted.
    Miss,
    /// Caching unavailable or not applicable for this request.
    Bypass,
    /// A storage operation failed along the way.
    Error,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Bypass => write!(f, "BYPASS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A response snapshot held in a partition.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    /// The snapshot: status, headers, body.
    pub response: Response,
    /// When the snapshot was written. Informational only; entries are
    /// overwritten, never expired by age.
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Snapshot a response now.
    pub fn new(response: Response) -> Self {
        Self {
            response,
            stored_at: Utc::now(),
        }
    }

    /// Age of the snapshot.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.stored_at
    }
}

/// One named partition: a mapping from request identity to stored response.
///
/// Invariant: at most one entry per identity. `store` overwrites.
#[async_trait]
pub trait Partition: Send + Sync {
    /// Look up the stored response for an identity.
    async fn lookup(&self, identity: &RequestIdentity) -> Result<Option<StoredResponse>, CacheError>;

    /// Store a response under an identity, replacing any prior entry.
    async fn store(
        &self,
        identity: RequestIdentity,
        response: StoredResponse,
    ) -> Result<(), CacheError>;

    /// Number of entries currently held.
    async fn entry_count(&self) -> usize;
}

/// The partition store: named, isolated partitions.
#[async_trait]
pub trait PartitionStore: Send + Sync {
    /// Open a partition by name, creating it if absent. Idempotent.
    async fn open(&self, name: &str) -> Result<Arc<dyn Partition>, CacheError>;

    /// List the names of all existing partitions.
    async fn partition_names(&self) -> Result<Vec<String>, CacheError>;

    /// Delete a partition wholesale. Returns whether it existed.
    async fn delete(&self, name: &str) -> Result<bool, CacheError>;
}
