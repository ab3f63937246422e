//! Origin and worker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the revalidation origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Probability that any given read regenerates the resource.
    ///
    /// Simulates upstream churn independent of caller behavior. 0.0 means
    /// the resource never changes on its own.
    #[serde(default = "default_churn_probability")]
    pub churn_probability: f64,

    /// Freshness window for the versioned resource, in seconds.
    #[serde(default = "default_resource_max_age")]
    pub resource_max_age_secs: u64,

    /// Freshness window for the immutable static asset, in seconds.
    #[serde(default = "default_static_max_age")]
    pub static_max_age_secs: u64,
}

fn default_churn_probability() -> f64 {
    0.2
}

fn default_resource_max_age() -> u64 {
    10
}

fn default_static_max_age() -> u64 {
    3600
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            churn_probability: default_churn_probability(),
            resource_max_age_secs: default_resource_max_age(),
            static_max_age_secs: default_static_max_age(),
        }
    }
}

/// Configuration for the cache-first worker.
///
/// Partition names must stay stable across worker versions: activation
/// deletes every partition whose name is not one of the two configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// The one path that gets cache-first treatment.
    #[serde(default = "default_designated_path")]
    pub designated_path: String,

    /// Partition reserved for the designated resource.
    #[serde(default = "default_resource_partition")]
    pub resource_partition: String,

    /// Partition retained for static assets (unused by the fetch core).
    #[serde(default = "default_static_partition")]
    pub static_partition: String,
}

fn default_designated_path() -> String {
    "/api/data".to_string()
}

fn default_resource_partition() -> String {
    "fresh-api-v1".to_string()
}

fn default_static_partition() -> String {
    "fresh-static-v1".to_string()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            designated_path: default_designated_path(),
            resource_partition: default_resource_partition(),
            static_partition: default_static_partition(),
        }
    }
}

impl WorkerConfig {
    /// The partition names that survive activation cleanup.
    pub fn retained_partitions(&self) -> [&str; 2] {
        [&self.resource_partition, &self.static_partition]
    }
}
