//! Server configuration.

use anyhow::{Context, Result};
use fresh_core::OriginConfig;
use serde::{Deserialize, Serialize};

/// Configuration file for the origin server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Origin behavior.
    #[serde(default)]
    pub origin: OriginConfig,
}

fn default_listen() -> String {
    "127.0.0.1:8787".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            origin: OriginConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load config from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path))?;

        toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path))
    }
}
