//! Freshness policy, rendered as Cache-Control.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cache scope determining who may cache the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    /// Cacheable by shared caches and the browser.
    Public,
    /// Cacheable by the browser only.
    Private,
    /// No caching.
    #[default]
    None,
}

impl CacheScope {
    /// Get the Cache-Control directive for this scope.
    pub fn cache_control_directive(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::None => "no-store",
        }
    }

    /// Check if this scope allows any caching.
    pub fn allows_caching(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Declared freshness for a response: how long a cached copy may be used
/// without revalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Cache scope.
    pub scope: CacheScope,
    /// Time the response may be served without revalidation.
    pub max_age: Duration,
    /// Whether the response will never change for its lifetime.
    pub immutable: bool,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            scope: CacheScope::None,
            max_age: Duration::from_secs(0),
            immutable: false,
        }
    }
}

impl FreshnessPolicy {
    /// A policy that forbids caching.
    pub fn none() -> Self {
        Self::default()
    }

    /// A publicly cacheable policy.
    pub fn public(max_age: Duration) -> Self {
        Self {
            scope: CacheScope::Public,
            max_age,
            immutable: false,
        }
    }

    /// A browser-only cacheable policy.
    pub fn private(max_age: Duration) -> Self {
        Self {
            scope: CacheScope::Private,
            max_age,
            immutable: false,
        }
    }

    /// Mark the response as immutable for its whole freshness window.
    pub fn with_immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Generate the Cache-Control header value.
    pub fn cache_control_header(&self) -> String {
        if self.scope == CacheScope::None {
            return "no-store".to_string();
        }

        let mut parts = vec![
            self.scope.cache_control_directive().to_string(),
            format!("max-age={}", self.max_age.as_secs()),
        ];

        if self.immutable {
            parts.push("immutable".to_string());
        }

        parts.join(", ")
    }
}
