//! Conditional-GET evaluation over the versioned resource.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use fresh_cache::{header_names, strip_tag, CacheHeaders, FreshnessPolicy};
use fresh_core::OriginConfig;
use fresh_http::Response;
use thiserror::Error;

use crate::resource::ResourceState;
use crate::version::{RandomChurn, VersionSource};

/// Errors from the origin endpoint.
#[derive(Error, Debug)]
pub enum OriginError {
    /// Failed to serialize the resource payload.
    #[error("failed to serialize resource payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The resource state lock was poisoned.
    #[error("resource state lock poisoned")]
    State,
}

/// The revalidation endpoint.
///
/// Holds the shared resource state; every read may regenerate it (the
/// version source decides), then answers 200 or 304 against the current
/// entity tag. Mutations are visible to all subsequent callers.
pub struct ResourceEndpoint {
    state: Mutex<ResourceState>,
    source: Arc<dyn VersionSource>,
    resource_policy: FreshnessPolicy,
    static_policy: FreshnessPolicy,
}

impl ResourceEndpoint {
    /// Create an endpoint with an injected version source.
    pub fn new(config: &OriginConfig, source: Arc<dyn VersionSource>) -> Result<Self, OriginError> {
        Ok(Self {
            state: Mutex::new(ResourceState::generate(0)?),
            source,
            resource_policy: FreshnessPolicy::public(Duration::from_secs(
                config.resource_max_age_secs,
            )),
            static_policy: FreshnessPolicy::public(Duration::from_secs(config.static_max_age_secs))
                .with_immutable(),
        })
    }

    /// Create an endpoint with probabilistic churn from the config.
    pub fn with_random_churn(config: &OriginConfig) -> Result<Self, OriginError> {
        let source = Arc::new(RandomChurn::new(config.churn_probability));
        Self::new(config, source)
    }

    /// Answer a conditional GET for the resource.
    ///
    /// The version source is consulted first; if it fires, the resource
    /// regenerates before the tag comparison. The comparison itself never
    /// mutates state. A malformed presented tag simply never matches.
    pub fn handle_resource(&self, if_none_match: Option<&str>) -> Result<Response, OriginError> {
        let mut state = self.state.lock().map_err(|_| OriginError::State)?;

        if self.source.should_advance() {
            *state = state.advance()?;
            tracing::debug!(version = state.version(), tag = state.tag(), "resource churned");
        }

        if if_none_match.map(strip_tag) == Some(state.tag()) {
            tracing::debug!(tag = state.tag(), "presented tag current, not modified");
            return Ok(Response::with_status(304));
        }

        tracing::debug!(version = state.version(), tag = state.tag(), "serving full resource");
        let headers = CacheHeaders::new()
            .policy(&self.resource_policy)
            .etag(state.tag())
            .content_type("application/json")
            .build();

        Ok(Response::with_status(200)
            .with_headers(headers)
            .with_body(state.body().to_vec()))
    }

    /// Force a new resource version, regardless of the version source.
    ///
    /// Returns the new version and tag so callers can follow up with a
    /// conditional GET deterministically.
    pub fn handle_refresh(&self) -> Result<Response, OriginError> {
        let mut state = self.state.lock().map_err(|_| OriginError::State)?;
        *state = state.advance()?;
        tracing::info!(version = state.version(), tag = state.tag(), "resource refresh forced");

        let body = serde_json::to_vec(&serde_json::json!({
            "version": state.version(),
            "etag": state.tag(),
        }))?;

        Ok(Response::with_status(200)
            .with_header(header_names::CONTENT_TYPE, "application/json")
            .with_header(header_names::CACHE_CONTROL, "no-store")
            .with_body(body))
    }

    /// Liveness probe with the current resource version.
    pub fn handle_health(&self) -> Result<Response, OriginError> {
        let version = self.version()?;
        let body = serde_json::to_vec(&serde_json::json!({
            "status": "ok",
            "version": version,
        }))?;

        Ok(Response::with_status(200)
            .with_header(header_names::CONTENT_TYPE, "application/json")
            .with_header(header_names::CACHE_CONTROL, "no-store")
            .with_body(body))
    }

    /// Freshness policy for the immutable static asset route.
    pub fn static_policy(&self) -> &FreshnessPolicy {
        &self.static_policy
    }

    /// The current entity tag.
    pub fn current_tag(&self) -> Result<String, OriginError> {
        let state = self.state.lock().map_err(|_| OriginError::State)?;
        Ok(state.tag().to_string())
    }

    /// The current resource version.
    pub fn version(&self) -> Result<u64, OriginError> {
        let state = self.state.lock().map_err(|_| OriginError::State)?;
        Ok(state.version())
    }
}
