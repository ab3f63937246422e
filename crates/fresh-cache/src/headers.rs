//! Entity tags and cache header assembly.

use sha2::{Digest, Sha256};

use crate::policy::FreshnessPolicy;

/// Header names used by the caching exchange.
pub mod header_names {
    /// Declared freshness policy.
    pub const CACHE_CONTROL: &str = "Cache-Control";
    /// Current entity tag of a response.
    pub const ETAG: &str = "ETag";
    /// Caller-presented entity tag for revalidation.
    pub const IF_NONE_MATCH: &str = "If-None-Match";
    /// Response media type.
    pub const CONTENT_TYPE: &str = "Content-Type";
}

/// Derive an entity tag from a response body snapshot.
///
/// Equal bodies always produce equal tags, so the tag changes iff the body
/// does. The token is opaque to callers; only equality matters.
pub fn entity_tag(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    hex::encode(digest)[..16].to_string()
}

/// Normalize a caller-presented entity tag for comparison.
///
/// Strips the weak-validator prefix and surrounding quotes. Anything left
/// over is compared verbatim; garbage simply never matches.
pub fn strip_tag(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw.strip_prefix("W/").unwrap_or(raw);
    raw.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Builder for cache response headers.
#[derive(Debug, Default)]
pub struct CacheHeaders {
    cache_control: Option<String>,
    etag: Option<String>,
    content_type: Option<String>,
}

impl CacheHeaders {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Cache-Control from a freshness policy.
    pub fn policy(mut self, policy: &FreshnessPolicy) -> Self {
        self.cache_control = Some(policy.cache_control_header());
        self
    }

    /// Set the ETag header (quoted on output).
    pub fn etag(mut self, tag: impl Into<String>) -> Self {
        self.etag = Some(tag.into());
        self
    }

    /// Set the Content-Type header.
    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    /// Build the headers.
    pub fn build(self) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        if let Some(cc) = self.cache_control {
            headers.push((header_names::CACHE_CONTROL.to_string(), cc));
        }

        if let Some(etag) = self.etag {
            headers.push((header_names::ETAG.to_string(), format!("\"{}\"", etag)));
        }

        if let Some(ct) = self.content_type {
            headers.push((header_names::CONTENT_TYPE.to_string(), ct));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_entity_tag_stable() {
        assert_eq!(entity_tag(b"same body"), entity_tag(b"same body"));
    }

    #[test]
    fn test_entity_tag_changes_with_body() {
        assert_ne!(entity_tag(b"body one"), entity_tag(b"body two"));
    }

    #[test]
    fn test_entity_tag_length() {
        assert_eq!(entity_tag(b"anything").len(), 16);
    }

    #[test]
    fn test_strip_tag_quoted() {
        assert_eq!(strip_tag("\"abc123\""), "abc123");
    }

    #[test]
    fn test_strip_tag_weak() {
        assert_eq!(strip_tag("W/\"abc123\""), "abc123");
    }

    #[test]
    fn test_strip_tag_bare() {
        assert_eq!(strip_tag("abc123"), "abc123");
    }

    #[test]
    fn test_strip_tag_unbalanced_quotes_left_alone() {
        assert_eq!(strip_tag("\"abc123"), "\"abc123");
    }

    #[test]
    fn test_cache_headers_build() {
        let headers = CacheHeaders::new()
            .policy(&FreshnessPolicy::public(Duration::from_secs(10)))
            .etag("abc123")
            .content_type("application/json")
            .build();

        assert!(headers.contains(&("Cache-Control".to_string(), "public, max-age=10".to_string())));
        assert!(headers.contains(&("ETag".to_string(), "\"abc123\"".to_string())));
        assert!(headers.contains(&("Content-Type".to_string(), "application/json".to_string())));
    }

    #[test]
    fn test_cache_headers_empty() {
        assert!(CacheHeaders::new().build().is_empty());
    }

    #[test]
    fn test_etag_roundtrip_through_quoting() {
        let tag = entity_tag(b"payload");
        let headers = CacheHeaders::new().etag(tag.clone()).build();
        let (_, quoted) = &headers[0];
        assert_eq!(strip_tag(quoted), tag);
    }
}
