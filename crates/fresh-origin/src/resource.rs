//! The versioned resource.

use chrono::{DateTime, Utc};
use fresh_cache::entity_tag;
use serde::{Deserialize, Serialize};

/// Message variants cycled through on regeneration.
const MESSAGE_VARIANTS: [&str; 5] = [
    "All systems nominal",
    "Fresh content straight from the origin",
    "Nothing stays cached forever",
    "Regenerated just for you",
    "Same endpoint, new payload",
];

/// The payload served by the revalidation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePayload {
    /// Human-readable message; varies across versions.
    pub message: String,
    /// When this version was generated (ISO-8601 on the wire).
    pub timestamp: DateTime<Utc>,
}

/// Current state of the resource: payload, serialized body, and the entity
/// tag derived from it.
#[derive(Debug, Clone)]
pub struct ResourceState {
    version: u64,
    payload: ResourcePayload,
    body: Vec<u8>,
    tag: String,
}

impl ResourceState {
    /// Generate the state for a given version number.
    pub fn generate(version: u64) -> Result<Self, serde_json::Error> {
        let payload = ResourcePayload {
            message: MESSAGE_VARIANTS[(version as usize) % MESSAGE_VARIANTS.len()].to_string(),
            timestamp: Utc::now(),
        };
        let body = serde_json::to_vec(&payload)?;
        let tag = entity_tag(&body);

        Ok(Self {
            version,
            payload,
            body,
            tag,
        })
    }

    /// Regenerate: next version, fresh payload, recomputed tag.
    pub fn advance(&self) -> Result<Self, serde_json::Error> {
        Self::generate(self.version + 1)
    }

    /// The version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The payload for this version.
    pub fn payload(&self) -> &ResourcePayload {
        &self.payload
    }

    /// The serialized JSON body for this version.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The entity tag for this version's body.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}
