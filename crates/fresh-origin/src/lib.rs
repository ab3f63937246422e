//! The revalidation origin: one versioned resource behind conditional GET.
//!
//! The origin holds a single resource (a message and a timestamp) plus an
//! entity tag derived from the serialized body. Reads answer either with the
//! full body and freshness headers, or with 304 when the caller's presented
//! tag matches the current one.
//!
//! Resource churn is injected through [`VersionSource`] rather than wired to
//! randomness: the demo server plugs in [`RandomChurn`], tests plug in
//! [`ManualVersion`] and drive versions explicitly.

mod endpoint;
mod resource;
mod version;

pub use endpoint::{OriginError, ResourceEndpoint};
pub use resource::{ResourcePayload, ResourceState};
pub use version::{ManualVersion, RandomChurn, VersionSource};
