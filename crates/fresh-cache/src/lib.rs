//! Cache partitions and freshness policy for the freshline platform.
//!
//! This crate provides:
//! - `RequestIdentity` - the lookup key for a cached exchange
//! - `FreshnessPolicy` / `CacheScope` - declared freshness, rendered as
//!   `Cache-Control`
//! - `entity_tag` / `CacheHeaders` - entity tags and cache header assembly
//! - `Partition` / `PartitionStore` - the named-partition storage interface
//! - `MemoryStore` - in-memory backend for demos and tests
//!
//! A partition maps request identities to stored response snapshots, at most
//! one entry per identity. Entries are overwritten, never expired; the only
//! bulk operation is deleting a whole partition by name.

mod headers;
mod key;
mod memory;
mod policy;
mod store;

pub use headers::{entity_tag, header_names, strip_tag, CacheHeaders};
pub use key::RequestIdentity;
pub use memory::MemoryStore;
pub use policy::{CacheScope, FreshnessPolicy};
pub use store::{CacheError, CacheStatus, Partition, PartitionStore, StoredResponse};
