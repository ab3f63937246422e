//! In-memory partition store for demos and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::key::RequestIdentity;
use crate::store::{CacheError, Partition, PartitionStore, StoredResponse};

/// In-memory [`PartitionStore`].
///
/// Partitions are plain maps behind an `RwLock`. Lookup and store are not
/// atomic as a pair; two concurrent misses for one identity may both fetch
/// and the later `store` wins, which is the accepted behavior.
#[derive(Default)]
pub struct MemoryStore {
    partitions: RwLock<HashMap<String, Arc<MemoryPartition>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PartitionStore for MemoryStore {
    async fn open(&self, name: &str) -> Result<Arc<dyn Partition>, CacheError> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|_| CacheError::Open("partition index poisoned".to_string()))?;

        let partition = partitions
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryPartition::default()));

        Ok(Arc::clone(partition) as Arc<dyn Partition>)
    }

    async fn partition_names(&self) -> Result<Vec<String>, CacheError> {
        let partitions = self
            .partitions
            .read()
            .map_err(|_| CacheError::Store("partition index poisoned".to_string()))?;

        let mut names: Vec<String> = partitions.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        let mut partitions = self
            .partitions
            .write()
            .map_err(|_| CacheError::Delete("partition index poisoned".to_string()))?;

        Ok(partitions.remove(name).is_some())
    }
}

/// One in-memory partition, keyed by rendered cache key.
#[derive(Default)]
struct MemoryPartition {
    entries: RwLock<HashMap<String, StoredResponse>>,
}

#[async_trait]
impl Partition for MemoryPartition {
    async fn lookup(
        &self,
        identity: &RequestIdentity,
    ) -> Result<Option<StoredResponse>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheError::Store("partition poisoned".to_string()))?;

        Ok(entries.get(&identity.cache_key()).cloned())
    }

    async fn store(
        &self,
        identity: RequestIdentity,
        response: StoredResponse,
    ) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheError::Store("partition poisoned".to_string()))?;

        entries.insert(identity.cache_key(), response);
        Ok(())
    }

    async fn entry_count(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}
