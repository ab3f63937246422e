//! Cache-first fetch handling.

use std::sync::{Arc, RwLock};

use fresh_cache::{
    CacheStatus, Partition, PartitionStore, RequestIdentity, StoredResponse,
};
use fresh_core::WorkerConfig;
use fresh_http::{FetchError, Method, Network, Request, Response};

use crate::fallback::offline_fallback;
use crate::lifecycle::WorkerPhase;

/// Where a served response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeSource {
    /// Stored response from the reserved partition; no network call.
    Cache,
    /// Fresh network response, stored for next time.
    Network,
    /// Network response that was not cacheable (non-200 status).
    NetworkUncached,
    /// Synthesized offline placeholder after a network failure.
    OfflineFallback,
    /// Non-designated path forwarded without caching.
    Passthrough,
}

impl ServeSource {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Network => "network",
            Self::NetworkUncached => "network-uncached",
            Self::OfflineFallback => "offline-fallback",
            Self::Passthrough => "passthrough",
        }
    }

    /// The cache status this source corresponds to.
    pub fn cache_status(&self) -> CacheStatus {
        match self {
            Self::Cache => CacheStatus::Hit,
            Self::Network | Self::NetworkUncached | Self::OfflineFallback => CacheStatus::Miss,
            Self::Passthrough => CacheStatus::Bypass,
        }
    }
}

impl std::fmt::Display for ServeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A response plus its provenance.
#[derive(Debug)]
pub struct Served {
    /// The response handed back to the page.
    pub response: Response,
    /// Where it came from.
    pub source: ServeSource,
}

/// The cache-first interceptor.
///
/// Holds the partition store and the network it fetches through; both are
/// injected so the decision flow runs identically under a real host, the
/// demo binary, or tests.
pub struct Interceptor {
    store: Arc<dyn PartitionStore>,
    network: Arc<dyn Network>,
    config: WorkerConfig,
    phase: RwLock<WorkerPhase>,
    resource_partition: RwLock<Option<Arc<dyn Partition>>>,
}

impl Interceptor {
    /// Create an interceptor. Call [`Interceptor::install`] and
    /// [`Interceptor::activate`] before serving.
    pub fn new(
        store: Arc<dyn PartitionStore>,
        network: Arc<dyn Network>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            store,
            network,
            config,
            phase: RwLock::new(WorkerPhase::Parked),
            resource_partition: RwLock::new(None),
        }
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> WorkerPhase {
        self.phase.read().map(|p| *p).unwrap_or(WorkerPhase::Parked)
    }

    /// Handle one intercepted request.
    ///
    /// The designated path gets the cache-first flow and never returns an
    /// error: network failures become the offline placeholder. Every other
    /// path is forwarded network-first; its failures propagate so the host
    /// platform can surface them.
    pub async fn handle_fetch(&self, req: &Request) -> Result<Served, FetchError> {
        if req.method == Method::Get && req.path() == self.config.designated_path {
            return Ok(self.cache_first(req).await);
        }

        let response = self.network.fetch(req).await?;
        Ok(Served {
            response,
            source: ServeSource::Passthrough,
        })
    }

    /// The cache-first flow for the designated path.
    async fn cache_first(&self, req: &Request) -> Served {
        let identity = RequestIdentity::of(req);
        let partition = self.resource_partition();

        if let Some(partition) = &partition {
            match partition.lookup(&identity).await {
                Ok(Some(hit)) => {
                    tracing::debug!(%identity, age_secs = hit.age().num_seconds(), "cache hit");
                    return Served {
                        response: hit.response,
                        source: ServeSource::Cache,
                    };
                }
                Ok(None) => tracing::debug!(%identity, "cache miss"),
                Err(error) => tracing::warn!(%identity, %error, "cache lookup failed"),
            }
        }

        match self.network.fetch(req).await {
            Ok(response) if response.status == 200 => {
                if let Some(partition) = partition {
                    let snapshot = StoredResponse::new(response.clone());
                    if let Err(error) = partition.store(identity.clone(), snapshot).await {
                        tracing::warn!(%identity, %error, "failed to store response");
                    }
                }
                Served {
                    response,
                    source: ServeSource::Network,
                }
            }
            Ok(response) => {
                tracing::debug!(%identity, status = response.status, "uncacheable response");
                Served {
                    response,
                    source: ServeSource::NetworkUncached,
                }
            }
            Err(error) => {
                tracing::warn!(%identity, %error, "network failed; serving offline fallback");
                Served {
                    response: offline_fallback(),
                    source: ServeSource::OfflineFallback,
                }
            }
        }
    }

    pub(crate) fn store(&self) -> &Arc<dyn PartitionStore> {
        &self.store
    }

    pub(crate) fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub(crate) fn set_phase(&self, phase: WorkerPhase) {
        if let Ok(mut current) = self.phase.write() {
            *current = phase;
        }
    }

    pub(crate) fn attach_resource_partition(&self, partition: Arc<dyn Partition>) {
        if let Ok(mut slot) = self.resource_partition.write() {
            *slot = Some(partition);
        }
    }

    fn resource_partition(&self) -> Option<Arc<dyn Partition>> {
        self.resource_partition
            .read()
            .ok()
            .and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use fresh_cache::MemoryStore;

    /// Network fake that serves a fixed script of outcomes, then fails.
    struct ScriptedNetwork {
        script: Mutex<VecDeque<Result<Response, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedNetwork {
        fn new(script: Vec<Result<Response, FetchError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn unreachable() -> Self {
            Self::new(Vec::new())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Network for ScriptedNetwork {
        async fn fetch(&self, _req: &Request) -> Result<Response, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Unreachable("script exhausted".to_string())))
        }
    }

    fn ok_response(body: &[u8]) -> Response {
        Response::with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(body.to_vec())
    }

    async fn ready_interceptor(
        store: Arc<MemoryStore>,
        network: Arc<ScriptedNetwork>,
    ) -> Interceptor {
        let interceptor = Interceptor::new(store, network, WorkerConfig::default());
        interceptor.install().await;
        interceptor.activate().await;
        interceptor
    }

    #[tokio::test]
    async fn test_lifecycle_phases() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::unreachable());
        let interceptor = Interceptor::new(store, network, WorkerConfig::default());

        assert_eq!(interceptor.phase(), WorkerPhase::Parked);
        interceptor.install().await;
        assert_eq!(interceptor.phase(), WorkerPhase::Installed);
        interceptor.activate().await;
        assert_eq!(interceptor.phase(), WorkerPhase::Ready);
    }

    #[tokio::test]
    async fn test_cache_first_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![Ok(ok_response(b"payload"))]));
        let interceptor = ready_interceptor(store, Arc::clone(&network)).await;

        let req = Request::get("/api/data");

        // First fetch: miss, network, stored.
        let first = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(first.source, ServeSource::Network);
        assert_eq!(network.calls(), 1);

        // Second fetch: served from the partition even though the network
        // would now fail; no further network call occurs.
        let second = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(second.source, ServeSource::Cache);
        assert_eq!(second.response.body, b"payload");
        assert_eq!(network.calls(), 1);
    }

    #[tokio::test]
    async fn test_offline_fallback_on_empty_cache() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::unreachable());
        let interceptor = ready_interceptor(store, network).await;

        let served = interceptor
            .handle_fetch(&Request::get("/api/data"))
            .await
            .unwrap();

        assert_eq!(served.source, ServeSource::OfflineFallback);
        assert_eq!(served.response.status, 200);
        assert_eq!(
            served.response.content_type(),
            Some("text/html; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_non_200_not_cached() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![
            Ok(Response::with_status(503)),
            Ok(ok_response(b"recovered")),
        ]));
        let interceptor = ready_interceptor(Arc::clone(&store), Arc::clone(&network)).await;

        let req = Request::get("/api/data");

        let first = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(first.source, ServeSource::NetworkUncached);
        assert_eq!(first.response.status, 503);

        // The failure was not stored, so the next request consults the
        // network again.
        let second = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(second.source, ServeSource::Network);
        assert_eq!(network.calls(), 2);
    }

    #[tokio::test]
    async fn test_304_passed_through_uncached() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![Ok(Response::with_status(304))]));
        let interceptor = ready_interceptor(store, network).await;

        let served = interceptor
            .handle_fetch(&Request::get("/api/data"))
            .await
            .unwrap();

        assert_eq!(served.source, ServeSource::NetworkUncached);
        assert_eq!(served.response.status, 304);
    }

    #[tokio::test]
    async fn test_refetch_overwrites_entry() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![Ok(ok_response(b"v1"))]));
        let interceptor = ready_interceptor(Arc::clone(&store), network).await;

        let req = Request::get("/api/data");
        interceptor.handle_fetch(&req).await.unwrap();

        let partition = store.open("fresh-api-v1").await.unwrap();
        assert_eq!(partition.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_activation_retires_foreign_partitions() {
        let store = Arc::new(MemoryStore::new());
        store.open("fresh-api-v0").await.unwrap();
        store.open("scratch").await.unwrap();

        let network = Arc::new(ScriptedNetwork::unreachable());
        let interceptor = ready_interceptor(Arc::clone(&store), network).await;
        assert_eq!(interceptor.phase(), WorkerPhase::Ready);

        assert_eq!(
            store.partition_names().await.unwrap(),
            vec!["fresh-api-v1", "fresh-static-v1"]
        );
    }

    #[tokio::test]
    async fn test_other_paths_are_passthrough() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![Ok(ok_response(b"other"))]));
        let interceptor = ready_interceptor(Arc::clone(&store), Arc::clone(&network)).await;

        let served = interceptor
            .handle_fetch(&Request::get("/other/page"))
            .await
            .unwrap();
        assert_eq!(served.source, ServeSource::Passthrough);

        // Nothing lands in the reserved partition.
        let partition = store.open("fresh-api-v1").await.unwrap();
        assert_eq!(partition.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_passthrough_failures_propagate() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::unreachable());
        let interceptor = ready_interceptor(store, network).await;

        let result = interceptor.handle_fetch(&Request::get("/other/page")).await;
        assert!(matches!(result, Err(FetchError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_post_to_designated_path_is_passthrough() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![Ok(ok_response(b"created"))]));
        let interceptor = ready_interceptor(Arc::clone(&store), network).await;

        let served = interceptor
            .handle_fetch(&Request::post("/api/data"))
            .await
            .unwrap();
        assert_eq!(served.source, ServeSource::Passthrough);

        let partition = store.open("fresh-api-v1").await.unwrap();
        assert_eq!(partition.entry_count().await, 0);
    }

    #[tokio::test]
    async fn test_uninstalled_worker_degrades_to_network_only() {
        let store = Arc::new(MemoryStore::new());
        let network = Arc::new(ScriptedNetwork::new(vec![
            Ok(ok_response(b"one")),
            Ok(ok_response(b"two")),
        ]));
        let interceptor = Interceptor::new(
            Arc::clone(&store) as Arc<dyn PartitionStore>,
            Arc::clone(&network) as Arc<dyn Network>,
            WorkerConfig::default(),
        );

        let req = Request::get("/api/data");

        // No partition has been opened: every request falls through to the
        // network and nothing is stored.
        let first = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(first.source, ServeSource::Network);
        let second = interceptor.handle_fetch(&req).await.unwrap();
        assert_eq!(second.source, ServeSource::Network);
        assert_eq!(network.calls(), 2);
    }

    #[tokio::test]
    async fn test_serve_source_cache_status_mapping() {
        assert_eq!(ServeSource::Cache.cache_status(), CacheStatus::Hit);
        assert_eq!(ServeSource::Network.cache_status(), CacheStatus::Miss);
        assert_eq!(ServeSource::Passthrough.cache_status(), CacheStatus::Bypass);
    }
}
