//! Interceptor lifecycle: install and activate triggers.

use fresh_cache::PartitionStore;

use crate::interceptor::Interceptor;

/// Lifecycle phases of the interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Constructed; no partitions opened yet.
    Parked,
    /// Opening partitions.
    Installing,
    /// Partitions opened (or degraded after an open failure).
    Installed,
    /// Cleaning up retired partitions.
    Activating,
    /// In control; serving cache-first.
    Ready,
}

impl WorkerPhase {
    /// Short label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parked => "parked",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Activating => "activating",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for WorkerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Interceptor {
    /// Installation: eagerly open both named partitions.
    ///
    /// Idempotent. Must complete before cache-first service; until then the
    /// designated path degrades to network-only. An open failure is logged
    /// and swallowed, leaving the worker in that degraded mode.
    pub async fn install(&self) {
        self.set_phase(WorkerPhase::Installing);
        tracing::info!(
            resource = %self.config().resource_partition,
            statics = %self.config().static_partition,
            "installing: opening partitions"
        );

        match self.store().open(&self.config().resource_partition).await {
            Ok(partition) => self.attach_resource_partition(partition),
            Err(error) => tracing::warn!(
                partition = %self.config().resource_partition,
                %error,
                "failed to open resource partition; degrading to network-only"
            ),
        }

        if let Err(error) = self.store().open(&self.config().static_partition).await {
            tracing::warn!(
                partition = %self.config().static_partition,
                %error,
                "failed to open static partition"
            );
        }

        self.set_phase(WorkerPhase::Installed);
    }

    /// Activation: retire partitions from previous worker versions, then
    /// take control of all pages immediately.
    ///
    /// Every partition whose name is neither retained name is deleted.
    /// Cleanup failures are logged and swallowed.
    pub async fn activate(&self) {
        self.set_phase(WorkerPhase::Activating);
        let retained = self.config().retained_partitions();

        match self.store().partition_names().await {
            Ok(names) => {
                for name in names {
                    if retained.contains(&name.as_str()) {
                        continue;
                    }
                    match self.store().delete(&name).await {
                        Ok(true) => tracing::info!(partition = %name, "retired stale partition"),
                        Ok(false) => {}
                        Err(error) => {
                            tracing::warn!(partition = %name, %error, "failed to retire partition")
                        }
                    }
                }
            }
            Err(error) => tracing::warn!(%error, "failed to enumerate partitions for cleanup"),
        }

        self.set_phase(WorkerPhase::Ready);
        tracing::info!("activated: in control of all pages");
    }
}
