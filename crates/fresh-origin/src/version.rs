//! Injectable resource-version drivers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Decides, once per read, whether the resource advances to a new version.
///
/// Keeping this behind a trait means churn is an input: the demo gets the
/// probabilistic upstream-change simulation, tests get full determinism.
pub trait VersionSource: Send + Sync {
    /// Whether the resource should regenerate for this read.
    fn should_advance(&self) -> bool;
}

/// Probabilistic churn: each read regenerates the resource with a fixed
/// probability, independent of caller behavior.
#[derive(Debug)]
pub struct RandomChurn {
    probability: f64,
}

impl RandomChurn {
    /// Create a churn source. The probability is clamped to `[0.0, 1.0]`.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl VersionSource for RandomChurn {
    fn should_advance(&self) -> bool {
        use rand::Rng;

        self.probability > 0.0 && rand::thread_rng().gen::<f64>() < self.probability
    }
}

/// Externally driven versioning: the resource advances exactly when
/// [`ManualVersion::advance`] has been called, once per call.
#[derive(Debug, Default)]
pub struct ManualVersion {
    pending: AtomicU64,
}

impl ManualVersion {
    /// Create a source with no pending advances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one version advance for the next read.
    pub fn advance(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }
}

impl VersionSource for ManualVersion {
    fn should_advance(&self) -> bool {
        self.pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}
