use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use visormon_protocol::TelemetrySample;

use crate::store::{Latest, StoreSnapshot, StreamStats, TelemetryStore};

/// Cloneable handle to a [`TelemetryStore`] shared between the ingestion
/// pipeline and any number of readers.
///
/// Every operation takes the lock only long enough to update or copy —
/// reads hand out detached copies, never references into the live buffers,
/// so a slow reader can never stall ingestion and a burst of ingestion can
/// never tear a reader's view.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<TelemetryStore>>,
}

impl SharedStore {
    /// Wrap a store for shared use.
    pub fn new(store: TelemetryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Create a shared store with explicit window capacities.
    pub fn with_capacities(sample_capacity: usize, metric_capacity: usize) -> Self {
        Self::new(TelemetryStore::with_capacities(
            sample_capacity,
            metric_capacity,
        ))
    }

    // A poisoned lock means a reader panicked mid-copy; the store itself
    // is still coherent (writes are single in-flight), so recover it.
    fn lock(&self) -> MutexGuard<'_, TelemetryStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fold one sample into the store; returns the updated statistics so
    /// the caller does not need a second lock round-trip.
    pub fn record_sample(&self, sample: TelemetrySample) -> StreamStats {
        let mut store = self.lock();
        store.record_sample(sample);
        store.stats()
    }

    /// Internally consistent deep copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    /// Up to `count` newest samples (scalar when `count == 1`).
    pub fn latest(&self, count: usize) -> Latest {
        self.lock().latest(count)
    }

    /// Copy of the running statistics.
    pub fn stats(&self) -> StreamStats {
        self.lock().stats()
    }

    /// Copy of the retained samples, oldest → newest.
    pub fn samples(&self) -> Vec<TelemetrySample> {
        self.lock().snapshot().samples
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no samples have been retained.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(TelemetryStore::new())
    }
}
