use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use visormon_protocol::{TelemetryPayload, TelemetrySample};
use visormon_store::SharedStore;

use crate::IngestError;

/// Transforms raw payloads into validated samples and drives the store.
///
/// The pipeline is the store's only writer. It holds no windowed state of
/// its own — just the malformed-payload counter and the progress-report
/// cadence.
#[derive(Debug)]
pub struct Pipeline {
    store: SharedStore,
    /// Log a progress report every N samples (0 = never).
    progress_interval: u64,
    malformed: AtomicU64,
}

impl Pipeline {
    pub fn new(store: SharedStore, progress_interval: u64) -> Self {
        Self {
            store,
            progress_interval,
            malformed: AtomicU64::new(0),
        }
    }

    /// Ingest one raw payload.
    ///
    /// Decodes the JSON object, stamps `received_at` with the current
    /// wall-clock time, and records the sample. A decode failure is
    /// counted and returned as [`IngestError::MalformedPayload`]; callers
    /// running a stream loop should log it and continue.
    pub fn ingest(&self, raw: &[u8]) -> Result<(), IngestError> {
        let payload = match TelemetryPayload::decode(raw) {
            Ok(payload) => payload,
            Err(e) => {
                self.malformed.fetch_add(1, Ordering::Relaxed);
                return Err(IngestError::MalformedPayload(e));
            }
        };

        let sample = TelemetrySample::new(payload, Utc::now());
        let stats = self.store.record_sample(sample);

        if self.progress_interval > 0 && stats.total_messages % self.progress_interval == 0 {
            tracing::info!(
                total = stats.total_messages,
                rate_per_sec = stats.message_rate,
                "processed telemetry"
            );
        }

        Ok(())
    }

    /// Number of payloads rejected as malformed since creation.
    pub fn malformed_count(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    /// The shared store this pipeline writes to.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }
}
