use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use visormon_protocol::TelemetrySample;

use crate::buffer::RingBuffer;

/// Default main sample window capacity.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 1000;

/// Default per-metric history window capacity.
pub const DEFAULT_METRIC_CAPACITY: usize = 100;

/// Running statistics over the full stream life, independent of window
/// eviction. `total_messages` is monotonic and never reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamStats {
    pub total_messages: u64,
    /// Set once, on the first recorded sample.
    pub start_time: Option<DateTime<Utc>>,
    pub last_message_time: Option<DateTime<Utc>>,
    /// Messages per second since `start_time`. 0.0 while no time has
    /// elapsed (never NaN or infinite).
    pub message_rate: f64,
}

/// Result of a `latest(count)` query.
///
/// `count == 1` yields the single newest sample rather than a one-element
/// sequence, mirroring the scalar shape callers of the original consumer
/// expect. `Many` is ordered oldest → newest.
#[derive(Debug, Clone, PartialEq)]
pub enum Latest {
    None,
    One(TelemetrySample),
    Many(Vec<TelemetrySample>),
}

impl Latest {
    /// The newest sample regardless of variant, if any.
    pub fn newest(&self) -> Option<&TelemetrySample> {
        match self {
            Latest::None => None,
            Latest::One(sample) => Some(sample),
            Latest::Many(samples) => samples.last(),
        }
    }
}

/// Immutable, internally consistent copy of the store state.
///
/// All fields reflect a single point in logical time and share nothing
/// with the store's mutable buffers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub latest: Option<TelemetrySample>,
    pub samples: Vec<TelemetrySample>,
    pub cpu_usage: Vec<f64>,
    pub gpu_usage: Vec<f64>,
    pub temperature: Vec<f64>,
    pub battery_level: Vec<f64>,
    pub stats: StreamStats,
}

/// Bounded aggregation state for one telemetry stream.
///
/// Owns the main sample window, the four per-metric history windows, and
/// the running statistics. Single writer (the ingestion pipeline); readers
/// go through [`snapshot`](Self::snapshot) or the shared handle.
#[derive(Debug, Clone)]
pub struct TelemetryStore {
    samples: RingBuffer<TelemetrySample>,
    cpu_usage: RingBuffer<f64>,
    gpu_usage: RingBuffer<f64>,
    temperature: RingBuffer<f64>,
    battery_level: RingBuffer<f64>,
    stats: StreamStats,
}

impl TelemetryStore {
    /// Create a store with the default capacities (1000 samples, 100 per
    /// metric).
    pub fn new() -> Self {
        Self::with_capacities(DEFAULT_SAMPLE_CAPACITY, DEFAULT_METRIC_CAPACITY)
    }

    /// Create a store with explicit window capacities.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero.
    pub fn with_capacities(sample_capacity: usize, metric_capacity: usize) -> Self {
        Self {
            samples: RingBuffer::new(sample_capacity),
            cpu_usage: RingBuffer::new(metric_capacity),
            gpu_usage: RingBuffer::new(metric_capacity),
            temperature: RingBuffer::new(metric_capacity),
            battery_level: RingBuffer::new(metric_capacity),
            stats: StreamStats::default(),
        }
    }

    /// Fold one sample into the store.
    ///
    /// Appends to the main window and pushes the four tracked scalars into
    /// their history windows, substituting 0 for absent fields (the
    /// original consumer's policy — absence is not an error). Updates the
    /// running statistics and recomputes the message rate. Total: no
    /// failure path for any well-formed sample.
    pub fn record_sample(&mut self, sample: TelemetrySample) {
        let p = &sample.payload;
        self.cpu_usage.push(p.cpu_usage.unwrap_or(0.0));
        self.gpu_usage.push(p.gpu_usage.unwrap_or(0.0));
        self.temperature.push(p.temperature.unwrap_or(0.0));
        self.battery_level.push(p.battery_level.unwrap_or(0.0));

        let received_at = sample.received_at;
        self.samples.push(sample);

        self.stats.total_messages += 1;
        if self.stats.start_time.is_none() {
            self.stats.start_time = Some(received_at);
        }
        self.stats.last_message_time = Some(received_at);
        self.recompute_rate(Utc::now());
    }

    /// Rate is measured from the first sample, not process start, so it
    /// reflects the stream's actual throughput.
    fn recompute_rate(&mut self, now: DateTime<Utc>) {
        let Some(start) = self.stats.start_time else {
            self.stats.message_rate = 0.0;
            return;
        };
        let elapsed = (now - start).num_milliseconds() as f64 / 1000.0;
        self.stats.message_rate = if elapsed > 0.0 {
            self.stats.total_messages as f64 / elapsed
        } else {
            0.0
        };
    }

    /// Copy of the running statistics.
    pub fn stats(&self) -> StreamStats {
        self.stats.clone()
    }

    /// The most recently recorded sample, if any.
    pub fn latest_sample(&self) -> Option<&TelemetrySample> {
        self.samples.last()
    }

    /// Up to `count` of the newest samples; see [`Latest`] for the
    /// scalar-vs-sequence contract. `count == 0` yields `Latest::None`.
    pub fn latest(&self, count: usize) -> Latest {
        if count == 0 || self.samples.is_empty() {
            return Latest::None;
        }
        if count == 1 {
            return self
                .samples
                .last()
                .map_or(Latest::None, |sample| Latest::One(sample.clone()));
        }
        Latest::Many(self.samples.latest(count).cloned().collect())
    }

    /// Deep copy of the full state at a single point in logical time.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            latest: self.samples.last().cloned(),
            samples: self.samples.to_vec(),
            cpu_usage: self.cpu_usage.to_vec(),
            gpu_usage: self.gpu_usage.to_vec(),
            temperature: self.temperature.to_vec(),
            battery_level: self.battery_level.to_vec(),
            stats: self.stats.clone(),
        }
    }

    /// Number of samples currently retained in the main window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}
