//! Aggregation state for the visormon telemetry consumer.
//!
//! Holds bounded rolling windows of recent samples plus running stream
//! statistics, and exposes them through a copy-on-read shared handle.
//! Memory stays bounded no matter how long the stream runs: the main
//! sample window and the per-metric history windows all evict their
//! oldest entry once full.

pub mod buffer;
pub mod shared;
pub mod store;

pub use buffer::RingBuffer;
pub use shared::SharedStore;
pub use store::{
    DEFAULT_METRIC_CAPACITY, DEFAULT_SAMPLE_CAPACITY, Latest, StoreSnapshot, StreamStats,
    TelemetryStore,
};
