//! Wire payload types for the visormon telemetry consumer.
//!
//! The headset firmware publishes one JSON object per frame to the broker.
//! This crate defines the decode target for those payloads and the
//! configuration surface the consumer recognizes. It is deliberately free
//! of transport and aggregation concerns.

pub mod config;
pub mod sample;

pub use config::{BrokerConfig, ConsumerConfig};
pub use sample::{TelemetryPayload, TelemetrySample, Vec3};
