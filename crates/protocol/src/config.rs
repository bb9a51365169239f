use serde::{Deserialize, Serialize};

/// RabbitMQ connection settings.
///
/// Opaque to the aggregation core — handed to the transport collaborator
/// as-is when setting up the delivery channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub vhost: String,
    pub exchange: String,
    pub routing_key: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5672,
            username: "guest".into(),
            password: "guest".into(),
            vhost: "/".into(),
            exchange: "vr_telemetry".into(),
            routing_key: "telemetry.data".into(),
        }
    }
}

/// Consumer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    pub broker: BrokerConfig,
    /// Capacity of the main sample window.
    pub sample_capacity: usize,
    /// Capacity of each per-metric history window.
    pub metric_capacity: usize,
    /// Log a progress report every N ingested messages (0 = disabled).
    pub progress_interval: u64,
    /// Auto-export period in seconds (0 = disabled).
    pub export_interval_secs: u64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            sample_capacity: 1000,
            metric_capacity: 100,
            progress_interval: 100,
            export_interval_secs: 0,
        }
    }
}
