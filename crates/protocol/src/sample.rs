use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 3D position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One decoded telemetry message as published by the headset firmware.
///
/// Only the four system-health scalars and the head position are given
/// typed fields — they are the values the aggregation engine tracks in
/// per-metric history windows. Everything else the producer sends
/// (orientation, eye tracking, hand tracking, connection flags, or fields
/// added by future firmware) lands verbatim in `extra` and travels through
/// snapshots and exports untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpu_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_us: Option<u64>,
    /// Unrecognized fields, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TelemetryPayload {
    /// Decodes a raw broker payload (UTF-8 JSON object).
    ///
    /// A wire `received_at` key is dropped: that name belongs to the
    /// engine-assigned ingestion timestamp and must never come from the
    /// producer.
    pub fn decode(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let mut payload: Self = serde_json::from_slice(raw)?;
        payload.extra.remove("received_at");
        Ok(payload)
    }
}

/// A stored telemetry message: the decoded payload plus the ingestion
/// timestamp stamped by the engine.
///
/// `received_at` is always assigned locally — the producer's own
/// `timestamp_us` is kept but never trusted for rate or ordering.
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: TelemetryPayload,
}

impl TelemetrySample {
    pub fn new(payload: TelemetryPayload, received_at: DateTime<Utc>) -> Self {
        Self {
            received_at,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_recognized_fields() {
        let raw = json!({
            "cpu_usage": 45.2,
            "gpu_usage": 60.1,
            "temperature": 35.5,
            "battery_level": 85,
            "head_position": {"x": 0.123, "y": 1.701, "z": 0.045},
            "frame_id": 42,
            "timestamp_us": 1700000000000000u64
        })
        .to_string();

        let payload = TelemetryPayload::decode(raw.as_bytes()).unwrap();
        assert_eq!(payload.cpu_usage, Some(45.2));
        assert_eq!(payload.gpu_usage, Some(60.1));
        assert_eq!(payload.temperature, Some(35.5));
        assert_eq!(payload.battery_level, Some(85.0));
        assert_eq!(payload.frame_id, Some(42));
        assert_eq!(payload.timestamp_us, Some(1_700_000_000_000_000));
        let pos = payload.head_position.unwrap();
        assert_eq!(pos.x, 0.123);
        assert_eq!(pos.y, 1.701);
        assert_eq!(pos.z, 0.045);
        assert!(payload.extra.is_empty());
    }

    #[test]
    fn decode_missing_fields_stay_absent() {
        let payload = TelemetryPayload::decode(br#"{"cpu_usage": 10.0}"#).unwrap();
        assert_eq!(payload.cpu_usage, Some(10.0));
        assert_eq!(payload.gpu_usage, None);
        assert_eq!(payload.temperature, None);
        assert_eq!(payload.battery_level, None);
        assert!(payload.head_position.is_none());
    }

    #[test]
    fn decode_captures_extra_fields() {
        let raw = json!({
            "cpu_usage": 12.0,
            "head_orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0},
            "left_eye": {"x": 0.1, "y": 0.2, "pupil_diameter": 3.5, "is_blinking": false},
            "is_connected": true
        })
        .to_string();

        let payload = TelemetryPayload::decode(raw.as_bytes()).unwrap();
        assert_eq!(payload.extra.len(), 3);
        assert_eq!(payload.extra["is_connected"], json!(true));
        assert_eq!(payload.extra["head_orientation"]["w"], json!(1.0));
        assert_eq!(payload.extra["left_eye"]["pupil_diameter"], json!(3.5));
    }

    #[test]
    fn decode_drops_wire_received_at() {
        let raw = br#"{"cpu_usage": 1.0, "received_at": "1999-01-01T00:00:00Z"}"#;
        let payload = TelemetryPayload::decode(raw).unwrap();
        assert!(!payload.extra.contains_key("received_at"));

        // The stored sample carries the engine stamp, once.
        let stamp = Utc::now();
        let sample = TelemetrySample::new(payload, stamp);
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json.matches("\"received_at\"").count(), 1);
        let parsed: TelemetrySample = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.received_at, stamp);
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(TelemetryPayload::decode(b"[1, 2, 3]").is_err());
        assert!(TelemetryPayload::decode(b"not json").is_err());
        assert!(TelemetryPayload::decode(b"").is_err());
    }

    #[test]
    fn sample_serializes_flat() {
        let payload = TelemetryPayload::decode(br#"{"cpu_usage": 50.0, "foo": 1}"#).unwrap();
        let sample = TelemetrySample::new(payload, Utc::now());

        let value = serde_json::to_value(&sample).unwrap();
        // Payload fields sit at the top level next to received_at,
        // matching the shape the original consumer stored.
        assert!(value["received_at"].is_string());
        assert_eq!(value["cpu_usage"], json!(50.0));
        assert_eq!(value["foo"], json!(1));
    }

    #[test]
    fn sample_roundtrip() {
        let payload = TelemetryPayload::decode(
            br#"{"cpu_usage": 50.0, "head_position": {"x": 1.0, "y": 2.0, "z": 3.0}}"#,
        )
        .unwrap();
        let sample = TelemetrySample::new(payload, Utc::now());

        let json = serde_json::to_string(&sample).unwrap();
        let parsed: TelemetrySample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, parsed);
    }
}
