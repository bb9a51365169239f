fn main() {
    println!("Run `cargo test -p payload-compat` to execute payload compatibility tests.");
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use visormon_export::export_rows;
    use visormon_ingest::{Consumer, IngestError, Pipeline};
    use visormon_protocol::TelemetryPayload;
    use visormon_store::{Latest, SharedStore};

    /// One message exactly as the headset firmware serializes it
    /// (every tracking section present, C `snprintf` field order).
    const PRODUCER_MESSAGE: &str = r#"{
        "timestamp_us": 1700000000123456,
        "frame_id": 72,
        "head_position": {"x": 0.123000, "y": 1.701000, "z": 0.045000},
        "head_orientation": {"x": 0.000000, "y": 0.000000, "z": 0.000000, "w": 1.000000},
        "head_acceleration": {"x": 0.010000, "y": -9.810000, "z": 0.020000},
        "head_angular_velocity": {"x": 0.001000, "y": 0.002000, "z": 0.003000},
        "left_eye": {"x": 0.480000, "y": 0.510000, "pupil_diameter": 3.500000, "is_blinking": false},
        "right_eye": {"x": 0.520000, "y": 0.490000, "pupil_diameter": 3.600000, "is_blinking": false},
        "left_hand": {"x": -0.200000, "y": 1.100000, "z": 0.300000, "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}, "grip_strength": 0.750000, "is_tracking": true},
        "right_hand": {"x": 0.200000, "y": 1.100000, "z": 0.300000, "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}, "grip_strength": 0.500000, "is_tracking": true},
        "cpu_usage": 45.20,
        "gpu_usage": 60.10,
        "temperature": 35.50,
        "battery_level": 85,
        "is_connected": true
    }"#;

    #[test]
    fn producer_message_decodes() {
        let payload = TelemetryPayload::decode(PRODUCER_MESSAGE.as_bytes()).unwrap();

        // Recognized fields land typed.
        assert_eq!(payload.cpu_usage, Some(45.2));
        assert_eq!(payload.gpu_usage, Some(60.1));
        assert_eq!(payload.temperature, Some(35.5));
        assert_eq!(payload.battery_level, Some(85.0));
        assert_eq!(payload.frame_id, Some(72));
        assert_eq!(payload.timestamp_us, Some(1_700_000_000_123_456));
        assert_eq!(payload.head_position.unwrap().y, 1.701);

        // Tracking sections pass through untyped.
        assert_eq!(payload.extra["head_orientation"]["w"], json!(1.0));
        assert_eq!(payload.extra["left_eye"]["pupil_diameter"], json!(3.5));
        assert_eq!(payload.extra["right_hand"]["grip_strength"], json!(0.5));
        assert_eq!(payload.extra["is_connected"], json!(true));
    }

    #[test]
    fn pipeline_to_snapshot() {
        let store = SharedStore::default();
        let pipeline = Pipeline::new(store.clone(), 0);
        pipeline.ingest(PRODUCER_MESSAGE.as_bytes()).unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.stats.total_messages, 1);
        assert_eq!(snap.cpu_usage, vec![45.2]);
        assert_eq!(snap.battery_level, vec![85.0]);

        match store.latest(1) {
            Latest::One(sample) => assert_eq!(sample.payload.cpu_usage, Some(45.2)),
            other => panic!("expected Latest::One, got {other:?}"),
        }
    }

    #[test]
    fn pipeline_to_export_rows() {
        let store = SharedStore::default();
        let pipeline = Pipeline::new(store.clone(), 0);
        pipeline.ingest(PRODUCER_MESSAGE.as_bytes()).unwrap();
        // A second message missing every tracked scalar.
        pipeline.ingest(br#"{"frame_id": 73}"#).unwrap();

        let table = export_rows(&store.samples());
        assert_eq!(table.rows.len(), 2);

        assert_eq!(table.cell(0, "temperature"), Some(&json!(35.5)));
        assert_eq!(table.cell(0, "head_position.x"), Some(&json!(0.123)));
        assert_eq!(table.cell(0, "left_hand.grip_strength"), Some(&json!(0.75)));
        assert_eq!(table.cell(0, "is_connected"), Some(&json!(true)));

        // Missing tracked scalars default to 0, like the windows.
        assert_eq!(table.cell(1, "cpu_usage"), Some(&json!(0.0)));
        assert_eq!(table.cell(1, "temperature"), Some(&json!(0.0)));
    }

    #[tokio::test]
    async fn consumer_loop_end_to_end() {
        let store = SharedStore::with_capacities(1000, 100);
        let consumer = Consumer::new(Pipeline::new(store.clone(), 0));
        let (tx, rx) = tokio::sync::mpsc::channel(64);

        // Valid frames interleaved with junk the broker should never send
        // but sometimes does.
        for i in 0..20 {
            tx.send(format!(r#"{{"frame_id": {i}, "cpu_usage": {i}.5}}"#).into_bytes())
                .await
                .unwrap();
            if i % 5 == 0 {
                tx.send(b"not telemetry".to_vec()).await.unwrap();
            }
        }
        drop(tx);

        let err = consumer
            .run(rx, tokio_util::sync::CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::StreamClosed));

        assert_eq!(store.stats().total_messages, 20);
        assert_eq!(consumer.pipeline().malformed_count(), 4);

        // State is fully servable after stream closure.
        let table = export_rows(&store.samples());
        assert_eq!(table.rows.len(), 20);
        assert_eq!(table.cell(19, "cpu_usage"), Some(&json!(19.5)));
    }
}
