use std::collections::{HashMap, HashSet};

use serde_json::Value;

use visormon_protocol::TelemetrySample;

/// Known columns, always emitted first and in this order so exports stay
/// comparable across runs. Tracked scalars default to 0 when the source
/// payload omitted them, matching what the windows recorded.
pub const FIXED_COLUMNS: [&str; 10] = [
    "received_at",
    "frame_id",
    "timestamp_us",
    "cpu_usage",
    "gpu_usage",
    "temperature",
    "battery_level",
    "head_position.x",
    "head_position.y",
    "head_position.z",
];

/// Flattened, column-oriented view of stored samples: one row per sample,
/// ready for tabular serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell lookup by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }
}

/// Flatten samples into an [`ExportTable`].
///
/// One row per sample, oldest → newest. Columns are the fixed set followed
/// by every extra field path in first-seen order; nested objects become
/// dot-path columns (`left_eye.pupil_diameter`). Cells for fields a given
/// sample lacks are `Null`, except the four tracked scalars which default
/// to 0. Pure read — callers pass the sample copy from a snapshot.
pub fn export_rows(samples: &[TelemetrySample]) -> ExportTable {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| (*c).to_owned()).collect();
    let mut seen: HashSet<String> = columns.iter().cloned().collect();

    let mut row_maps: Vec<HashMap<String, Value>> = Vec::with_capacity(samples.len());
    for sample in samples {
        let p = &sample.payload;
        let mut cells: HashMap<String, Value> = HashMap::new();

        cells.insert(
            "received_at".into(),
            Value::String(sample.received_at.to_rfc3339()),
        );
        if let Some(frame_id) = p.frame_id {
            cells.insert("frame_id".into(), frame_id.into());
        }
        if let Some(timestamp_us) = p.timestamp_us {
            cells.insert("timestamp_us".into(), timestamp_us.into());
        }
        cells.insert("cpu_usage".into(), p.cpu_usage.unwrap_or(0.0).into());
        cells.insert("gpu_usage".into(), p.gpu_usage.unwrap_or(0.0).into());
        cells.insert("temperature".into(), p.temperature.unwrap_or(0.0).into());
        cells.insert(
            "battery_level".into(),
            p.battery_level.unwrap_or(0.0).into(),
        );
        if let Some(pos) = p.head_position {
            cells.insert("head_position.x".into(), pos.x.into());
            cells.insert("head_position.y".into(), pos.y.into());
            cells.insert("head_position.z".into(), pos.z.into());
        }

        for (key, value) in &p.extra {
            let mut flat = Vec::new();
            flatten_into(key, value, &mut flat);
            for (path, cell) in flat {
                // Fixed columns are engine-owned; an extra field whose
                // path collides (e.g. a wire "received_at") never wins.
                if FIXED_COLUMNS.contains(&path.as_str()) {
                    continue;
                }
                if seen.insert(path.clone()) {
                    columns.push(path.clone());
                }
                cells.insert(path, cell);
            }
        }

        row_maps.push(cells);
    }

    let rows = row_maps
        .into_iter()
        .map(|mut cells| {
            columns
                .iter()
                .map(|column| cells.remove(column).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    ExportTable { columns, rows }
}

/// Recursively flatten a JSON value to `(dot.path, leaf)` pairs.
fn flatten_into(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(fields) if !fields.is_empty() => {
            for (key, nested) in fields {
                flatten_into(&format!("{prefix}.{key}"), nested, out);
            }
        }
        other => out.push((prefix.to_owned(), other.clone())),
    }
}
