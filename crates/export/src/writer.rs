use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::{ExportError, ExportTable};

/// Write a table as CSV: header line, then one line per row.
///
/// Cells containing commas, quotes, or newlines are quoted with doubled
/// inner quotes. `Null` cells are empty, other JSON values render in their
/// compact form.
pub fn write_csv(path: &Path, table: &ExportTable) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", join_line(table.columns.iter().map(String::as_str)))?;
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(format_cell).collect();
        writeln!(out, "{}", join_line(cells.iter().map(String::as_str)))?;
    }
    out.flush()?;
    Ok(())
}

fn join_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(escape).collect::<Vec<_>>().join(",")
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}
