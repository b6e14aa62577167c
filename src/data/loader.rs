use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::clean;
use super::model::{PlayerStatsTable, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a previously exported stats table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one line per player
/// * `.json`    – `[{ "player": "...", "pts": 27.1, ... }, ...]`
/// * `.parquet` – flat columns of strings, ints, floats or bools
///
/// Every format goes through the same cleaning step as a scraped season.
pub fn load_file(path: &Path) -> Result<PlayerStatsTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    Ok(clean(raw))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Parse CSV text with a header row into a [`RawTable`].
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<RawTable> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|v| (!v.is_empty()).then(|| v.to_string()))
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as written by the JSON export):
///
/// ```json
/// [
///   { "player": "Joel Embiid", "team": "PHI", "pos": "C", "pts": 33.1 },
///   ...
/// ]
/// ```
///
/// Column order follows the first record; keys missing from later records are empty cells.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        rows.push(
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_to_text))
                .collect::<Vec<_>>(),
        );
    }

    Ok(RawTable { headers, rows })
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by the Parquet export (or by Pandas / Polars
/// with plain scalar columns).
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_text(col, row))
                    .collect::<Result<Vec<_>>>()?,
            );
        }
    }

    Ok(RawTable { headers, rows })
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row, as text.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)
            .to_string(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row)
            .to_string(),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row)
            .to_string(),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .context("expected BooleanArray")?
            .value(row)
            .to_string(),
        other => bail!("Unsupported parquet column type {other:?}"),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_csv_keeps_empty_cells_empty() {
        let data = "player,team,pts\nA,BOS,30\nB,,\n";
        let raw = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap();
        assert_eq!(raw.headers, ["player", "team", "pts"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1], vec![Some("B".to_string()), None, None]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("season.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
