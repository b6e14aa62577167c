use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use parquet::arrow::ArrowWriter;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::model::{CellValue, Column, ColumnKind, PlayerStatsTable};
use crate::error::ExportError;

/// Output formats for the visible table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Parquet,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Parquet];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Parquet => "parquet",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Parquet => "Parquet",
        }
    }

    /// Suggested file name, e.g. `playerstats.json`.
    pub fn file_name(self) -> String {
        format!("playerstats.{}", self.extension())
    }

    pub fn encode(self, table: &PlayerStatsTable) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Csv => to_csv(table),
            ExportFormat::Json => to_json(table),
            ExportFormat::Parquet => to_parquet(table),
        }
    }
}

/// Encode `table` and write it to `path`.
pub fn save(table: &PlayerStatsTable, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let bytes = format.encode(table)?;
    std::fs::write(path, &bytes).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(
        "exported {} rows as {} to {}",
        table.len(),
        format.label(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header line of column names, then one `\n`-terminated line per row. No index column.
pub fn to_csv(table: &PlayerStatsTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(table.column_names())?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.into_inner().map_err(|e| ExportError::Io {
        path: "CSV buffer".to_string(),
        source: e.into_error(),
    })
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Array of records, keys in column order.
pub fn to_json(table: &PlayerStatsTable) -> Result<Vec<u8>, ExportError> {
    let records: Vec<Record<'_>> = table
        .rows
        .iter()
        .map(|row| Record {
            columns: &table.columns,
            row,
        })
        .collect();
    Ok(serde_json::to_vec_pretty(&records)?)
}

/// One row as a JSON object.
struct Record<'a> {
    columns: &'a [Column],
    row: &'a [CellValue],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (col, cell) in self.columns.iter().zip(self.row) {
            map.serialize_entry(&col.name, cell)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Integer → Int64, Float → Float64, Text → Utf8; all columns nullable.
pub fn to_parquet(table: &PlayerStatsTable) -> Result<Vec<u8>, ExportError> {
    let fields: Vec<Field> = table
        .columns
        .iter()
        .map(|c| {
            let dt = match c.kind {
                ColumnKind::Integer => DataType::Int64,
                ColumnKind::Float => DataType::Float64,
                ColumnKind::Text => DataType::Utf8,
            };
            Field::new(&c.name, dt, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = table
        .columns
        .iter()
        .enumerate()
        .map(|(j, c)| -> ArrayRef {
            let cells = table.rows.iter().map(|r| &r[j]);
            match c.kind {
                ColumnKind::Integer => Arc::new(
                    cells
                        .map(|v| match v {
                            CellValue::Integer(i) => Some(*i),
                            _ => None,
                        })
                        .collect::<Int64Array>(),
                ),
                ColumnKind::Float => {
                    Arc::new(cells.map(CellValue::as_f64).collect::<Float64Array>())
                }
                ColumnKind::Text => Arc::new(
                    cells
                        .map(|v| (!v.is_missing()).then(|| v.to_string()))
                        .collect::<StringArray>(),
                ),
            }
        })
        .collect();

    let batch = RecordBatch::try_new(Arc::clone(&schema), arrays)?;
    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buf)
}
