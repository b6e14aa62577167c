use log::debug;

use super::model::{CellValue, Column, ColumnKind, PlayerStatsTable, RawTable};

/// Label that leaks into the data when the source repeats its header row.
const AGE_HEADER: &str = "Age";
/// Rank column added by the source; it carries no information of its own.
const RANK_COLUMN: &str = "rk";

/// Normalize a column label: trim, lowercase, spaces to underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Turn a scraped table into a typed [`PlayerStatsTable`].
///
/// * rows whose age cell repeats the `Age` header label are dropped
/// * the `Rk` column is dropped
/// * column names are normalized
/// * each column gets a kind, and absent cells the kind's zero default
///
/// Never fails; running it on an already-clean table is a no-op.
pub fn clean(raw: RawTable) -> PlayerStatsTable {
    let width = raw.headers.len();
    let names: Vec<String> = raw
        .headers
        .iter()
        .map(|h| normalize_column_name(h))
        .collect();

    let age_idx = names.iter().position(|n| n == "age");
    let before = raw.rows.len();
    let rows: Vec<Vec<Option<String>>> = raw
        .rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, None);
            row
        })
        .filter(|row| match age_idx {
            Some(i) => row[i].as_deref().map(str::trim) != Some(AGE_HEADER),
            None => true,
        })
        .collect();
    if rows.len() != before {
        debug!("dropped {} repeated header rows", before - rows.len());
    }

    let keep: Vec<usize> = (0..width).filter(|&i| names[i] != RANK_COLUMN).collect();

    let columns: Vec<Column> = keep
        .iter()
        .map(|&i| Column::new(names[i].clone(), infer_kind(rows.iter().map(|r| r[i].as_deref()))))
        .collect();

    let rows = rows
        .iter()
        .map(|row| {
            keep.iter()
                .zip(&columns)
                .map(|(&i, col)| typed_cell(row[i].as_deref(), col.kind))
                .collect()
        })
        .collect();

    PlayerStatsTable::new(columns, rows)
}

/// Integer if every present cell is an integer, Float if every present cell is
/// a number, Text otherwise. A column with no present cells is Text.
fn infer_kind<'a>(cells: impl Iterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for cell in cells.flatten() {
        let this = match CellValue::parse(cell) {
            CellValue::Missing => continue,
            CellValue::Integer(_) => ColumnKind::Integer,
            CellValue::Float(_) => ColumnKind::Float,
            CellValue::Text(_) => return ColumnKind::Text,
        };
        kind = Some(match (kind, this) {
            (Some(ColumnKind::Float), _) | (_, ColumnKind::Float) => ColumnKind::Float,
            _ => ColumnKind::Integer,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn typed_cell(cell: Option<&str>, kind: ColumnKind) -> CellValue {
    let Some(text) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return kind.default_value();
    };
    match kind {
        ColumnKind::Integer => text
            .parse::<i64>()
            .map(CellValue::Integer)
            .unwrap_or_else(|_| kind.default_value()),
        ColumnKind::Float => text
            .parse::<f64>()
            .map(CellValue::Float)
            .unwrap_or_else(|_| kind.default_value()),
        ColumnKind::Text => CellValue::Text(text.to_string()),
    }
}
