use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the stats table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a `BTreeMap` / `BTreeSet` key downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Only produced by numeric coercion on a working copy; a cleaned table never holds it.
    Missing,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

/// Equality agrees with `Ord` (floats compare by `total_cmp`).
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Missing, Missing) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Missing => Ok(()),
        }
    }
}

/// Text as a string, numbers as numbers, missing (or non-finite) as `null`.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            CellValue::Float(_) | CellValue::Missing => serializer.serialize_none(),
        }
    }
}

impl CellValue {
    /// Guess the narrowest type for a scraped cell.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Missing;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(s.to_string())
    }

    /// Interpret the value as an `f64` if it is already numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Numeric coercion: text that parses becomes a number, anything else is missing.
    pub fn to_numeric(&self) -> CellValue {
        match self {
            CellValue::Integer(_) | CellValue::Float(_) => self.clone(),
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => CellValue::Float(v),
                _ => CellValue::Missing,
            },
            CellValue::Missing => CellValue::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Column type, decided once when the table is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Zero-fill value used for absent cells of this kind.
    pub fn default_value(self) -> CellValue {
        match self {
            ColumnKind::Integer => CellValue::Integer(0),
            ColumnKind::Float => CellValue::Float(0.0),
            ColumnKind::Text => CellValue::Text("0".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the scraped table before cleaning
// ---------------------------------------------------------------------------

/// Header labels exactly as the source wrote them, cells as text (`None` = empty cell).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

// ---------------------------------------------------------------------------
// PlayerStatsTable – the cleaned, typed table
// ---------------------------------------------------------------------------

/// Ordered rows of typed cells; `rows[i][j]` belongs to `columns[j]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatsTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
}

impl PlayerStatsTable {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Build a table from column names and untyped text rows; kinds are inferred.
    /// Mostly handy for tests and imports.
    pub fn from_text_rows(names: &[&str], rows: &[Vec<&str>]) -> Self {
        let raw = RawTable {
            headers: names.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|c| (!c.is_empty()).then(|| c.to_string()))
                        .collect()
                })
                .collect(),
        };
        super::clean::clean(raw)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `(row, column name)`.
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All cells of one column, in row order.
    pub fn column_values<'a>(&'a self, column: &str) -> Option<impl Iterator<Item = &'a CellValue>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Column as `f64`s; non-numeric cells become `None`.
    pub fn numeric_values(&self, column: &str) -> Option<Vec<Option<f64>>> {
        self.column_values(column)
            .map(|vals| vals.map(CellValue::as_f64).collect())
    }

    /// Names of the numeric-typed columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Sorted unique display strings of a column.
    pub fn unique_strings(&self, column: &str) -> Vec<String> {
        let Some(vals) = self.column_values(column) else {
            return Vec::new();
        };
        vals.map(|v| v.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// New table holding only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Coerce a column to numbers in place; unparseable cells become `Missing`.
    /// Returns `false` if the column does not exist.
    pub fn coerce_numeric(&mut self, column: &str) -> bool {
        let Some(idx) = self.column_index(column) else {
            return false;
        };
        if self.columns[idx].kind.is_numeric() {
            return true;
        }
        for row in &mut self.rows {
            row[idx] = row[idx].to_numeric();
        }
        self.columns[idx].kind = ColumnKind::Float;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_picks_narrowest_type() {
        assert_eq!(CellValue::parse("27"), CellValue::Integer(27));
        assert_eq!(CellValue::parse(".512"), CellValue::Float(0.512));
        assert_eq!(CellValue::parse("BOS"), CellValue::Text("BOS".into()));
        assert_eq!(CellValue::parse("  "), CellValue::Missing);
    }

    #[test]
    fn float_display_has_no_trailing_zeros() {
        assert_eq!(CellValue::Float(30.0).to_string(), "30");
        assert_eq!(CellValue::Float(25.3).to_string(), "25.3");
    }

    #[test]
    fn equality_agrees_with_ordering() {
        use std::collections::BTreeSet;

        let pairs = [
            (CellValue::Float(0.0), CellValue::Float(-0.0)),
            (CellValue::Float(f64::NAN), CellValue::Float(f64::NAN)),
            (CellValue::Integer(24), CellValue::Float(24.0)),
            (CellValue::Missing, CellValue::Missing),
        ];
        for (a, b) in &pairs {
            assert_eq!(a == b, a.cmp(b).is_eq(), "{a:?} vs {b:?}");
        }

        let keys: BTreeSet<CellValue> = pairs.into_iter().flat_map(|(a, b)| [a, b]).collect();
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn coerce_numeric_marks_garbage_missing() {
        let mut t = PlayerStatsTable::new(
            vec![Column::new("pts", ColumnKind::Text)],
            vec![
                vec![CellValue::Text("12.5".into())],
                vec![CellValue::Text("DNP".into())],
            ],
        );
        assert!(t.coerce_numeric("pts"));
        assert_eq!(t.columns[0].kind, ColumnKind::Float);
        assert_eq!(t.rows[0][0], CellValue::Float(12.5));
        assert!(t.rows[1][0].is_missing());
        assert!(!t.coerce_numeric("ast"));
    }

    #[test]
    fn select_rows_keeps_requested_order() {
        let t = PlayerStatsTable::from_text_rows(
            &["player", "pts"],
            &[vec!["A", "1"], vec!["B", "2"], vec!["C", "3"]],
        );
        let sub = t.select_rows(&[2, 0]);
        assert_eq!(sub.shape(), (2, 2));
        assert_eq!(sub.get(0, "player"), Some(&CellValue::Text("C".into())));
        assert_eq!(sub.get(1, "pts"), Some(&CellValue::Integer(1)));
    }
}
