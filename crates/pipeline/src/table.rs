//! Row-oriented intermediate table handed from the pipeline to plot builders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meteogram_common::{DashboardError, DashboardResult};

pub const TIME: &str = "time";
pub const HEIGHT_LEVEL: &str = "height_level";
pub const SERIES_NAME: &str = "series_name";
pub const VALUE: &str = "value";

/// One table cell.
///
/// Serialized untagged so payloads stay plain JSON: timestamps become ISO-8601
/// strings, missing values `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
    Text(String),
}

impl Cell {
    /// Float cell; NaN and infinities become [`Cell::Null`].
    pub fn float(v: f64) -> Self {
        if v.is_finite() {
            Cell::Float(v)
        } else {
            Cell::Null
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Cell::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Flat table with named columns and rows in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> DashboardResult<()> {
        if row.len() != self.columns.len() {
            return Err(DashboardError::Internal(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric view of a column; non-numeric cells are `None`.
    pub fn float_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        Some(self.column(name)?.map(Cell::as_f64).collect())
    }

    /// Rows where `key_column` holds the text `key`.
    pub fn rows_where<'a>(
        &'a self,
        key_column: &str,
        key: &'a str,
    ) -> Option<impl Iterator<Item = &'a Vec<Cell>> + 'a> {
        let idx = self.column_index(key_column)?;
        Some(
            self.rows
                .iter()
                .filter(move |row| row[idx].as_str() == Some(key)),
        )
    }

    /// Distinct text values of a column in first-seen order.
    pub fn distinct_text(&self, name: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        if let Some(cells) = self.column(name) {
            for s in cells.filter_map(Cell::as_str) {
                if !out.iter().any(|seen| seen == s) {
                    out.push(s.to_string());
                }
            }
        }
        out
    }

    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Table {
        let t0 = Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap();
        let mut table = Table::new([TIME, SERIES_NAME, VALUE]);
        table
            .push_row(vec![Cell::Time(t0), Cell::Text("RAIN".into()), Cell::Float(0.5)])
            .unwrap();
        table
            .push_row(vec![Cell::Time(t0), Cell::Text("SNOW".into()), Cell::Null])
            .unwrap();
        table
            .push_row(vec![Cell::Time(t0), Cell::Text("RAIN".into()), Cell::Float(0.7)])
            .unwrap();
        table
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new([TIME, VALUE]);
        assert!(table.push_row(vec![Cell::Null]).is_err());
        assert!(table.push_row(vec![Cell::Null, Cell::Float(1.0)]).is_ok());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_float_column() {
        let table = sample();
        assert_eq!(
            table.float_column(VALUE).unwrap(),
            vec![Some(0.5), None, Some(0.7)]
        );
        assert!(table.float_column("QC").is_none());
    }

    #[test]
    fn test_distinct_text_keeps_order() {
        assert_eq!(sample().distinct_text(SERIES_NAME), vec!["RAIN", "SNOW"]);
    }

    #[test]
    fn test_rows_where() {
        let table = sample();
        let rain: Vec<_> = table.rows_where(SERIES_NAME, "RAIN").unwrap().collect();
        assert_eq!(rain.len(), 2);
    }

    #[test]
    fn test_float_cell_rejects_non_finite() {
        assert_eq!(Cell::float(f64::NAN), Cell::Null);
        assert_eq!(Cell::float(f64::INFINITY), Cell::Null);
        assert_eq!(Cell::float(-9.0), Cell::Float(-9.0));
    }
}
