//! Serialization boundary for intermediate tables.
//!
//! Tables cross the request/response boundary as JSON in "split"
//! orientation:
//!
//! ```json
//! {"columns": ["time", "T2M"], "index": [0, 1], "data": [["2021-09-09T00:00:00Z", 290.1], ...]}
//! ```
//!
//! Plot builders work only from the deserialized table and never reopen the
//! source file.

use serde::{Deserialize, Serialize};

use meteogram_common::{DashboardError, DashboardResult};

use crate::table::{Cell, Table};

#[derive(Debug, Serialize, Deserialize)]
struct SplitTable {
    columns: Vec<String>,
    #[serde(default)]
    index: Vec<usize>,
    data: Vec<Vec<Cell>>,
}

impl From<&Table> for SplitTable {
    fn from(table: &Table) -> Self {
        Self {
            columns: table.columns().to_vec(),
            index: (0..table.len()).collect(),
            data: table.rows().to_vec(),
        }
    }
}

impl TryFrom<SplitTable> for Table {
    type Error = DashboardError;

    fn try_from(split: SplitTable) -> Result<Self, Self::Error> {
        let width = split.columns.len();
        if let Some((i, row)) = split.data.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(DashboardError::Serialization(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            )));
        }
        if !split.index.is_empty() && split.index.len() != split.data.len() {
            return Err(DashboardError::Serialization(format!(
                "index has {} entries for {} rows",
                split.index.len(),
                split.data.len()
            )));
        }
        Ok(Table::from_parts(split.columns, split.data))
    }
}

impl Serialize for Table {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SplitTable::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let split = SplitTable::deserialize(deserializer)?;
        Table::try_from(split).map_err(serde::de::Error::custom)
    }
}

/// Serialize a table to its JSON payload.
pub fn to_json(table: &Table) -> DashboardResult<String> {
    Ok(serde_json::to_string(table)?)
}

/// Parse a JSON payload back into a table.
pub fn from_json(payload: &str) -> DashboardResult<Table> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HEIGHT_LEVEL, TIME};
    use chrono::{TimeZone, Utc};

    fn sample() -> Table {
        let t0 = Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2021, 9, 9, 1, 0, 0).unwrap();
        let mut table = Table::new([TIME, HEIGHT_LEVEL, "QC", "T"]);
        table
            .push_row(vec![Cell::Time(t0), Cell::Int(50), Cell::Float(-9.0), Cell::Float(281.123456789)])
            .unwrap();
        table
            .push_row(vec![Cell::Time(t1), Cell::Int(51), Cell::Float(-5.301029995663981), Cell::Null])
            .unwrap();
        table
    }

    #[test]
    fn test_round_trip_preserves_columns_order_and_values() {
        let table = sample();
        let json = to_json(&table).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_split_layout() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["columns"][1], "height_level");
        assert_eq!(value["index"], serde_json::json!([0, 1]));
        assert_eq!(value["data"][0][0], "2021-09-09T00:00:00Z");
        assert_eq!(value["data"][0][1], 50);
        assert!(value["data"][1][3].is_null());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let payload = r#"{"columns": ["time", "T"], "index": [0], "data": [[1.0]]}"#;
        let err = from_json(payload).unwrap_err();
        assert!(matches!(err, DashboardError::Serialization(_)));
    }

    #[test]
    fn test_rejects_non_table_payload() {
        assert!(from_json("[1, 2, 3]").is_err());
        assert!(from_json("").is_err());
    }
}
