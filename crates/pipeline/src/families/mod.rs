//! Per-family subsetting and transformation.
//!
//! Every family keeps time indices `0, 6, 12, ...`. Profile families also
//! slice the level axis to the requested half-open range.

pub mod hydrometeors;
pub mod precipitation;
pub mod profile;
pub mod surface;

use chrono::{DateTime, Utc};
use std::ops::Range;

use meteogram_common::DashboardResult;
use netcdf_parser::SourceDataset;

use crate::subset::time_indices;
use crate::table::{Cell, Table, HEIGHT_LEVEL, TIME};

/// Flatten `(time, level)` pairs into rows of `time, height_level, vars...`.
///
/// `row_values` fills the variable cells of one row; rows are emitted
/// time-major, level-minor.
pub(crate) fn profile_rows<F>(
    dataset: &SourceDataset,
    columns: &[String],
    levels: Range<usize>,
    mut row_values: F,
) -> DashboardResult<Table>
where
    F: FnMut(usize, usize) -> Vec<Cell>,
{
    let mut header = vec![TIME.to_string(), HEIGHT_LEVEL.to_string()];
    header.extend(columns.iter().cloned());
    let mut table = Table::new(header);

    for t in time_indices(dataset.times().len()) {
        let time: DateTime<Utc> = dataset.times()[t];
        for level in levels.clone() {
            let mut row = Vec::with_capacity(columns.len() + 2);
            row.push(Cell::Time(time));
            row.push(Cell::Int(level as i64));
            row.extend(row_values(t, level));
            table.push_row(row)?;
        }
    }
    Ok(table)
}

/// Raw value of a field, NaN when absent.
pub(crate) fn raw(dataset: &SourceDataset, name: &str, time: usize, level: Option<usize>) -> f64 {
    dataset.value(name, time, level).unwrap_or(f64::NAN)
}
