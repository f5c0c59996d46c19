//! 1D surface variables (T2M, P_SFC, TQV, TQC, TQI).

use meteogram_common::{DashboardResult, Family};
use netcdf_parser::SourceDataset;

use super::raw;
use crate::filter::available_variables;
use crate::subset::time_indices;
use crate::table::{Cell, Table, TIME};

/// Columns `time` plus every available surface variable, one row per kept
/// time step.
pub fn transform(dataset: &SourceDataset) -> DashboardResult<Table> {
    let vars = available_variables(&Family::Surface.source_variables(), dataset);

    let mut header = vec![TIME.to_string()];
    header.extend(vars.iter().cloned());
    let mut table = Table::new(header);

    for t in time_indices(dataset.times().len()) {
        let mut row = Vec::with_capacity(vars.len() + 1);
        row.push(Cell::Time(dataset.times()[t]));
        row.extend(vars.iter().map(|v| Cell::float(raw(dataset, v, t, None))));
        table.push_row(row)?;
    }

    Ok(table)
}
