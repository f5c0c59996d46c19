//! Time-height profile variables (CLC, T, RHO, P, REL_HUM, U, V).

use meteogram_common::{DashboardResult, Family, LevelRange};
use netcdf_parser::SourceDataset;

use super::{profile_rows, raw};
use crate::filter::available_variables;
use crate::subset::level_indices;
use crate::table::{Cell, Table};

pub fn transform(dataset: &SourceDataset, levels: &LevelRange) -> DashboardResult<Table> {
    let vars = available_variables(&Family::TimeHeight.source_variables(), dataset);
    let range = level_indices(dataset, levels);

    profile_rows(dataset, &vars, range, |t, level| {
        vars.iter()
            .map(|v| Cell::float(raw(dataset, v, t, Some(level))))
            .collect()
    })
}
