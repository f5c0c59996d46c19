//! Hydrometeor mass and number concentration profiles.
//!
//! Mass mixing ratios except water vapour are summed into
//! `total_hydrometeors`. Columns whose catalog scale is log10 are then stored
//! as `log10(v)`, with everything below [`DETECTION_FLOOR`] collapsed to
//! [`SENTINEL`]. The transform is lossy: values under the floor cannot be
//! recovered from the table.

use meteogram_common::catalog::{lookup, Role};
use meteogram_common::{DashboardResult, Family, LevelRange, Scale, TOTAL_HYDROMETEORS};
use netcdf_parser::SourceDataset;

use super::{profile_rows, raw};
use crate::filter::available_variables;
use crate::subset::level_indices;
use crate::table::{Cell, Table};

/// Smallest mass mixing ratio (kg/kg) shown on the log scale.
pub const DETECTION_FLOOR: f64 = 1e-8;

/// Stored in place of values below the floor; sits under the valid log10
/// range (about -8 to 0) so it gets its own color.
pub const SENTINEL: f64 = -9.0;

/// Log-scale transform for one mass value. NaN passes through.
pub fn log_transform(v: f64) -> f64 {
    if v < DETECTION_FLOOR {
        SENTINEL
    } else {
        v.log10()
    }
}

fn is_log_scaled(name: &str) -> bool {
    lookup(name).map(|spec| spec.scale == Scale::Log10).unwrap_or(false)
}

pub fn transform(dataset: &SourceDataset, levels: &LevelRange) -> DashboardResult<Table> {
    let vars = available_variables(&Family::Hydrometeors.source_variables(), dataset);
    let range = level_indices(dataset, levels);

    let mass: Vec<String> = vars
        .iter()
        .filter(|v| lookup(v.as_str()).map(|s| s.role == Role::Mass).unwrap_or(false))
        .cloned()
        .collect();

    let mut columns = vars.clone();
    if !mass.is_empty() {
        columns.push(TOTAL_HYDROMETEORS.to_string());
    }
    let log_scaled: Vec<bool> = columns.iter().map(|c| is_log_scaled(c)).collect();

    profile_rows(dataset, &columns, range, |t, level| {
        let mut values: Vec<f64> = vars.iter().map(|v| raw(dataset, v, t, Some(level))).collect();
        if !mass.is_empty() {
            values.push(mass.iter().map(|m| raw(dataset, m, t, Some(level))).sum());
        }
        values
            .into_iter()
            .zip(&log_scaled)
            .map(|(v, &log)| Cell::float(if log { log_transform(v) } else { v }))
            .collect()
    })
}
