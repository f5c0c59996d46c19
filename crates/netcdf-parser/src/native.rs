//! Native NetCDF reading using the netcdf library.
//!
//! Meteogram files are small (one site, one day), so every field over
//! `(time)` or `(time, level)` is read eagerly into a [`SourceDataset`].
//! Fields over other dimensions (station metadata, soil levels, ...) are
//! skipped.

use std::path::Path;
use std::sync::Once;

use tracing::{debug, warn};

use crate::dataset::{Field, Layout, SourceDataset};
use crate::error::{NetCdfError, NetCdfResult};
use crate::loader::DimensionNames;
use crate::time::decode_times;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This function disables that output by calling
/// H5Eset_auto2 with null handlers. Safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read a meteogram file into memory.
pub fn read_meteogram(path: &Path, dims: &DimensionNames) -> NetCdfResult<SourceDataset> {
    silence_hdf5_errors();

    let display = path.display().to_string();
    let nc_file = netcdf::open(path).map_err(|e| NetCdfError::open_failed(&display, e))?;

    let time_var = nc_file
        .variable(&dims.time)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", dims.time)))?;
    let raw_times: Vec<f64> = time_var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", dims.time, e)))?;
    let units = get_string_attr(&time_var, "units")
        .ok_or_else(|| NetCdfError::MissingData(format!("{} units attribute", dims.time)))?;
    let times = decode_times(&raw_times, &units)?;

    let level_count = nc_file.dimension(&dims.level).map(|d| d.len()).unwrap_or(0);
    let time_count = times.len();
    let mut dataset = SourceDataset::new(times, level_count);

    for var in nc_file.variables() {
        let name = var.name();
        if name == dims.time {
            continue;
        }

        let dim_names: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
        let (layout, transposed) = match dim_names.as_slice() {
            [t] if *t == dims.time => (Layout::Time, false),
            [t, l] if *t == dims.time && *l == dims.level => (Layout::TimeLevel, false),
            [l, t] if *t == dims.time && *l == dims.level => (Layout::TimeLevel, true),
            _ => {
                debug!(variable = %name, dims = ?dim_names, "Skipping variable with unsupported dimensions");
                continue;
            }
        };

        let mut values: Vec<f64> = match var.get_values(..) {
            Ok(values) => values,
            Err(e) => {
                warn!(variable = %name, error = %e, "Failed to read variable, skipping");
                continue;
            }
        };

        for attr in ["_FillValue", "missing_value"] {
            if let Some(fill) = get_f64_attr(&var, attr) {
                for v in values.iter_mut().filter(|v| **v == fill) {
                    *v = f64::NAN;
                }
            }
        }

        if transposed {
            values = transpose(&values, level_count, time_count);
        }

        let mut field = match layout {
            Layout::Time => Field::time_series(name.clone(), values),
            Layout::TimeLevel => Field::profile(name.clone(), values),
        };
        if let Some(units) = get_string_attr(&var, "units") {
            field = field.with_units(units);
        }
        dataset.insert(field)?;
    }

    debug!(
        path = %display,
        times = time_count,
        levels = level_count,
        fields = dataset.field_names().count(),
        "Loaded meteogram"
    );

    Ok(dataset)
}

/// Reorder a `rows × cols` row-major buffer into `cols × rows`.
fn transpose(values: &[f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for c in 0..cols {
        for r in 0..rows {
            out.push(values[r * cols + c]);
        }
    }
    out
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get string attribute.
fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_level_major_to_time_major() {
        // 2 levels x 3 times, level-major
        let values = vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
        let out = transpose(&values, 2, 3);
        // time-major: (t0,l0),(t0,l1),(t1,l0),...
        assert_eq!(out, vec![0.0, 10.0, 1.0, 11.0, 2.0, 12.0]);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.nc");
        let result = read_meteogram(&path, &DimensionNames::default());
        assert!(matches!(result, Err(NetCdfError::OpenFailed { .. })));
    }
}
