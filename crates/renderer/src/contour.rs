//! Contour grids and band levels.
//!
//! Profile tables are long form (one row per time and level). Plotly's
//! contour trace wants a regular grid, so rows are pivoted into
//! `z[level][time]` here; contouring itself happens in the browser.

use chrono::{DateTime, Utc};

use pipeline::table::{Table, HEIGHT_LEVEL, TIME};

/// Generate contour levels automatically based on data range and interval
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || max_value < min_value {
        return vec![];
    }

    // Start from first multiple of interval at or above min_value
    let first = (min_value / interval).ceil();
    let count = ((max_value / interval).floor() - first) as i64;

    (0..=count).map(|i| (first + i as f64) * interval).collect()
}

/// Colorbar label for a log10 level, e.g. `-8.0` → `1e-8`.
pub fn log_tick_label(level: f64) -> String {
    format!("1e{}", level.round() as i64)
}

/// Regular time × level grid of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourGrid {
    pub times: Vec<DateTime<Utc>>,
    pub levels: Vec<i64>,
    /// `values[level][time]`; `None` where the table has no finite value.
    pub values: Vec<Vec<Option<f64>>>,
}

impl ContourGrid {
    /// Pivot `column` of a profile table. Returns `None` when the table lacks
    /// the coordinate columns or the variable.
    pub fn from_table(table: &Table, column: &str) -> Option<Self> {
        let t_idx = table.column_index(TIME)?;
        let l_idx = table.column_index(HEIGHT_LEVEL)?;
        let v_idx = table.column_index(column)?;

        let mut times: Vec<DateTime<Utc>> = Vec::new();
        let mut levels: Vec<i64> = Vec::new();
        for row in table.rows() {
            if let Some(t) = row[t_idx].as_time() {
                if !times.contains(&t) {
                    times.push(t);
                }
            }
            if let Some(l) = row[l_idx].as_i64() {
                if !levels.contains(&l) {
                    levels.push(l);
                }
            }
        }
        levels.sort_unstable();

        let mut values = vec![vec![None; times.len()]; levels.len()];
        for row in table.rows() {
            let (Some(t), Some(l)) = (row[t_idx].as_time(), row[l_idx].as_i64()) else {
                continue;
            };
            let (Some(ti), Ok(li)) = (times.iter().position(|x| *x == t), levels.binary_search(&l))
            else {
                continue;
            };
            values[li][ti] = row[v_idx].as_f64().filter(|v| v.is_finite());
        }

        Some(Self {
            times,
            levels,
            values,
        })
    }

    /// Whether any grid cell holds a value.
    pub fn has_values(&self) -> bool {
        self.values.iter().flatten().any(Option::is_some)
    }
}
