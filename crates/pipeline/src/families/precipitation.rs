//! Precipitation series derived from grid-scale and convective components.
//!
//! `RAIN = RAIN_GSP + RAIN_CON`, `SNOW = SNOW_GSP + SNOW_CON` and
//! `PRECIP = RAIN + SNOW`, reshaped to long form with one row per
//! (series, time). A series is only emitted when all of its inputs are
//! present, so a missing component drops the affected series instead of
//! producing partial sums.

use chrono::{DateTime, Utc};
use tracing::warn;

use meteogram_common::DashboardResult;
use netcdf_parser::SourceDataset;

use super::raw;
use crate::subset::time_indices;
use crate::table::{Cell, Table, SERIES_NAME, TIME, VALUE};

pub const PRECIP: &str = "PRECIP";
pub const RAIN: &str = "RAIN";
pub const SNOW: &str = "SNOW";

/// Wide-form derived series over the kept time steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipSeries {
    pub times: Vec<DateTime<Utc>>,
    pub precip: Option<Vec<f64>>,
    pub rain: Option<Vec<f64>>,
    pub snow: Option<Vec<f64>>,
}

fn component_sum(
    dataset: &SourceDataset,
    series: &str,
    parts: [&str; 2],
    indices: &[usize],
) -> Option<Vec<f64>> {
    let missing: Vec<&str> = parts.iter().copied().filter(|p| !dataset.contains(p)).collect();
    if !missing.is_empty() {
        warn!(series, missing = ?missing, "Precipitation input missing, series omitted");
        return None;
    }
    Some(
        indices
            .iter()
            .map(|&t| raw(dataset, parts[0], t, None) + raw(dataset, parts[1], t, None))
            .collect(),
    )
}

/// Derive the three series before reshaping.
pub fn derive(dataset: &SourceDataset) -> PrecipSeries {
    let indices: Vec<usize> = time_indices(dataset.times().len()).collect();

    let rain = component_sum(dataset, RAIN, ["RAIN_GSP", "RAIN_CON"], &indices);
    let snow = component_sum(dataset, SNOW, ["SNOW_GSP", "SNOW_CON"], &indices);
    let precip = match (&rain, &snow) {
        (Some(r), Some(s)) => Some(r.iter().zip(s).map(|(r, s)| r + s).collect()),
        _ => None,
    };

    PrecipSeries {
        times: indices.iter().map(|&t| dataset.times()[t]).collect(),
        precip,
        rain,
        snow,
    }
}

/// Long-form table `time, series_name, value`, series in PRECIP, RAIN, SNOW
/// order.
pub fn transform(dataset: &SourceDataset) -> DashboardResult<Table> {
    let series = derive(dataset);
    let mut table = Table::new([TIME, SERIES_NAME, VALUE]);

    for (name, values) in [(PRECIP, &series.precip), (RAIN, &series.rain), (SNOW, &series.snow)] {
        let Some(values) = values else { continue };
        for (time, v) in series.times.iter().zip(values) {
            table.push_row(vec![
                Cell::Time(*time),
                Cell::Text(name.to_string()),
                Cell::float(*v),
            ])?;
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::MeteogramBuilder;

    #[test]
    fn test_derivations_hold_per_time() {
        let ds = MeteogramBuilder::new(24, 2).build();
        let s = derive(&ds);
        let (precip, rain, snow) = (s.precip.unwrap(), s.rain.unwrap(), s.snow.unwrap());

        for (i, t) in [0usize, 6, 12, 18].into_iter().enumerate() {
            let rain_expected =
                ds.value("RAIN_GSP", t, None).unwrap() + ds.value("RAIN_CON", t, None).unwrap();
            let snow_expected =
                ds.value("SNOW_GSP", t, None).unwrap() + ds.value("SNOW_CON", t, None).unwrap();
            assert_eq!(rain[i], rain_expected);
            assert_eq!(snow[i], snow_expected);
            assert_eq!(precip[i], rain[i] + snow[i]);
        }
    }

    #[test]
    fn test_long_form_layout() {
        let ds = MeteogramBuilder::new(12, 2).build();
        let table = transform(&ds).unwrap();

        assert_eq!(table.columns(), &["time", "series_name", "value"]);
        assert_eq!(table.len(), 3 * 2);
        assert_eq!(table.distinct_text(SERIES_NAME), vec!["PRECIP", "RAIN", "SNOW"]);

        let names: Vec<_> = table
            .column(SERIES_NAME)
            .unwrap()
            .map(|c| c.as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["PRECIP", "PRECIP", "RAIN", "RAIN", "SNOW", "SNOW"]);
    }

    #[test]
    fn test_missing_snow_component_drops_snow_and_precip() {
        let ds = MeteogramBuilder::new(12, 2).without(&["SNOW_CON"]).build();
        let s = derive(&ds);
        assert!(s.snow.is_none());
        assert!(s.precip.is_none());
        assert!(s.rain.is_some());

        let table = transform(&ds).unwrap();
        assert_eq!(table.distinct_text(SERIES_NAME), vec!["RAIN"]);
    }

    #[test]
    fn test_no_inputs_gives_empty_table() {
        let ds = MeteogramBuilder::new(12, 2)
            .without(&["RAIN_GSP", "RAIN_CON", "SNOW_GSP", "SNOW_CON"])
            .build();
        let table = transform(&ds).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 3);
    }
}
