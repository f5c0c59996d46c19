//! Synthetic meteogram datasets.
//!
//! Values are deterministic functions of `(time, level)` so tests can compute
//! expectations from the dataset itself. Hydrometeor mass values cycle
//! through `1e-4 .. 1e-10`, covering both sides of the detection floor.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::{HashMap, HashSet};

use meteogram_common::{Family, PRECIP_INPUTS};
use netcdf_parser::{Field, SourceDataset};

/// Ten-minute output over one day.
pub const STEPS_PER_DAY: usize = 144;

/// Height levels in the reference files.
pub const DEFAULT_LEVELS: usize = 150;

/// The date the default configuration points at.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 9, 9).unwrap()
}

fn start_time(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

fn surface_value(name: &str, t: usize) -> f64 {
    let phase = (t as f64 / 24.0).sin();
    match name {
        "T2M" => 288.0 + 4.0 * phase,
        "P_SFC" => 1013.0 + phase,
        "TQV" => 25.0 + 2.0 * phase,
        "TQC" => 0.1 + 0.05 * phase,
        "TQI" => 0.02 + 0.01 * phase,
        "RAIN_GSP" => 0.01 * (t % 5) as f64,
        "RAIN_CON" => 0.002 * (t % 3) as f64,
        "SNOW_GSP" => 0.001 * (t % 4) as f64,
        "SNOW_CON" => 0.0005 * (t % 2) as f64,
        _ => t as f64,
    }
}

fn profile_value(name: &str, t: usize, level: usize) -> f64 {
    let l = level as f64;
    match name {
        "CLC" => ((t + level) % 11) as f64 / 10.0,
        "T" => 220.0 + 0.5 * l + 0.01 * t as f64,
        "RHO" => 0.3 + 0.006 * l,
        "P" => 20_000.0 + 550.0 * l,
        "REL_HUM" => ((t * 7 + level * 3) % 100) as f64,
        "U" => 10.0 - 0.1 * l + 0.05 * t as f64,
        "V" => -5.0 + 0.07 * l,
        "QV" => 1e-3 + 5e-5 * l,
        "QC" | "QI" | "QR" | "QS" | "QG" | "QH" => {
            let offset = name.as_bytes()[1] as usize;
            10f64.powi(-(4 + ((t + level + offset) % 7) as i32))
        }
        _ => 1e5 * (1 + (t + level) % 9) as f64,
    }
}

/// Builder for a [`SourceDataset`] with every catalog source variable.
#[derive(Debug, Clone)]
pub struct MeteogramBuilder {
    times: usize,
    levels: usize,
    date: NaiveDate,
    excluded: HashSet<String>,
    constants: HashMap<String, f64>,
}

impl MeteogramBuilder {
    pub fn new(times: usize, levels: usize) -> Self {
        Self {
            times,
            levels,
            date: test_date(),
            excluded: HashSet::new(),
            constants: HashMap::new(),
        }
    }

    /// A full day of ten-minute output on the reference levels.
    pub fn full_day() -> Self {
        Self::new(STEPS_PER_DAY, DEFAULT_LEVELS)
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Leave the named variables out of the dataset.
    pub fn without(mut self, names: &[&str]) -> Self {
        self.excluded.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Fill a variable with one value everywhere.
    pub fn constant(mut self, name: &str, value: f64) -> Self {
        self.constants.insert(name.to_string(), value);
        self
    }

    pub fn build(&self) -> SourceDataset {
        let start = start_time(self.date);
        let times = (0..self.times)
            .map(|i| start + Duration::minutes(10 * i as i64))
            .collect();
        let mut ds = SourceDataset::new(times, self.levels);

        let surface = Family::Surface
            .source_variables()
            .into_iter()
            .chain(PRECIP_INPUTS);
        for name in surface.filter(|n| !self.excluded.contains(*n)) {
            let values = (0..self.times)
                .map(|t| self.constants.get(name).copied().unwrap_or_else(|| surface_value(name, t)))
                .collect();
            ds.insert(Field::time_series(name, values)).unwrap();
        }

        let profiles = Family::TimeHeight
            .source_variables()
            .into_iter()
            .chain(Family::Hydrometeors.source_variables());
        for name in profiles.filter(|n| !self.excluded.contains(*n)) {
            let mut values = Vec::with_capacity(self.times * self.levels);
            for t in 0..self.times {
                for level in 0..self.levels {
                    values.push(
                        self.constants
                            .get(name)
                            .copied()
                            .unwrap_or_else(|| profile_value(name, t, level)),
                    );
                }
            }
            ds.insert(Field::profile(name, values)).unwrap();
        }

        ds
    }
}
