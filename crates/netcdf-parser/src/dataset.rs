//! In-memory labeled dataset for one meteogram file.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::error::{NetCdfError, NetCdfResult};

/// Dimensions a field varies over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One value per time step.
    Time,
    /// One value per (time, level), stored time-major.
    TimeLevel,
}

/// A named scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub layout: Layout,
    pub units: Option<String>,
    values: Vec<f64>,
}

impl Field {
    /// A field over `time` only.
    pub fn time_series(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            layout: Layout::Time,
            units: None,
            values,
        }
    }

    /// A field over `time × level`, values in time-major order.
    pub fn profile(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            layout: Layout::TimeLevel,
            units: None,
            values,
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Immutable collection of fields sharing a time axis and a level axis.
#[derive(Debug, Clone, Default)]
pub struct SourceDataset {
    times: Vec<DateTime<Utc>>,
    level_count: usize,
    fields: BTreeMap<String, Field>,
}

impl SourceDataset {
    pub fn new(times: Vec<DateTime<Utc>>, level_count: usize) -> Self {
        Self {
            times,
            level_count,
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, checking its length against the dataset axes.
    pub fn insert(&mut self, field: Field) -> NetCdfResult<()> {
        let expected = match field.layout {
            Layout::Time => self.times.len(),
            Layout::TimeLevel => self.times.len() * self.level_count,
        };
        if field.values.len() != expected {
            return Err(NetCdfError::InvalidFormat(format!(
                "{} has {} values, expected {}",
                field.name,
                field.values.len(),
                expected
            )));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_field(mut self, field: Field) -> NetCdfResult<Self> {
        self.insert(field)?;
        Ok(self)
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Value of a field at a time index, and a level index for profiles.
    ///
    /// Returns `None` for unknown fields and out-of-range indices.
    pub fn value(&self, name: &str, time: usize, level: Option<usize>) -> Option<f64> {
        let field = self.fields.get(name)?;
        if time >= self.times.len() {
            return None;
        }
        let idx = match (field.layout, level) {
            (Layout::Time, _) => time,
            (Layout::TimeLevel, Some(level)) if level < self.level_count => {
                time * self.level_count + level
            }
            (Layout::TimeLevel, _) => return None,
        };
        field.values.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn times(n: usize) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::minutes(10 * i as i64))
            .collect()
    }

    #[test]
    fn test_insert_checks_length() {
        let mut ds = SourceDataset::new(times(3), 2);
        assert!(ds.insert(Field::time_series("T2M", vec![1.0, 2.0, 3.0])).is_ok());
        assert!(ds.insert(Field::profile("T", vec![1.0; 5])).is_err());
        assert!(ds.insert(Field::profile("T", vec![1.0; 6])).is_ok());
        assert!(ds.contains("T2M"));
        assert!(ds.contains("T"));
        assert!(!ds.contains("QC"));
    }

    #[test]
    fn test_value_indexing_time_major() {
        let ds = SourceDataset::new(times(2), 3)
            .with_field(Field::profile("T", vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]))
            .unwrap();
        assert_eq!(ds.value("T", 1, Some(2)), Some(12.0));
        assert_eq!(ds.value("T", 0, Some(1)), Some(1.0));
        assert_eq!(ds.value("T", 0, Some(3)), None);
        assert_eq!(ds.value("T", 0, None), None);
        assert_eq!(ds.value("QC", 0, Some(0)), None);
    }
}
