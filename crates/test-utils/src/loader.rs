//! In-memory dataset loader.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use meteogram_common::request::date_stamp;
use netcdf_parser::{DatasetLoader, NetCdfError, NetCdfResult, SourceDataset};

/// Serves prebuilt datasets keyed by date; unknown dates are "file not found".
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    datasets: HashMap<NaiveDate, SourceDataset>,
    loads: AtomicUsize,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, date: NaiveDate, dataset: SourceDataset) -> Self {
        self.datasets.insert(date, dataset);
        self
    }

    /// Number of `load` calls so far, including failed ones.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DatasetLoader for InMemoryLoader {
    fn load(&self, path: &str, date: NaiveDate) -> NetCdfResult<SourceDataset> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.datasets
            .get(&date)
            .cloned()
            .ok_or_else(|| NetCdfError::FileNotFound(format!("{}/{}", path, date_stamp(date))))
    }
}
