//! Meteogram data pipeline.
//!
//! Turns a [`SourceDataset`] into the flat [`Table`] one plot family needs:
//!
//! 1. availability filtering of the family's requested variables
//! 2. subsetting (every 6th time step, level slice for profiles)
//! 3. family transforms (precipitation sums, hydrometeor total and log scale)
//!
//! Tables cross to the plot builders through [`serialize`].

pub mod families;
pub mod filter;
pub mod serialize;
pub mod subset;
pub mod table;

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use meteogram_common::{DashboardResult, Family, LevelRange, RequestParams};
use netcdf_parser::{DatasetLoader, SourceDataset};

pub use filter::available_variables;
pub use serialize::{from_json, to_json};
pub use subset::{time_indices, TIME_STRIDE};
pub use table::{Cell, Table};

/// Run the transform for `family` on an already loaded dataset.
///
/// `levels` is ignored by the families without a level axis.
pub fn transform(
    family: Family,
    dataset: &SourceDataset,
    levels: &LevelRange,
) -> DashboardResult<Table> {
    match family {
        Family::Surface => families::surface::transform(dataset),
        Family::Precipitation => families::precipitation::transform(dataset),
        Family::TimeHeight => families::profile::transform(dataset, levels),
        Family::Hydrometeors => families::hydrometeors::transform(dataset, levels),
    }
}

/// Loads the source file for a request and transforms it for one family.
///
/// Each run loads its own dataset and drops it before returning, so
/// concurrent runs share nothing.
#[derive(Clone)]
pub struct Pipeline {
    loader: Arc<dyn DatasetLoader>,
}

impl Pipeline {
    pub fn new(loader: Arc<dyn DatasetLoader>) -> Self {
        Self { loader }
    }

    #[instrument(skip(self, params), fields(date = %params.date, path = %params.path))]
    pub fn run(&self, family: Family, params: &RequestParams) -> DashboardResult<Table> {
        let start = Instant::now();
        let dataset = self.loader.load(&params.path, params.date)?;
        let table = transform(family, &dataset, &params.levels)?;
        drop(dataset);

        debug!(
            rows = table.len(),
            columns = table.columns().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pipeline run complete"
        );
        Ok(table)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").finish_non_exhaustive()
    }
}
