//! HTTP request handlers for the dashboard API.

pub mod figure;
pub mod health;
pub mod options;
pub mod table;

use std::sync::Arc;
use std::time::Instant;

use axum::response::Response;
use serde::Deserialize;

use meteogram_common::{DashboardError, DashboardResult, Family, RequestParams};
use pipeline::Table;

use crate::error::error_response;
use crate::metrics::{outcome_label, record_pipeline};
use crate::state::AppState;

/// Data selection shared by table and figure requests. Unset fields fall back
/// to configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    pub date: Option<String>,
    pub path: Option<String>,
    pub lo: Option<usize>,
    pub hi: Option<usize>,
}

impl DataQuery {
    pub fn params(&self, state: &AppState) -> DashboardResult<RequestParams> {
        state.config.request_params(
            self.date.as_deref(),
            self.path.as_deref(),
            self.lo,
            self.hi,
        )
    }
}

/// Parse the `{family}` path segment.
pub(crate) fn parse_family(segment: &str) -> Result<Family, Response> {
    segment.parse::<Family>().map_err(|e| error_response(&e))
}

/// Run the pipeline on the blocking pool; NetCDF reads block.
pub(crate) async fn run_pipeline(
    state: &Arc<AppState>,
    family: Family,
    params: RequestParams,
) -> DashboardResult<Table> {
    let pipeline = state.pipeline.clone();
    let start = Instant::now();

    let result = tokio::task::spawn_blocking(move || pipeline.run(family, &params))
        .await
        .map_err(|e| DashboardError::Internal(format!("pipeline task failed: {}", e)))
        .and_then(|r| r);

    record_pipeline(family, outcome_label(&result), start.elapsed());
    result
}
