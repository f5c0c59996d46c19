//! Figure endpoints.
//!
//! Figures are always answered with 200: whenever nothing can be drawn the
//! body is the error placeholder, which the page shows in place of the plot.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use meteogram_common::Family;
use pipeline::Table;

use crate::error::error_response;
use crate::handlers::{parse_family, run_pipeline, DataQuery};
use crate::metrics::record_figure;
use crate::state::AppState;

/// Body of `POST /api/{family}/figure`.
#[derive(Debug, Deserialize)]
pub struct FigureRequest {
    #[serde(default)]
    pub selector: Option<String>,

    /// Table as returned by the table endpoint; `null` when none was produced.
    #[serde(default)]
    pub table: Option<Table>,
}

/// Query of `GET /api/{family}/figure`.
#[derive(Debug, Default, Deserialize)]
pub struct FigureQuery {
    pub date: Option<String>,
    pub path: Option<String>,
    pub lo: Option<usize>,
    pub hi: Option<usize>,
    pub selector: Option<String>,
}

impl FigureQuery {
    fn data(&self) -> DataQuery {
        DataQuery {
            date: self.date.clone(),
            path: self.path.clone(),
            lo: self.lo,
            hi: self.hi,
        }
    }
}

fn respond(state: &AppState, family: Family, selector: Option<&str>, table: Option<&Table>) -> Response {
    let plot = renderer::build(family, selector, table, &state.config.style);
    record_figure(family, plot.is_error());
    Json(plot).into_response()
}

/// POST /api/{family}/figure - Build a figure from a serialized table
pub async fn figure_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(family): Path<String>,
    body: String,
) -> Response {
    let family = match parse_family(&family) {
        Ok(family) => family,
        Err(response) => return response,
    };

    // A malformed payload is treated like a missing table
    let request = match serde_json::from_str::<FigureRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(family = %family, error = %e, "Unreadable figure request");
            FigureRequest {
                selector: None,
                table: None,
            }
        }
    };

    respond(
        &state,
        family,
        request.selector.as_deref(),
        request.table.as_ref(),
    )
}

/// GET /api/{family}/figure - Run the pipeline and build the figure in one call
pub async fn figure_query_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(family): Path<String>,
    Query(query): Query<FigureQuery>,
) -> Response {
    let family = match parse_family(&family) {
        Ok(family) => family,
        Err(response) => return response,
    };

    let params = match query.data().params(&state) {
        Ok(params) => params,
        Err(e) => return error_response(&e),
    };

    // Same boundary as the browser path: the builder sees the deserialized table
    let table = match run_pipeline(&state, family, params).await {
        Ok(table) => pipeline::to_json(&table)
            .and_then(|json| pipeline::from_json(&json))
            .ok(),
        Err(e) => {
            debug!(family = %family, error = %e, "Building figure without table");
            None
        }
    };

    let selector = query
        .selector
        .as_deref()
        .or_else(|| family.default_selector());
    respond(&state, family, selector, table.as_ref())
}
