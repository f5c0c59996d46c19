//! Intermediate table endpoint.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use crate::error::error_response;
use crate::handlers::{parse_family, run_pipeline, DataQuery};
use crate::state::AppState;

/// GET /api/{family}/table - Run the pipeline and return the serialized table
pub async fn table_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(family): Path<String>,
    Query(query): Query<DataQuery>,
) -> Response {
    let family = match parse_family(&family) {
        Ok(family) => family,
        Err(response) => return response,
    };

    let params = match query.params(&state) {
        Ok(params) => params,
        Err(e) => {
            debug!(error = %e, "Rejected table request");
            return error_response(&e);
        }
    };

    let table = match run_pipeline(&state, family, params).await {
        Ok(table) => table,
        Err(e) => {
            info!(family = %family, error = %e, "No table produced");
            return error_response(&e);
        }
    };

    match pipeline::to_json(&table) {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}
