//! JSON error bodies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use meteogram_common::DashboardError;

/// Body returned for failed API requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code, e.g. `DataUnavailable`.
    #[serde(rename = "type")]
    pub type_: &'static str,

    /// HTTP status code.
    pub status: u16,

    /// Human-readable detail.
    pub detail: String,
}

impl From<&DashboardError> for ErrorBody {
    fn from(err: &DashboardError) -> Self {
        Self {
            type_: err.code(),
            status: err.http_status_code(),
            detail: err.to_string(),
        }
    }
}

/// Turn a dashboard error into a JSON response with the matching status.
pub fn error_response(err: &DashboardError) -> Response {
    let body = ErrorBody::from(err);
    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let json = serde_json::to_string(&body).unwrap_or_default();

    (status, [(header::CONTENT_TYPE, "application/json")], json).into_response()
}
