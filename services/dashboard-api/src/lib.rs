//! Meteogram Dashboard Service Library
//!
//! HTTP surface for the dashboard: dropdown options, per-family tables and
//! figures, health and metrics.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/options", get(handlers::options::options_handler))
        .route("/api/:family/table", get(handlers::table::table_handler))
        .route(
            "/api/:family/figure",
            get(handlers::figure::figure_query_handler).post(handlers::figure::figure_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
