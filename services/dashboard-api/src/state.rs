//! Application state for the dashboard API.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use netcdf_parser::DatasetLoader;
use pipeline::Pipeline;

use crate::config::DashboardConfig;

/// Shared application state. Read-only after startup.
pub struct AppState {
    /// Dashboard configuration.
    pub config: DashboardConfig,

    /// Loader → filter → transform pipeline.
    pub pipeline: Pipeline,

    /// Prometheus exporter handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// State reading meteogram files as described by `config`.
    pub fn new(config: DashboardConfig) -> Self {
        let loader = Arc::new(config.loader());
        Self::with_loader(config, loader)
    }

    /// State with a custom dataset source.
    pub fn with_loader(config: DashboardConfig, loader: Arc<dyn DatasetLoader>) -> Self {
        Self {
            config,
            pipeline: Pipeline::new(loader),
            prometheus: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
