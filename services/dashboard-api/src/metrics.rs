//! Application metrics.
//!
//! Recorded through the `metrics` facade; exported on `/metrics` when the
//! Prometheus recorder is installed, silently dropped otherwise.

use std::time::Duration;

use metrics::{counter, histogram};

use meteogram_common::Family;

/// Outcome label of one pipeline run.
pub fn outcome_label<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "error"
    }
}

/// Record a pipeline run for a family.
pub fn record_pipeline(family: Family, outcome: &'static str, elapsed: Duration) {
    counter!("pipeline_runs_total", "family" => family.as_str(), "outcome" => outcome).increment(1);
    histogram!("pipeline_duration_ms", "family" => family.as_str())
        .record(elapsed.as_secs_f64() * 1000.0);
}

/// Record a figure build; placeholders are counted separately.
pub fn record_figure(family: Family, placeholder: bool) {
    let kind = if placeholder { "placeholder" } else { "figure" };
    counter!("figures_total", "family" => family.as_str(), "kind" => kind).increment(1);
}
