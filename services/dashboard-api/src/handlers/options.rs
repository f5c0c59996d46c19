//! Dropdown options and slider bounds for the dashboard page.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use meteogram_common::{Family, Theme};

use crate::state::AppState;

pub const DASHBOARD_TITLE: &str = "ICON Cologne Dashboard";

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub title: &'static str,
    pub families: Vec<FamilyOptions>,
    pub levels: LevelOptions,
    pub default_date: NaiveDate,
    /// Latest selectable date.
    pub max_date: NaiveDate,
    pub default_path: String,
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
pub struct FamilyOptions {
    pub family: Family,
    pub title: &'static str,
    pub options: Vec<VariableOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct VariableOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LevelOptions {
    pub min: usize,
    pub max: usize,
    pub default: [usize; 2],
}

/// GET /api/options
pub async fn options_handler(Extension(state): Extension<Arc<AppState>>) -> Json<OptionsResponse> {
    let config = &state.config;
    let (lo, hi) = config.default_levels();

    let families = Family::ALL
        .into_iter()
        .map(|family| FamilyOptions {
            family,
            title: family.title(),
            options: family
                .variables()
                .map(|v| VariableOption {
                    value: v.name,
                    label: v.label,
                })
                .collect(),
            default: family.default_selector(),
        })
        .collect();

    Json(OptionsResponse {
        title: DASHBOARD_TITLE,
        families,
        levels: LevelOptions {
            min: config.levels.min,
            max: config.levels.max,
            default: [lo, hi],
        },
        default_date: config.default_date,
        max_date: Utc::now().date_naive(),
        default_path: config.paths.base_path.clone(),
        theme: config.style.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::state;

    #[tokio::test]
    async fn test_options_cover_catalog() {
        let Json(options) = options_handler(Extension(state())).await;
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["families"].as_array().unwrap().len(), 4);
        assert_eq!(json["families"][0]["family"], "vars1d");
        assert_eq!(json["families"][0]["default"], "T2M");
        assert_eq!(json["families"][0]["options"][0]["label"], "2m Temperature");
        assert!(json["families"][1].get("default").is_none());

        let hydro = &json["families"][3]["options"];
        assert_eq!(hydro.as_array().unwrap().len(), 14);
        assert!(hydro
            .as_array()
            .unwrap()
            .iter()
            .any(|o| o["value"] == "total_hydrometeors"));

        assert_eq!(json["levels"]["min"], 30);
        assert_eq!(json["levels"]["default"], serde_json::json!([50, 120]));
        assert_eq!(json["default_date"], "2021-09-09");
        assert_eq!(json["theme"]["divider_color"], "#f29400");
    }
}
