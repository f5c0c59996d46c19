//! Dashboard configuration loading and types.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use meteogram_common::{parse_date, DashboardResult, LevelRange, RequestParams, Theme};
use netcdf_parser::{DimensionNames, FileNaming, MeteogramLoader};

/// Dashboard configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Where meteogram files live and how they are named.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Dimension names inside the files.
    #[serde(default)]
    pub dimensions: DimensionNames,

    /// Level slider bounds.
    #[serde(default)]
    pub levels: LevelConfig,

    /// Page and figure colors.
    #[serde(default)]
    pub style: Theme,

    /// Date preselected in the date picker.
    #[serde(default = "default_date")]
    pub default_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory the date picker's files are looked up in, unless the
    /// request names another.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    #[serde(flatten)]
    pub naming: FileNaming,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            naming: FileNaming::default(),
        }
    }
}

/// Bounds of the level range slider, as level indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_min_level")]
    pub min: usize,

    /// Largest selectable level index; also the default upper bound.
    #[serde(default = "default_max_level")]
    pub max: usize,

    #[serde(default = "default_lower_level")]
    pub default_lo: usize,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            min: default_min_level(),
            max: default_max_level(),
            default_lo: default_lower_level(),
        }
    }
}

fn default_base_path() -> String {
    "./data".to_string()
}

fn default_min_level() -> usize {
    30
}

fn default_max_level() -> usize {
    120
}

fn default_lower_level() -> usize {
    50
}

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 9, 9).unwrap_or(NaiveDate::MIN)
}

impl DashboardConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file {:?} does not exist, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        if config.levels.min >= config.levels.max {
            anyhow::bail!(
                "levels.min ({}) must be below levels.max ({})",
                config.levels.min,
                config.levels.max
            );
        }
        Ok(config)
    }

    /// Loader reading files according to this configuration.
    pub fn loader(&self) -> MeteogramLoader {
        MeteogramLoader::new(self.paths.naming.clone(), self.dimensions.clone())
    }

    /// Level range preselected on the slider.
    pub fn default_levels(&self) -> (usize, usize) {
        (self.levels.default_lo, self.levels.max)
    }

    /// Fill unset request fields from defaults and validate the result.
    pub fn request_params(
        &self,
        date: Option<&str>,
        path: Option<&str>,
        lo: Option<usize>,
        hi: Option<usize>,
    ) -> DashboardResult<RequestParams> {
        let date = match date.filter(|d| !d.trim().is_empty()) {
            Some(d) => parse_date(d)?,
            None => self.default_date,
        };
        let path = path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(self.paths.base_path.as_str());
        let (default_lo, default_hi) = self.default_levels();
        let levels = LevelRange::bounded(
            lo.unwrap_or(default_lo),
            hi.unwrap_or(default_hi),
            self.levels.min,
            self.levels.max,
        )?;
        Ok(RequestParams::new(date, path, levels))
    }
}
