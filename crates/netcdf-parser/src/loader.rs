//! Locating and loading the meteogram file for a date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use meteogram_common::request::date_stamp;

use crate::dataset::SourceDataset;
use crate::error::{NetCdfError, NetCdfResult};
use crate::native::read_meteogram;

/// Source file naming convention: `{prefix}{YYYYMMDD}{postfix}.{extension}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNaming {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_postfix")]
    pub postfix: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for FileNaming {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            postfix: default_postfix(),
            extension: default_extension(),
        }
    }
}

fn default_prefix() -> String {
    "METEOGRAM_patch001_".to_string()
}

fn default_postfix() -> String {
    "_koeln".to_string()
}

fn default_extension() -> String {
    "nc".to_string()
}

impl FileNaming {
    /// File name for a date, without directory.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!(
            "{}{}{}.{}",
            self.prefix,
            date_stamp(date),
            self.postfix,
            self.extension
        )
    }

    /// Full path of the file for a date under `base`.
    pub fn resolve(&self, base: &str, date: NaiveDate) -> PathBuf {
        Path::new(base).join(self.file_name(date))
    }
}

/// Names of the coordinate dimensions inside meteogram files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionNames {
    #[serde(default = "default_time_dim")]
    pub time: String,

    #[serde(default = "default_level_dim")]
    pub level: String,
}

impl Default for DimensionNames {
    fn default() -> Self {
        Self {
            time: default_time_dim(),
            level: default_level_dim(),
        }
    }
}

fn default_time_dim() -> String {
    "time".to_string()
}

fn default_level_dim() -> String {
    "height_2".to_string()
}

/// Something that can produce the dataset for a (path, date) pair.
///
/// Each call returns an independent dataset owned by the caller.
pub trait DatasetLoader: Send + Sync {
    fn load(&self, path: &str, date: NaiveDate) -> NetCdfResult<SourceDataset>;
}

/// Loader reading meteogram NetCDF files from disk.
#[derive(Debug, Clone, Default)]
pub struct MeteogramLoader {
    naming: FileNaming,
    dims: DimensionNames,
}

impl MeteogramLoader {
    pub fn new(naming: FileNaming, dims: DimensionNames) -> Self {
        Self { naming, dims }
    }

    pub fn naming(&self) -> &FileNaming {
        &self.naming
    }
}

impl DatasetLoader for MeteogramLoader {
    #[instrument(skip(self), fields(file = tracing::field::Empty))]
    fn load(&self, path: &str, date: NaiveDate) -> NetCdfResult<SourceDataset> {
        let file = self.naming.resolve(path, date);
        tracing::Span::current().record("file", file.display().to_string().as_str());

        if !file.is_file() {
            info!("No meteogram file for date");
            return Err(NetCdfError::FileNotFound(file.display().to_string()));
        }

        read_meteogram(&file, &self.dims)
    }
}
