//! Error types for NetCDF parsing operations.

use meteogram_common::DashboardError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// No file for the requested date
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file exists but could not be opened as NetCDF
    #[error("Failed to open {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl NetCdfError {
    pub fn open_failed(path: impl Into<String>, message: impl ToString) -> Self {
        Self::OpenFailed {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Every loader failure is terminal for the request and surfaces as
/// `DataUnavailable`.
impl From<NetCdfError> for DashboardError {
    fn from(err: NetCdfError) -> Self {
        let path = match &err {
            NetCdfError::FileNotFound(path) | NetCdfError::OpenFailed { path, .. } => path.clone(),
            _ => String::new(),
        };
        DashboardError::data_unavailable(path, err.to_string())
    }
}
