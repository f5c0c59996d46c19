//! Error types for the meteogram dashboard.

use thiserror::Error;

/// Result type alias using DashboardError.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Primary error type for pipeline and rendering operations.
///
/// A requested variable that is absent from a file is not an error: the
/// availability filter drops it silently. It only becomes visible as
/// [`DashboardError::SelectorUnmatched`] when the user selects it.
#[derive(Debug, Error)]
pub enum DashboardError {
    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unknown plot family: {0}")]
    UnknownFamily(String),

    // === Data Errors ===
    #[error("Data not available: {path}: {reason}")]
    DataUnavailable { path: String, reason: String },

    #[error("Selected variable not present in table: {0}")]
    SelectorUnmatched(String),

    #[error("Malformed table payload: {0}")]
    Serialization(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn data_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code for JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::InvalidParameter { .. } => "InvalidParameter",
            DashboardError::UnknownVariable(_) => "UnknownVariable",
            DashboardError::UnknownFamily(_) => "UnknownFamily",
            DashboardError::DataUnavailable { .. } => "DataUnavailable",
            DashboardError::SelectorUnmatched(_) => "SelectorUnmatched",
            DashboardError::Serialization(_) => "Serialization",
            DashboardError::Internal(_) => "Internal",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            DashboardError::InvalidParameter { .. }
            | DashboardError::UnknownVariable(_)
            | DashboardError::Serialization(_) => 400,

            DashboardError::UnknownFamily(_)
            | DashboardError::DataUnavailable { .. }
            | DashboardError::SelectorUnmatched(_) => 404,

            DashboardError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}
