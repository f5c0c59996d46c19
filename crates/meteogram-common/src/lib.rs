//! Common types shared across the meteogram dashboard crates.

pub mod catalog;
pub mod error;
pub mod request;
pub mod style;

pub use catalog::{Family, Scale, VariableSpec, PRECIP_INPUTS, TOTAL_HYDROMETEORS};
pub use error::{DashboardError, DashboardResult};
pub use request::{date_stamp, parse_date, LevelRange, RequestParams};
pub use style::Theme;
