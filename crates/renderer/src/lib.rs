//! Figure building for the meteogram dashboard.
//!
//! Turns an intermediate [`Table`](pipeline::Table) into a plotly figure:
//! - line plots for surface variables and precipitation series
//! - filled contours (time × model level) for profiles and hydrometeors
//! - an error placeholder whenever nothing can be drawn

pub mod builder;
pub mod contour;
pub mod figure;
pub mod style;

pub use builder::{build, error_figure, DATA_UNAVAILABLE_MESSAGE};
pub use figure::{ErrorFigure, Figure, Plot, Trace};
