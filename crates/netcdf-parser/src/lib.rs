//! NetCDF reader for ICON meteogram files.
//!
//! A meteogram file holds single-site model output for one calendar day:
//! surface fields over `time` and vertical profiles over `time × level`.
//! [`MeteogramLoader`] finds the file for a date and reads it into a
//! [`SourceDataset`]; the [`DatasetLoader`] trait lets callers swap in other
//! sources (e.g. in-memory fixtures in tests).

pub mod dataset;
pub mod error;
pub mod loader;
pub mod native;
pub mod time;

pub use dataset::{Field, Layout, SourceDataset};
pub use error::{NetCdfError, NetCdfResult};
pub use loader::{DatasetLoader, DimensionNames, FileNaming, MeteogramLoader};
pub use native::silence_hdf5_errors;
