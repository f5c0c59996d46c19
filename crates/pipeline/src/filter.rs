//! Variable availability filtering.

use netcdf_parser::SourceDataset;
use tracing::debug;

/// Requested names that exist as fields in `dataset`, in request order.
///
/// Builds a fresh list in one forward pass; `requested` is never modified,
/// so every requested name is tested no matter how many are dropped.
pub fn available_variables<S: AsRef<str>>(requested: &[S], dataset: &SourceDataset) -> Vec<String> {
    let mut retained = Vec::with_capacity(requested.len());
    for name in requested.iter().map(AsRef::as_ref) {
        if dataset.contains(name) {
            retained.push(name.to_string());
        } else {
            debug!(variable = name, "Requested variable not in dataset");
        }
    }
    retained
}
