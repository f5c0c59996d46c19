//! Time stride and level slicing shared by every family.

use std::ops::Range;

use meteogram_common::LevelRange;
use netcdf_parser::SourceDataset;

/// Every n-th time step is kept to bound payload size.
pub const TIME_STRIDE: usize = 6;

/// Retained time indices: `0, 6, 12, ...` below `len`.
pub fn time_indices(len: usize) -> impl Iterator<Item = usize> + Clone {
    (0..len).step_by(TIME_STRIDE)
}

/// Retained level indices of `dataset` for `levels`.
pub fn level_indices(dataset: &SourceDataset, levels: &LevelRange) -> Range<usize> {
    levels.indices(dataset.level_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_indices_stride() {
        assert_eq!(time_indices(13).collect::<Vec<_>>(), vec![0, 6, 12]);
        assert_eq!(time_indices(12).collect::<Vec<_>>(), vec![0, 6]);
        assert_eq!(time_indices(1).collect::<Vec<_>>(), vec![0]);
        assert_eq!(time_indices(0).count(), 0);
    }

    #[test]
    fn test_level_indices_half_open() {
        let ds = SourceDataset::new(Vec::new(), 150);
        let range = LevelRange::new(50, 120).unwrap();
        let idx = level_indices(&ds, &range);
        assert_eq!(idx.start, 50);
        assert_eq!(idx.end, 120);
        assert!(!idx.contains(&120));
    }
}
