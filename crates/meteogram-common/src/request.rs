//! Per-interaction request parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{DashboardError, DashboardResult};

/// Vertical level range as indices into the level dimension (not altitude).
///
/// The range is half-open: `lo` is included, `hi` is not. When `hi` exceeds
/// the number of levels in a file the slice is truncated at the last level.
/// Deserialization goes through [`LevelRange::new`], so `lo < hi` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelRange")]
pub struct LevelRange {
    pub lo: usize,
    pub hi: usize,
}

#[derive(Deserialize)]
struct RawLevelRange {
    lo: usize,
    hi: usize,
}

impl TryFrom<RawLevelRange> for LevelRange {
    type Error = DashboardError;

    fn try_from(raw: RawLevelRange) -> Result<Self, Self::Error> {
        Self::new(raw.lo, raw.hi)
    }
}

impl LevelRange {
    /// Create a range, checking `lo < hi`.
    pub fn new(lo: usize, hi: usize) -> DashboardResult<Self> {
        if lo >= hi {
            return Err(DashboardError::invalid_parameter(
                "level_range",
                format!("lower bound {} must be below upper bound {}", lo, hi),
            ));
        }
        Ok(Self { lo, hi })
    }

    /// Create a range and also check it against the slider bounds.
    pub fn bounded(
        lo: usize,
        hi: usize,
        min_index: usize,
        max_index: usize,
    ) -> DashboardResult<Self> {
        let range = Self::new(lo, hi)?;
        if lo < min_index {
            return Err(DashboardError::invalid_parameter(
                "level_range",
                format!("lower bound {} is below minimum level index {}", lo, min_index),
            ));
        }
        if hi > max_index {
            return Err(DashboardError::invalid_parameter(
                "level_range",
                format!("upper bound {} exceeds maximum level index {}", hi, max_index),
            ));
        }
        Ok(range)
    }

    /// Index range to read from a dimension of `level_count` levels.
    pub fn indices(&self, level_count: usize) -> Range<usize> {
        let hi = self.hi.min(level_count);
        let lo = self.lo.min(hi);
        lo..hi
    }
}

/// Parameters for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParams {
    pub date: NaiveDate,
    pub path: String,
    pub levels: LevelRange,
}

impl RequestParams {
    pub fn new(date: NaiveDate, path: impl Into<String>, levels: LevelRange) -> Self {
        Self {
            date,
            path: path.into(),
            levels,
        }
    }
}

/// Parse a calendar date as sent by the date picker (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> DashboardResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| DashboardError::invalid_parameter("date", format!("'{}': {}", s, e)))
}

/// Date component of source file names, zero padded (`YYYYMMDD`).
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
