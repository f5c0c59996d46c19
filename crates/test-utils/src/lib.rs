//! Shared test utilities for the meteogram dashboard workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A builder for synthetic meteogram datasets
//! - An in-memory [`DatasetLoader`](netcdf_parser::DatasetLoader)
//! - Float comparison macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{MeteogramBuilder, InMemoryLoader};
//! ```

pub mod builder;
pub mod loader;

pub use builder::{test_date, MeteogramBuilder, DEFAULT_LEVELS, STEPS_PER_DAY};
pub use loader::InMemoryLoader;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_builder_covers_every_family() {
        use meteogram_common::Family;

        let ds = MeteogramBuilder::new(12, 5).build();
        for family in Family::ALL {
            for name in family.source_variables() {
                assert!(ds.contains(name), "{} missing", name);
            }
        }
        assert_eq!(ds.times().len(), 12);
        assert_eq!(ds.level_count(), 5);
    }
}
