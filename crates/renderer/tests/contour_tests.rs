//! Tests for contour grids and band levels.

use chrono::{Duration, TimeZone, Utc};
use pipeline::table::{Cell, Table, HEIGHT_LEVEL, TIME};
use renderer::contour::{generate_contour_levels, log_tick_label, ContourGrid};

// ============================================================================
// Level generation
// ============================================================================

#[test]
fn test_generate_levels_inclusive_ends() {
    assert_eq!(generate_contour_levels(-8.0, -2.0, 1.0).len(), 7);
    assert_eq!(generate_contour_levels(0.0, 10.0, 2.5), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
}

#[test]
fn test_generate_levels_aligns_to_interval() {
    assert_eq!(generate_contour_levels(0.3, 3.7, 1.0), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_generate_levels_no_drift() {
    let levels = generate_contour_levels(0.0, 1.0, 0.1);
    assert_eq!(levels.len(), 11);
    assert_eq!(*levels.last().unwrap(), 1.0);
}

#[test]
fn test_generate_levels_invalid_input() {
    assert!(generate_contour_levels(0.0, 10.0, 0.0).is_empty());
    assert!(generate_contour_levels(0.0, 10.0, -1.0).is_empty());
    assert!(generate_contour_levels(10.0, 0.0, 1.0).is_empty());
}

#[test]
fn test_log_tick_label() {
    assert_eq!(log_tick_label(-8.0), "1e-8");
    assert_eq!(log_tick_label(0.0), "1e0");
}

// ============================================================================
// Grid pivot
// ============================================================================

fn profile_table() -> Table {
    let t0 = Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap();
    let mut table = Table::new([TIME, HEIGHT_LEVEL, "CLC"]);
    for t in 0..3 {
        for level in [52, 50, 51] {
            let value = if t == 1 && level == 51 {
                Cell::Null
            } else {
                Cell::Float(t as f64 * 10.0 + level as f64)
            };
            table
                .push_row(vec![
                    Cell::Time(t0 + Duration::hours(t)),
                    Cell::Int(level),
                    value,
                ])
                .unwrap();
        }
    }
    table
}

#[test]
fn test_pivot_shape_and_order() {
    let grid = ContourGrid::from_table(&profile_table(), "CLC").unwrap();
    assert_eq!(grid.times.len(), 3);
    assert_eq!(grid.levels, vec![50, 51, 52]);
    assert_eq!(grid.values.len(), 3);
    assert!(grid.values.iter().all(|row| row.len() == 3));

    // z[level][time]
    assert_eq!(grid.values[0][0], Some(50.0));
    assert_eq!(grid.values[2][2], Some(72.0));
    assert_eq!(grid.values[1][1], None);
    assert!(grid.has_values());
}

#[test]
fn test_pivot_unknown_column() {
    assert!(ContourGrid::from_table(&profile_table(), "T").is_none());
}

#[test]
fn test_pivot_requires_level_column() {
    let mut table = Table::new([TIME, "T2M"]);
    table
        .push_row(vec![Cell::Time(Utc::now()), Cell::Float(290.0)])
        .unwrap();
    assert!(ContourGrid::from_table(&table, "T2M").is_none());
}
