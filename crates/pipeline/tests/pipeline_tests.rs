//! End-to-end pipeline runs against in-memory datasets.

use std::sync::Arc;

use chrono::NaiveDate;
use meteogram_common::{DashboardError, Family, LevelRange, RequestParams};
use pipeline::families::hydrometeors::SENTINEL;
use pipeline::table::{HEIGHT_LEVEL, SERIES_NAME};
use pipeline::{from_json, to_json, Pipeline};
use test_utils::{assert_approx_eq, test_date, InMemoryLoader, MeteogramBuilder};

fn params(lo: usize, hi: usize) -> RequestParams {
    RequestParams::new(test_date(), "/data/meteograms", LevelRange::new(lo, hi).unwrap())
}

fn pipeline_with(builder: MeteogramBuilder) -> (Pipeline, Arc<InMemoryLoader>) {
    let loader = Arc::new(InMemoryLoader::new().with_dataset(test_date(), builder.build()));
    (Pipeline::new(loader.clone()), loader)
}

#[test]
fn test_hydrometeors_log_floor_over_level_slice() {
    let builder = MeteogramBuilder::full_day();
    let source = builder.build();
    let (pipeline, _) = pipeline_with(builder);

    let table = pipeline.run(Family::Hydrometeors, &params(50, 120)).unwrap();

    // 144 steps → 24 kept, 70 levels each
    assert_eq!(table.len(), 24 * 70);

    let levels: Vec<i64> = table
        .column(HEIGHT_LEVEL)
        .unwrap()
        .map(|c| c.as_i64().unwrap())
        .collect();
    assert_eq!(*levels.iter().min().unwrap(), 50);
    assert_eq!(*levels.iter().max().unwrap(), 119);

    let qc = table.float_column("QC").unwrap();
    let mut below = 0;
    for (row, value) in qc.iter().enumerate() {
        let t = (row / 70) * 6;
        let level = 50 + row % 70;
        let raw = source.value("QC", t, Some(level)).unwrap();
        let value = value.unwrap();
        if raw < 1e-8 {
            assert_eq!(value, SENTINEL);
            below += 1;
        } else {
            assert_approx_eq!(value, raw.log10(), 1e-12);
        }
    }
    assert!(below > 0, "fixture should include values under the floor");
}

#[test]
fn test_precipitation_without_convective_snow() {
    let (pipeline, _) = pipeline_with(MeteogramBuilder::full_day().without(&["SNOW_CON"]));

    let table = pipeline.run(Family::Precipitation, &params(50, 120)).unwrap();

    assert_eq!(table.distinct_text(SERIES_NAME), vec!["RAIN"]);
    assert_eq!(table.len(), 24);
}

#[test]
fn test_missing_file_fails_every_family() {
    let loader = Arc::new(InMemoryLoader::new());
    let pipeline = Pipeline::new(loader.clone());
    let params = RequestParams::new(
        NaiveDate::from_ymd_opt(2021, 9, 10).unwrap(),
        "/data/meteograms",
        LevelRange::new(50, 120).unwrap(),
    );

    for family in Family::ALL {
        let err = pipeline.run(family, &params).unwrap_err();
        assert!(
            matches!(err, DashboardError::DataUnavailable { .. }),
            "{}: {:?}",
            family,
            err
        );
    }
    assert_eq!(loader.load_count(), 4);
}

#[test]
fn test_missing_date_fails_beside_available_one() {
    let previous = NaiveDate::from_ymd_opt(2021, 9, 8).unwrap();
    let loader = Arc::new(
        InMemoryLoader::new()
            .with_dataset(previous, MeteogramBuilder::new(12, 10).date(previous).build()),
    );
    let pipeline = Pipeline::new(loader.clone());
    let levels = LevelRange::new(0, 10).unwrap();

    let ok = RequestParams::new(previous, "/data/meteograms", levels);
    let table = pipeline.run(Family::Surface, &ok).unwrap();
    let first = table.rows()[0][0].as_time().unwrap();
    assert_eq!(first.date_naive(), previous);

    let missing = RequestParams::new(test_date(), "/data/meteograms", levels);
    for family in Family::ALL {
        assert!(matches!(
            pipeline.run(family, &missing),
            Err(DashboardError::DataUnavailable { .. })
        ));
    }
    assert_eq!(loader.load_count(), 5);
}

#[test]
fn test_each_run_loads_its_own_dataset() {
    let (pipeline, loader) = pipeline_with(MeteogramBuilder::new(12, 10));
    pipeline.run(Family::Surface, &params(0, 10)).unwrap();
    pipeline.run(Family::TimeHeight, &params(0, 10)).unwrap();
    assert_eq!(loader.load_count(), 2);
}

#[test]
fn test_tables_survive_serialization() {
    let (pipeline, _) = pipeline_with(MeteogramBuilder::new(36, 20));

    for family in Family::ALL {
        let table = pipeline.run(family, &params(5, 15)).unwrap();
        let back = from_json(&to_json(&table).unwrap()).unwrap();
        assert_eq!(back, table, "{}", family);
    }
}

#[test]
fn test_upper_bound_past_level_count_truncates() {
    let (pipeline, _) = pipeline_with(MeteogramBuilder::new(6, 100));
    let table = pipeline.run(Family::TimeHeight, &params(90, 120)).unwrap();
    assert_eq!(table.len(), 10);
}
