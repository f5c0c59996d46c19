//! Round trip through a real NetCDF file written with the netcdf library.

use chrono::{NaiveDate, TimeZone, Utc};
use netcdf_parser::{DatasetLoader, DimensionNames, FileNaming, Layout, MeteogramLoader};

const FILL: f64 = -999.0;

fn write_sample(dir: &std::path::Path, name: &str) {
    let mut file = netcdf::create(dir.join(name)).unwrap();
    file.add_dimension("time", 3).unwrap();
    file.add_dimension("height_2", 2).unwrap();
    file.add_dimension("nstations", 1).unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "seconds since 2021-09-09 00:00:00")
        .unwrap();
    time.put_values(&[0.0, 600.0, 1200.0], ..).unwrap();

    let mut t2m = file.add_variable::<f64>("T2M", &["time"]).unwrap();
    t2m.put_attribute("units", "K").unwrap();
    t2m.put_values(&[290.0, 291.0, 292.0], ..).unwrap();

    // level-major on disk, must come back time-major
    let mut temp = file.add_variable::<f64>("T", &["height_2", "time"]).unwrap();
    temp.put_values(&[280.0, 281.0, 282.0, 270.0, 271.0, 272.0], ..)
        .unwrap();

    let mut qc = file.add_variable::<f64>("QC", &["time", "height_2"]).unwrap();
    qc.put_attribute("missing_value", FILL).unwrap();
    qc.put_values(&[1e-5, FILL, 0.0, 2e-5, 3e-5, 0.0], ..).unwrap();

    let mut station = file.add_variable::<f64>("station_lat", &["nstations"]).unwrap();
    station.put_values(&[50.9], ..).unwrap();
}

#[test]
fn test_loader_reads_fields_and_time_axis() {
    let dir = tempfile::tempdir().unwrap();
    let naming = FileNaming::default();
    let date = NaiveDate::from_ymd_opt(2021, 9, 9).unwrap();
    write_sample(dir.path(), &naming.file_name(date));

    let loader = MeteogramLoader::new(naming, DimensionNames::default());
    let ds = loader.load(dir.path().to_str().unwrap(), date).unwrap();

    assert_eq!(ds.times().len(), 3);
    assert_eq!(ds.times()[1], Utc.with_ymd_and_hms(2021, 9, 9, 0, 10, 0).unwrap());
    assert_eq!(ds.level_count(), 2);

    assert!(ds.contains("T2M"));
    assert!(ds.contains("T"));
    assert!(ds.contains("QC"));
    assert!(!ds.contains("station_lat"));
    assert!(!ds.contains("time"));

    assert_eq!(ds.field("T2M").unwrap().layout, Layout::Time);
    assert_eq!(ds.field("T2M").unwrap().units.as_deref(), Some("K"));
    assert_eq!(ds.value("T", 2, Some(1)), Some(272.0));
    assert_eq!(ds.value("T", 0, Some(1)), Some(270.0));
    assert!(ds.value("QC", 0, Some(1)).unwrap().is_nan());
}
