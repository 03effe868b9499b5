use chrono::NaiveDate;
use cosit_completeness::analyzers::analyzer::analyze;
use cosit_completeness::clock::FixedClock;
use cosit_completeness::config::AnalysisConfig;
use cosit_completeness::ingest::{load_observations, read_observations};
use cosit_completeness::output::write_report;
use std::fs;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_counts.csv");

fn pinned() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

#[test]
fn test_full_pipeline() {
    let config = AnalysisConfig::default();
    let observations = load_observations(FIXTURE, &config).expect("Failed to load fixture");
    let report = analyze(&observations, &config.timestamp_format, &pinned()).unwrap();

    assert_eq!(report.total_records, 88);
    assert_eq!(report.dropped_records, 2);

    let pairs: Vec<_> = report
        .detailed
        .iter()
        .map(|r| (r.sensor_id.as_str(), r.year))
        .collect();
    assert_eq!(pairs, vec![("100635", 2020), ("80474", 2020), ("80474", 2021)]);

    let main_site = &report.detailed[0];
    assert_eq!(main_site.total_days_in_year, 366);
    assert_eq!(main_site.days_with_any_data, 2);
    assert_eq!(main_site.days_with_complete_data, 1);
    assert_eq!(main_site.days_with_incomplete_data, 1);
    assert_eq!(main_site.days_with_no_data, 364);

    for row in &report.detailed {
        assert_eq!(
            row.days_with_any_data + row.days_with_no_data,
            row.total_days_in_year
        );
    }
}

#[test]
fn test_rollups_from_fixture() {
    let config = AnalysisConfig::default();
    let observations = load_observations(FIXTURE, &config).unwrap();
    let report = analyze(&observations, &config.timestamp_format, &pinned()).unwrap();

    let y2020 = report.by_year.iter().find(|y| y.year == 2020).unwrap();
    assert_eq!(y2020.sensor_count, 2);
    assert_eq!(y2020.total_possible_days, 732);
    assert_eq!(y2020.days_with_any_data, 3);

    let y2021 = report.by_year.iter().find(|y| y.year == 2021).unwrap();
    assert_eq!(y2021.sensor_count, 1);
    assert_eq!(y2021.total_possible_days, 365);

    let late_site = report.by_sensor.iter().find(|s| s.sensor_id == "80474").unwrap();
    assert_eq!(late_site.year_count, 2);
    assert_eq!(late_site.total_possible_days, 731);
    assert_eq!(late_site.days_with_complete_data, 1);

    let early_site = report.by_sensor.iter().find(|s| s.sensor_id == "100635").unwrap();
    assert_eq!(early_site.total_possible_days, 366);

    assert_eq!(report.overall.total_possible_days, 366 + 366 + 365);
    assert_eq!(report.overall.days_with_any_data, 5);
}

#[test]
fn test_report_files_written() {
    let config = AnalysisConfig::default();
    let observations = load_observations(FIXTURE, &config).unwrap();
    let report = analyze(&observations, &config.timestamp_format, &pinned()).unwrap();

    let dir = std::env::temp_dir().join("cosit_completeness_integration");
    let _ = fs::remove_dir_all(&dir);

    let paths = write_report(&dir, &report, "20250601_120000", false).unwrap();

    let detailed = fs::read_to_string(&paths[0]).unwrap();
    assert!(detailed.contains("100635,2020,366,2,1,1,364"));
    let yearly = fs::read_to_string(&paths[1]).unwrap();
    assert_eq!(yearly.lines().count(), 3);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_timestamp_column_refuses_to_run() {
    let csv = "Cosit,Volume\n100635,4\n";
    assert!(read_observations(csv.as_bytes(), &AnalysisConfig::default()).is_err());
}
