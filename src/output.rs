//! Output formatting and persistence for completeness reports.
//!
//! Supports JSON rendering, a logged summary, and writing the three result
//! tables as CSV (optionally gzip-compressed).

use anyhow::Result;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::CompletenessReport;

pub const DETAILED_PREFIX: &str = "recording_completeness";
pub const YEARLY_PREFIX: &str = "yearly_completeness_summary";
pub const SENSOR_PREFIX: &str = "cosit_completeness_summary";

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &CompletenessReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Logs the run totals.
pub fn log_summary(report: &CompletenessReport) {
    let overall = &report.overall;
    info!(
        total_records = report.total_records,
        dropped_records = report.dropped_records,
        sensors = report.by_sensor.len(),
        years = report.by_year.len(),
        "Input summary"
    );
    info!(
        total_possible_days = overall.total_possible_days,
        days_with_any_data = overall.days_with_any_data,
        percent_days_recorded = %format!("{:.2}", overall.percent_days_recorded),
        days_with_complete_data = overall.days_with_complete_data,
        percent_complete_days = %format!("{:.2}", overall.percent_complete_days),
        "Overall completeness"
    );
}

/// Serializes rows as CSV with a header line.
pub fn to_csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Writes rows to `path` as CSV, gzip-compressed when `gzip` is set.
pub fn write_records<T: Serialize>(path: &Path, rows: &[T], gzip: bool) -> Result<()> {
    let contents = to_csv_bytes(rows)?;

    let body = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&contents)?;
        encoder.finish()?
    } else {
        contents
    };

    debug!(path = %path.display(), rows = rows.len(), gzip, "Writing CSV");
    std::fs::write(path, body)?;
    Ok(())
}

fn report_path(dir: &Path, prefix: &str, stamp: &str, gzip: bool) -> PathBuf {
    let ext = if gzip { "csv.gz" } else { "csv" };
    dir.join(format!("{}_{}.{}", prefix, stamp, ext))
}

/// Writes the detailed, yearly and per-sensor tables into `dir`.
///
/// File names carry `stamp` so repeated runs do not overwrite each other.
/// Returns the paths written, in that order.
#[tracing::instrument(skip(report), fields(dir = %dir.display()))]
pub fn write_report(
    dir: &Path,
    report: &CompletenessReport,
    stamp: &str,
    gzip: bool,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let detailed = report_path(dir, DETAILED_PREFIX, stamp, gzip);
    let yearly = report_path(dir, YEARLY_PREFIX, stamp, gzip);
    let sensors = report_path(dir, SENSOR_PREFIX, stamp, gzip);

    write_records(&detailed, &report.detailed, gzip)?;
    write_records(&yearly, &report.by_year, gzip)?;
    write_records(&sensors, &report.by_sensor, gzip)?;

    info!(
        detailed = %detailed.display(),
        yearly = %yearly.display(),
        sensors = %sensors.display(),
        "Report files written"
    );

    Ok(vec![detailed, yearly, sensors])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{OverallSummary, SensorYearCompleteness};
    use chrono::NaiveDate;
    use flate2::read::GzDecoder;
    use std::env;
    use std::fs;
    use std::io::Read;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir); // clean up any prior run
        dir
    }

    fn row() -> SensorYearCompleteness {
        SensorYearCompleteness {
            sensor_id: "A1".to_string(),
            year: 2021,
            total_days_in_year: 365,
            days_with_any_data: 2,
            days_with_complete_data: 1,
            days_with_incomplete_data: 1,
            days_with_no_data: 363,
            percent_days_recorded: 0.5,
            percent_complete_days: 0.25,
            percent_days_complete_when_recorded: 50.0,
        }
    }

    fn report() -> CompletenessReport {
        CompletenessReport {
            today: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total_records: 30,
            dropped_records: 0,
            detailed: vec![row()],
            by_year: vec![],
            by_sensor: vec![],
            overall: OverallSummary::default(),
        }
    }

    #[test]
    fn test_csv_has_contract_headers() {
        let bytes = to_csv_bytes(&[row()]).unwrap();
        let content = String::from_utf8(bytes).unwrap();
        let header = content.lines().next().unwrap();

        assert!(header.starts_with("sensor_id,year,total_days_in_year,days_with_any_data"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&report()).unwrap();
    }

    #[test]
    fn test_write_report_creates_three_files() {
        let dir = temp_dir("cosit_completeness_test_report");

        let paths = write_report(&dir, &report(), "20250101_000000", false).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(
            paths[0]
                .to_string_lossy()
                .ends_with("recording_completeness_20250101_000000.csv")
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_gzip_output_decompresses_to_csv() {
        let dir = temp_dir("cosit_completeness_test_gzip");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rows.csv.gz");

        write_records(&path, &[row()], true).unwrap();

        let mut decoded = String::new();
        GzDecoder::new(fs::File::open(&path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert!(decoded.contains("A1,2021,365,2,1,1,363"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
