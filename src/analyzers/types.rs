//! Data types used by the completeness pipeline.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Number of distinct hours a day needs to count as complete.
pub const HOURS_PER_DAY: usize = 24;

/// A raw count record as handed over by the ingestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub sensor_id: String,
    pub timestamp: String,
}

/// An observation whose timestamp parsed into a date and an hour (0..=23).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedObservation {
    pub sensor_id: String,
    pub date: NaiveDate,
    pub hour: u32,
}

/// Distinct hours seen for one sensor on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCoverage {
    pub sensor_id: String,
    pub date: NaiveDate,
    pub hours_observed: BTreeSet<u32>,
}

impl DayCoverage {
    pub fn is_complete(&self) -> bool {
        self.hours_observed.len() == HOURS_PER_DAY
    }
}

/// Completeness metrics for one (sensor, year) pair with data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorYearCompleteness {
    pub sensor_id: String,
    pub year: i32,
    pub total_days_in_year: u32,
    pub days_with_any_data: u32,
    pub days_with_complete_data: u32,
    pub days_with_incomplete_data: u32,
    pub days_with_no_data: u32,
    pub percent_days_recorded: f64,
    pub percent_complete_days: f64,
    pub percent_days_complete_when_recorded: f64,
}

/// Year-level rollup across every sensor present that year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i32,
    pub total_days_in_year: u32,
    pub sensor_count: u32,
    pub total_possible_days: u64,
    pub days_with_any_data: u64,
    pub days_with_complete_data: u64,
    pub days_with_incomplete_data: u64,
    pub days_with_no_data: u64,
    pub percent_days_recorded: f64,
    pub percent_complete_days: f64,
}

/// Sensor-level rollup across the years that sensor has rows for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub sensor_id: String,
    pub year_count: u32,
    pub total_possible_days: u64,
    pub days_with_any_data: u64,
    pub days_with_complete_data: u64,
    pub days_with_incomplete_data: u64,
    pub days_with_no_data: u64,
    pub percent_days_recorded: f64,
    pub percent_complete_days: f64,
}

/// Totals across every detailed row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverallSummary {
    pub total_possible_days: u64,
    pub days_with_any_data: u64,
    pub days_with_complete_data: u64,
    pub percent_days_recorded: f64,
    pub percent_complete_days: f64,
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    pub today: NaiveDate,
    pub total_records: usize,
    pub dropped_records: usize,
    pub detailed: Vec<SensorYearCompleteness>,
    pub by_year: Vec<YearSummary>,
    pub by_sensor: Vec<SensorSummary>,
    pub overall: OverallSummary,
}
