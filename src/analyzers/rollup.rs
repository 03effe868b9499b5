//! Year-level and sensor-level rollups of the detailed completeness rows.
//!
//! Percentages are recomputed from summed day counts, never by averaging
//! per-row percentages.

use std::collections::{BTreeMap, BTreeSet};

use crate::analyzers::types::{OverallSummary, SensorSummary, SensorYearCompleteness, YearSummary};
use crate::analyzers::utility::pct;

#[derive(Default)]
struct DayTotals {
    any: u64,
    complete: u64,
    incomplete: u64,
    none: u64,
}

impl DayTotals {
    fn add(&mut self, row: &SensorYearCompleteness) {
        self.any += u64::from(row.days_with_any_data);
        self.complete += u64::from(row.days_with_complete_data);
        self.incomplete += u64::from(row.days_with_incomplete_data);
        self.none += u64::from(row.days_with_no_data);
    }
}

/// Groups rows by year and sums their day counts across sensors.
///
/// `total_possible_days` is the year's window length times the number of
/// distinct sensors that have a row for that year.
pub fn summarize_by_year(rows: &[SensorYearCompleteness]) -> Vec<YearSummary> {
    let mut groups: BTreeMap<i32, (u32, BTreeSet<&str>, DayTotals)> = BTreeMap::new();

    for row in rows {
        let (_, sensors, totals) = groups
            .entry(row.year)
            .or_insert_with(|| (row.total_days_in_year, BTreeSet::new(), DayTotals::default()));
        sensors.insert(row.sensor_id.as_str());
        totals.add(row);
    }

    groups
        .into_iter()
        .map(|(year, (total_days_in_year, sensors, totals))| {
            let sensor_count = sensors.len() as u32;
            let total_possible_days = u64::from(total_days_in_year) * u64::from(sensor_count);

            YearSummary {
                year,
                total_days_in_year,
                sensor_count,
                total_possible_days,
                days_with_any_data: totals.any,
                days_with_complete_data: totals.complete,
                days_with_incomplete_data: totals.incomplete,
                days_with_no_data: totals.none,
                percent_days_recorded: pct(totals.any, total_possible_days),
                percent_complete_days: pct(totals.complete, total_possible_days),
            }
        })
        .collect()
}

/// Groups rows by sensor and sums their day counts across years.
///
/// `total_possible_days` only covers the years the sensor has rows for.
pub fn summarize_by_sensor(rows: &[SensorYearCompleteness]) -> Vec<SensorSummary> {
    let mut groups: BTreeMap<&str, (u32, u64, DayTotals)> = BTreeMap::new();

    for row in rows {
        let (years, possible, totals) = groups.entry(row.sensor_id.as_str()).or_default();
        *years += 1;
        *possible += u64::from(row.total_days_in_year);
        totals.add(row);
    }

    groups
        .into_iter()
        .map(|(sensor_id, (year_count, total_possible_days, totals))| SensorSummary {
            sensor_id: sensor_id.to_string(),
            year_count,
            total_possible_days,
            days_with_any_data: totals.any,
            days_with_complete_data: totals.complete,
            days_with_incomplete_data: totals.incomplete,
            days_with_no_data: totals.none,
            percent_days_recorded: pct(totals.any, total_possible_days),
            percent_complete_days: pct(totals.complete, total_possible_days),
        })
        .collect()
}

/// Totals across every row: each row contributes its own window length.
pub fn summarize_overall(rows: &[SensorYearCompleteness]) -> OverallSummary {
    let mut totals = DayTotals::default();
    let mut total_possible_days = 0u64;

    for row in rows {
        total_possible_days += u64::from(row.total_days_in_year);
        totals.add(row);
    }

    OverallSummary {
        total_possible_days,
        days_with_any_data: totals.any,
        days_with_complete_data: totals.complete,
        percent_days_recorded: pct(totals.any, total_possible_days),
        percent_complete_days: pct(totals.complete, total_possible_days),
    }
}
