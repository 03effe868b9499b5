//! Per-(sensor, year) completeness metrics.

use chrono::{Datelike, NaiveDate};

use crate::analyzers::types::{DayCoverage, SensorYearCompleteness};
use crate::analyzers::utility::pct;
use crate::error::CompletenessError;

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Length of the calendar window a sensor is measured against.
///
/// For the year `today` falls in, this is the number of days from January 1
/// through `today` inclusive. Every other year uses its full length.
pub fn total_days_in_year(year: i32, today: NaiveDate) -> u32 {
    if year == today.year() {
        today.ordinal()
    } else {
        days_in_year(year)
    }
}

/// Derives the completeness row for one sensor and year from its day coverage.
///
/// # Errors
///
/// - [`CompletenessError::DateOutsideYear`] if a coverage date is not in `year`.
/// - [`CompletenessError::CalendarOverflow`] if there are more recorded days
///   than the window allows (e.g. current-year dates after `today`).
pub fn compute_completeness(
    sensor_id: &str,
    year: i32,
    days: &[DayCoverage],
    today: NaiveDate,
) -> Result<SensorYearCompleteness, CompletenessError> {
    if let Some(stray) = days.iter().find(|d| d.date.year() != year) {
        return Err(CompletenessError::DateOutsideYear {
            sensor_id: sensor_id.to_string(),
            year,
            date: stray.date,
        });
    }

    let total_days_in_year = total_days_in_year(year, today);
    let days_with_complete_data = days.iter().filter(|d| d.is_complete()).count() as u32;
    let days_with_any_data = days.len() as u32;
    let days_with_incomplete_data = days_with_any_data - days_with_complete_data;

    let days_with_no_data = total_days_in_year
        .checked_sub(days_with_any_data)
        .ok_or_else(|| CompletenessError::CalendarOverflow {
            sensor_id: sensor_id.to_string(),
            year,
            days_with_any_data,
            total_days_in_year,
        })?;

    Ok(SensorYearCompleteness {
        sensor_id: sensor_id.to_string(),
        year,
        total_days_in_year,
        days_with_any_data,
        days_with_complete_data,
        days_with_incomplete_data,
        days_with_no_data,
        percent_days_recorded: pct(days_with_any_data.into(), total_days_in_year.into()),
        percent_complete_days: pct(days_with_complete_data.into(), total_days_in_year.into()),
        percent_days_complete_when_recorded: pct(
            days_with_complete_data.into(),
            days_with_any_data.into(),
        ),
    })
}
