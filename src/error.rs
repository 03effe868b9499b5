//! Domain errors raised by the completeness pipeline.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompletenessError {
    /// The input header lacks a column the engine cannot run without.
    #[error("required column `{column}` not found in input header")]
    MissingColumn { column: String },

    /// A record has an empty value for a required field.
    #[error("record {line} has no value for required field `{field}`")]
    MissingField { line: u64, field: String },

    /// A day coverage entry was handed to the wrong year.
    #[error("sensor {sensor_id}: date {date} falls outside year {year}")]
    DateOutsideYear {
        sensor_id: String,
        year: i32,
        date: NaiveDate,
    },

    /// More distinct recorded dates than the calendar window allows.
    #[error(
        "sensor {sensor_id} year {year}: {days_with_any_data} recorded days exceed the {total_days_in_year}-day window"
    )]
    CalendarOverflow {
        sensor_id: String,
        year: i32,
        days_with_any_data: u32,
        total_days_in_year: u32,
    },
}
