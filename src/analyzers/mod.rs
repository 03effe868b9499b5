//! Recording completeness analysis.
//!
//! This module groups normalized count records by sensor, year and date,
//! derives how many days in each calendar window have any or a full 24 hours
//! of data, and rolls those counts up per year and per sensor.

pub mod analyzer;
pub mod completeness;
pub mod coverage;
pub mod rollup;
pub mod types;
pub mod utility;
