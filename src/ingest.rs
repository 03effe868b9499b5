//! CSV reader that turns raw count exports into [`Observation`]s.
//!
//! Only the sensor and timestamp columns are read; every other column is
//! ignored.

use anyhow::Result;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use tracing::{debug, info};

use crate::analyzers::types::Observation;
use crate::config::AnalysisConfig;
use crate::error::CompletenessError;

fn column_index(headers: &StringRecord, column: &str) -> Result<usize, CompletenessError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| CompletenessError::MissingColumn {
            column: column.to_string(),
        })
}

/// Reads observations from any CSV source with a header row.
///
/// # Errors
///
/// - [`CompletenessError::MissingColumn`] if the header lacks the configured
///   sensor or timestamp column.
/// - [`CompletenessError::MissingField`] if a record has a blank sensor id.
/// - Any CSV decoding error.
pub fn read_observations<R: Read>(reader: R, config: &AnalysisConfig) -> Result<Vec<Observation>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let sensor_idx = column_index(&headers, &config.sensor_column)?;
    let timestamp_idx = column_index(&headers, &config.timestamp_column)?;
    debug!(sensor_idx, timestamp_idx, "Resolved required columns");

    let mut observations = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let sensor_id = record.get(sensor_idx).map(str::trim).unwrap_or_default();
        if sensor_id.is_empty() {
            return Err(CompletenessError::MissingField {
                line,
                field: config.sensor_column.clone(),
            }
            .into());
        }

        // a short row or blank cell becomes an unparsable timestamp
        let timestamp = record.get(timestamp_idx).unwrap_or_default();

        observations.push(Observation {
            sensor_id: sensor_id.to_string(),
            timestamp: timestamp.to_string(),
        });
    }

    Ok(observations)
}

/// Opens `path` and reads its observations.
#[tracing::instrument(skip(config))]
pub fn load_observations(path: &str, config: &AnalysisConfig) -> Result<Vec<Observation>> {
    let file = File::open(path)?;
    let observations = read_observations(file, config)?;
    info!(records = observations.len(), "Loaded observations");
    Ok(observations)
}
