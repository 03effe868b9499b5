//! Timestamp normalization for raw count records.

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::analyzers::types::{NormalizedObservation, Observation};

/// Result of normalizing a batch: the records that parsed, and how many
/// were dropped because their timestamp did not.
#[derive(Debug, Default)]
pub struct Normalized {
    pub observations: Vec<NormalizedObservation>,
    pub dropped: usize,
}

/// Parses a timestamp string in the given `chrono` format.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that does
/// not match.
pub fn parse_timestamp(raw: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), format).ok()
}

/// Converts each observation into `(sensor_id, date, hour)`.
///
/// Unparsable timestamps are filtered out and counted; they never abort the
/// batch.
#[tracing::instrument(skip(observations), fields(records = observations.len()))]
pub fn normalize(observations: &[Observation], format: &str) -> Normalized {
    let mut out = Normalized {
        observations: Vec::with_capacity(observations.len()),
        dropped: 0,
    };

    for obs in observations {
        match parse_timestamp(&obs.timestamp, format) {
            Some(dt) => out.observations.push(NormalizedObservation {
                sensor_id: obs.sensor_id.clone(),
                date: dt.date(),
                hour: dt.hour(),
            }),
            None => out.dropped += 1,
        }
    }

    if out.dropped > 0 {
        warn!(dropped = out.dropped, "Dropped records with unparsable timestamps");
    }
    debug!(kept = out.observations.len(), "Timestamps normalized");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMESTAMP_FORMAT;
    use chrono::NaiveDate;

    fn obs(sensor: &str, ts: &str) -> Observation {
        Observation {
            sensor_id: sensor.to_string(),
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn test_parse_day_month_year() {
        let dt = parse_timestamp("03/02/2021 17:45", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2021, 2, 3).unwrap());
        assert_eq!(dt.hour(), 17);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp("  01/01/2020 00:00 ", DEFAULT_TIMESTAMP_FORMAT).is_some());
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert!(parse_timestamp("2021-02-03 17:45", DEFAULT_TIMESTAMP_FORMAT).is_none());
        assert!(parse_timestamp("31/02/2021 10:00", DEFAULT_TIMESTAMP_FORMAT).is_none());
        assert!(parse_timestamp("", DEFAULT_TIMESTAMP_FORMAT).is_none());
    }

    #[test]
    fn test_normalize_drops_and_counts_bad_rows() {
        let input = vec![
            obs("A1", "01/01/2021 00:00"),
            obs("A1", "garbage"),
            obs("B2", "01/01/2021 23:30"),
            obs("B2", ""),
        ];

        let result = normalize(&input, DEFAULT_TIMESTAMP_FORMAT);

        assert_eq!(result.dropped, 2);
        assert_eq!(result.observations.len(), 2);
        assert_eq!(result.observations[1].sensor_id, "B2");
        assert_eq!(result.observations[1].hour, 23);
    }

    #[test]
    fn test_normalize_empty_input() {
        let result = normalize(&[], DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(result.dropped, 0);
        assert!(result.observations.is_empty());
    }
}
