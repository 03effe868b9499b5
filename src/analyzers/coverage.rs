//! Grouping of normalized observations into per-day hour sets.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

use crate::analyzers::types::{DayCoverage, NormalizedObservation};

/// Partitions observations by `(sensor_id, year)`.
///
/// Only pairs with at least one observation appear as keys.
pub fn group_by_sensor_year(
    observations: &[NormalizedObservation],
) -> BTreeMap<(String, i32), Vec<&NormalizedObservation>> {
    let mut groups: BTreeMap<(String, i32), Vec<&NormalizedObservation>> = BTreeMap::new();

    for obs in observations {
        groups
            .entry((obs.sensor_id.clone(), obs.date.year()))
            .or_default()
            .push(obs);
    }

    groups
}

/// Builds one [`DayCoverage`] per distinct (sensor, date) in `observations`.
///
/// Expected to receive a single sensor's records for a single year. The
/// output is sorted by date and does not depend on input order; repeated
/// hours on the same date are counted once.
pub fn day_coverage<'a, I>(observations: I) -> Vec<DayCoverage>
where
    I: IntoIterator<Item = &'a NormalizedObservation>,
{
    let mut days: BTreeMap<(&'a str, NaiveDate), BTreeSet<u32>> = BTreeMap::new();

    for obs in observations {
        days.entry((obs.sensor_id.as_str(), obs.date))
            .or_default()
            .insert(obs.hour);
    }

    days.into_iter()
        .map(|((sensor_id, date), hours_observed)| DayCoverage {
            sensor_id: sensor_id.to_string(),
            date,
            hours_observed,
        })
        .collect()
}
