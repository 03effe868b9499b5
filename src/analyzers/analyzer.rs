use tracing::{debug, info};

use crate::analyzers::completeness::compute_completeness;
use crate::analyzers::coverage::{day_coverage, group_by_sensor_year};
use crate::analyzers::rollup::{summarize_by_sensor, summarize_by_year, summarize_overall};
use crate::analyzers::types::{CompletenessReport, Observation};
use crate::clock::Clock;
use crate::error::CompletenessError;
use crate::normalize::normalize;

/// Runs the full pipeline over a batch of observations.
///
/// Timestamps are normalized with `timestamp_format`, grouped per sensor and
/// year, turned into completeness rows, then rolled up. The clock is read
/// once so every current-year row shares the same "today".
///
/// # Errors
///
/// Fails on the first (sensor, year) whose day counts do not fit its
/// calendar window.
#[tracing::instrument(skip(observations, clock), fields(records = observations.len()))]
pub fn analyze(
    observations: &[Observation],
    timestamp_format: &str,
    clock: &dyn Clock,
) -> Result<CompletenessReport, CompletenessError> {
    let today = clock.today();
    let normalized = normalize(observations, timestamp_format);

    let groups = group_by_sensor_year(&normalized.observations);
    debug!(pairs = groups.len(), %today, "Grouped observations by sensor and year");

    let mut detailed = Vec::with_capacity(groups.len());
    for ((sensor_id, year), obs) in &groups {
        let days = day_coverage(obs.iter().copied());
        let row = compute_completeness(sensor_id, *year, &days, today)?;
        debug!(
            sensor_id = %sensor_id,
            year,
            any = row.days_with_any_data,
            complete = row.days_with_complete_data,
            "Completeness computed"
        );
        detailed.push(row);
    }

    let by_year = summarize_by_year(&detailed);
    let by_sensor = summarize_by_sensor(&detailed);
    let overall = summarize_overall(&detailed);

    info!(
        records = observations.len(),
        dropped = normalized.dropped,
        sensors = by_sensor.len(),
        years = by_year.len(),
        "Completeness analysis complete"
    );

    Ok(CompletenessReport {
        today,
        total_records: observations.len(),
        dropped_records: normalized.dropped,
        detailed,
        by_year,
        by_sensor,
        overall,
    })
}
