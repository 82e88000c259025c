//! Exposure matching: which treaty zones contain which epicenters.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::events::{Earthquake, MagnitudeBand};
use crate::geo::haversine_km;
use crate::treaty::Treaty;

/// One (event, treaty) pair where the epicenter lies inside the treaty zone.
/// Exists only when `distance_km <= treaty.radius_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExposureRecord<'a> {
    pub event: &'a Earthquake,
    pub treaty: &'a Treaty,
    /// Epicenter to zone center, unrounded.
    pub distance_km: f64,
}

impl ExposureRecord<'_> {
    /// Exposure is the treaty's full limit.
    pub fn exposure_usd(&self) -> u64 {
        self.treaty.limit_usd
    }

    pub fn severity(&self) -> Option<MagnitudeBand> {
        self.event.band()
    }
}

/// Every treaty whose zone contains `event`, in treaty input order.
pub fn exposures_for_event<'a>(
    event: &'a Earthquake,
    treaties: &'a [Treaty],
) -> impl Iterator<Item = ExposureRecord<'a>> + 'a {
    let epicenter = event.epicenter();
    treaties.iter().filter_map(move |treaty| {
        let distance_km = haversine_km(epicenter, treaty.center());
        treaty
            .zone_contains(distance_km)
            .then_some(ExposureRecord { event, treaty, distance_km })
    })
}

/// Full cross product of `events` × `treaties`, emitted event-major in input order.
///
/// Deterministic for a given snapshot: the same inputs always give the same
/// records in the same order. Empty inputs give an empty result.
pub fn match_exposures<'a>(events: &'a [Earthquake], treaties: &'a [Treaty]) -> Vec<ExposureRecord<'a>> {
    let records: Vec<ExposureRecord<'a>> =
        events.iter().flat_map(|event| exposures_for_event(event, treaties)).collect();
    debug!(
        events = events.len(),
        treaties = treaties.len(),
        exposures = records.len(),
        "matched events against treaty zones"
    );
    records
}

/// Alert order: treaty limit descending, then most recent event first.
/// Remaining ties keep their input order.
pub fn rank_alerts<'a>(records: &[ExposureRecord<'a>]) -> Vec<ExposureRecord<'a>> {
    let mut ranked = records.to_vec();
    ranked.sort_by(alert_order);
    ranked
}

fn alert_order(a: &ExposureRecord<'_>, b: &ExposureRecord<'_>) -> Ordering {
    b.treaty
        .limit_usd
        .cmp(&a.treaty.limit_usd)
        .then_with(|| b.event.time.cmp(&a.event.time))
}

/// Closest zone center first; used when listing the treaties hit by one event.
pub fn nearest_first<'a>(records: &[ExposureRecord<'a>]) -> Vec<ExposureRecord<'a>> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    sorted
}
