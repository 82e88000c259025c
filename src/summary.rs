use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::events::{Earthquake, MagnitudeBand};
use crate::exposure::ExposureRecord;
use crate::types::TreatyId;

/// Event counts per magnitude band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub moderate: usize,
    pub strong: usize,
    pub major: usize,
}

impl BandCounts {
    pub fn get(&self, band: MagnitudeBand) -> usize {
        match band {
            MagnitudeBand::Moderate => self.moderate,
            MagnitudeBand::Strong => self.strong,
            MagnitudeBand::Major => self.major,
        }
    }

    fn bump(&mut self, band: MagnitudeBand) {
        match band {
            MagnitudeBand::Moderate => self.moderate += 1,
            MagnitudeBand::Strong => self.strong += 1,
            MagnitudeBand::Major => self.major += 1,
        }
    }
}

/// Snapshot statistics for one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_events: usize,
    pub bands: BandCounts,
    /// Events under 4.0. Counted in `total_events` but in no band.
    pub below_band: usize,
    /// Number of exposure records (one per event/treaty hit).
    pub total_alerts: usize,
    /// Distinct treaties with at least one exposure record.
    pub treaties_at_risk: usize,
    /// Sum of `limit_usd` over the distinct treaties at risk.
    pub total_exposed_limit: u64,
    /// Distinct treaty ids in order of first appearance.
    pub affected_treaties: Vec<TreatyId>,
    /// Display names for `affected_treaties`, same order.
    pub affected_treaty_names: Vec<String>,
    /// Region code → distinct-treaty limit.
    pub exposure_by_region: BTreeMap<String, u64>,
}

/// Reduce a snapshot of events and its exposure records to summary statistics.
///
/// Each treaty's limit is counted once however many events hit it.
pub fn summarize(events: &[Earthquake], records: &[ExposureRecord<'_>]) -> SummaryStatistics {
    let mut stats = SummaryStatistics { total_events: events.len(), ..Default::default() };

    for event in events {
        match event.band() {
            Some(band) => stats.bands.bump(band),
            None => stats.below_band += 1,
        }
    }

    stats.total_alerts = records.len();

    let mut seen: HashSet<&TreatyId> = HashSet::new();
    for record in records {
        let treaty = record.treaty;
        if !seen.insert(&treaty.id) {
            continue;
        }
        stats.affected_treaties.push(treaty.id.clone());
        stats.affected_treaty_names.push(treaty.name.clone());
        stats.total_exposed_limit = stats.total_exposed_limit.saturating_add(treaty.limit_usd);
        let region = stats.exposure_by_region.entry(treaty.region.clone()).or_insert(0);
        *region = region.saturating_add(treaty.limit_usd);
    }
    stats.treaties_at_risk = stats.affected_treaties.len();

    stats
}
