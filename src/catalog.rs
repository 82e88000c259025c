//! Seeded synthetic earthquake catalogs for offline runs and benches.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Exp, LogNormal, Poisson};

use crate::events::Earthquake;
use crate::geo::{GeoPoint, destination_point};
use crate::types::EventId;

const MAX_MAGNITUDE: f64 = 9.5;
const MAX_DEPTH_KM: f64 = 700.0;

/// A circular area producing earthquakes at a constant Poisson rate.
pub struct SeismicSource {
    pub name: &'static str,
    pub center: GeoPoint,
    pub radius_km: f64,
    /// Expected number of events at or above the catalog minimum per 7 days.
    pub weekly_rate: f64,
}

pub struct CatalogConfig {
    pub seed: u64,
    pub min_magnitude: f64,
    /// Gutenberg–Richter b-value; 1.0 means each unit of magnitude is 10× rarer.
    pub b_value: f64,
    pub sources: Vec<SeismicSource>,
}

/// Generate events in the `days` before `as_of`, most recent first.
///
/// Each source runs an independent Poisson process. Magnitudes follow
/// Gutenberg–Richter above `min_magnitude`; epicenters are uniform over the
/// source disc; depths are log-normal around 15 km.
pub fn generate_catalog(
    config: &CatalogConfig,
    as_of: DateTime<Utc>,
    days: u32,
    rng: &mut impl Rng,
) -> Vec<Earthquake> {
    let window_secs = i64::from(days) * 86_400;
    let magnitude_excess =
        Exp::new(config.b_value * std::f64::consts::LN_10).expect("invalid Gutenberg-Richter b-value");
    let depth = LogNormal::new(15.0_f64.ln(), 0.8).expect("invalid depth params");

    let mut out = Vec::new();
    let mut next_id = 0u64;

    for source in &config.sources {
        let lambda = source.weekly_rate * f64::from(days) / 7.0;
        if lambda <= 0.0 || window_secs == 0 {
            continue;
        }
        let n = Poisson::new(lambda).expect("invalid Poisson lambda").sample(rng) as u64;
        for _ in 0..n {
            let magnitude = (config.min_magnitude + magnitude_excess.sample(rng)).min(MAX_MAGNITUDE);
            // sqrt keeps the density uniform over the disc area.
            let distance_km = source.radius_km * rng.random::<f64>().sqrt();
            let bearing = rng.random_range(0.0..360.0);
            let epicenter = destination_point(source.center, bearing, distance_km);
            let ago = rng.random_range(0..window_secs);

            out.push(Earthquake {
                id: EventId(format!("syn{next_id:06}")),
                magnitude: (magnitude * 10.0).round() / 10.0,
                latitude: epicenter.latitude,
                longitude: epicenter.longitude,
                place: format!("synthetic / {}", source.name),
                time: as_of - Duration::seconds(ago),
                depth_km: depth.sample(rng).min(MAX_DEPTH_KM),
            });
            next_id += 1;
        }
    }

    out.sort_by(|a, b| b.time.cmp(&a.time));
    out
}
