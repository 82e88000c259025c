use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::catalog::{CatalogConfig, SeismicSource};
use crate::error::{LoadError, ValidationError};
use crate::geo::GeoPoint;
use crate::treaty::{Peril, Treaty};
use crate::types::TreatyId;

pub struct MonitorConfig {
    /// Smallest magnitude the feed query asks for.
    pub min_magnitude: f64,
    /// Feed lookback window in days.
    pub lookback_days: u32,
    pub treaties: Vec<Treaty>,
    pub catalog: CatalogConfig,
}

fn eq_treaty(id: &str, name: &str, region: &str, center: (f64, f64), radius_km: f64, limit_usd: u64) -> Treaty {
    Treaty {
        id: TreatyId::new(id),
        name: name.to_string(),
        peril: Peril::Earthquake,
        region: region.to_string(),
        latitude: center.0,
        longitude: center.1,
        radius_km,
        limit_usd,
    }
}

impl MonitorConfig {
    pub fn canonical() -> Self {
        // ── Treaty book ───────────────────────────────────────────────────────
        // Whole USD. Zone centres on the main exposure concentrations.
        let treaties = vec![
            eq_treaty("T001", "California Quake XL", "US-CA", (36.7783, -119.4179), 400.0, 50_000_000),
            eq_treaty("T002", "Japan Quake QS", "JP", (35.6762, 139.6503), 500.0, 75_000_000),
            eq_treaty("T003", "Chile Quake XL", "CL", (-33.4489, -70.6693), 600.0, 40_000_000),
            eq_treaty("T004", "Pacific Ring Cat", "PAC", (0.0, 150.0), 3_000.0, 100_000_000),
            eq_treaty("T005", "Anatolia Quake XL", "TR", (39.0, 35.0), 500.0, 30_000_000),
        ];

        // ── Synthetic seismicity ──────────────────────────────────────────────
        // Weekly M4+ rates per source. PLACEHOLDER calibration, roughly the
        // shape of the global catalogue rather than its exact numbers.
        let sources = vec![
            SeismicSource { name: "japan-trench", center: GeoPoint::new(37.5, 142.5), radius_km: 600.0, weekly_rate: 6.0 },
            SeismicSource { name: "california", center: GeoPoint::new(36.0, -120.0), radius_km: 450.0, weekly_rate: 1.5 },
            SeismicSource { name: "andes", center: GeoPoint::new(-30.0, -71.5), radius_km: 900.0, weekly_rate: 4.0 },
            SeismicSource { name: "melanesia", center: GeoPoint::new(-5.0, 150.0), radius_km: 1_200.0, weekly_rate: 8.0 },
            SeismicSource { name: "indonesia", center: GeoPoint::new(-3.0, 120.0), radius_km: 1_500.0, weekly_rate: 9.0 },
            SeismicSource { name: "anatolia", center: GeoPoint::new(38.5, 37.0), radius_km: 500.0, weekly_rate: 1.0 },
            SeismicSource { name: "mid-atlantic", center: GeoPoint::new(10.0, -40.0), radius_km: 1_500.0, weekly_rate: 1.0 },
        ];

        MonitorConfig {
            min_magnitude: 4.0,
            lookback_days: 7,
            treaties,
            catalog: CatalogConfig { seed: 42, min_magnitude: 4.0, b_value: 1.0, sources },
        }
    }
}

/// Parse a JSON array of treaties, rejecting invalid zones and duplicate ids.
pub fn parse_treaties(text: &str) -> Result<Vec<Treaty>, LoadError> {
    let treaties: Vec<Treaty> = serde_json::from_str(text).map_err(LoadError::json)?;
    let mut seen: HashSet<&TreatyId> = HashSet::new();
    for (index, treaty) in treaties.iter().enumerate() {
        treaty.validate().map_err(|source| LoadError::Validation { index, source })?;
        if !seen.insert(&treaty.id) {
            return Err(LoadError::Validation {
                index,
                source: ValidationError::DuplicateTreaty(treaty.id.clone()),
            });
        }
    }
    Ok(treaties)
}

pub fn load_treaties(path: impl AsRef<Path>) -> Result<Vec<Treaty>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let treaties = parse_treaties(&text)?;
    info!(path = %path.display(), treaties = treaties.len(), "loaded treaties");
    Ok(treaties)
}
