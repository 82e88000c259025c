use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::check_coordinates;
use crate::geo::GeoPoint;
use crate::types::TreatyId;

/// Peril code as carried on the treaty record. Codes without a variant are
/// kept verbatim so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Peril {
    Earthquake,
    Windstorm,
    Flood,
    Other(String),
}

impl Peril {
    pub fn code(&self) -> &str {
        match self {
            Peril::Earthquake => "EQ",
            Peril::Windstorm => "WS",
            Peril::Flood => "FL",
            Peril::Other(code) => code,
        }
    }
}

impl From<String> for Peril {
    fn from(code: String) -> Self {
        match code.as_str() {
            "EQ" => Peril::Earthquake,
            "WS" => Peril::Windstorm,
            "FL" => Peril::Flood,
            _ => Peril::Other(code),
        }
    }
}

impl From<Peril> for String {
    fn from(peril: Peril) -> Self {
        match peril {
            Peril::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// A reinsurance treaty whose coverage zone is a circle around `latitude`/`longitude`.
/// Limits are whole USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treaty {
    pub id: TreatyId,
    pub name: String,
    pub peril: Peril,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub limit_usd: u64,
}

impl Treaty {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Inclusive: a point exactly `radius_km` away is inside the zone.
    pub fn zone_contains(&self, distance_km: f64) -> bool {
        distance_km <= self.radius_km
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyId { kind: "treaty" });
        }
        check_coordinates(self.latitude, self.longitude)?;
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(ValidationError::Radius { treaty: self.id.clone(), value: self.radius_km });
        }
        Ok(())
    }
}
