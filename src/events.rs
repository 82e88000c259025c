use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::types::EventId;

/// A reported earthquake. Immutable once loaded; a refresh replaces the
/// whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earthquake {
    pub id: EventId,
    pub magnitude: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub place: String,
    pub time: DateTime<Utc>,
    pub depth_km: f64,
}

impl Earthquake {
    pub fn epicenter(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// `None` for events below the lowest band.
    pub fn band(&self) -> Option<MagnitudeBand> {
        MagnitudeBand::classify(self.magnitude)
    }

    /// Load-time contract check. The exposure core assumes it has passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyId { kind: "event" });
        }
        check_coordinates(self.latitude, self.longitude)?;
        if !(self.magnitude.is_finite() && self.magnitude >= 0.0) {
            return Err(ValidationError::Magnitude { value: self.magnitude });
        }
        if !(self.depth_km.is_finite() && self.depth_km >= 0.0) {
            return Err(ValidationError::Depth { value: self.depth_km });
        }
        Ok(())
    }
}

pub(crate) fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::Latitude { value: latitude });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::Longitude { value: longitude });
    }
    Ok(())
}

/// Severity buckets over half-open magnitude intervals:
/// [4.0, 5.0), [5.0, 6.0), [6.0, ∞). A boundary value belongs to the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MagnitudeBand {
    Moderate,
    Strong,
    Major,
}

impl MagnitudeBand {
    pub const ALL: [MagnitudeBand; 3] =
        [MagnitudeBand::Moderate, MagnitudeBand::Strong, MagnitudeBand::Major];

    pub fn classify(magnitude: f64) -> Option<Self> {
        if magnitude >= 6.0 {
            Some(MagnitudeBand::Major)
        } else if magnitude >= 5.0 {
            Some(MagnitudeBand::Strong)
        } else if magnitude >= 4.0 {
            Some(MagnitudeBand::Moderate)
        } else {
            None
        }
    }

    /// Inclusive lower bound of the band.
    pub fn lower(self) -> f64 {
        match self {
            MagnitudeBand::Moderate => 4.0,
            MagnitudeBand::Strong => 5.0,
            MagnitudeBand::Major => 6.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeBand::Moderate => "M4-5",
            MagnitudeBand::Strong => "M5-6",
            MagnitudeBand::Major => "M6+",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn quake(magnitude: f64) -> Earthquake {
        Earthquake {
            id: EventId::new("ci40000001"),
            magnitude,
            latitude: 36.7783,
            longitude: -119.4179,
            place: "Central California".to_string(),
            time: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            depth_km: 10.0,
        }
    }

    #[test]
    fn boundaries_belong_to_higher_band() {
        assert_eq!(MagnitudeBand::classify(4.0), Some(MagnitudeBand::Moderate));
        assert_eq!(MagnitudeBand::classify(4.999), Some(MagnitudeBand::Moderate));
        assert_eq!(MagnitudeBand::classify(5.0), Some(MagnitudeBand::Strong));
        assert_eq!(MagnitudeBand::classify(6.0), Some(MagnitudeBand::Major));
        assert_eq!(MagnitudeBand::classify(9.5), Some(MagnitudeBand::Major));
    }

    #[test]
    fn below_four_has_no_band() {
        assert_eq!(MagnitudeBand::classify(3.99), None);
        assert_eq!(quake(2.5).band(), None);
    }

    #[test]
    fn lower_bounds_classify_to_themselves() {
        for band in MagnitudeBand::ALL {
            assert_eq!(MagnitudeBand::classify(band.lower()), Some(band));
        }
    }

    #[test]
    fn validate_accepts_well_formed_event() {
        assert!(quake(5.1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        let mut e = quake(5.1);
        e.latitude = 91.0;
        assert!(matches!(e.validate(), Err(ValidationError::Latitude { .. })));

        let mut e = quake(5.1);
        e.longitude = -180.5;
        assert!(matches!(e.validate(), Err(ValidationError::Longitude { .. })));

        let mut e = quake(-0.1);
        assert!(matches!(e.validate(), Err(ValidationError::Magnitude { .. })));

        e = quake(5.0);
        e.depth_km = -3.0;
        assert!(matches!(e.validate(), Err(ValidationError::Depth { .. })));

        e = quake(5.0);
        e.id = EventId::new("  ");
        assert!(matches!(e.validate(), Err(ValidationError::EmptyId { kind: "event" })));
    }

    #[test]
    fn serializes_time_as_rfc3339() {
        let value = serde_json::to_value(quake(5.1)).unwrap();
        assert_eq!(value["id"], "ci40000001");
        assert_eq!(value["time"], "2025-03-01T12:00:00Z");
    }
}
