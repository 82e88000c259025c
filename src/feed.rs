//! Loading earthquake snapshots from disk: USGS GeoJSON feeds or NDJSON
//! catalogs written by `quake_catalog`.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::events::Earthquake;
use crate::types::EventId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// USGS `FeatureCollection` as served by the FDSN event query endpoint.
    GeoJson,
    /// One serialized `Earthquake` per line.
    Ndjson,
}

// ── USGS GeoJSON shape ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    id: String,
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Deserialize, Default)]
struct Properties {
    mag: Option<f64>,
    place: Option<String>,
    /// Milliseconds since the Unix epoch.
    time: Option<i64>,
}

#[derive(Deserialize)]
struct Geometry {
    /// `[longitude, latitude, depth_km]`
    coordinates: Vec<f64>,
}

impl Feature {
    fn into_earthquake(self) -> Earthquake {
        let coords = self.geometry.map(|g| g.coordinates).unwrap_or_default();
        let coord = |i: usize| coords.get(i).copied().unwrap_or(0.0);

        let mut depth_km = coord(2);
        if depth_km < 0.0 {
            // USGS reports events above the datum with negative depth.
            warn!(event = %self.id, depth_km, "negative depth clamped to surface");
            depth_km = 0.0;
        }

        Earthquake {
            id: EventId(self.id),
            magnitude: self.properties.mag.unwrap_or(0.0),
            latitude: coord(1),
            longitude: coord(0),
            place: self.properties.place.unwrap_or_else(|| "Unknown".to_string()),
            time: self
                .properties
                .time
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .unwrap_or_default(),
            depth_km,
        }
    }
}

/// Parse a USGS GeoJSON document. Every feature is validated; the first bad
/// one aborts the load.
pub fn parse_geojson(text: &str) -> Result<Vec<Earthquake>, LoadError> {
    let collection: FeatureCollection = serde_json::from_str(text).map_err(LoadError::json)?;
    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let quake = feature.into_earthquake();
            quake.validate().map_err(|source| LoadError::Validation { index, source })?;
            Ok(quake)
        })
        .collect()
}

/// Parse an NDJSON catalog. Blank lines are skipped. Errors carry the
/// 1-based line number.
pub fn parse_ndjson(reader: impl BufRead) -> Result<Vec<Earthquake>, LoadError> {
    let mut events = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoadError::io("<ndjson>", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let quake: Earthquake = serde_json::from_str(&line)
            .map_err(|source| LoadError::Json { line: line_no + 1, source })?;
        quake
            .validate()
            .map_err(|source| LoadError::InvalidLine { line: line_no + 1, source })?;
        events.push(quake);
    }
    Ok(events)
}

pub fn load_events(path: impl AsRef<Path>, format: FeedFormat) -> Result<Vec<Earthquake>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    let events = match format {
        FeedFormat::GeoJson => {
            let mut text = String::new();
            BufReader::new(file)
                .read_to_string(&mut text)
                .map_err(|e| LoadError::io(path, e))?;
            parse_geojson(&text)?
        }
        FeedFormat::Ndjson => parse_ndjson(BufReader::new(file))?,
    };
    info!(path = %path.display(), events = events.len(), "loaded events");
    Ok(events)
}

/// The magnitude/lookback selection the upstream query applies.
/// The exposure core itself never filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedFilter {
    pub min_magnitude: f64,
    pub lookback_days: u32,
    pub as_of: DateTime<Utc>,
}

impl FeedFilter {
    pub fn window_start(&self) -> DateTime<Utc> {
        self.as_of - Duration::days(i64::from(self.lookback_days))
    }

    pub fn accepts(&self, event: &Earthquake) -> bool {
        event.magnitude >= self.min_magnitude
            && event.time >= self.window_start()
            && event.time <= self.as_of
    }

    /// Keep matching events, preserving input order.
    pub fn apply(&self, events: Vec<Earthquake>) -> Vec<Earthquake> {
        let before = events.len();
        let kept: Vec<Earthquake> = events.into_iter().filter(|e| self.accepts(e)).collect();
        if kept.len() < before {
            info!(
                dropped = before - kept.len(),
                kept = kept.len(),
                min_magnitude = self.min_magnitude,
                lookback_days = self.lookback_days,
                "filtered events outside the query window"
            );
        }
        kept
    }
}
