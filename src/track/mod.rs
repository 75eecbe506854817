//! Typhoon tracks and their analysis
//!
//! This module handles:
//! - Track point and typhoon record types
//! - Synthesizing tracks and full records
//! - Intensity classification
//! - Great-circle distance and movement speed
//! - Wind-radius circles

pub mod geo;
pub mod intensity;
pub mod synth;
pub mod wind;

pub use intensity::IntensityCategory;

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Weather agency a record is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Hong Kong Observatory
    Hko,
    /// China Meteorological Administration
    Cma,
    /// Japan Meteorological Agency
    Jma,
}

impl SourceId {
    /// Agency display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hko => "Hong Kong Observatory",
            Self::Cma => "China Meteorological Administration",
            Self::Jma => "Japan Meteorological Agency",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hko => write!(f, "hko"),
            Self::Cma => write!(f, "cma"),
            Self::Jma => write!(f, "jma"),
        }
    }
}

impl std::str::FromStr for SourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hko" => Ok(Self::Hko),
            "cma" => Ok(Self::Cma),
            "jma" => Ok(Self::Jma),
            _ => Err(Error::UnsupportedSource(s.to_string())),
        }
    }
}

/// List all supported sources
pub fn available_sources() -> Vec<SourceId> {
    vec![SourceId::Hko, SourceId::Cma, SourceId::Jma]
}

/// One timestamped position/intensity sample along a storm's path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPoint {
    pub lat: f64,
    pub lng: f64,
    pub time: DateTime<Utc>,
    pub intensity: IntensityCategory,
    /// Central pressure in hPa
    pub pressure: f64,
    /// Maximum sustained wind in m/s
    pub wind_speed: f64,
}

impl TrackPoint {
    /// Position of this point
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// A complete typhoon record as served to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TyphoonRecord {
    pub name: String,
    pub intensity: IntensityCategory,
    /// Central pressure in hPa
    pub pressure: f64,
    /// Maximum sustained wind in m/s
    pub wind_speed: f64,
    pub source: SourceId,
    pub last_update: DateTime<Utc>,

    /// Elapsed track, oldest first
    #[serde(rename = "path")]
    pub historical_path: Vec<TrackPoint>,

    /// Projected track, earliest first
    #[serde(rename = "forecast")]
    pub forecast_path: Vec<TrackPoint>,
}

impl TyphoonRecord {
    /// Latest historical point, if any
    pub fn current_position(&self) -> Option<&TrackPoint> {
        self.historical_path.last()
    }

    /// Movement speed between the last two historical points in km/h
    ///
    /// Returns `Ok(None)` when the record has fewer than two historical
    /// points.
    pub fn movement_speed_kmh(&self) -> Result<Option<f64>> {
        match self.historical_path.as_slice() {
            [.., prev, last] => geo::movement_speed_kmh(prev, last).map(Some),
            _ => Ok(None),
        }
    }

    /// Wind-radius circles for the record's maximum wind speed
    pub fn wind_circles(&self) -> Vec<wind::WindCircle> {
        wind::wind_circles(self.wind_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn point(lat: f64, lng: f64, hour: u32) -> TrackPoint {
        TrackPoint {
            lat,
            lng,
            time: Utc.with_ymd_and_hms(2024, 9, 1, hour, 0, 0).unwrap(),
            intensity: IntensityCategory::Typhoon,
            pressure: 975.0,
            wind_speed: 40.0,
        }
    }

    fn record(path: Vec<TrackPoint>) -> TyphoonRecord {
        TyphoonRecord {
            name: "Mangkhut".to_string(),
            intensity: IntensityCategory::Typhoon,
            pressure: 975.0,
            wind_speed: 40.0,
            source: SourceId::Hko,
            last_update: Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap(),
            historical_path: path,
            forecast_path: vec![],
        }
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!(SourceId::from_str("hko").unwrap(), SourceId::Hko);
        assert_eq!(SourceId::from_str("CMA").unwrap(), SourceId::Cma);
        assert_eq!(SourceId::from_str(" jma ").unwrap(), SourceId::Jma);

        let err = SourceId::from_str("noaa").unwrap_err();
        assert!(matches!(err, Error::UnsupportedSource(ref s) if s == "noaa"));
    }

    #[test]
    fn test_source_display_roundtrip() {
        for source in available_sources() {
            assert_eq!(SourceId::from_str(&source.to_string()).unwrap(), source);
        }
    }

    #[test]
    fn test_record_json_shape() {
        let rec = record(vec![point(21.0, 116.0, 6), point(21.5, 115.5, 12)]);
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["source"], "hko");
        assert_eq!(json["intensity"], "typhoon");
        assert!(json.get("windSpeed").is_some());
        assert!(json.get("lastUpdate").is_some());
        assert_eq!(json["path"].as_array().unwrap().len(), 2);
        assert!(json["forecast"].as_array().unwrap().is_empty());
        assert!(json["path"][0].get("windSpeed").is_some());
    }

    #[test]
    fn test_movement_speed_needs_two_points() {
        assert_eq!(record(vec![]).movement_speed_kmh().unwrap(), None);
        assert_eq!(
            record(vec![point(21.0, 116.0, 6)]).movement_speed_kmh().unwrap(),
            None
        );

        let speed = record(vec![point(21.0, 116.0, 6), point(22.0, 116.0, 12)])
            .movement_speed_kmh()
            .unwrap()
            .unwrap();
        // ~111 km over 6 hours
        assert_eq!(speed, 19.0);
    }
}
