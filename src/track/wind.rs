//! Wind-radius circles
//!
//! Sizes the circles a map draws around a storm center. Radii are fixed per
//! band; only the maximum sustained wind decides which bands apply.

use serde::{Deserialize, Serialize};

/// Wind speed at or above which gale and storm circles are drawn (m/s)
pub const TYPHOON_THRESHOLD_MS: f64 = 32.0;

/// Wind speed at or above which the strong-wind circle is drawn (m/s)
pub const TROPICAL_STORM_THRESHOLD_MS: f64 = 17.0;

/// Kind of wind-radius circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindCircleKind {
    Gale,
    Storm,
    StrongWind,
}

impl WindCircleKind {
    /// Circle radius in kilometers
    pub fn radius_km(&self) -> f64 {
        match self {
            Self::Gale => 200.0,
            Self::Storm => 100.0,
            Self::StrongWind => 50.0,
        }
    }

    /// Sustained wind the circle bounds, in m/s
    pub fn threshold_ms(&self) -> f64 {
        match self {
            Self::Gale => 32.0,
            Self::Storm => 25.0,
            Self::StrongWind => 17.0,
        }
    }
}

impl std::fmt::Display for WindCircleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gale => write!(f, "gale"),
            Self::Storm => write!(f, "storm"),
            Self::StrongWind => write!(f, "strong-wind"),
        }
    }
}

/// A circle around the storm center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindCircle {
    pub kind: WindCircleKind,
    pub radius_km: f64,
    pub threshold_ms: f64,
}

impl From<WindCircleKind> for WindCircle {
    fn from(kind: WindCircleKind) -> Self {
        Self {
            kind,
            radius_km: kind.radius_km(),
            threshold_ms: kind.threshold_ms(),
        }
    }
}

/// Circles for a maximum sustained wind speed, largest first
pub fn wind_circles(wind_speed_ms: f64) -> Vec<WindCircle> {
    let mut circles = Vec::with_capacity(3);

    if wind_speed_ms >= TYPHOON_THRESHOLD_MS {
        circles.push(WindCircleKind::Gale.into());
        circles.push(WindCircleKind::Storm.into());
    }

    if wind_speed_ms >= TROPICAL_STORM_THRESHOLD_MS {
        circles.push(WindCircleKind::StrongWind.into());
    }

    circles
}
