//! Intensity classification
//!
//! Maps warning signal codes, elapsed hours and wind speeds onto the six
//! ordered intensity categories, and ranks free-form labels for filtering.

use serde::{Deserialize, Serialize};

/// Storm intensity category, in ascending order of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityCategory {
    TropicalDepression,
    TropicalStorm,
    SevereTropicalStorm,
    Typhoon,
    SevereTyphoon,
    SuperTyphoon,
}

/// All categories, lowest severity first
pub const CATEGORIES: [IntensityCategory; 6] = [
    IntensityCategory::TropicalDepression,
    IntensityCategory::TropicalStorm,
    IntensityCategory::SevereTropicalStorm,
    IntensityCategory::Typhoon,
    IntensityCategory::SevereTyphoon,
    IntensityCategory::SuperTyphoon,
];

impl IntensityCategory {
    /// Severity rank, 0 (tropical depression) to 5 (super typhoon)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Category for a rank; ranks above 5 clamp to super typhoon
    pub fn from_rank(rank: u8) -> Self {
        CATEGORIES[usize::from(rank).min(CATEGORIES.len() - 1)]
    }

    /// English name
    pub fn label(&self) -> &'static str {
        match self {
            Self::TropicalDepression => "Tropical Depression",
            Self::TropicalStorm => "Tropical Storm",
            Self::SevereTropicalStorm => "Severe Tropical Storm",
            Self::Typhoon => "Typhoon",
            Self::SevereTyphoon => "Severe Typhoon",
            Self::SuperTyphoon => "Super Typhoon",
        }
    }

    /// Chinese name as published by HKO and CMA
    pub fn label_zh(&self) -> &'static str {
        match self {
            Self::TropicalDepression => "热带低压",
            Self::TropicalStorm => "热带风暴",
            Self::SevereTropicalStorm => "强热带风暴",
            Self::Typhoon => "台风",
            Self::SevereTyphoon => "强台风",
            Self::SuperTyphoon => "超强台风",
        }
    }

    /// Sustained wind band in m/s as `[min, max)`
    pub fn wind_band(&self) -> (f64, f64) {
        match self {
            Self::TropicalDepression => (0.0, 17.0),
            Self::TropicalStorm => (17.0, 24.0),
            Self::SevereTropicalStorm => (24.0, 32.0),
            Self::Typhoon => (32.0, 41.0),
            Self::SevereTyphoon => (41.0, 50.0),
            Self::SuperTyphoon => (50.0, 100.0),
        }
    }
}

impl std::fmt::Display for IntensityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for IntensityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace([' ', '-'], "_");
        CATEGORIES
            .iter()
            .copied()
            .find(|c| {
                c.label_zh() == trimmed || c.label().to_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| format!("Unknown intensity category: {}", s))
    }
}

/// Category plus pressure and wind estimates for a warning signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarningEstimate {
    pub category: IntensityCategory,
    /// Central pressure in hPa
    pub pressure_hpa: f64,
    /// Maximum sustained wind in m/s
    pub wind_speed_ms: f64,
}

/// Classify a tropical cyclone warning signal number
///
/// Signals 1, 3, 8, 9 and 10 map to increasing categories. Any other code
/// resolves to a tropical depression at 1000 hPa / 15 m/s.
pub fn classify_by_warning(code: &str) -> WarningEstimate {
    let (category, pressure_hpa, wind_speed_ms) = match code.trim() {
        "1" => (IntensityCategory::TropicalDepression, 1000.0, 15.0),
        "3" => (IntensityCategory::TropicalStorm, 995.0, 25.0),
        "8" => (IntensityCategory::SevereTropicalStorm, 985.0, 35.0),
        "9" => (IntensityCategory::Typhoon, 975.0, 45.0),
        "10" => (IntensityCategory::SevereTyphoon, 965.0, 55.0),
        _ => (IntensityCategory::TropicalDepression, 1000.0, 15.0),
    };

    WarningEstimate {
        category,
        pressure_hpa,
        wind_speed_ms,
    }
}

/// Classify a track point by its distance in hours from the record's anchor
///
/// Severity climbs one category per 8 hours, capped at super typhoon. This
/// is a visual gradient, not a physical model.
pub fn classify_by_elapsed_hours(hours: i64) -> IntensityCategory {
    let index = (hours.unsigned_abs() / 8).min(CATEGORIES.len() as u64 - 1);
    CATEGORIES[index as usize]
}

/// Classify by maximum sustained wind speed in m/s
pub fn classify_by_wind_speed(wind_speed_ms: f64) -> IntensityCategory {
    CATEGORIES
        .iter()
        .rev()
        .copied()
        .find(|c| wind_speed_ms >= c.wind_band().0)
        .unwrap_or(IntensityCategory::TropicalDepression)
}

/// Severity rank of a free-form category label
///
/// Unrecognized labels rank 0.
pub fn severity_rank(label: &str) -> u8 {
    label
        .parse::<IntensityCategory>()
        .map(|c| c.rank())
        .unwrap_or(0)
}

/// Filter predicate: is `label` at or above severity `level`?
pub fn matches_intensity_level(label: &str, level: u8) -> bool {
    severity_rank(label) >= level
}
