//! Centralized constants for the typhoon-track crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// Track synthesis parameters
pub mod synthesis {
    /// Hours between consecutive track points
    pub const STEP_HOURS: i64 = 6;

    /// Maximum coordinate jitter in degrees (applied as +/-)
    pub const COORD_JITTER_DEG: f64 = 0.1;

    /// Latitude box for the track start point
    pub const START_LAT: (f64, f64) = (20.0, 22.0);

    /// Longitude box for the track start point
    pub const START_LNG: (f64, f64) = (115.0, 117.0);

    /// Latitude box for the track end point (before offset)
    pub const END_LAT: (f64, f64) = (24.0, 26.0);

    /// Longitude box for the track end point (before offset)
    pub const END_LNG: (f64, f64) = (110.0, 112.0);

    /// Historical path window in hours relative to now
    pub const HISTORY_WINDOW: (i64, i64) = (-24, 0);

    /// Forecast path window in hours relative to now
    pub const FORECAST_WINDOW: (i64, i64) = (0, 48);

    /// Longest hour range a single track may cover (30 days)
    pub const MAX_TRACK_SPAN_HOURS: u64 = 24 * 30;
}

/// External API endpoints
pub mod api {
    /// Hong Kong Observatory open data API
    pub const HKO_URL: &str = "https://data.weather.gov.hk";

    /// China Meteorological Administration typhoon list
    pub const CMA_URL: &str = "https://tcdata.typhoon.org.cn/api/typhoon/list";

    /// Japan Meteorological Agency typhoon feed
    pub const JMA_URL: &str = "https://www.jma.go.jp/bosai/typhoon/data/typhoon.json";
}

/// Cache settings
pub mod cache {
    /// Record cache time-to-live in milliseconds (5 minutes)
    pub const RECORD_TTL_MS: u64 = 300_000;
}
