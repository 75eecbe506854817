//! Track synthesis
//!
//! Generates plausible-looking typhoon tracks over the South China Sea when
//! no live track is available. A track runs from a random start in a box
//! south-east of Hong Kong toward a random end in a box to the north-west,
//! linearly interpolated in 6-hour steps with per-point jitter.

use crate::constants::synthesis::{
    COORD_JITTER_DEG, END_LAT, END_LNG, FORECAST_WINDOW, HISTORY_WINDOW, MAX_TRACK_SPAN_HOURS,
    START_LAT, START_LNG, STEP_HOURS,
};
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::track::intensity::classify_by_elapsed_hours;
use crate::track::{IntensityCategory, SourceId, TrackPoint, TyphoonRecord};
use chrono::{DateTime, TimeDelta, Utc};

/// Candidate typhoon names
pub const TYPHOON_NAMES: [&str; 20] = [
    "Mangkhut", "Hato", "Pakhar", "Mawar", "Nesat", "Haitang", "Nalgae", "Banyan", "Kompasu",
    "Lionrock", "Namtheun", "Malou", "Muifa", "Merbok", "Nanmadol", "Talas", "Noru", "Kulap",
    "Roke", "Sonca",
];

/// Per-source synthesis parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProfile {
    /// Headline category reported by the source
    pub intensity: IntensityCategory,
    /// Central pressure range in hPa, `[min, max)`
    pub pressure_range: (f64, f64),
    /// Maximum wind range in m/s, `[min, max)`
    pub wind_range: (f64, f64),
    /// Shift applied to the end box so overlapping sources stay apart
    pub position_offset: f64,
}

/// Synthesis parameters for a source
pub fn profile(source: SourceId) -> SourceProfile {
    match source {
        SourceId::Hko => SourceProfile {
            intensity: IntensityCategory::SevereTyphoon,
            pressure_range: (965.0, 985.0),
            wind_range: (35.0, 50.0),
            position_offset: 0.0,
        },
        SourceId::Cma => SourceProfile {
            intensity: IntensityCategory::Typhoon,
            pressure_range: (980.0, 995.0),
            wind_range: (30.0, 42.0),
            position_offset: 0.1,
        },
        SourceId::Jma => SourceProfile {
            intensity: IntensityCategory::Typhoon,
            pressure_range: (975.0, 993.0),
            wind_range: (32.0, 46.0),
            position_offset: -0.1,
        },
    }
}

/// Pick a random candidate name
pub fn random_name(rng: &dyn RandomSource) -> &'static str {
    TYPHOON_NAMES[rng.index(TYPHOON_NAMES.len())]
}

/// Generate a track between two hour offsets from `base_time`
///
/// Points are emitted at `start, start + 6, ...` while the offset does not
/// exceed `end`. When `end - start` is not a multiple of 6 the last point
/// falls short of `end` and of the end coordinate.
///
/// # Arguments
/// * `base_time` - Anchor instant; offsets are relative to it
/// * `start_offset_hours` - First offset (may be negative)
/// * `end_offset_hours` - Last offset, inclusive
/// * `position_offset` - Degrees added to the end box (-0.1..0.1 typical)
/// * `rng` - Random source for positions and noise
///
/// # Errors
/// `Error::InvalidRange` if `start_offset_hours > end_offset_hours`, the
/// range spans more than `MAX_TRACK_SPAN_HOURS`, or the offsets do not fit
/// in the calendar.
pub fn synthesize_path(
    base_time: DateTime<Utc>,
    start_offset_hours: i64,
    end_offset_hours: i64,
    position_offset: f64,
    rng: &dyn RandomSource,
) -> Result<Vec<TrackPoint>> {
    let invalid = || Error::InvalidRange {
        start: start_offset_hours,
        end: end_offset_hours,
    };

    let span = end_offset_hours.abs_diff(start_offset_hours);
    if start_offset_hours > end_offset_hours || span > MAX_TRACK_SPAN_HOURS {
        return Err(invalid());
    }

    let at_offset = |hours: i64| {
        TimeDelta::try_hours(hours).and_then(|delta| base_time.checked_add_signed(delta))
    };
    if at_offset(start_offset_hours).is_none() || at_offset(end_offset_hours).is_none() {
        return Err(invalid());
    }

    let start_lat = rng.uniform(START_LAT.0, START_LAT.1);
    let start_lng = rng.uniform(START_LNG.0, START_LNG.1);
    let end_lat = rng.uniform(END_LAT.0, END_LAT.1) + position_offset;
    let end_lng = rng.uniform(END_LNG.0, END_LNG.1) + position_offset;

    let mut path = Vec::with_capacity((span / STEP_HOURS as u64 + 1) as usize);

    let mut offset = start_offset_hours;
    while offset <= end_offset_hours {
        let fraction = if span == 0 {
            0.0
        } else {
            offset.abs_diff(start_offset_hours) as f64 / span as f64
        };

        let lat = start_lat + (end_lat - start_lat) * fraction + rng.jitter(COORD_JITTER_DEG);
        let lng = start_lng + (end_lng - start_lng) * fraction + rng.jitter(COORD_JITTER_DEG);

        let time = at_offset(offset).ok_or_else(invalid)?;

        let magnitude = offset.unsigned_abs() as f64;
        let pressure = (1000.0 - 2.0 * magnitude + rng.uniform(0.0, 10.0)).max(0.0);
        let wind_speed = 20.0 + 0.5 * magnitude + rng.uniform(0.0, 5.0);

        path.push(TrackPoint {
            lat,
            lng,
            time,
            intensity: classify_by_elapsed_hours(offset),
            pressure,
            wind_speed,
        });

        match offset.checked_add(STEP_HOURS) {
            Some(next) => offset = next,
            None => break,
        }
    }

    Ok(path)
}

/// Synthesize a complete record for a source
///
/// History covers the 24 hours before `now` and the forecast the 48 hours
/// after it, both using the source's position offset.
pub fn synthesize_record(
    source: SourceId,
    now: DateTime<Utc>,
    rng: &dyn RandomSource,
) -> Result<TyphoonRecord> {
    let params = profile(source);

    let name = random_name(rng).to_string();
    let pressure = rng.uniform(params.pressure_range.0, params.pressure_range.1);
    let wind_speed = rng.uniform(params.wind_range.0, params.wind_range.1);

    let historical_path = synthesize_path(
        now,
        HISTORY_WINDOW.0,
        HISTORY_WINDOW.1,
        params.position_offset,
        rng,
    )?;
    let forecast_path = synthesize_path(
        now,
        FORECAST_WINDOW.0,
        FORECAST_WINDOW.1,
        params.position_offset,
        rng,
    )?;

    Ok(TyphoonRecord {
        name,
        intensity: params.intensity,
        pressure,
        wind_speed,
        source,
        last_update: now,
        historical_path,
        forecast_path,
    })
}

/// Synthesize a record for a source given by name
///
/// # Errors
/// `Error::UnsupportedSource` if the name is not `hko`, `cma` or `jma`.
pub fn synthesize_record_by_name(
    source: &str,
    now: DateTime<Utc>,
    rng: &dyn RandomSource,
) -> Result<TyphoonRecord> {
    synthesize_record(source.parse()?, now, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::pseudo::SeededRandom;
    use crate::track::intensity::CATEGORIES;
    use chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_path_point_count_and_timestamps() {
        let rng = SeededRandom::new(42);
        let base = base_time();

        for (start, end) in [(-24, 0), (0, 48), (-12, 12), (0, 0), (6, 6), (-48, -6)] {
            let path = synthesize_path(base, start, end, 0.0, &rng).unwrap();
            assert_eq!(path.len() as i64, (end - start) / 6 + 1, "range {}..{}", start, end);

            for (k, point) in path.iter().enumerate() {
                let offset = start + 6 * k as i64;
                assert_eq!(point.time, base + TimeDelta::hours(offset));
                assert_eq!(point.intensity, classify_by_elapsed_hours(offset));
            }

            for pair in path.windows(2) {
                assert!(pair[0].time <= pair[1].time);
            }
        }
    }

    #[test]
    fn test_path_non_multiple_range_stops_short() {
        let rng = SeededRandom::new(3);
        let base = base_time();

        let path = synthesize_path(base, 0, 10, 0.0, &rng).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[1].time, base + TimeDelta::hours(6));

        let path = synthesize_path(base, -5, 0, 0.0, &rng).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].time, base - TimeDelta::hours(5));
    }

    #[test]
    fn test_path_invalid_range() {
        let rng = SeededRandom::new(1);
        let err = synthesize_path(base_time(), 6, 0, 0.0, &rng).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 6, end: 0 }));

        let err = synthesize_path(base_time(), 0, i64::MAX, 0.0, &rng).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_path_span_limit() {
        let rng = SeededRandom::new(1);

        let path = synthesize_path(base_time(), -360, 360, 0.0, &rng).unwrap();
        assert_eq!(path.len(), 121);

        let err = synthesize_path(base_time(), -360, 361, 0.0, &rng).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: -360, end: 361 }));

        let err = synthesize_path(base_time(), 0, 12_000_000, 0.0, &rng).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_path_stays_in_region() {
        let rng = SeededRandom::new(2024);
        for _ in 0..50 {
            let path = synthesize_path(base_time(), -24, 48, 0.0, &rng).unwrap();
            for p in &path {
                assert!(p.lat >= 19.9 && p.lat <= 26.1, "lat {} out of region", p.lat);
                assert!(p.lng >= 109.9 && p.lng <= 117.1, "lng {} out of region", p.lng);
            }
            // Start and end points stay within their jittered boxes
            let first = path.first().unwrap();
            let last = path.last().unwrap();
            assert!(first.lat >= 19.9 && first.lat < 22.1);
            assert!(first.lng >= 114.9 && first.lng < 117.1);
            assert!(last.lat >= 23.9 && last.lat < 26.1);
            assert!(last.lng >= 109.9 && last.lng < 112.1);
        }
    }

    #[test]
    fn test_path_position_offset_shifts_end() {
        let rng = SeededRandom::new(8);
        for _ in 0..50 {
            let path = synthesize_path(base_time(), 0, 48, 0.1, &rng).unwrap();
            let last = path.last().unwrap();
            assert!(last.lat >= 24.0 && last.lat < 26.2);
            assert!(last.lng >= 110.0 && last.lng < 112.2);
        }
    }

    #[test]
    fn test_path_pressure_and_wind() {
        let rng = SeededRandom::new(11);
        let path = synthesize_path(base_time(), -24, 48, 0.0, &rng).unwrap();

        for p in &path {
            let hours = (p.time - base_time()).num_hours().abs() as f64;
            assert!(p.pressure >= 1000.0 - 2.0 * hours && p.pressure < 1010.0 - 2.0 * hours);
            assert!(p.wind_speed >= 20.0 + 0.5 * hours && p.wind_speed < 25.0 + 0.5 * hours);
        }
    }

    #[test]
    fn test_path_pressure_never_negative() {
        let rng = SeededRandom::new(5);
        let path = synthesize_path(base_time(), 0, 600, 0.0, &rng).unwrap();
        assert!(path.iter().all(|p| p.pressure >= 0.0 && p.wind_speed >= 0.0));
    }

    #[test]
    fn test_path_reproducible_with_seed() {
        let a = synthesize_path(base_time(), -24, 0, 0.0, &SeededRandom::new(77)).unwrap();
        let b = synthesize_path(base_time(), -24, 0, 0.0, &SeededRandom::new(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_hko_end_to_end() {
        let rng = SeededRandom::new(42);
        let now = base_time();
        let record = synthesize_record(SourceId::Hko, now, &rng).unwrap();

        assert_eq!(record.source, SourceId::Hko);
        assert_eq!(record.last_update, now);
        assert_eq!(record.intensity, IntensityCategory::SevereTyphoon);
        assert!(TYPHOON_NAMES.contains(&record.name.as_str()));
        assert!(record.pressure >= 965.0 && record.pressure < 985.0);
        assert!(record.wind_speed >= 35.0 && record.wind_speed < 50.0);

        let history_offsets: Vec<i64> = record
            .historical_path
            .iter()
            .map(|p| (p.time - now).num_hours())
            .collect();
        assert_eq!(history_offsets, vec![-24, -18, -12, -6, 0]);

        let forecast_offsets: Vec<i64> = record
            .forecast_path
            .iter()
            .map(|p| (p.time - now).num_hours())
            .collect();
        assert_eq!(forecast_offsets, vec![0, 6, 12, 18, 24, 30, 36, 42, 48]);

        let again = synthesize_record(SourceId::Hko, now, &SeededRandom::new(42)).unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn test_record_source_profiles() {
        let rng = SeededRandom::new(9);
        for _ in 0..20 {
            let cma = synthesize_record(SourceId::Cma, base_time(), &rng).unwrap();
            assert_eq!(cma.intensity, IntensityCategory::Typhoon);
            assert!(cma.pressure >= 980.0 && cma.pressure < 995.0);
            assert!(cma.wind_speed >= 30.0 && cma.wind_speed < 42.0);

            let jma = synthesize_record(SourceId::Jma, base_time(), &rng).unwrap();
            assert_eq!(jma.intensity, IntensityCategory::Typhoon);
            assert!(jma.pressure >= 975.0 && jma.pressure < 993.0);
            assert!(jma.wind_speed >= 32.0 && jma.wind_speed < 46.0);
        }
    }

    #[test]
    fn test_record_by_name() {
        let rng = SeededRandom::new(1);
        let record = synthesize_record_by_name("JMA", base_time(), &rng).unwrap();
        assert_eq!(record.source, SourceId::Jma);

        let err = synthesize_record_by_name("noaa", base_time(), &rng).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSource(ref s) if s == "noaa"));
    }

    #[test]
    fn test_profiles_offsets_distinct() {
        let offsets: Vec<f64> = [SourceId::Hko, SourceId::Cma, SourceId::Jma]
            .iter()
            .map(|s| profile(*s).position_offset)
            .collect();
        assert_eq!(offsets, vec![0.0, 0.1, -0.1]);
    }

    #[test]
    fn test_profile_intensities_are_categories() {
        for s in [SourceId::Hko, SourceId::Cma, SourceId::Jma] {
            assert!(CATEGORIES.contains(&profile(s).intensity));
        }
    }
}
