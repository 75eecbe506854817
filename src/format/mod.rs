//! Output formatters
//!
//! Provides trait-based output formatting for typhoon records.

pub mod gpx;
pub mod json;
pub mod text;

use crate::error::Result;
use crate::track::TyphoonRecord;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a typhoon record
    fn format(&self, record: &TyphoonRecord) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON record".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable summary".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX tracks for history and forecast".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) fn sample_record() -> TyphoonRecord {
    use crate::random::pseudo::SeededRandom;
    use crate::track::{synth::synthesize_record, SourceId};
    use chrono::{TimeZone, Utc};

    let now = Utc.with_ymd_and_hms(2024, 9, 15, 12, 0, 0).unwrap();
    synthesize_record(SourceId::Hko, now, &SeededRandom::new(12345)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("GPX").is_some());
    }

    #[test]
    fn test_available_formats_match_formatters() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        for info in &formats {
            let formatter = get_formatter(&info.name).unwrap();
            assert_eq!(formatter.name(), info.name);
            assert_eq!(formatter.description(), info.description);
        }
    }
}
