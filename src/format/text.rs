//! Human-readable text output formatter

use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::track::{TrackPoint, TyphoonRecord};

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

fn push_point(output: &mut String, point: &TrackPoint) {
    output.push_str(&format!(
        "  {}  ({:.2}, {:.2})  {:<21}  {:>6.1} hPa  {:>5.1} m/s\n",
        point.time.format("%m-%d %H:%M"),
        point.lat,
        point.lng,
        point.intensity,
        point.pressure,
        point.wind_speed
    ));
}

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable summary"
    }

    fn format(&self, record: &TyphoonRecord) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&format!(
            "Typhoon {} ({})\n",
            record.name,
            record.source.display_name()
        ));
        output.push_str(&format!(
            "Intensity: {} / {}\n",
            record.intensity,
            record.intensity.label_zh()
        ));
        if let Some(current) = record.current_position() {
            output.push_str(&format!(
                "Position: {:.2}N {:.2}E\n",
                current.lat, current.lng
            ));
        }
        output.push_str(&format!("Central pressure: {:.1} hPa\n", record.pressure));
        output.push_str(&format!("Max wind speed: {:.1} m/s\n", record.wind_speed));

        let speed = match record.movement_speed_kmh() {
            Ok(Some(kmh)) => format!("{} km/h", kmh),
            Ok(None) | Err(Error::IndeterminateSpeed) => "-".to_string(),
            Err(e) => return Err(e),
        };
        output.push_str(&format!("Movement speed: {}\n", speed));
        output.push_str(&format!(
            "Last update: {}\n",
            record.last_update.format("%Y-%m-%d %H:%M UTC")
        ));

        let circles = record.wind_circles();
        if !circles.is_empty() {
            output.push_str("\nWind circles:\n");
            for circle in &circles {
                output.push_str(&format!(
                    "  {:<12} {:>4} km  (>= {} m/s)\n",
                    circle.kind.to_string(),
                    circle.radius_km,
                    circle.threshold_ms
                ));
            }
        }

        output.push_str("\nHistory:\n");
        for point in &record.historical_path {
            push_point(&mut output, point);
        }

        output.push_str("\nForecast:\n");
        for point in &record.forecast_path {
            push_point(&mut output, point);
        }

        Ok(output)
    }
}
