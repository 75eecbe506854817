//! GPX output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::track::{TrackPoint, TyphoonRecord};

/// GPX formatter - outputs one track for history and one for the forecast
pub struct GpxFormatter;

/// Escape text for XML element content
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn push_track(gpx: &mut String, name: &str, points: &[TrackPoint]) {
    gpx.push_str("  <trk>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape(name)));
    gpx.push_str("    <trkseg>\n");

    for point in points {
        gpx.push_str(&format!(
            r#"      <trkpt lat="{:.4}" lon="{:.4}">"#,
            point.lat, point.lng
        ));
        gpx.push('\n');
        gpx.push_str(&format!("        <time>{}</time>\n", point.time.to_rfc3339()));
        gpx.push_str(&format!(
            "        <desc>{}, {:.1} hPa, {:.1} m/s</desc>\n",
            point.intensity, point.pressure, point.wind_speed
        ));
        gpx.push_str("      </trkpt>\n");
    }

    gpx.push_str("    </trkseg>\n");
    gpx.push_str("  </trk>\n");
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX tracks for history and forecast"
    }

    fn format(&self, record: &TyphoonRecord) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="typhoon-track">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>{} ({})</name>\n",
            escape(&record.name),
            record.source
        ));
        gpx.push_str(&format!("    <time>{}</time>\n", record.last_update.to_rfc3339()));
        gpx.push_str("  </metadata>\n");

        push_track(&mut gpx, &format!("{} history", record.name), &record.historical_path);
        push_track(&mut gpx, &format!("{} forecast", record.name), &record.forecast_path);

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
