//! Track command handler
//!
//! Synthesizes a bare track around the current time.

use crate::config::Config;
use crate::error::Result;
use crate::random::get_random;
use crate::track::synth::synthesize_path;
use crate::track::TrackPoint;
use chrono::Utc;
use clap::Args;

/// Track command arguments
#[derive(Args)]
pub struct TrackArgs {
    /// First offset in hours from now (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    pub start: i64,

    /// Last offset in hours from now, inclusive
    #[arg(long, allow_hyphen_values = true)]
    pub end: i64,

    /// Degrees added to the end position
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub offset: f64,

    /// Seed for reproducible synthesis
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Run the track command
pub fn run(args: TrackArgs) -> Result<()> {
    super::init_logging("warn");

    let seed = match args.seed {
        Some(seed) => Some(seed),
        None => Config::load()?.synthesis.seed,
    };
    let rng = get_random(seed);

    let points = synthesize_path(Utc::now(), args.start, args.end, args.offset, rng.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        print!("{}", render_table(&points));
    }

    Ok(())
}

/// Render points as an aligned table
fn render_table(points: &[TrackPoint]) -> String {
    let mut out = format!(
        "{:<17} {:>8} {:>9} {:>8} {:>6}  {}\n",
        "Time (UTC)", "Lat", "Lng", "hPa", "m/s", "Intensity"
    );

    for p in points {
        out.push_str(&format!(
            "{:<17} {:>8.4} {:>9.4} {:>8.1} {:>6.1}  {}\n",
            p.time.format("%Y-%m-%d %H:%M"),
            p.lat,
            p.lng,
            p.pressure,
            p.wind_speed,
            p.intensity
        ));
    }

    out
}
