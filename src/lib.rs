//! typhoon-track: Typhoon track synthesis and multi-agency data service
//!
//! A library and CLI tool that serves typhoon records for Hong Kong from the
//! Hong Kong Observatory, the China Meteorological Administration and the
//! Japan Meteorological Agency, synthesizing plausible tracks whenever an
//! agency cannot be reached or parsed.
//!
//! ## Features
//!
//! - Track synthesis over arbitrary hour ranges
//! - Intensity classification by warning signal, elapsed time or wind speed
//! - Great-circle distance, movement speed and wind-radius circles
//! - Per-agency record cache with a time-to-live
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use typhoon_track::random::pseudo::SeededRandom;
//! use typhoon_track::track::synth::{synthesize_path, synthesize_record};
//! use typhoon_track::track::SourceId;
//!
//! let rng = SeededRandom::new(42);
//! let now = chrono::Utc::now();
//!
//! // Six-hourly points from 24 hours ago to now
//! let path = synthesize_path(now, -24, 0, 0.0, &rng).unwrap();
//! assert_eq!(path.len(), 5);
//!
//! // A full record with history and forecast
//! let record = synthesize_record(SourceId::Hko, now, &rng).unwrap();
//! println!("{} at {:.1} hPa", record.name, record.pressure);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod random;
pub mod server;
pub mod source;
pub mod track;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use track::{IntensityCategory, SourceId, TrackPoint, TyphoonRecord};
