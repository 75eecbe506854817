//! Hong Kong Observatory adapter
//!
//! Reads the tropical cyclone warning feed. The feed names the active
//! cyclone and its warning signal but carries no track, so the paths of the
//! resulting record are synthesized around the current time.

use crate::constants::api::HKO_URL;
use crate::constants::synthesis::{FORECAST_WINDOW, HISTORY_WINDOW};
use crate::random::RandomSource;
use crate::source::{build_client, get_json, is_reachable, FetchError, TyphoonSource};
use crate::track::intensity::classify_by_warning;
use crate::track::synth::{profile, synthesize_path};
use crate::track::{SourceId, TyphoonRecord};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Name used when the feed omits one
const UNNAMED: &str = "Unnamed";

/// HKO open data adapter
#[derive(Debug)]
pub struct HkoSource {
    client: reqwest::Client,
    base_url: String,
}

/// Warning feed response
#[derive(Debug, Deserialize)]
struct WarningResponse {
    #[serde(rename = "tcInfo", default)]
    tc_info: Vec<CycloneInfo>,
}

#[derive(Debug, Deserialize)]
struct CycloneInfo {
    name: Option<String>,
    warning: Option<serde_json::Value>,
}

impl CycloneInfo {
    /// Warning signal as text; the feed has used both strings and numbers
    fn warning_code(&self) -> String {
        match &self.warning {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

impl HkoSource {
    /// Create an adapter for the public HKO endpoint
    pub fn new() -> Self {
        Self::with_base_url(HKO_URL, Duration::from_secs(10))
    }

    /// Create an adapter for a specific base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Warning feed URL
    pub fn warning_url(&self) -> String {
        format!(
            "{}/weatherAPI/opendata/weather.php?dataType=tc&lang=en",
            self.base_url
        )
    }
}

impl Default for HkoSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a warning feed body into a record
///
/// Intensity, pressure and wind come from the first cyclone's warning
/// signal; paths are synthesized with the HKO position offset.
pub fn parse_warning_response(
    body: &serde_json::Value,
    now: DateTime<Utc>,
    rng: &dyn RandomSource,
) -> Result<TyphoonRecord, FetchError> {
    let response = WarningResponse::deserialize(body)
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    let cyclone = response
        .tc_info
        .first()
        .ok_or(FetchError::NoActiveCyclone)?;

    let estimate = classify_by_warning(&cyclone.warning_code());
    let name = cyclone
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED)
        .to_string();

    let offset = profile(SourceId::Hko).position_offset;
    let synth_err = |e: crate::error::Error| FetchError::Synthesis(e.to_string());
    let historical_path =
        synthesize_path(now, HISTORY_WINDOW.0, HISTORY_WINDOW.1, offset, rng).map_err(synth_err)?;
    let forecast_path =
        synthesize_path(now, FORECAST_WINDOW.0, FORECAST_WINDOW.1, offset, rng).map_err(synth_err)?;

    Ok(TyphoonRecord {
        name,
        intensity: estimate.category,
        pressure: estimate.pressure_hpa,
        wind_speed: estimate.wind_speed_ms,
        source: SourceId::Hko,
        last_update: now,
        historical_path,
        forecast_path,
    })
}

impl TyphoonSource for HkoSource {
    fn id(&self) -> SourceId {
        SourceId::Hko
    }

    fn endpoint(&self) -> String {
        self.warning_url()
    }

    async fn fetch_and_parse(&self, rng: &dyn RandomSource) -> Result<TyphoonRecord, FetchError> {
        let url = self.warning_url();
        debug!("Fetching HKO warning feed from {}", url);

        let body = get_json(&self.client, &url).await?;
        parse_warning_response(&body, Utc::now(), rng)
    }

    async fn check_availability(&self) -> bool {
        is_reachable(&self.client, &self.warning_url()).await
    }
}
