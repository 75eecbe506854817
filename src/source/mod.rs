//! Weather agency data sources
//!
//! Each agency is reached through an adapter implementing `TyphoonSource`.
//! Adapters either produce a `TyphoonRecord` or a `FetchError`; the
//! `service` module turns any `FetchError` into a synthesized record.
//!
//! ## Flex Point
//! Adding a real parser for an agency means replacing its adapter's
//! `fetch_and_parse` body; the service and cache stay unchanged.

pub mod cache;
pub mod feed;
pub mod hko;
pub mod service;

use crate::random::RandomSource;
use crate::track::{SourceId, TyphoonRecord};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why an adapter could not produce a record
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network access disabled (offline mode)")]
    Offline,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("no active tropical cyclone")]
    NoActiveCyclone,

    #[error("{0} feed format is not supported")]
    UnsupportedFormat(SourceId),

    #[error("track synthesis failed: {0}")]
    Synthesis(String),
}

/// Trait for agency adapters
pub trait TyphoonSource: Send + Sync {
    /// Agency this adapter serves
    fn id(&self) -> SourceId;

    /// URL the adapter fetches
    fn endpoint(&self) -> String;

    /// Fetch the agency feed and turn it into a record
    ///
    /// `rng` fills in whatever the feed lacks (tracks, for HKO).
    fn fetch_and_parse(
        &self,
        rng: &dyn RandomSource,
    ) -> impl Future<Output = Result<TyphoonRecord, FetchError>> + Send;

    /// Whether the agency endpoint currently answers with a success status
    fn check_availability(&self) -> impl Future<Output = bool> + Send;
}

/// Availability of one agency endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    pub available: bool,
    pub last_check: chrono::DateTime<chrono::Utc>,
}

/// Build an HTTP client with a request timeout
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("typhoon-track/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// GET a URL and decode the body as JSON
pub(crate) async fn get_json(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Whether a GET to the URL succeeds
pub(crate) async fn is_reachable(client: &reqwest::Client, url: &str) -> bool {
    match client.get(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}
