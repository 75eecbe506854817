//! CMA and JMA feed adapters
//!
//! Both agencies publish JSON typhoon feeds whose formats are not decoded
//! here. The adapters still fetch the feed, so outages and non-JSON bodies
//! are reported as such, and otherwise answer `UnsupportedFormat`, which
//! routes the service to synthesized data.

use crate::constants::api::{CMA_URL, JMA_URL};
use crate::random::RandomSource;
use crate::source::{build_client, get_json, is_reachable, FetchError, TyphoonSource};
use crate::track::{SourceId, TyphoonRecord};
use std::time::Duration;
use tracing::debug;

/// Adapter for an agency feed without a decoder
#[derive(Debug)]
pub struct FeedSource {
    id: SourceId,
    client: reqwest::Client,
    url: String,
}

impl FeedSource {
    /// Create an adapter for an agency and URL
    pub fn new(id: SourceId, url: &str, timeout: Duration) -> Self {
        Self {
            id,
            client: build_client(timeout),
            url: url.to_string(),
        }
    }

    /// China Meteorological Administration typhoon list
    pub fn cma() -> Self {
        Self::new(SourceId::Cma, CMA_URL, Duration::from_secs(10))
    }

    /// Japan Meteorological Agency typhoon feed
    pub fn jma() -> Self {
        Self::new(SourceId::Jma, JMA_URL, Duration::from_secs(10))
    }
}

impl TyphoonSource for FeedSource {
    fn id(&self) -> SourceId {
        self.id
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }

    async fn fetch_and_parse(&self, _rng: &dyn RandomSource) -> Result<TyphoonRecord, FetchError> {
        debug!("Fetching {} feed from {}", self.id, self.url);

        let _body = get_json(&self.client, &self.url).await?;
        Err(FetchError::UnsupportedFormat(self.id))
    }

    async fn check_availability(&self) -> bool {
        is_reachable(&self.client, &self.url).await
    }
}
