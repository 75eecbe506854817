//! Typhoon data service
//!
//! Decides, per source, whether to serve a cached record, an adapter
//! record, or a synthesized one. Any `FetchError` falls back to synthesis;
//! every served record is cached for the configured TTL.

use crate::config::Config;
use crate::error::Result;
use crate::random::{get_random, RandomSource};
use crate::source::cache::TtlCache;
use crate::source::feed::FeedSource;
use crate::source::hko::HkoSource;
use crate::source::{ApiStatus, FetchError, TyphoonSource};
use crate::track::synth::synthesize_record;
use crate::track::{available_sources, SourceId, TyphoonRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Cache entry summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStatus {
    /// Age in milliseconds
    pub age_ms: u64,
    /// Size of the serialized record in bytes
    pub size: usize,
    /// Whether the entry is still served
    pub fresh: bool,
}

/// Data-access layer over the three agencies
pub struct TyphoonService {
    hko: HkoSource,
    cma: FeedSource,
    jma: FeedSource,
    cache: RwLock<TtlCache<SourceId, TyphoonRecord>>,
    rng: Arc<dyn RandomSource>,
    offline: bool,
}

impl TyphoonService {
    /// Create a service from configuration
    pub fn new(config: &Config) -> Self {
        Self::with_random(config, get_random(config.synthesis.seed))
    }

    /// Create a service with a specific random source
    pub fn with_random(config: &Config, rng: Arc<dyn RandomSource>) -> Self {
        let timeout = config.request_timeout();
        Self {
            hko: HkoSource::with_base_url(&config.sources.hko_url, timeout),
            cma: FeedSource::new(SourceId::Cma, &config.sources.cma_url, timeout),
            jma: FeedSource::new(SourceId::Jma, &config.sources.jma_url, timeout),
            cache: RwLock::new(TtlCache::new(config.cache_ttl())),
            rng,
            offline: config.sources.offline,
        }
    }

    /// Whether the service skips the network
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Random source used for synthesis
    pub fn rng(&self) -> &dyn RandomSource {
        self.rng.as_ref()
    }

    /// Cache time-to-live
    pub async fn cache_ttl(&self) -> Duration {
        self.cache.read().await.ttl()
    }

    /// Get the record for a source
    ///
    /// Serves a fresh cached record when present; otherwise fetches, falling
    /// back to synthesis on any fetch or parse failure, and caches the result.
    pub async fn get_typhoon_data(&self, source: SourceId) -> Result<TyphoonRecord> {
        if let Some(record) = self.cache.read().await.get(&source) {
            debug!("Serving cached {} record", source);
            return Ok(record.clone());
        }

        let record = match self.fetch_and_parse(source).await {
            Ok(record) => {
                info!("Fetched {} record for {}", source, record.name);
                record
            }
            Err(e) => {
                warn!("Falling back to synthesized {} data: {}", source, e);
                synthesize_record(source, Utc::now(), self.rng())?
            }
        };

        self.cache.write().await.put(source, record.clone());
        Ok(record)
    }

    /// Get the record for a source given by name
    pub async fn get_typhoon_data_by_name(&self, name: &str) -> Result<TyphoonRecord> {
        self.get_typhoon_data(name.parse()?).await
    }

    /// Get records for every source
    pub async fn get_all(&self) -> Result<BTreeMap<SourceId, TyphoonRecord>> {
        let mut records = BTreeMap::new();
        for source in available_sources() {
            records.insert(source, self.get_typhoon_data(source).await?);
        }
        Ok(records)
    }

    /// Ask the source's adapter for a record, without cache or fallback
    pub async fn fetch_and_parse(
        &self,
        source: SourceId,
    ) -> std::result::Result<TyphoonRecord, FetchError> {
        if self.offline {
            return Err(FetchError::Offline);
        }

        let rng = self.rng();
        match source {
            SourceId::Hko => self.hko.fetch_and_parse(rng).await,
            SourceId::Cma => self.cma.fetch_and_parse(rng).await,
            SourceId::Jma => self.jma.fetch_and_parse(rng).await,
        }
    }

    /// Endpoint the source's adapter fetches
    pub fn endpoint(&self, source: SourceId) -> String {
        match source {
            SourceId::Hko => self.hko.endpoint(),
            SourceId::Cma => self.cma.endpoint(),
            SourceId::Jma => self.jma.endpoint(),
        }
    }

    /// Whether the source's endpoint is reachable; always false offline
    pub async fn check_availability(&self, source: SourceId) -> bool {
        if self.offline {
            return false;
        }

        match source {
            SourceId::Hko => self.hko.check_availability().await,
            SourceId::Cma => self.cma.check_availability().await,
            SourceId::Jma => self.jma.check_availability().await,
        }
    }

    /// Availability of every source
    pub async fn api_status(&self) -> BTreeMap<SourceId, ApiStatus> {
        let mut status = BTreeMap::new();
        for source in available_sources() {
            let available = self.check_availability(source).await;
            status.insert(
                source,
                ApiStatus {
                    available,
                    last_check: Utc::now(),
                },
            );
        }
        status
    }

    /// Drop one source's cached record
    pub async fn evict(&self, source: SourceId) -> bool {
        self.cache.write().await.evict(&source).is_some()
    }

    /// Drop stale cache entries; returns how many were removed
    pub async fn evict_expired(&self) -> usize {
        self.cache.write().await.evict_expired()
    }

    /// Drop every cached record
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
        info!("Record cache cleared");
    }

    /// Age and size of every cache entry
    pub async fn cache_status(&self) -> BTreeMap<SourceId, CacheEntryStatus> {
        let cache = self.cache.read().await;
        let ttl = cache.ttl();
        cache
            .entries()
            .into_iter()
            .map(|(source, age, record)| {
                let size = serde_json::to_string(record).map(|s| s.len()).unwrap_or(0);
                (
                    source,
                    CacheEntryStatus {
                        age_ms: age.as_millis() as u64,
                        size,
                        fresh: age < ttl,
                    },
                )
            })
            .collect()
    }
}
