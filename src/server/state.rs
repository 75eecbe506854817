//! Server shared state
//!
//! Holds configuration and the typhoon data service for the HTTP server.

use crate::config::Config;
use crate::source::service::TyphoonService;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Data-access layer with its record cache
    pub service: TyphoonService,

    /// Directory served for presentation assets
    static_dir: String,

    started_at: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        let service = TyphoonService::new(&config);
        Self::with_service(config, service)
    }

    /// Create application state around an existing service
    pub fn with_service(config: Config, service: TyphoonService) -> Self {
        let static_dir = config.server.static_dir.clone();
        Self {
            config: Arc::new(RwLock::new(config)),
            service,
            static_dir,
            started_at: Instant::now(),
        }
    }

    /// Directory served for presentation assets
    pub fn static_dir(&self) -> &str {
        &self.static_dir
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
