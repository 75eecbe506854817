//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/typhoon-track/config.toml

pub mod defaults;

use crate::constants::api::{CMA_URL, HKO_URL, JMA_URL};
use crate::constants::cache::RECORD_TTL_MS;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Defaults for one-shot commands
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Record cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream agency settings
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Track synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// Defaults for one-shot commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default source (hko, cma, jma)
    #[serde(default = "default_source")]
    pub source: String,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for presentation assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Record cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of a cached record in milliseconds
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

/// Upstream agency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Skip the network and always synthesize
    #[serde(default)]
    pub offline: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// HKO open data base URL
    #[serde(default = "default_hko_url")]
    pub hko_url: String,

    /// CMA typhoon list URL
    #[serde(default = "default_cma_url")]
    pub cma_url: String,

    /// JMA typhoon feed URL
    #[serde(default = "default_jma_url")]
    pub jma_url: String,
}

/// Track synthesis settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Fixed RNG seed; unset means a fresh track on every synthesis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// Default value functions for serde
fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}
fn default_ttl_ms() -> u64 {
    RECORD_TTL_MS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_hko_url() -> String {
    HKO_URL.to_string()
}
fn default_cma_url() -> String {
    CMA_URL.to_string()
}
fn default_jma_url() -> String {
    JMA_URL.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            offline: false,
            timeout_secs: default_timeout_secs(),
            hko_url: default_hko_url(),
            cma_url: default_cma_url(),
            jma_url: default_jma_url(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path
    ///
    /// Creates default config there if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "source"] => Some(self.defaults.source.clone()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "static_dir"] => Some(self.server.static_dir.clone()),

            ["cache", "ttl_ms"] => Some(self.cache.ttl_ms.to_string()),

            ["sources", "offline"] => Some(self.sources.offline.to_string()),
            ["sources", "timeout_secs"] => Some(self.sources.timeout_secs.to_string()),
            ["sources", "hko_url"] => Some(self.sources.hko_url.clone()),
            ["sources", "cma_url"] => Some(self.sources.cma_url.clone()),
            ["sources", "jma_url"] => Some(self.sources.jma_url.clone()),

            ["synthesis", "seed"] => Some(
                self.synthesis
                    .seed
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            ),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "source"] => {
                let source: crate::track::SourceId = value.parse()?;
                self.defaults.source = source.to_string();
            }
            ["defaults", "format"] => {
                if crate::format::get_formatter(value).is_none() {
                    return Err(Error::Config(format!("Unknown format: {}", value)));
                }
                self.defaults.format = value.to_lowercase();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }
            ["server", "static_dir"] => {
                self.server.static_dir = value.to_string();
            }

            ["cache", "ttl_ms"] => {
                self.cache.ttl_ms = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid TTL value: {}", value)))?;
            }

            ["sources", "offline"] => {
                self.sources.offline = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid boolean value: {}", value)))?;
            }
            ["sources", "timeout_secs"] => {
                self.sources.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["sources", "hko_url"] => {
                self.sources.hko_url = value.to_string();
            }
            ["sources", "cma_url"] => {
                self.sources.cma_url = value.to_string();
            }
            ["sources", "jma_url"] => {
                self.sources.jma_url = value.to_string();
            }

            ["synthesis", "seed"] => {
                self.synthesis.seed = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        Error::Config(format!("Invalid seed value: {}", value))
                    })?)
                };
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.source",
            "defaults.format",
            "server.host",
            "server.port",
            "server.static_dir",
            "cache.ttl_ms",
            "sources.offline",
            "sources.timeout_secs",
            "sources.hko_url",
            "sources.cma_url",
            "sources.jma_url",
            "synthesis.seed",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Record cache time-to-live
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache.ttl_ms)
    }

    /// Upstream request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.sources.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.source, "hko");
        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cache.ttl_ms, 300_000);
        assert!(!config.sources.offline);
        assert_eq!(config.synthesis.seed, None);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.source"), Some("hko".to_string()));

        config.set("defaults.source", "JMA").unwrap();
        assert_eq!(config.get("defaults.source"), Some("jma".to_string()));

        config.set("cache.ttl_ms", "60000").unwrap();
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));

        config.set("synthesis.seed", "42").unwrap();
        assert_eq!(config.synthesis.seed, Some(42));
        config.set("synthesis.seed", "").unwrap();
        assert_eq!(config.synthesis.seed, None);
        assert_eq!(config.get("synthesis.seed"), Some(String::new()));

        config.set("sources.offline", "true").unwrap();
        assert!(config.sources.offline);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_port").is_err());
        assert!(config.set("sources.offline", "maybe").is_err());
        assert!(config.set("synthesis.seed", "-1").is_err());
        assert!(matches!(
            config.set("defaults.source", "noaa"),
            Err(Error::UnsupportedSource(_))
        ));
        assert!(config.set("defaults.format", "pdf").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("typhoon-track").join("config.toml");

        let mut config = Config::default();
        config.defaults.source = "cma".to_string();
        config.synthesis.seed = Some(7);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.source, "cma");
        assert_eq!(loaded.synthesis.seed, Some(7));
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 8080\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.cache.ttl_ms, 300_000);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[cache]"));
        assert!(toml.contains("[sources]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_available_keys_all_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
    }
}
