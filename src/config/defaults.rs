//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default source for one-shot commands
pub const DEFAULT_SOURCE: &str = "hko";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Default directory for static presentation assets
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default upstream request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "typhoon-track";
