//! Configuration management for the OWM proxy
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with OWM_PROXY_ prefix
//! 4. Command-line flags, applied by the caller after loading

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::FailurePolicy;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_UNITS: &str = "metric";
pub const DEFAULT_EXCLUDE: &str = "minutely,hourly,daily";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub upstream: UpstreamConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// What to do when a request fails
    pub on_failure: FailurePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL the `/onecall` path is appended to
    pub base_url: String,

    /// Unit system used when the caller omits `units`
    pub default_units: String,

    /// Exclusion list used when the caller omits `exclude`
    pub default_exclude: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Log the caller's API key in plaintext instead of redacted
    pub reveal_api_key: bool,

    /// Emit JSON log lines
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("OWM_PROXY_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.on_failure", "terminate")?
            .set_default("upstream.base_url", DEFAULT_UPSTREAM_BASE_URL)?
            .set_default("upstream.default_units", DEFAULT_UNITS)?
            .set_default("upstream.default_exclude", DEFAULT_EXCLUDE)?
            .set_default("logging.reveal_api_key", false)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (OWM_PROXY_ prefix)
            .add_source(
                Environment::with_prefix("OWM_PROXY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Apply the `--port` flag on top of the loaded configuration
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            on_failure: FailurePolicy::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            default_units: DEFAULT_UNITS.to_string(),
            default_exclude: DEFAULT_EXCLUDE.to_string(),
        }
    }
}
