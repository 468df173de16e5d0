use crate::freshness::FreshnessPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FreshnessConfig {
    pub window_secs: u64,
    pub require_all_fresh: bool,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub max_wait_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub server: Server,
    pub upstream: UpstreamConfig,
    pub freshness: FreshnessConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 9090,
            },
            upstream: UpstreamConfig {
                endpoint: "https://dev-api.shrimpy.io".to_string(),
                request_timeout_secs: 10,
            },
            freshness: FreshnessConfig {
                window_secs: 58,
                require_all_fresh: false,
                initial_backoff_ms: 250,
                max_backoff_ms: 2_000,
                max_wait_secs: 30,
            },
        }
    }
}

impl Settings {
    /// Loads settings from, in increasing priority: built-in defaults, an
    /// optional `config.{toml,yaml,json}` file, and `EXCHANGE_RATE_*`
    /// environment variables (`.env` is read first when present).
    ///
    /// Nested keys use a double underscore, e.g. `EXCHANGE_RATE_SERVER__PORT`.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("EXCHANGE_RATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn freshness_policy(&self) -> FreshnessPolicy {
        let freshness = &self.freshness;
        FreshnessPolicy {
            window: Duration::from_secs(freshness.window_secs),
            require_all_fresh: freshness.require_all_fresh,
            initial_backoff: Duration::from_millis(freshness.initial_backoff_ms),
            max_backoff: Duration::from_millis(freshness.max_backoff_ms),
            max_wait: Duration::from_secs(freshness.max_wait_secs),
        }
    }
}
