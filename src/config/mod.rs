//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `AILMENT_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD,
    DEFAULT_RESULT_CACHE_CAPACITY, DEFAULT_STORE_TIMEOUT_MS, STORE_READ_ATTEMPTS,
};
use crate::pipeline::{PipelineConfig, RelevanceThresholds};
use crate::repository::RepositoryConfig;
use crate::scoring::ScorerConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `AILMENT_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// JSON file of condition records. Unset means the built-in set.
    pub conditions_path: Option<PathBuf>,

    /// Condition snapshot and result cache lifetime in seconds. Default: `3600`.
    pub cache_ttl_secs: u64,

    /// Per-attempt store read deadline in milliseconds. Default: `2000`.
    pub store_timeout_ms: u64,

    /// Max memoized pipeline results. Default: `10_000`.
    pub result_cache_capacity: u64,

    /// Scores strictly above this are high relevance. Default: `0.7`.
    pub high_threshold: f64,

    /// Scores at or above this are medium relevance. Default: `0.4`.
    pub medium_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            conditions_path: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            result_cache_capacity: DEFAULT_RESULT_CACHE_CAPACITY,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            medium_threshold: DEFAULT_MEDIUM_THRESHOLD,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "AILMENT_PORT";
    const ENV_BIND_ADDR: &'static str = "AILMENT_BIND_ADDR";
    const ENV_CONDITIONS_PATH: &'static str = "AILMENT_CONDITIONS_PATH";
    const ENV_CACHE_TTL_SECS: &'static str = "AILMENT_CACHE_TTL_SECS";
    const ENV_STORE_TIMEOUT_MS: &'static str = "AILMENT_STORE_TIMEOUT_MS";
    const ENV_RESULT_CACHE_CAPACITY: &'static str = "AILMENT_RESULT_CACHE_CAPACITY";
    const ENV_HIGH_THRESHOLD: &'static str = "AILMENT_HIGH_THRESHOLD";
    const ENV_MEDIUM_THRESHOLD: &'static str = "AILMENT_MEDIUM_THRESHOLD";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let conditions_path = Self::parse_optional_path_from_env(Self::ENV_CONDITIONS_PATH);
        let cache_ttl_secs =
            Self::parse_u64_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl_secs);
        let store_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_STORE_TIMEOUT_MS, defaults.store_timeout_ms);
        let result_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_RESULT_CACHE_CAPACITY,
            defaults.result_cache_capacity,
        );
        let high_threshold =
            Self::parse_f64_from_env(Self::ENV_HIGH_THRESHOLD, defaults.high_threshold)?;
        let medium_threshold =
            Self::parse_f64_from_env(Self::ENV_MEDIUM_THRESHOLD, defaults.medium_threshold)?;

        Ok(Self {
            port,
            bind_addr,
            conditions_path,
            cache_ttl_secs,
            store_timeout_ms,
            result_cache_capacity,
            high_threshold,
            medium_threshold,
        })
    }

    /// Checks the condition file and threshold ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.conditions_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        let (medium, high) = (self.medium_threshold, self.high_threshold);
        if !(0.0..=1.0).contains(&medium) || !(0.0..=1.0).contains(&high) || medium >= high {
            return Err(ConfigError::InvalidThresholds { medium, high });
        }

        if self.store_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_STORE_TIMEOUT_MS,
                value: self.store_timeout_ms.to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn repository_config(&self) -> RepositoryConfig {
        RepositoryConfig {
            ttl: self.cache_ttl(),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
            read_attempts: STORE_READ_ATTEMPTS,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            scorer: ScorerConfig::default(),
            thresholds: RelevanceThresholds {
                high: self.high_threshold,
                medium: self.medium_threshold,
            },
            result_cache_capacity: self.result_cache_capacity,
            result_cache_ttl: self.cache_ttl(),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_f64_from_env(var_name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::FloatParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
