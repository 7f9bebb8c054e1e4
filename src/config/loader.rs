//! Configuration Loader
//!
//! Settings come from three places, highest precedence first:
//! CLI flags / environment (`RPC_URL`, `KEYPAIR_PATH`), an optional TOML
//! file, then built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::market_data::COINGECKO_SOL_PRICE_API;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solana: SolanaSection,
    pub price: PriceSection,
    pub logging: LoggingSection,
}

/// Solana RPC configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolanaSection {
    /// Node host without scheme; `https://` and `wss://` are prefixed
    pub rpc_url: Option<String>,
    /// Wallet keypair path (JSON byte array, NEVER commit this file!)
    pub keypair_path: Option<String>,
    /// How long to wait for `confirmed` after sending a transaction
    pub confirm_timeout_secs: u64,
}

impl Default for SolanaSection {
    fn default() -> Self {
        Self {
            rpc_url: None,
            keypair_path: None,
            confirm_timeout_secs: 90,
        }
    }
}

impl SolanaSection {
    /// RPC host, validated
    pub fn rpc_host(&self) -> Result<&str, ConfigError> {
        let host = self
            .rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingRpcUrl)?;

        if host.contains("://") {
            return Err(ConfigError::ValidationError(format!(
                "RPC_URL must be a host without scheme (https:// and wss:// are added), got {}",
                host
            )));
        }

        Ok(host)
    }

    /// Keypair path with `~` expanded, if configured
    pub fn keypair_path(&self) -> Option<PathBuf> {
        self.keypair_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }
}

/// SOL price feed configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceSection {
    pub endpoint: String,
    /// Freshness window of the cached quote
    pub cache_ttl_secs: u64,
}

impl Default for PriceSection {
    fn default() -> Self {
        Self {
            endpoint: COINGECKO_SOL_PRICE_API.to_string(),
            cache_ttl_secs: 60,
        }
    }
}

impl PriceSection {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: Option<String>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("RPC_URL environment variable is not set")]
    MissingRpcUrl,
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Apply CLI / environment values over file values
    pub fn with_overrides(mut self, rpc_url: Option<String>, keypair_path: Option<String>) -> Self {
        if rpc_url.is_some() {
            self.solana.rpc_url = rpc_url;
        }
        if keypair_path.is_some() {
            self.solana.keypair_path = keypair_path;
        }
        self
    }

    /// Validate the parameters that have no sensible fallback
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solana.confirm_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "confirm_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.price.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "price endpoint cannot be empty".to_string(),
            ));
        }

        if self.price.cache_ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "cache_ttl_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
