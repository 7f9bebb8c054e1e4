//! Configuration Module
//!
//! Loads and validates configuration from TOML files and environment overrides.

pub mod loader;

pub use loader::{
    Config, ConfigError, LoggingSection, PriceSection, SolanaSection, load_config,
};
