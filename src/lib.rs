//! Solana Wallet MCP - wallet tools over the Model Context Protocol
//!
//! Serves four tools over stdio: latest slot, wallet address, wallet balance
//! (valued in USD) and SOL transfer, signing with a local keypair file.
//!
//! # Modules
//!
//! - `domain`: Conversion, transfer and balance types
//! - `ports`: Trait abstractions (LedgerPort, PriceSource, Clock)
//! - `adapters`: External implementations (Solana, CoinGecko, MCP, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Transfer pipeline and tool operations

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
