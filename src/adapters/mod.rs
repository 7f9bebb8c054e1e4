//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the outer surfaces:
//! - Solana: RPC/pubsub client and keypair handling
//! - Market Data: SOL price feed and its cache
//! - MCP: tool registration and stdio server
//! - CLI: command-line arguments

pub mod solana;
pub mod market_data;
pub mod mcp;
pub mod cli;

pub use solana::{KeypairFile, SolanaClient, WalletManager};
pub use market_data::{CoinGeckoPriceClient, PriceCache};
pub use mcp::WalletMcpServer;
pub use cli::CliApp;
