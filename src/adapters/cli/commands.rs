//! CLI Arguments
//!
//! The server has a single mode of operation: serve MCP over stdio.

use clap::Parser;
use std::path::PathBuf;

/// Solana wallet tools served over the Model Context Protocol (stdio)
#[derive(Parser, Debug)]
#[command(
    name = "solana-wallet-mcp",
    version = env!("CARGO_PKG_VERSION"),
    about = "MCP server exposing Solana wallet tools",
    long_about = "Serves get-latest-slot, get-wallet-address, get-wallet-balance and transfer \
                  as MCP tools over stdin/stdout, signing with a local keypair file."
)]
pub struct CliApp {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Solana node host (no scheme); https:// and wss:// are prefixed
    #[arg(long, value_name = "HOST", env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Keypair file (JSON array of secret key bytes)
    #[arg(long, value_name = "FILE", env = "KEYPAIR_PATH")]
    pub keypair: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
