//! CLI Adapter
//!
//! Command-line interface for the wallet MCP server.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::CliApp;

/// Parse process arguments (and `RPC_URL` / `KEYPAIR_PATH` from the environment)
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
