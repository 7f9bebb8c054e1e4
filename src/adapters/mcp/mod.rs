//! MCP Adapter
//!
//! Registers the wallet tools with an `rmcp` server served over stdio.

mod server;

pub use server::{TransferArgs, WalletMcpServer};
