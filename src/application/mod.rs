//! Application Layer - Use cases
//!
//! - `TransferPipeline`: build, sign, submit and confirm a SOL transfer
//! - `WalletTools`: the four tool operations served over MCP

pub mod transfer;
pub mod wallet_tools;

pub use transfer::{TransferError, TransferPipeline};
pub use wallet_tools::WalletTools;
