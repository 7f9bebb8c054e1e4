//! Ledger port
//!
//! The operations the wallet tools need from a Solana node.

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction};
use thiserror::Error;

use crate::domain::SubmitOutcome;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("RPC request failed: {0}")]
    RpcError(String),
    #[error("Failed to get latest block hash")]
    BlockhashUnavailable,
    #[error("Transaction failed: {0}")]
    TransactionError(String),
    #[error("Signature subscription failed: {0}")]
    SubscriptionError(String),
    #[error("Timeout waiting for confirmation")]
    ConfirmationTimeout,
}

#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Current slot at the client's commitment
    async fn get_slot(&self) -> Result<u64, LedgerError>;

    /// Balance in lamports
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError>;

    /// Recent blockhash used as a transaction's lifetime anchor
    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Send a signed transaction and wait for `confirmed` commitment.
    ///
    /// A preflight simulation rejection is an outcome, not an error.
    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> Result<SubmitOutcome, LedgerError>;

    /// Fetch a transaction record (v0 supported) as JSON
    async fn get_transaction(&self, signature: &Signature) -> Result<serde_json::Value, LedgerError>;
}
