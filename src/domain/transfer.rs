//! SOL transfer types
//!
//! A transfer request is validated into a recipient `Pubkey` and a lamport
//! amount before anything touches the network. The compiled message is a
//! version-0 message with a single system transfer instruction.

use serde::Serialize;
use solana_sdk::{
    hash::Hash,
    message::{v0, CompileError},
    pubkey::Pubkey,
    system_instruction,
};
use std::str::FromStr;
use thiserror::Error;

use super::units::{sol_to_lamports, AmountError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferRequestError {
    #[error("Invalid recipient address '{address}': {reason}")]
    InvalidRecipient { address: String, reason: String },
    #[error("Invalid transfer amount: {0}")]
    InvalidAmount(#[from] AmountError),
}

/// A validated transfer of native SOL
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub recipient: Pubkey,
    pub lamports: u64,
}

impl TransferRequest {
    /// Parse the recipient address and convert the SOL amount to lamports
    pub fn parse(to: &str, amount_sol: f64) -> Result<Self, TransferRequestError> {
        let recipient = Pubkey::from_str(to).map_err(|e| TransferRequestError::InvalidRecipient {
            address: to.to_string(),
            reason: e.to_string(),
        })?;

        let lamports = sol_to_lamports(amount_sol)?;
        Ok(Self { recipient, lamports })
    }

    /// Compile the v0 message paying from `payer`, anchored to `blockhash`
    pub fn compile_message(&self, payer: &Pubkey, blockhash: Hash) -> Result<v0::Message, CompileError> {
        let instruction = system_instruction::transfer(payer, &self.recipient, self.lamports);
        v0::Message::try_compile(payer, &[instruction], &[], blockhash)
    }
}

/// Structured context of a transaction rejected during preflight simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightFailure {
    pub message: String,
    pub error: Option<String>,
    pub logs: Option<Vec<String>>,
    pub units_consumed: Option<u64>,
}

/// Result of submitting a signed transaction
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Reached `confirmed` commitment
    Confirmed,
    /// Refused by the node before execution
    PreflightRejected(PreflightFailure),
}

/// What the transfer tool reports back
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TransferOutcome {
    Confirmed {
        signature: String,
        transaction: serde_json::Value,
    },
    PreflightRejected {
        signature: String,
        preflight: PreflightFailure,
    },
}

impl TransferOutcome {
    pub fn signature(&self) -> &str {
        match self {
            TransferOutcome::Confirmed { signature, .. } => signature,
            TransferOutcome::PreflightRejected { signature, .. } => signature,
        }
    }

    /// Tool payload: the fetched transaction record for confirmed transfers,
    /// the tagged rejection otherwise
    pub fn to_payload(&self) -> serde_json::Result<String> {
        match self {
            TransferOutcome::Confirmed { transaction, .. } => serde_json::to_string_pretty(transaction),
            rejected => serde_json::to_string_pretty(rejected),
        }
    }
}
