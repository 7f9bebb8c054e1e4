//! Transfer Pipeline
//!
//! load signer -> validate -> blockhash -> compile v0 message -> sign ->
//! send and confirm -> fetch the transaction record.
//!
//! No stage retries. Transfers are serialized so two concurrent requests
//! never race on the same signer.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::adapters::solana::{KeypairFile, WalletError};
use crate::domain::{SubmitOutcome, TransferOutcome, TransferRequest, TransferRequestError};
use crate::ports::{LedgerError, LedgerPort};

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Request(#[from] TransferRequestError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Failed to compile transaction message: {0}")]
    CompileError(String),
}

pub struct TransferPipeline {
    keypair: KeypairFile,
    ledger: Arc<dyn LedgerPort>,
    in_flight: Mutex<()>,
}

impl TransferPipeline {
    pub fn new(keypair: KeypairFile, ledger: Arc<dyn LedgerPort>) -> Self {
        Self {
            keypair,
            ledger,
            in_flight: Mutex::new(()),
        }
    }

    /// Send `amount_sol` SOL from the configured wallet to `to`
    pub async fn execute(&self, to: &str, amount_sol: f64) -> Result<TransferOutcome, TransferError> {
        let signer = self.keypair.load()?;
        let request = TransferRequest::parse(to, amount_sol)?;

        let _guard = self.in_flight.lock().await;

        let blockhash = self.ledger.get_latest_blockhash().await?;
        let message = request
            .compile_message(&signer.pubkey(), blockhash)
            .map_err(|e| TransferError::CompileError(e.to_string()))?;
        let transaction = signer.sign_message_v0(message)?;
        let signature = *transaction
            .signatures
            .first()
            .ok_or_else(|| WalletError::SigningError("no signature produced".to_string()))?;

        tracing::info!(
            "Submitting transfer of {} lamports {} -> {} ({})",
            request.lamports,
            signer.public_key(),
            request.recipient,
            signature
        );

        if let SubmitOutcome::PreflightRejected(failure) = self.ledger.send_and_confirm(&transaction).await? {
            tracing::warn!(
                signature = %signature,
                message = %failure.message,
                error = ?failure.error,
                logs = ?failure.logs,
                units_consumed = ?failure.units_consumed,
                "Transaction rejected in preflight simulation"
            );
            return Ok(TransferOutcome::PreflightRejected {
                signature: signature.to_string(),
                preflight: failure,
            });
        }

        tracing::info!("Transfer {} confirmed", signature);
        let record = self.ledger.get_transaction(&signature).await?;

        Ok(TransferOutcome::Confirmed {
            signature: signature.to_string(),
            transaction: record,
        })
    }
}
