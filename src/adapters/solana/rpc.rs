use async_trait::async_trait;
use futures_util::StreamExt;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::pubsub_client::PubsubClient,
    rpc_client::RpcClient,
    rpc_config::{RpcSignatureSubscribeConfig, RpcTransactionConfig},
    rpc_request::{RpcError, RpcResponseErrorData},
    rpc_response::{ProcessedSignatureResult, Response as RpcResponse, RpcSignatureResult},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::error::Elapsed;

use crate::domain::{PreflightFailure, SubmitOutcome};
use crate::ports::{LedgerError, LedgerPort};

/// Solana node access: blocking JSON-RPC over HTTPS plus a WebSocket
/// subscription channel for confirmations, both on the same host.
#[derive(Clone)]
pub struct SolanaClient {
    client: Arc<RpcClient>,
    ws_url: String,
    pubsub: Arc<Mutex<Option<Arc<PubsubClient>>>>,
    confirm_timeout: Duration,
}

impl SolanaClient {
    pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(90);

    /// Create a client for explicit HTTP and WebSocket endpoints
    pub fn new(rpc_url: String, ws_url: String) -> Self {
        let client = Arc::new(RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()));
        Self {
            client,
            ws_url,
            pubsub: Arc::new(Mutex::new(None)),
            confirm_timeout: Self::DEFAULT_CONFIRM_TIMEOUT,
        }
    }

    /// Create a client for `https://<host>` and `wss://<host>`
    pub fn for_host(host: &str) -> Self {
        Self::new(format!("https://{}", host), format!("wss://{}", host))
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    pub fn rpc_url(&self) -> String {
        self.client.url()
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Subscription client, connected on first use and reused until it is forgotten
    async fn pubsub(&self) -> Result<Arc<PubsubClient>, LedgerError> {
        let mut current = self.pubsub.lock().await;
        if let Some(client) = current.as_ref() {
            return Ok(Arc::clone(client));
        }

        tracing::debug!("Connecting signature subscriptions to {}", self.ws_url);
        let client = PubsubClient::new(&self.ws_url)
            .await
            .map(Arc::new)
            .map_err(|e| LedgerError::SubscriptionError(e.to_string()))?;
        *current = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Drop a dead subscription client so the next call reconnects
    async fn forget_pubsub(&self, stale: &Arc<PubsubClient>) {
        let mut current = self.pubsub.lock().await;
        if current.as_ref().is_some_and(|client| Arc::ptr_eq(client, stale)) {
            tracing::warn!("Signature subscription connection to {} lost, reconnecting on next use", self.ws_url);
            *current = None;
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> LedgerError {
    LedgerError::RpcError(format!("Task join error: {}", e))
}

/// Extract simulation context when the node refused the transaction in preflight
fn preflight_failure(err: &ClientError) -> Option<PreflightFailure> {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            message,
            data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
            ..
        }) => Some(PreflightFailure {
            message: message.clone(),
            error: simulation.err.as_ref().map(|e| format!("{:?}", e)),
            logs: simulation.logs.clone(),
            units_consumed: simulation.units_consumed,
        }),
        _ => None,
    }
}

/// Map the first signature notification (or its absence) to a submit outcome
fn confirmation_outcome(
    notification: Result<Option<RpcResponse<RpcSignatureResult>>, Elapsed>,
) -> Result<SubmitOutcome, LedgerError> {
    match notification {
        Err(_) => Err(LedgerError::ConfirmationTimeout),
        Ok(None) => Err(LedgerError::SubscriptionError(
            "subscription closed before confirmation".to_string(),
        )),
        Ok(Some(response)) => match response.value {
            RpcSignatureResult::ProcessedSignature(ProcessedSignatureResult { err: Some(err), .. }) => {
                Err(LedgerError::TransactionError(format!("{:?}", err)))
            }
            _ => Ok(SubmitOutcome::Confirmed),
        },
    }
}

#[async_trait]
impl LedgerPort for SolanaClient {
    async fn get_slot(&self) -> Result<u64, LedgerError> {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_slot()
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        let address = *address;
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client
                .get_balance(&address)
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        let client = Arc::clone(&self.client);
        tokio::task::spawn_blocking(move || {
            client.get_latest_blockhash().map_err(|e| {
                tracing::warn!("getLatestBlockhash failed: {}", e);
                LedgerError::BlockhashUnavailable
            })
        })
        .await
        .map_err(join_error)?
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> Result<SubmitOutcome, LedgerError> {
        let signature = *transaction
            .signatures
            .first()
            .ok_or_else(|| LedgerError::TransactionError("transaction carries no signature".to_string()))?;

        // Subscribe before sending so the confirmation cannot be missed
        let pubsub = self.pubsub().await?;
        let config = RpcSignatureSubscribeConfig {
            commitment: Some(CommitmentConfig::confirmed()),
            enable_received_notification: Some(false),
        };
        let (mut notifications, unsubscribe) = match pubsub.signature_subscribe(&signature, Some(config)).await {
            Ok(subscription) => subscription,
            Err(e) => {
                self.forget_pubsub(&pubsub).await;
                return Err(LedgerError::SubscriptionError(e.to_string()));
            }
        };

        let tx = transaction.clone();
        let client = Arc::clone(&self.client);
        let sent = tokio::task::spawn_blocking(move || client.send_transaction(&tx))
            .await
            .map_err(join_error)?;

        if let Err(err) = sent {
            unsubscribe().await;
            return match preflight_failure(&err) {
                Some(failure) => Ok(SubmitOutcome::PreflightRejected(failure)),
                None => Err(LedgerError::TransactionError(err.to_string())),
            };
        }
        tracing::info!("Sent transaction {}, awaiting confirmation", signature);

        let notification = tokio::time::timeout(self.confirm_timeout, notifications.next()).await;
        unsubscribe().await;
        if matches!(notification, Ok(None)) {
            self.forget_pubsub(&pubsub).await;
        }

        confirmation_outcome(notification)
    }

    async fn get_transaction(&self, signature: &Signature) -> Result<serde_json::Value, LedgerError> {
        let signature = *signature;
        let client = Arc::clone(&self.client);
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };

        let transaction = tokio::task::spawn_blocking(move || {
            client
                .get_transaction_with_config(&signature, config)
                .map_err(|e| LedgerError::RpcError(e.to_string()))
        })
        .await
        .map_err(join_error)??;

        serde_json::to_value(transaction).map_err(|e| LedgerError::RpcError(format!("Parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::solana::WalletManager;
    use crate::domain::TransferRequest;
    use solana_client::rpc_response::RpcSimulateTransactionResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    fn notification(value: serde_json::Value) -> RpcResponse<RpcSignatureResult> {
        serde_json::from_value(serde_json::json!({ "context": { "slot": 1 }, "value": value })).unwrap()
    }

    fn signed_transfer() -> VersionedTransaction {
        let wallet = WalletManager::new_random();
        let request = TransferRequest::parse("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", 0.01).unwrap();
        let message = request.compile_message(&wallet.pubkey(), Hash::new_unique()).unwrap();
        wallet.sign_message_v0(message).unwrap()
    }

    #[test]
    fn test_endpoints_from_host() {
        let client = SolanaClient::for_host("api.devnet.solana.com");
        assert_eq!(client.rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(client.ws_url(), "wss://api.devnet.solana.com");
        assert_eq!(client.confirm_timeout, SolanaClient::DEFAULT_CONFIRM_TIMEOUT);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LedgerError::BlockhashUnavailable.to_string(), "Failed to get latest block hash");
        assert!(LedgerError::ConfirmationTimeout.to_string().contains("Timeout"));
    }

    #[test]
    fn test_preflight_failure_extracted() {
        let simulation: RpcSimulateTransactionResult = serde_json::from_value(serde_json::json!({
            "err": "AccountNotFound",
            "logs": ["Program log: insufficient lamports"],
            "accounts": null,
            "unitsConsumed": 0,
            "returnData": null
        }))
        .unwrap();
        let err = ClientError::from(ClientErrorKind::RpcError(RpcError::RpcResponseError {
            code: -32002,
            message: "Transaction simulation failed: Attempt to debit an account but found no record of a prior credit.".to_string(),
            data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
        }));

        let failure = preflight_failure(&err).unwrap();
        assert!(failure.message.starts_with("Transaction simulation failed"));
        assert_eq!(failure.error.as_deref(), Some("AccountNotFound"));
        assert_eq!(failure.logs.unwrap().len(), 1);
        assert_eq!(failure.units_consumed, Some(0));
    }

    #[test]
    fn test_other_rpc_errors_are_not_preflight() {
        let err = ClientError::from(ClientErrorKind::Custom("connection refused".to_string()));
        assert!(preflight_failure(&err).is_none());
    }

    #[tokio::test]
    async fn test_confirmation_timeout() {
        let elapsed = tokio::time::timeout(
            Duration::from_millis(1),
            std::future::pending::<Option<RpcResponse<RpcSignatureResult>>>(),
        )
        .await;

        let err = confirmation_outcome(elapsed).unwrap_err();
        assert_eq!(err, LedgerError::ConfirmationTimeout);
        assert_eq!(err.to_string(), "Timeout waiting for confirmation");
    }

    #[test]
    fn test_confirmation_stream_closed_early() {
        assert!(matches!(confirmation_outcome(Ok(None)), Err(LedgerError::SubscriptionError(_))));
    }

    #[test]
    fn test_confirmation_with_execution_error() {
        let result = confirmation_outcome(Ok(Some(notification(serde_json::json!({ "err": "AccountNotFound" })))));
        match result {
            Err(LedgerError::TransactionError(message)) => assert!(message.contains("AccountNotFound")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_confirmation_success() {
        let result = confirmation_outcome(Ok(Some(notification(serde_json::json!({ "err": null })))));
        assert_eq!(result, Ok(SubmitOutcome::Confirmed));
    }

    #[tokio::test]
    async fn test_reconnects_after_subscription_socket_closes() {
        // Completes the WebSocket handshake, then hangs up
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accepted = Arc::new(AtomicUsize::new(0));
        tokio::spawn({
            let accepted = Arc::clone(&accepted);
            async move {
                while let Ok((stream, _)) = listener.accept().await {
                    accepted.fetch_add(1, Ordering::SeqCst);
                    if let Ok(ws) = tokio_tungstenite::accept_async(stream).await {
                        drop(ws);
                    }
                }
            }
        });

        let client = SolanaClient::new("http://127.0.0.1:9".to_string(), format!("ws://127.0.0.1:{}", port))
            .with_confirm_timeout(Duration::from_secs(2));
        let transaction = signed_transfer();

        for _ in 0..3 {
            assert!(client.send_and_confirm(&transaction).await.is_err());
        }

        assert_eq!(accepted.load(Ordering::SeqCst), 3);
        assert!(client.pubsub.lock().await.is_none());
    }
}
