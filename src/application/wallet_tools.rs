//! Wallet Tools
//!
//! The four tool operations, independent of any transport. Each returns the
//! text the MCP layer puts in the tool response.
//!
//! Error surfaces differ per tool:
//! - `latest_slot`: ledger errors propagate
//! - `wallet_address`, `transfer`: every failure becomes the response text
//! - `wallet_balance`: signer and balance failures become the response text,
//!   price failures propagate

use std::sync::Arc;

use crate::adapters::market_data::{PriceCache, PriceCacheError};
use crate::adapters::solana::KeypairFile;
use crate::domain::WalletBalance;
use crate::ports::{LedgerError, LedgerPort};

use super::transfer::TransferPipeline;

pub struct WalletTools {
    keypair: KeypairFile,
    ledger: Arc<dyn LedgerPort>,
    prices: PriceCache,
    transfers: TransferPipeline,
}

impl WalletTools {
    pub fn new(keypair: KeypairFile, ledger: Arc<dyn LedgerPort>, prices: PriceCache) -> Self {
        let transfers = TransferPipeline::new(keypair.clone(), Arc::clone(&ledger));
        Self {
            keypair,
            ledger,
            prices,
            transfers,
        }
    }

    /// `get-latest-slot`
    pub async fn latest_slot(&self) -> Result<String, LedgerError> {
        let slot = self.ledger.get_slot().await?;
        Ok(slot.to_string())
    }

    /// `get-wallet-address`
    pub async fn wallet_address(&self) -> String {
        match self.keypair.load() {
            Ok(wallet) => wallet.public_key(),
            Err(e) => e.to_string(),
        }
    }

    /// `get-wallet-balance`
    pub async fn wallet_balance(&self) -> Result<String, PriceCacheError> {
        let wallet = match self.keypair.load() {
            Ok(wallet) => wallet,
            Err(e) => return Ok(e.to_string()),
        };

        let lamports = match self.ledger.get_balance(&wallet.pubkey()).await {
            Ok(lamports) => lamports,
            Err(e) => {
                tracing::warn!("Balance lookup for {} failed: {}", wallet.public_key(), e);
                return Ok(e.to_string());
            }
        };

        let price = self.prices.get_price().await?;
        let balance = WalletBalance::new(lamports, price);

        Ok(serde_json::to_string_pretty(&balance).unwrap_or_else(|e| e.to_string()))
    }

    /// `transfer`
    pub async fn transfer(&self, to: &str, amount_sol: f64) -> String {
        match self.transfers.execute(to, amount_sol).await {
            Ok(outcome) => outcome.to_payload().unwrap_or_else(|e| e.to_string()),
            Err(e) => {
                tracing::warn!("Transfer to {} failed: {}", to, e);
                e.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::solana::WalletManager;
    use crate::ports::mocks::{ManualClock, StubLedger, StubPriceSource};
    use tempfile::TempDir;

    fn tools_with(ledger: StubLedger, prices: StubPriceSource) -> (TempDir, WalletTools, WalletManager) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id.json");
        let wallet = WalletManager::new_random();
        wallet.save_to_file(&path).unwrap();

        let cache = PriceCache::with_clock(Arc::new(prices), Arc::new(ManualClock::new()), PriceCache::DEFAULT_TTL);
        let tools = WalletTools::new(KeypairFile::new(path), Arc::new(ledger), cache);
        (dir, tools, wallet)
    }

    #[tokio::test]
    async fn test_latest_slot() {
        let (_dir, tools, _) = tools_with(StubLedger::new().with_slot(Ok(285_000_123)), StubPriceSource::new(1.0));
        assert_eq!(tools.latest_slot().await.unwrap(), "285000123");
    }

    #[tokio::test]
    async fn test_latest_slot_propagates() {
        let ledger = StubLedger::new().with_slot(Err(LedgerError::RpcError("connection refused".to_string())));
        let (_dir, tools, _) = tools_with(ledger, StubPriceSource::new(1.0));
        assert!(tools.latest_slot().await.is_err());
    }

    #[tokio::test]
    async fn test_wallet_address() {
        let (_dir, tools, wallet) = tools_with(StubLedger::new(), StubPriceSource::new(1.0));
        assert_eq!(tools.wallet_address().await, wallet.public_key());
    }

    #[tokio::test]
    async fn test_wallet_address_missing_file_is_text() {
        let (dir, tools, _) = tools_with(StubLedger::new(), StubPriceSource::new(1.0));
        std::fs::remove_file(dir.path().join("id.json")).unwrap();
        assert!(tools.wallet_address().await.starts_with("Keypair file not found at"));
    }

    #[tokio::test]
    async fn test_wallet_balance() {
        let ledger = StubLedger::new().with_balance(Ok(2_000_000_000));
        let (_dir, tools, wallet) = tools_with(ledger.clone(), StubPriceSource::new(150.0));

        let text = tools.wallet_balance().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["lamportsBalance"], "2000000000");
        assert_eq!(json["solanaBalance"].as_f64(), Some(2.0));
        assert_eq!(json["usdBalance"], "300.0000");
        assert_eq!(ledger.get_calls(), vec![format!("get_balance:{}", wallet.public_key())]);
    }

    #[tokio::test]
    async fn test_wallet_balance_soft_fails_on_rpc_error() {
        let ledger = StubLedger::new().with_balance(Err(LedgerError::RpcError("node is behind".to_string())));
        let prices = StubPriceSource::new(150.0);
        let (_dir, tools, _) = tools_with(ledger, prices.clone());

        assert_eq!(tools.wallet_balance().await.unwrap(), "RPC request failed: node is behind");
        assert_eq!(prices.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_wallet_balance_price_failure_propagates() {
        let ledger = StubLedger::new().with_balance(Ok(1));
        let (_dir, tools, _) = tools_with(ledger, StubPriceSource::failing());

        let err = tools.wallet_balance().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get Solana price");
    }

    #[tokio::test]
    async fn test_wallet_balance_uses_cached_price() {
        let ledger = StubLedger::new().with_balance(Ok(1_000_000_000));
        let prices = StubPriceSource::new(100.0);
        let (_dir, tools, _) = tools_with(ledger, prices.clone());

        tools.wallet_balance().await.unwrap();
        tools.wallet_balance().await.unwrap();
        assert_eq!(prices.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_transfer_errors_are_text() {
        let ledger = StubLedger::new().with_blockhash(Err(LedgerError::BlockhashUnavailable));
        let (_dir, tools, _) = tools_with(ledger, StubPriceSource::new(1.0));

        let text = tools.transfer("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM", 1.0).await;
        assert_eq!(text, "Failed to get latest block hash");
    }
}
