//! Stub ports that record calls and return configured responses.
//!
//! Used by unit tests and the integration tests under `tests/`.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::VersionedTransaction};

use super::clock::Clock;
use super::ledger::{LedgerError, LedgerPort};
use super::price::{PriceError, PriceSource};
use crate::domain::SubmitOutcome;

/// Ledger stub with per-method canned responses
#[derive(Debug, Clone)]
pub struct StubLedger {
    slot: Result<u64, LedgerError>,
    balance: Result<u64, LedgerError>,
    blockhash: Result<Hash, LedgerError>,
    submit: Result<SubmitOutcome, LedgerError>,
    transaction: Result<serde_json::Value, LedgerError>,
    calls: Arc<Mutex<Vec<String>>>,
    submitted: Arc<Mutex<Vec<VersionedTransaction>>>,
}

impl StubLedger {
    pub fn new() -> Self {
        Self {
            slot: Ok(1),
            balance: Ok(0),
            blockhash: Ok(Hash::new_unique()),
            submit: Ok(SubmitOutcome::Confirmed),
            transaction: Ok(serde_json::json!({ "slot": 1 })),
            calls: Arc::default(),
            submitted: Arc::default(),
        }
    }

    pub fn with_slot(mut self, slot: Result<u64, LedgerError>) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_balance(mut self, balance: Result<u64, LedgerError>) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_blockhash(mut self, blockhash: Result<Hash, LedgerError>) -> Self {
        self.blockhash = blockhash;
        self
    }

    pub fn with_submit(mut self, submit: Result<SubmitOutcome, LedgerError>) -> Self {
        self.submit = submit;
        self
    }

    pub fn with_transaction(mut self, transaction: Result<serde_json::Value, LedgerError>) -> Self {
        self.transaction = transaction;
        self
    }

    /// Names of the port methods called, in order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Transactions handed to `send_and_confirm`
    pub fn submitted(&self) -> Vec<VersionedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl Default for StubLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerPort for StubLedger {
    async fn get_slot(&self) -> Result<u64, LedgerError> {
        self.record("get_slot");
        self.slot.clone()
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        self.record(&format!("get_balance:{}", address));
        self.balance.clone()
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, LedgerError> {
        self.record("get_latest_blockhash");
        self.blockhash.clone()
    }

    async fn send_and_confirm(&self, transaction: &VersionedTransaction) -> Result<SubmitOutcome, LedgerError> {
        self.record("send_and_confirm");
        self.submitted.lock().unwrap().push(transaction.clone());
        self.submit.clone()
    }

    async fn get_transaction(&self, signature: &Signature) -> Result<serde_json::Value, LedgerError> {
        self.record(&format!("get_transaction:{}", signature));
        self.transaction.clone()
    }
}

/// Price feed stub returning a fixed quote, or failing when none is set
#[derive(Debug, Clone, Default)]
pub struct StubPriceSource {
    price: Option<f64>,
    fetches: Arc<Mutex<usize>>,
}

impl StubPriceSource {
    pub fn new(price: f64) -> Self {
        Self { price: Some(price), fetches: Arc::default() }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl PriceSource for StubPriceSource {
    async fn sol_usd_price(&self) -> Result<f64, PriceError> {
        *self.fetches.lock().unwrap() += 1;
        self.price.ok_or_else(|| PriceError::NoPriceData("solana".to_string()))
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Instant::now())) }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
