//! SOL Price Cache
//!
//! Single-entry TTL cache in front of a `PriceSource`. A quote younger than
//! the TTL is served from memory; anything older triggers a refresh that
//! overwrites the entry.

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::ports::{Clock, PriceError, PriceSource, SystemClock};

#[derive(Debug, Error)]
pub enum PriceCacheError {
    #[error("Failed to get Solana price")]
    Unavailable(#[source] PriceError),
}

/// Memoized quote with its fetch time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPrice {
    pub value: f64,
    pub fetched_at: Instant,
}

impl CachedPrice {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

pub struct PriceCache {
    source: Arc<dyn PriceSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entry: Mutex<Option<CachedPrice>>,
}

impl PriceCache {
    /// Default freshness window (1 minute)
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self::with_clock(source, Arc::new(SystemClock), Self::DEFAULT_TTL)
    }

    pub fn with_clock(source: Arc<dyn PriceSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// SOL price in USD, refreshed when the cached quote has expired
    pub async fn get_price(&self) -> Result<f64, PriceCacheError> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = *entry {
            if cached.is_fresh(self.clock.now(), self.ttl) {
                tracing::debug!("Serving cached SOL price {}", cached.value);
                return Ok(cached.value);
            }
        }

        let value = self.source.sol_usd_price().await.map_err(|e| {
            tracing::warn!("SOL price fetch failed: {}", e);
            PriceCacheError::Unavailable(e)
        })?;

        *entry = Some(CachedPrice {
            value,
            fetched_at: self.clock.now(),
        });
        tracing::debug!("Refreshed SOL price: {}", value);

        Ok(value)
    }

    /// Current entry regardless of freshness
    pub async fn peek(&self) -> Option<CachedPrice> {
        *self.entry.lock().await
    }
}
