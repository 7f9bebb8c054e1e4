use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("No USD quote for {0}")]
    NoPriceData(String),
}

/// Spot price feed for SOL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current SOL price in USD
    async fn sol_usd_price(&self) -> Result<f64, PriceError>;
}
