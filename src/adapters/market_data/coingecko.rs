use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{PriceError, PriceSource};

pub const COINGECKO_SOL_PRICE_API: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=USD";

/// CoinGecko simple-price client for SOL/USD
#[derive(Debug, Clone)]
pub struct CoinGeckoPriceClient {
    http: Client,
    endpoint: String,
}

impl CoinGeckoPriceClient {
    pub fn new() -> Result<Self, PriceError> {
        Self::with_endpoint(COINGECKO_SOL_PRICE_API)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, PriceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceClient {
    async fn sol_usd_price(&self) -> Result<f64, PriceError> {
        let response: SimplePriceResponse = self.http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.usd_price()
    }
}

/// `{ "solana": { "usd": 187.12 } }`
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    solana: Option<UsdQuote>,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

impl SimplePriceResponse {
    fn usd_price(&self) -> Result<f64, PriceError> {
        self.solana
            .as_ref()
            .and_then(|quote| quote.usd)
            .ok_or_else(|| PriceError::NoPriceData("solana".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CoinGeckoPriceClient::new().unwrap();
        assert_eq!(client.endpoint(), COINGECKO_SOL_PRICE_API);
    }

    #[test]
    fn test_parse_quote() {
        let response: SimplePriceResponse =
            serde_json::from_str(r#"{"solana":{"usd":150.0}}"#).unwrap();
        assert_eq!(response.usd_price().unwrap(), 150.0);
    }

    #[test]
    fn test_missing_quote() {
        let response: SimplePriceResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(response.usd_price(), Err(PriceError::NoPriceData(_))));

        let response: SimplePriceResponse = serde_json::from_str(r#"{"solana":{}}"#).unwrap();
        assert!(response.usd_price().is_err());
    }
}
