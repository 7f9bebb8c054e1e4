//! Market Data Adapters
//!
//! - `CoinGeckoPriceClient`: SOL/USD spot price over HTTP
//! - `PriceCache`: TTL memo in front of any `PriceSource`

mod coingecko;
mod price_cache;

pub use coingecko::{CoinGeckoPriceClient, COINGECKO_SOL_PRICE_API};
pub use price_cache::{CachedPrice, PriceCache, PriceCacheError};
