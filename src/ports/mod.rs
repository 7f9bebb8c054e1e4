//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement:
//! - Ledger access (slot, balance, blockhash, submission, transaction lookup)
//! - SOL spot price feed
//! - Clock for cache freshness

pub mod ledger;
pub mod price;
pub mod clock;
pub mod mocks;

pub use ledger::{LedgerError, LedgerPort};
pub use price::{PriceError, PriceSource};
pub use clock::{Clock, SystemClock};
