//! Domain Layer - Wallet types and rules
//!
//! Pure types with no I/O:
//! - `units`: SOL / lamport conversion
//! - `transfer`: transfer validation, message compilation and outcomes
//! - `balance`: USD-valued balance report

pub mod units;
pub mod transfer;
pub mod balance;

pub use units::{lamports_to_sol, sol_to_lamports, AmountError, LAMPORTS_PER_SOL};
pub use transfer::{PreflightFailure, SubmitOutcome, TransferOutcome, TransferRequest, TransferRequestError};
pub use balance::WalletBalance;
