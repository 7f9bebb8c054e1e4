//! SOL / lamport conversion
//!
//! Tool arguments and reports use whole SOL; transaction instructions and RPC
//! balances use lamports.

use thiserror::Error;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    #[error("Amount must be a finite number, got {0}")]
    NotFinite(f64),
    #[error("Amount cannot be negative, got {0}")]
    Negative(f64),
    #[error("Amount {0} SOL exceeds the maximum representable lamport value")]
    Overflow(f64),
}

/// Convert a SOL amount to lamports, rounding to the nearest lamport
pub fn sol_to_lamports(sol: f64) -> Result<u64, AmountError> {
    if !sol.is_finite() {
        return Err(AmountError::NotFinite(sol));
    }
    if sol < 0.0 {
        return Err(AmountError::Negative(sol));
    }

    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports >= u64::MAX as f64 {
        return Err(AmountError::Overflow(sol));
    }

    Ok(lamports as u64)
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_sol() {
        assert_eq!(sol_to_lamports(1.0).unwrap(), 1_000_000_000);
        assert_eq!(sol_to_lamports(2.0).unwrap(), 2_000_000_000);
        assert_eq!(lamports_to_sol(2_000_000_000), 2.0);
    }

    #[test]
    fn test_fractional_sol_rounds_to_nearest_lamport() {
        // 0.1 * 1e9 is 100000000.00000001 in f64
        assert_eq!(sol_to_lamports(0.1).unwrap(), 100_000_000);
        assert_eq!(sol_to_lamports(0.000000001).unwrap(), 1);
        assert_eq!(sol_to_lamports(0.0000000004).unwrap(), 0);
    }

    #[test]
    fn test_conversion_is_inverse() {
        for sol in [0.0, 0.000000001, 0.001, 0.1, 0.25, 1.0, 1.5, 42.123456789, 1_000_000.0] {
            let lamports = sol_to_lamports(sol).unwrap();
            assert!(
                (lamports_to_sol(lamports) - sol).abs() < 1e-9,
                "round trip drifted for {}",
                sol
            );
        }
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        assert_eq!(sol_to_lamports(-1.0), Err(AmountError::Negative(-1.0)));
        assert!(matches!(sol_to_lamports(f64::NAN), Err(AmountError::NotFinite(_))));
        assert!(matches!(sol_to_lamports(f64::INFINITY), Err(AmountError::NotFinite(_))));
        assert!(matches!(sol_to_lamports(1e12), Err(AmountError::Overflow(_))));
    }
}
