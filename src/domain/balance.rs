use serde::{Serialize, Serializer};

use super::units::lamports_to_sol;

/// Wallet balance valued in USD
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    /// Raw balance, string-encoded so 64-bit values survive JSON consumers
    #[serde(serialize_with = "u64_as_string")]
    pub lamports_balance: u64,
    pub solana_balance: f64,
    /// USD value rounded to 4 decimal places
    pub usd_balance: String,
}

impl WalletBalance {
    pub fn new(lamports: u64, usd_per_sol: f64) -> Self {
        let sol = lamports_to_sol(lamports);
        Self {
            lamports_balance: lamports,
            solana_balance: sol,
            usd_balance: to_fixed_4(sol * usd_per_sol),
        }
    }
}

/// Four-decimal rendering where an exact halfway value rounds away from zero.
///
/// A double lies exactly between two 4-decimal values only when it is an odd
/// multiple of 1/32; `{:.4}` would round those to even.
fn to_fixed_4(value: f64) -> String {
    let thirty_seconds = value * 32.0;
    let is_tie = value.abs() < 1e9 && thirty_seconds.fract() == 0.0 && thirty_seconds % 2.0 != 0.0;
    if is_tie {
        format!("{:.4}", (value * 10_000.0).round() / 10_000.0)
    } else {
        format!("{:.4}", value)
    }
}

fn u64_as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sol_at_150() {
        let balance = WalletBalance::new(2_000_000_000, 150.0);
        assert_eq!(balance.solana_balance, 2.0);
        assert_eq!(balance.usd_balance, "300.0000");
    }

    #[test]
    fn test_usd_rounds_to_four_places() {
        let balance = WalletBalance::new(123_456_789, 187.37);
        // 0.123456789 * 187.37 = 23.13209...
        assert_eq!(balance.usd_balance, "23.1321");
    }

    #[test]
    fn test_halfway_usd_rounds_up() {
        assert_eq!(WalletBalance::new(500_000_000, 0.0625).usd_balance, "0.0313");
        assert_eq!(WalletBalance::new(1_000_000_000, 0.15625).usd_balance, "0.1563");
        assert_eq!(WalletBalance::new(1_000_000_000, 0.09375).usd_balance, "0.0938");
    }

    #[test]
    fn test_lamports_serialize_as_string() {
        let json = serde_json::to_value(WalletBalance::new(u64::MAX, 1.0)).unwrap();
        assert_eq!(json["lamportsBalance"], "18446744073709551615");
        assert!(json["solanaBalance"].is_number());
        assert!(json["usdBalance"].is_string());
    }
}
