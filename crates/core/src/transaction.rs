//! Transaction classification and amount rules.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a transaction adds to or takes from the user's balance.
///
/// Amounts are always stored positive; the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Most decimal places an amount may carry.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Exclusive upper bound on amounts (fifteen integer digits).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0); // 1_000_000_000_000_000

/// Reasons an amount cannot be recorded.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Zero or negative.
    #[error("amount must be positive")]
    NotPositive,

    /// More decimal places than the ledger keeps.
    #[error("amount must have at most {} decimal places", MAX_AMOUNT_SCALE)]
    TooPrecise,

    /// Fifteen or more integer digits.
    #[error("amount must be less than {}", AMOUNT_LIMIT)]
    TooLarge,
}

/// Checks that an amount is positive, below [`AMOUNT_LIMIT`], and has at
/// most [`MAX_AMOUNT_SCALE`] significant decimal places.
///
/// Trailing zeros do not count, so `12.50000` is accepted.
///
/// # Errors
///
/// Returns the first rule the amount breaks.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, AmountError> {
    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive);
    }
    if amount >= AMOUNT_LIMIT {
        return Err(AmountError::TooLarge);
    }
    if amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(AmountError::TooPrecise);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_kind_display_matches_serde() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(
            serde_json::to_value(TransactionKind::Expense).unwrap(),
            serde_json::json!("expense")
        );
        assert_eq!(
            serde_json::from_str::<TransactionKind>("\"income\"").unwrap(),
            TransactionKind::Income
        );
    }

    #[test]
    fn test_unknown_kind_fails_to_deserialize() {
        assert!(serde_json::from_str::<TransactionKind>("\"transfer\"").is_err());
    }

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(20000))]
    #[case(dec!(0.0001))]
    #[case(dec!(12.3456))]
    #[case(dec!(12.50000))]
    #[case(dec!(999999999999999.9999))]
    fn test_validate_amount_accepts(#[case] amount: Decimal) {
        assert_eq!(validate_amount(amount), Ok(amount));
    }

    #[rstest]
    #[case(dec!(0), AmountError::NotPositive)]
    #[case(dec!(-5), AmountError::NotPositive)]
    #[case(dec!(0.00001), AmountError::TooPrecise)]
    #[case(dec!(12.34567), AmountError::TooPrecise)]
    #[case(dec!(1000000000000000), AmountError::TooLarge)]
    #[case(dec!(10000000000000000), AmountError::TooLarge)]
    fn test_validate_amount_rejects(#[case] amount: Decimal, #[case] expected: AmountError) {
        assert_eq!(validate_amount(amount), Err(expected));
    }
}
