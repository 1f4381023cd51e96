//! Token amounts as unsigned 256-bit integers.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;

use super::error::ArithmeticError;

/// A token count, cost or profit in base units.
///
/// Wraps [`U256`] so that every addition and subtraction goes through the
/// checked operations below. There is no floating point anywhere on this
/// path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::ZERO);

    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Add two amounts, failing instead of wrapping.
    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow { lhs: self, rhs })
    }

    /// Subtract `rhs`, failing when it exceeds `self`.
    pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(ArithmeticError::Underflow { lhs: self, rhs })
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<Amount> for U256 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = alloy_primitives::ruint::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str(s.trim()).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_add_is_exact() {
        let total = Amount::from(100u64).checked_add(Amount::from(5u64)).unwrap();
        assert_eq!(total, Amount::from(105u64));
    }

    #[test]
    fn checked_add_reports_overflow() {
        let max = Amount::new(U256::MAX);
        let err = max.checked_add(Amount::from(1u64)).unwrap_err();
        assert!(matches!(err, ArithmeticError::Overflow { .. }));
    }

    #[test]
    fn checked_sub_does_not_clamp() {
        let err = Amount::from(5u64)
            .checked_sub(Amount::from(6u64))
            .unwrap_err();
        assert_eq!(
            err,
            ArithmeticError::Underflow {
                lhs: Amount::from(5u64),
                rhs: Amount::from(6u64),
            }
        );
    }

    #[test]
    fn checked_sub_to_zero_is_allowed() {
        let rest = Amount::from(5u64).checked_sub(Amount::from(5u64)).unwrap();
        assert!(rest.is_zero());
    }

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!("105".parse::<Amount>().unwrap(), Amount::from(105u64));
        assert_eq!("0x69".parse::<Amount>().unwrap(), Amount::from(105u64));
    }

    #[test]
    fn displays_as_decimal() {
        assert_eq!(Amount::from(95u64).to_string(), "95");
    }
}
