//! Market fee factor.

use std::fmt;

use alloy_primitives::U256;
use rust_decimal::Decimal;

use super::protocol::FEE_RANGE;

/// Market fee as parts per million of trade cost (`uint24` on chain).
///
/// `Fee::new(50_000)` is a 5% fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fee(u32);

impl Fee {
    /// Build from a raw `uint24` value. Returns `None` above 100%.
    #[must_use]
    pub const fn new(parts_per_million: u32) -> Option<Self> {
        if parts_per_million > FEE_RANGE {
            None
        } else {
            Some(Self(parts_per_million))
        }
    }

    /// Build from a normalized `uint24` argument.
    #[must_use]
    pub fn from_u256(value: U256) -> Option<Self> {
        u32::try_from(value).ok().and_then(Self::new)
    }

    #[must_use]
    pub const fn parts_per_million(&self) -> u32 {
        self.0
    }

    /// Fee as a percentage, e.g. `5` for `50_000`.
    #[must_use]
    pub fn as_percent(&self) -> Decimal {
        Decimal::from(self.0) * Decimal::from(100) / Decimal::from(FEE_RANGE)
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent().normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn fifty_thousand_is_five_percent() {
        let fee = Fee::new(50_000).unwrap();
        assert_eq!(fee.parts_per_million(), 50_000);
        assert_eq!(fee.as_percent(), dec!(5));
        assert_eq!(fee.to_string(), "5%");
    }

    #[test]
    fn fractional_percent_displays_exactly() {
        assert_eq!(Fee::new(2_500).unwrap().to_string(), "0.25%");
    }

    #[test]
    fn rejects_more_than_full_range() {
        assert!(Fee::new(FEE_RANGE).is_some());
        assert!(Fee::new(FEE_RANGE + 1).is_none());
        assert!(Fee::from_u256(U256::from(u64::MAX)).is_none());
    }
}
