//! Token decimal places and precision normalization.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};

/// The pool's internal precision: every balance is normalized to 18
/// decimal places before it reaches the invariant solver.
pub(crate) const POOL_PRECISION_DECIMALS: u8 = 18;

/// Number of decimal places of a token's native unit.
///
/// Valid range is `0..=18`. A token with fewer than 18 decimals is scaled
/// up by its [`precision multiplier`](Decimals::precision_multiplier) when
/// entering the pool's internal representation.
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("valid decimals");
/// assert_eq!(usdc.precision_multiplier(), 1_000_000_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Decimals(u8);

impl Decimals {
    /// Maximum supported decimal places (the internal precision).
    pub const MAX: Self = Self(POOL_PRECISION_DECIMALS);

    /// Creates a `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > POOL_PRECISION_DECIMALS {
            return Err(SwapError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^(18 - decimals)`: the factor that converts one native
    /// unit of this token to internal 18-decimal units.
    #[must_use]
    pub const fn precision_multiplier(&self) -> u128 {
        10u128.pow((POOL_PRECISION_DECIMALS - self.0) as u32)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_range() {
        for v in 0..=18 {
            let Ok(d) = Decimals::new(v) else {
                panic!("{v} decimals should be valid");
            };
            assert_eq!(d.get(), v);
        }
    }

    #[test]
    fn rejects_above_eighteen() {
        assert_eq!(
            Decimals::new(19),
            Err(SwapError::InvalidPrecision("decimals must be 0..=18"))
        );
        assert!(Decimals::new(u8::MAX).is_err());
    }

    #[test]
    fn multiplier_eighteen_is_one() {
        let Ok(d) = Decimals::new(18) else {
            panic!("expected Ok");
        };
        assert_eq!(d.precision_multiplier(), 1);
    }

    #[test]
    fn multiplier_six_decimals() {
        let Ok(d) = Decimals::new(6) else {
            panic!("expected Ok");
        };
        assert_eq!(d.precision_multiplier(), 10u128.pow(12));
    }

    #[test]
    fn multiplier_zero_decimals() {
        let Ok(d) = Decimals::new(0) else {
            panic!("expected Ok");
        };
        assert_eq!(d.precision_multiplier(), 10u128.pow(18));
    }
}
