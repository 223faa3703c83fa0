//! Fee rates in parts per `1e10`.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwapError};

/// Denominator of every fee rate: a [`Fee`] of `1e10` is 100%.
pub const FEE_DENOMINATOR: u128 = 10_000_000_000;

/// Maximum swap fee: `1e8` parts per `1e10`, i.e. 1%.
pub const MAX_SWAP_FEE: u64 = 100_000_000;

/// Maximum admin fee: 100% of the swap fee.
pub const MAX_ADMIN_FEE: u64 = 10_000_000_000;

/// A fee rate expressed in parts per `1e10`.
///
/// `Fee` itself is just a rate; whether a given rate is acceptable depends
/// on its role (swap fee vs. admin fee), so range checks live at the pool
/// boundary rather than in the constructor.
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::Fee;
///
/// // 0.1% of 1e18:
/// let fee = Fee::new(10_000_000);
/// assert_eq!(fee.apply(1_000_000_000_000_000_000).unwrap(), 1_000_000_000_000_000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[must_use]
pub struct Fee(u64);

impl Fee {
    /// The zero fee.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw rate in parts per `1e10`.
    pub const fn new(parts_per_1e10: u64) -> Self {
        Self(parts_per_1e10)
    }

    /// Returns the raw rate.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `amount · rate / 1e10`, rounding down.
    ///
    /// The multiplication is widened to 256 bits, so it cannot overflow;
    /// the result always fits back into `u128` because the rate never
    /// exceeds the denominator at any call site.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the quotient exceeds `u128`
    /// (only possible for rates above 100%).
    pub fn apply(&self, amount: u128) -> Result<u128> {
        let scaled = U256::from(amount) * U256::from(self.0) / U256::from(FEE_DENOMINATOR);
        u128::try_from(scaled).map_err(|_| SwapError::Overflow("fee application"))
    }

    /// Returns the per-token imbalance fee rate for an `n`-token pool:
    /// `rate · n / (4 · (n − 1))`.
    ///
    /// This scaling makes an imbalanced liquidity change cost the same as
    /// routing the imbalance through a swap; the constant is load-bearing
    /// for pool solvency and must not be re-derived.
    #[must_use]
    pub const fn per_token_rate(&self, n_tokens: u64) -> Self {
        Self(self.0 * n_tokens / (4 * (n_tokens - 1)))
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/1e10", self.0)
    }
}
