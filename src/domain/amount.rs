//! Native-unit token amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A token amount in the token's own smallest unit (wei-style).
///
/// `Amount` carries no decimal information; the pool converts between
/// native units and its 18-decimal internal precision using each token's
/// precision multiplier. All `u128` values are valid amounts.
///
/// Arithmetic is checked: operations return `None` on overflow or
/// underflow instead of panicking or wrapping.
///
/// # Examples
///
/// ```
/// use stableswap_engine::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(25);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(125)));
/// assert_eq!(a.checked_sub(&b), Some(Amount::new(75)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
