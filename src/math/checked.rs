//! Checked arithmetic trait and 256-bit widening helpers.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, SwapError>`](crate::error::SwapError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! The free functions at the bottom cover the widening patterns the
//! invariant solver relies on: products of two 18-decimal balances exceed
//! `u128`, so intermediate solver state lives in [`U256`] and is narrowed
//! back only at the end.
//!
//! # Examples
//!
//! ```
//! use stableswap_engine::domain::Amount;
//! use stableswap_engine::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! let sum = a.safe_add(&b);
//! assert!(sum.is_ok());
//! ```

use primitive_types::U256;

use crate::domain::{Amount, Rounding};
use crate::error::SwapError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns [`Result<Self, SwapError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
///
/// # Contract
///
/// - **No panics** — all error conditions produce `Err`.
/// - **No saturation** — saturation hides bugs; errors propagate instead.
/// - Implementations must delegate to the inner type's checked operations.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, SwapError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, SwapError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_add(other)
            .ok_or(SwapError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_sub(other)
            .ok_or(SwapError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_mul(other)
            .ok_or(SwapError::Overflow("amount multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, SwapError> {
        if other.is_zero() {
            return Err(SwapError::DivisionByZero);
        }
        let n = self.get();
        let d = other.get();
        let result = match rounding {
            Rounding::Down => n / d,
            Rounding::Up => {
                let q = n / d;
                let r = n % d;
                if r != 0 { q + 1 } else { q }
            }
        };
        Ok(Amount::new(result))
    }
}

// ---------------------------------------------------------------------------
// U256
// ---------------------------------------------------------------------------

impl CheckedArithmetic for U256 {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_add(*other)
            .ok_or(SwapError::Overflow("u256 addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_sub(*other)
            .ok_or(SwapError::Underflow("u256 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, SwapError> {
        self.checked_mul(*other)
            .ok_or(SwapError::Overflow("u256 multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, SwapError> {
        if other.is_zero() {
            return Err(SwapError::DivisionByZero);
        }
        let q = *self / *other;
        let result = match rounding {
            Rounding::Down => q,
            Rounding::Up => {
                if (*self % *other).is_zero() {
                    q
                } else {
                    q + U256::one()
                }
            }
        };
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// U256 widening helpers
// ---------------------------------------------------------------------------

/// Multiplies two `u128` values into a `U256`. Never overflows.
#[inline]
#[must_use]
pub fn casted_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a `U256` back to `u128`.
///
/// # Errors
///
/// Returns [`SwapError::Overflow`] with `context` if the value does not
/// fit.
#[inline]
pub fn to_u128(value: U256, context: &'static str) -> Result<u128, SwapError> {
    u128::try_from(value).map_err(|_| SwapError::Overflow(context))
}

/// Returns `true` if `a` and `b` differ by at most one. Newton iterations
/// stop on this condition.
#[inline]
#[must_use]
pub fn within_one(a: U256, b: U256) -> bool {
    abs_difference(a, b) <= U256::one()
}

/// Absolute difference of two unsigned 256-bit values.
#[inline]
#[must_use]
pub fn abs_difference(a: U256, b: U256) -> U256 {
    if a > b { a - b } else { b - a }
}
