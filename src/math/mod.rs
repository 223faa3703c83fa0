//! Arithmetic utilities for invariant calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on domain types, 256-bit widening helpers, and the Newton's-method
//! solvers for the StableSwap invariant.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`CheckedArithmetic`] | Fallible add/sub/mul/div on wrapper types |
//! | [`casted_mul`], [`to_u128`] | `u128` ⇄ `U256` widening and narrowing |
//! | [`compute_d`] | Invariant `D` from normalized balances |
//! | [`compute_y`], [`compute_y_from_d`] | Single-balance solvers |

mod checked;
mod invariant;

pub use checked::{abs_difference, casted_mul, to_u128, within_one, CheckedArithmetic};
pub use invariant::{compute_d, compute_y, compute_y_from_d, MAX_ITERATIONS};
