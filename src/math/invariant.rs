//! Newton's method solvers for the StableSwap invariant.
//!
//! The invariant ties the pool's normalized balances `x_i` to a single
//! scalar `D` (total deposits at perfect balance):
//!
//! ```text
//! A·n^n·Σx_i + D = A·D·n^n + D^(n+1) / (n^n·Πx_i)
//! ```
//!
//! Two fixed-point iterations are derived from it:
//!
//! - [`compute_d`] solves for `D` given all balances;
//! - [`compute_y_from_d`] solves for one balance given `D` and the others.
//!
//! Both iterate at most [`MAX_ITERATIONS`] times and stop when successive
//! estimates differ by at most one. The amplification coefficient arrives
//! pre-scaled by [`A_PRECISION`]; every division site compensates for the
//! scale so that results match the unscaled formulation bit for bit.
//!
//! All intermediates are 256-bit: a product of two 18-decimal balances
//! already exceeds `u128`.

use primitive_types::U256;

use crate::amp::A_PRECISION;
use crate::domain::Rounding;
use crate::error::{Result, SwapError};
use crate::math::checked::{to_u128, within_one, CheckedArithmetic};

/// Iteration bound for both Newton loops. Convergence is quadratic and
/// takes single-digit iterations in practice; hitting the bound means the
/// inputs are degenerate.
pub const MAX_ITERATIONS: u32 = 256;

/// Solves the invariant for `D` over normalized balances `xp`.
///
/// `a_precise` is the amplification coefficient scaled by
/// [`A_PRECISION`]. An all-zero pool has `D = 0` by definition and short
/// circuits before the loop.
///
/// Each iteration refines the estimate with
///
/// ```text
/// D_P  = D^(n+1) / (n^n·Πx_i)
/// D'   = (nA·S + n·D_P)·D / ((nA − 1)·D + (n + 1)·D_P)
/// ```
///
/// where `S = Σx_i` and `nA = A·n` (both sides carry the `A_PRECISION`
/// scale, compensated at the division sites).
///
/// # Errors
///
/// - [`SwapError::DivisionByZero`] if some balance is zero while another
///   is not.
/// - [`SwapError::ConvergenceError`] if the loop exhausts
///   [`MAX_ITERATIONS`].
/// - [`SwapError::Overflow`] if the converged `D` does not fit in `u128`.
pub fn compute_d(xp: &[u128], a_precise: u128) -> Result<u128> {
    let n = U256::from(xp.len() as u64);
    let s: U256 = xp.iter().fold(U256::zero(), |acc, &x| acc + U256::from(x));
    if s.is_zero() {
        return Ok(0);
    }

    let a_precision = U256::from(A_PRECISION);
    let n_a = U256::from(a_precise) * n;
    let mut d = s;

    for _ in 0..MAX_ITERATIONS {
        let mut d_p = d;
        for &x in xp {
            d_p = d_p
                .safe_mul(&d)?
                .safe_div(&(U256::from(x) * n), Rounding::Down)?;
        }

        let d_prev = d;
        let numerator = (n_a * s / a_precision + d_p * n) * d;
        let denominator = (n_a - a_precision) * d / a_precision + (n + U256::one()) * d_p;
        d = numerator / denominator;

        if within_one(d, d_prev) {
            return to_u128(d, "invariant d");
        }
    }

    Err(SwapError::ConvergenceError("d did not converge"))
}

/// Solves the invariant for the balance at `index`, holding `D` and every
/// other entry of `xp` fixed. The entry `xp[index]` itself is ignored.
///
/// The iteration is
///
/// ```text
/// b  = S' + D/(A·n)               (S' excludes index)
/// c  = D^(n+1) / (n^n·Πx_i·A·n)   (product excludes index)
/// y' = (y² + c) / (2y + b − D)
/// ```
///
/// # Errors
///
/// - [`SwapError::IndexOutOfRange`] if `index` is not a valid position.
/// - [`SwapError::DivisionByZero`] if a counted balance is zero.
/// - [`SwapError::ConvergenceError`] if the loop exhausts
///   [`MAX_ITERATIONS`].
pub fn compute_y_from_d(a_precise: u128, index: usize, xp: &[u128], d: u128) -> Result<u128> {
    if index >= xp.len() {
        return Err(SwapError::IndexOutOfRange);
    }

    let n = U256::from(xp.len() as u64);
    let a_precision = U256::from(A_PRECISION);
    let n_a = U256::from(a_precise) * n;
    let d = U256::from(d);

    let mut c = d;
    let mut s = U256::zero();
    for (i, &x) in xp.iter().enumerate() {
        if i == index {
            continue;
        }
        s += U256::from(x);
        c = c
            .safe_mul(&d)?
            .safe_div(&(U256::from(x) * n), Rounding::Down)?;
    }
    c = c * d * a_precision / (n_a * n);
    let b = s + d * a_precision / n_a;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_prev = y;
        let denominator = (y + y + b)
            .checked_sub(d)
            .ok_or(SwapError::Underflow("y denominator underflow"))?;
        y = y
            .safe_mul(&y)?
            .safe_add(&c)?
            .safe_div(&denominator, Rounding::Down)?;

        if within_one(y, y_prev) {
            return to_u128(y, "invariant y");
        }
    }

    Err(SwapError::ConvergenceError("y did not converge"))
}

/// Solves for the post-trade balance of token `to` after the balance of
/// token `from` moves to `new_x`, with `D` held at its pre-trade value.
///
/// # Errors
///
/// Returns [`SwapError::IndexOutOfRange`] if either index is invalid or
/// the two coincide, plus anything [`compute_d`] and [`compute_y_from_d`]
/// can produce.
pub fn compute_y(
    a_precise: u128,
    from: usize,
    to: usize,
    new_x: u128,
    xp: &[u128],
) -> Result<u128> {
    if from == to || from >= xp.len() || to >= xp.len() {
        return Err(SwapError::IndexOutOfRange);
    }
    let d = compute_d(xp, a_precise)?;
    let mut post_trade = xp.to_vec();
    post_trade[from] = new_x;
    compute_y_from_d(a_precise, to, &post_trade, d)
}
