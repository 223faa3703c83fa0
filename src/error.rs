//! Unified error types for the StableSwap engine.
//!
//! All fallible operations across the crate return [`SwapError`] as their
//! error type. Arithmetic variants carry a static context string naming the
//! computation that failed, so a caller can tell a solver overflow apart
//! from a balance-update overflow without parsing messages.
//!
//! Failures are all-or-nothing: an operation that returns `Err` has not
//! mutated any pool state.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, SwapError>;

/// Every failure mode of the engine.
///
/// Recoverability is part of the contract:
///
/// - [`SlippageExceeded`](Self::SlippageExceeded) is recoverable — the
///   caller may retry with looser bounds.
/// - [`ConvergenceError`](Self::ConvergenceError), [`Overflow`](Self::Overflow),
///   [`Underflow`](Self::Underflow) and [`DivisionByZero`](Self::DivisionByZero)
///   are fatal for the given inputs and must abort the whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    /// A token index is `>= N`, or a swap names the same index twice.
    #[error("token index out of range")]
    IndexOutOfRange,

    /// Newton iteration exhausted its bound without converging.
    #[error("solver did not converge: {0}")]
    ConvergenceError(&'static str),

    /// Checked addition or multiplication exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Checked subtraction went below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// A divisor was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A caller-supplied minimum output / maximum burn bound was violated.
    #[error("slippage bound violated: {0}")]
    SlippageExceeded(&'static str),

    /// More LP tokens were requested than exist.
    #[error("insufficient LP token supply")]
    InsufficientSupply,

    /// A liquidity change with no effect: all amounts zero on a non-empty
    /// pool, or a missing token on the initial deposit.
    #[error("zero-value liquidity change: {0}")]
    ZeroDeposit(&'static str),

    /// An amplification ramp was requested too early or with too short a
    /// window.
    #[error("ramp timing rejected: {0}")]
    RampTooSoon(&'static str),

    /// The ramp target is more than the allowed factor away from the
    /// current effective amplification.
    #[error("ramp target change factor too large")]
    RampFactorTooLarge,

    /// `stop_ramp` was called while no ramp is in progress.
    #[error("no amplification ramp is active")]
    RampNotActive,

    /// A fee parameter exceeds its configured maximum.
    #[error("fee exceeds maximum: {0}")]
    FeeTooHigh(&'static str),

    /// The pool's pause gate is set; the mutating call was rejected.
    #[error("pool is paused")]
    Paused,

    /// Construction parameters are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A token decimal count is outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// An amounts vector does not have one entry per pooled token.
    #[error("amounts length does not match token count")]
    AmountsLengthMismatch,
}
