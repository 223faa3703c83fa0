//! # StableSwap Engine
//!
//! Deterministic N-token StableSwap pool arithmetic: the invariant solver,
//! swap and liquidity operations, fee accounting, and amplification
//! ramping, as a pure library with no I/O and no ambient clock.
//!
//! The engine targets sets of 2–32 tokens expected to trade near parity
//! (stablecoins, wrapped variants of one asset). Its invariant blends
//! constant-sum and constant-product behavior, with the amplification
//! coefficient `A` selecting the blend:
//!
//! ```text
//! A·n^n·Σx_i + D = A·D·n^n + D^(n+1) / (n^n·Πx_i)
//! ```
//!
//! - `A = 1` — behaves like constant product (`x · y = k`)
//! - `A → ∞` — approaches constant sum (1:1 swaps)
//!
//! All arithmetic is integer-only and checked; intermediates widen to 256
//! bits, rounding always favors the pool, and every fallible operation
//! returns a typed [`SwapError`](error::SwapError).
//!
//! # Quick Start
//!
//! ```rust
//! use stableswap_engine::config::PoolConfig;
//! use stableswap_engine::domain::{Amount, Decimals, Fee, Timestamp, Token, TokenAddress};
//! use stableswap_engine::pool::StableSwapPool;
//!
//! // 1. Define two 18-decimal stablecoins
//! let usd_a = Token::new(
//!     TokenAddress::from_bytes([1u8; 32]),
//!     Decimals::new(18).expect("valid decimals"),
//! );
//! let usd_b = Token::new(
//!     TokenAddress::from_bytes([2u8; 32]),
//!     Decimals::new(18).expect("valid decimals"),
//! );
//!
//! // 2. Build a pool: A = 50, 0.1% swap fee, no admin fee
//! let config = PoolConfig::new(
//!     vec![usd_a, usd_b],
//!     TokenAddress::from_bytes([9u8; 32]),
//!     50,
//!     Fee::new(10_000_000),
//!     Fee::ZERO,
//! )
//! .expect("valid config");
//! let mut pool = StableSwapPool::from_config(&config).expect("pool created");
//!
//! // 3. Seed it with 1.0 of each token
//! let one = Amount::new(1_000_000_000_000_000_000);
//! let now = Timestamp::new(1_700_000_000);
//! let minted = pool
//!     .add_liquidity(&[one, one], Amount::ZERO, now)
//!     .expect("seed deposit");
//! assert_eq!(minted.get(), 2_000_000_000_000_000_000);
//!
//! // 4. Swap 0.1 of token 0 for token 1
//! let dy = pool
//!     .swap(0, 1, Amount::new(100_000_000_000_000_000), Amount::ZERO, now)
//!     .expect("swap succeeded");
//! assert!(dy.get() > 0);
//! ```
//!
//! # Time
//!
//! The amplification coefficient can ramp linearly between two values.
//! Rather than reading a clock, every time-dependent operation takes the
//! current [`Timestamp`](domain::Timestamp) as an argument, which keeps
//! results reproducible and lets hosts (chains, simulators, tests) supply
//! their own notion of time.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Fee`](domain::Fee), [`Token`](domain::Token), etc. |
//! | [`config`] | Validated pool blueprint: [`PoolConfig`](config::PoolConfig) |
//! | [`pool`]   | [`StableSwapPool`](pool::StableSwapPool): swaps, liquidity, admin operations |
//! | [`amp`]    | [`AmplificationSchedule`](amp::AmplificationSchedule) and ramp guard rails |
//! | [`math`]   | Checked arithmetic and the Newton's-method invariant solvers |
//! | [`error`]  | [`SwapError`](error::SwapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod amp;
pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;

#[cfg(test)]
mod proptest_properties;
