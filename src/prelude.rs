//! Convenience re-exports for common types.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use stableswap_engine::prelude::*;
//! ```

pub use crate::amp::AmplificationSchedule;
pub use crate::config::PoolConfig;
pub use crate::domain::{
    Amount, Decimals, Fee, Rounding, Timestamp, Token, TokenAddress,
};
pub use crate::error::{Result, SwapError};
pub use crate::math::CheckedArithmetic;
pub use crate::pool::StableSwapPool;
