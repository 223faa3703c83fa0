//! Fundamental domain value types for the StableSwap engine.
//!
//! Tokens, amounts, fees, decimal precision, rounding direction and
//! timestamps. All types are newtypes with validated constructors so an
//! invalid value cannot reach the invariant math.

mod amount;
mod decimals;
mod fee;
mod rounding;
mod timestamp;
mod token;
mod token_address;

pub use amount::Amount;
pub use decimals::Decimals;
pub use fee::{Fee, FEE_DENOMINATOR, MAX_ADMIN_FEE, MAX_SWAP_FEE};
pub use rounding::Rounding;
pub use timestamp::Timestamp;
pub use token::Token;
pub use token_address::TokenAddress;
