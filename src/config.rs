//! Pool configuration and validation.

use serde::{Deserialize, Serialize};

use crate::amp::MAX_A;
use crate::domain::{Fee, Token, TokenAddress, MAX_ADMIN_FEE, MAX_SWAP_FEE};
use crate::error::{Result, SwapError};

/// Minimum number of pooled tokens.
pub const MIN_TOKENS: usize = 2;

/// Maximum number of pooled tokens.
pub const MAX_TOKENS: usize = 32;

/// Configuration for a StableSwap pool.
///
/// Defines the immutable token set plus the initial values of the tunable
/// parameters (amplification, swap fee, admin fee). All validation happens
/// up front so that a constructed pool never has to re-check its own
/// parameters.
///
/// # Amplification Parameter
///
/// The `initial_a` parameter (`A`) controls the curve shape:
///
/// - `A = 1` — curve degrades to constant product (`x · y = k`)
/// - `A → ∞` — curve approaches constant sum (`x + y = const`, 1:1 swaps)
/// - Typical range for stablecoin sets: 50–5000
///
/// # Validation
///
/// - Between [`MIN_TOKENS`] and [`MAX_TOKENS`] tokens, all with distinct
///   addresses.
/// - `0 < initial_a < MAX_A` (external, unscaled form).
/// - `swap_fee` at most [`MAX_SWAP_FEE`], `admin_fee` at most
///   [`MAX_ADMIN_FEE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    tokens: Vec<Token>,
    lp_token: TokenAddress,
    initial_a: u128,
    swap_fee: Fee,
    admin_fee: Fee,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::validate`].
    pub fn new(
        tokens: Vec<Token>,
        lp_token: TokenAddress,
        initial_a: u128,
        swap_fee: Fee,
        admin_fee: Fee,
    ) -> Result<Self> {
        let config = Self {
            tokens,
            lp_token,
            initial_a,
            swap_fee,
            admin_fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidConfiguration`] if the token count is outside
    ///   `MIN_TOKENS..=MAX_TOKENS`, token addresses repeat, or
    ///   `initial_a` is out of range.
    /// - [`SwapError::FeeTooHigh`] if either fee exceeds its maximum.
    pub fn validate(&self) -> Result<()> {
        if self.tokens.len() < MIN_TOKENS || self.tokens.len() > MAX_TOKENS {
            return Err(SwapError::InvalidConfiguration(
                "token count must be in 2..=32",
            ));
        }
        for (i, token) in self.tokens.iter().enumerate() {
            if self.tokens[..i]
                .iter()
                .any(|earlier| earlier.address() == token.address())
            {
                return Err(SwapError::InvalidConfiguration(
                    "duplicate token address",
                ));
            }
        }
        if self.initial_a == 0 || self.initial_a >= MAX_A {
            return Err(SwapError::InvalidConfiguration(
                "amplification must be in 1..MAX_A",
            ));
        }
        if self.swap_fee.get() > MAX_SWAP_FEE {
            return Err(SwapError::FeeTooHigh("swap fee exceeds maximum"));
        }
        if self.admin_fee.get() > MAX_ADMIN_FEE {
            return Err(SwapError::FeeTooHigh("admin fee exceeds maximum"));
        }
        Ok(())
    }

    /// Returns the pooled tokens in index order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the LP token address.
    #[must_use]
    pub const fn lp_token(&self) -> TokenAddress {
        self.lp_token
    }

    /// Returns the initial amplification coefficient (external form).
    #[must_use]
    pub const fn initial_a(&self) -> u128 {
        self.initial_a
    }

    /// Returns the initial swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> Fee {
        self.swap_fee
    }

    /// Returns the initial admin fee.
    #[must_use]
    pub const fn admin_fee(&self) -> Fee {
        self.admin_fee
    }
}
