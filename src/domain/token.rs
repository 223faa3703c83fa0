//! Token identity type.

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};

/// The identity of a pooled token: its address plus its native decimal
/// count.
///
/// Two tokens are equal only if both address and decimals match; the pool
/// additionally rejects two tokens sharing an address at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`. Infallible: both components are validated
    /// at their own construction sites.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token's native decimal count.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}
