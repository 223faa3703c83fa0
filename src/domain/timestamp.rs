//! Unix timestamp passed into time-dependent operations.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A point in time, in whole seconds since the Unix epoch.
///
/// The engine never reads a clock itself: the hosting collaborator passes
/// the current time into every time-dependent call, which keeps the
/// amplification ramp deterministic and testable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[must_use]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw seconds value.
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns this timestamp shifted forward by `seconds`, saturating at
    /// the representable maximum.
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Seconds elapsed since `earlier`, or zero if `earlier` is in the
    /// future.
    #[must_use]
    pub const fn seconds_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
