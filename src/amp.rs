//! Amplification coefficient storage and ramping.
//!
//! The amplification coefficient `A` controls how flat the invariant curve
//! is around the balance point. It is stored pre-multiplied by
//! [`A_PRECISION`] so that a slow linear ramp between two values moves in
//! steps fine enough to be economically invisible; all solver call sites
//! consume the precise form.
//!
//! Ramps are linear in time between a start and a target, subject to the
//! guard rails below, and can be cut short with [`AmplificationSchedule::stop_ramp`].

use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;
use crate::error::{Result, SwapError};

/// Scale factor between the external `A` and the stored precise form.
pub const A_PRECISION: u128 = 100;

/// Exclusive upper bound on the external (unscaled) `A`.
pub const MAX_A: u128 = 1_000_000;

/// A single ramp may at most double or halve the precise coefficient.
pub const MAX_A_CHANGE: u128 = 2;

/// Minimum duration of a ramp: 14 days.
pub const MIN_RAMP_TIME: u64 = 14 * 24 * 60 * 60;

/// Minimum delay between the starts of two consecutive ramps: 1 day.
pub const RAMP_COOLDOWN: u64 = 24 * 60 * 60;

/// The amplification coefficient and its ramp state.
///
/// Outside a ramp the initial and future values coincide. During a ramp
/// [`effective_a`](Self::effective_a) interpolates linearly between them;
/// once the deadline passes the future value holds indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationSchedule {
    initial_a_precise: u128,
    future_a_precise: u128,
    initial_a_time: Timestamp,
    future_a_time: Timestamp,
}

impl AmplificationSchedule {
    /// Creates a flat (non-ramping) schedule from an external `A`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] unless `0 < a < MAX_A`.
    pub fn new(a: u128) -> Result<Self> {
        if a == 0 || a >= MAX_A {
            return Err(SwapError::InvalidConfiguration(
                "amplification must be in 1..MAX_A",
            ));
        }
        let precise = a * A_PRECISION;
        Ok(Self {
            initial_a_precise: precise,
            future_a_precise: precise,
            initial_a_time: Timestamp::ZERO,
            future_a_time: Timestamp::ZERO,
        })
    }

    /// The precise coefficient in effect at `now`.
    ///
    /// During a ramp this interpolates linearly between the initial and
    /// future values; afterwards it is the future value.
    #[must_use]
    pub fn effective_a(&self, now: Timestamp) -> u128 {
        let t1 = self.future_a_time;
        let a1 = self.future_a_precise;
        if now >= t1 {
            return a1;
        }
        let t0 = self.initial_a_time;
        let a0 = self.initial_a_precise;
        let elapsed = u128::from(now.seconds_since(t0));
        let total = u128::from(t1.seconds_since(t0));
        // now < t1 implies total > 0.
        if a1 > a0 {
            a0 + (a1 - a0) * elapsed / total
        } else {
            a0 - (a0 - a1) * elapsed / total
        }
    }

    /// The external (unscaled) coefficient at `now`, rounded down.
    #[must_use]
    pub fn effective_a_unscaled(&self, now: Timestamp) -> u128 {
        self.effective_a(now) / A_PRECISION
    }

    /// Begins a linear ramp from the current coefficient to `future_a`
    /// (external form), finishing at `future_time`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::RampTooSoon`] if less than [`RAMP_COOLDOWN`] has
    ///   passed since the previous ramp started, or if `future_time` is
    ///   closer than [`MIN_RAMP_TIME`].
    /// - [`SwapError::InvalidConfiguration`] unless `0 < future_a < MAX_A`.
    /// - [`SwapError::RampFactorTooLarge`] if the precise coefficient
    ///   would more than double or less than halve.
    pub fn ramp_to(&mut self, future_a: u128, future_time: Timestamp, now: Timestamp) -> Result<()> {
        if now < self.initial_a_time.plus(RAMP_COOLDOWN) {
            return Err(SwapError::RampTooSoon("ramp cooldown in effect"));
        }
        if future_time < now.plus(MIN_RAMP_TIME) {
            return Err(SwapError::RampTooSoon("ramp duration below minimum"));
        }
        if future_a == 0 || future_a >= MAX_A {
            return Err(SwapError::InvalidConfiguration(
                "amplification must be in 1..MAX_A",
            ));
        }

        let current = self.effective_a(now);
        let future_precise = future_a * A_PRECISION;
        let allowed = if future_precise < current {
            future_precise * MAX_A_CHANGE >= current
        } else {
            future_precise <= current * MAX_A_CHANGE
        };
        if !allowed {
            return Err(SwapError::RampFactorTooLarge);
        }

        self.initial_a_precise = current;
        self.future_a_precise = future_precise;
        self.initial_a_time = now;
        self.future_a_time = future_time;
        Ok(())
    }

    /// Freezes the coefficient at its current effective value and ends the
    /// ramp.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::RampNotActive`] if no ramp is in progress.
    pub fn stop_ramp(&mut self, now: Timestamp) -> Result<()> {
        if now >= self.future_a_time {
            return Err(SwapError::RampNotActive);
        }
        let current = self.effective_a(now);
        self.initial_a_precise = current;
        self.future_a_precise = current;
        self.initial_a_time = now;
        self.future_a_time = now;
        Ok(())
    }

    /// The precise coefficient the current ramp started from.
    #[must_use]
    pub const fn initial_a_precise(&self) -> u128 {
        self.initial_a_precise
    }

    /// The precise coefficient the current ramp is heading to.
    #[must_use]
    pub const fn future_a_precise(&self) -> u128 {
        self.future_a_precise
    }

    /// When the current ramp started.
    #[must_use]
    pub const fn initial_a_time(&self) -> Timestamp {
        self.initial_a_time
    }

    /// When the current ramp finishes.
    #[must_use]
    pub const fn future_a_time(&self) -> Timestamp {
        self.future_a_time
    }
}
