//! The StableSwap pool: swap, liquidity, and parameter operations.
//!
//! A [`StableSwapPool`] holds 2–32 tokens whose prices are expected to stay
//! near parity. Balances are stored normalized to 18 decimal places; native
//! amounts cross the boundary at the public API, scaled by each token's
//! precision multiplier on the way in and floored back on the way out.
//! Floor dust always favors the pool.
//!
//! Every time-dependent operation takes the current [`Timestamp`]
//! explicitly; the pool never reads a clock.
//!
//! # Rounding discipline
//!
//! - Swap and one-token-withdrawal outputs are reduced by one base unit
//!   before fees, so a rounding error can never pay out more than the
//!   invariant allows.
//! - Imbalanced-withdrawal burns are rounded up by one LP unit for the
//!   same reason.

use serde::{Deserialize, Serialize};

use crate::amp::AmplificationSchedule;
use crate::config::PoolConfig;
use crate::domain::{Amount, Fee, Timestamp, Token, TokenAddress, MAX_ADMIN_FEE, MAX_SWAP_FEE};
use crate::error::{Result, SwapError};
use crate::math::{casted_mul, compute_d, compute_y, compute_y_from_d, to_u128};

/// Scale of [`StableSwapPool::get_virtual_price`]: the price of one LP
/// token in 18-decimal units of the (common) underlying.
pub const VIRTUAL_PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

/// A point-in-time view of the pool's parameters, mirroring what an
/// external host would persist: ramp state, fees, LP handle, supply and
/// the pause flag. Balances are queried per token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub initial_a_precise: u128,
    pub future_a_precise: u128,
    pub initial_a_time: Timestamp,
    pub future_a_time: Timestamp,
    pub swap_fee: Fee,
    pub admin_fee: Fee,
    pub lp_token: TokenAddress,
    pub lp_supply: Amount,
    pub paused: bool,
}

/// An N-token StableSwap pool.
///
/// Constructed from a validated [`PoolConfig`]; starts empty, with LP
/// supply zero, and is seeded by the first
/// [`add_liquidity`](Self::add_liquidity) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableSwapPool {
    tokens: Vec<Token>,
    lp_token: TokenAddress,
    precision_multipliers: Vec<u128>,
    /// Tradable balances, normalized to 18 decimals.
    balances: Vec<u128>,
    lp_supply: u128,
    swap_fee: Fee,
    admin_fee: Fee,
    /// Protocol take, in native token units, excluded from `balances`.
    admin_balances: Vec<u128>,
    amp: AmplificationSchedule,
    paused: bool,
}

impl StableSwapPool {
    /// Builds an empty pool from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if the configuration
    /// fails re-validation.
    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        let n = config.tokens().len();
        let precision_multipliers = config
            .tokens()
            .iter()
            .map(|t| t.decimals().precision_multiplier())
            .collect();
        Ok(Self {
            tokens: config.tokens().to_vec(),
            lp_token: config.lp_token(),
            precision_multipliers,
            balances: vec![0; n],
            lp_supply: 0,
            swap_fee: config.swap_fee(),
            admin_fee: config.admin_fee(),
            admin_balances: vec![0; n],
            amp: AmplificationSchedule::new(config.initial_a())?,
            paused: false,
        })
    }

    // -----------------------------------------------------------------------
    // Unit conversion
    // -----------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tokens.len() {
            return Err(SwapError::IndexOutOfRange);
        }
        Ok(())
    }

    /// Native units of token `index` to normalized 18-decimal units.
    fn normalize(&self, index: usize, amount: Amount) -> Result<u128> {
        amount
            .get()
            .checked_mul(self.precision_multipliers[index])
            .ok_or(SwapError::Overflow("amount normalization"))
    }

    /// Normalized units back to native units of token `index`, flooring.
    fn denormalize(&self, index: usize, normalized: u128) -> u128 {
        normalized / self.precision_multipliers[index]
    }

    fn normalized_amounts(&self, amounts: &[Amount]) -> Result<Vec<u128>> {
        if amounts.len() != self.tokens.len() {
            return Err(SwapError::AmountsLengthMismatch);
        }
        (0..amounts.len())
            .map(|i| self.normalize(i, amounts[i]))
            .collect()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.paused {
            return Err(SwapError::Paused);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Swaps
    // -----------------------------------------------------------------------

    /// Quotes a swap of `dx` native units of token `from` for token `to`
    /// at time `now`, net of the swap fee, without mutating the pool.
    ///
    /// # Errors
    ///
    /// - [`SwapError::IndexOutOfRange`] on bad or equal indexes.
    /// - [`SwapError::ZeroDeposit`] if `dx` is zero.
    /// - Solver errors from [`compute_y`] on degenerate balances.
    pub fn calculate_swap(
        &self,
        from: usize,
        to: usize,
        dx: Amount,
        now: Timestamp,
    ) -> Result<Amount> {
        let (dy, _, _) = self.swap_outcome(from, to, dx, now)?;
        Ok(Amount::new(dy))
    }

    /// Executes a swap of `dx` native units of token `from` for token
    /// `to`, requiring at least `min_dy` native units out.
    ///
    /// Returns the output amount in native units. The fee stays in the
    /// pool except for the admin share, which moves to the admin ledger.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Paused`] while the pool is paused.
    /// - [`SwapError::SlippageExceeded`] if the output is below `min_dy`.
    /// - Everything [`calculate_swap`](Self::calculate_swap) can produce.
    pub fn swap(
        &mut self,
        from: usize,
        to: usize,
        dx: Amount,
        min_dy: Amount,
        now: Timestamp,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let (dy_native, fee_native, admin_native) = self.swap_outcome(from, to, dx, now)?;
        if dy_native < min_dy.get() {
            return Err(SwapError::SlippageExceeded("swap output below minimum"));
        }

        let dx_normalized = self.normalize(from, dx)?;
        let out_normalized = dy_native
            .checked_add(admin_native)
            .and_then(|out| out.checked_mul(self.precision_multipliers[to]))
            .ok_or(SwapError::Overflow("swap output normalization"))?;
        self.balances[from] = self.balances[from]
            .checked_add(dx_normalized)
            .ok_or(SwapError::Overflow("balance after swap input"))?;
        self.balances[to] = self.balances[to]
            .checked_sub(out_normalized)
            .ok_or(SwapError::Underflow("balance after swap output"))?;
        self.admin_balances[to] += admin_native;

        tracing::debug!(
            from,
            to,
            dx = %dx,
            dy = dy_native,
            fee = fee_native,
            "swap executed"
        );
        Ok(Amount::new(dy_native))
    }

    /// Shared swap math: returns `(dy, fee, admin_share)` in native units
    /// of token `to`.
    fn swap_outcome(
        &self,
        from: usize,
        to: usize,
        dx: Amount,
        now: Timestamp,
    ) -> Result<(u128, u128, u128)> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Err(SwapError::IndexOutOfRange);
        }
        if dx.is_zero() {
            return Err(SwapError::ZeroDeposit("swap input is zero"));
        }

        let dx_normalized = self.normalize(from, dx)?;
        let x_new = self.balances[from]
            .checked_add(dx_normalized)
            .ok_or(SwapError::Overflow("swap input"))?;
        let y = compute_y(self.amp.effective_a(now), from, to, x_new, &self.balances)?;

        // One base unit withheld so rounding never favors the trader.
        let dy = self.balances[to]
            .checked_sub(y)
            .and_then(|gross| gross.checked_sub(1))
            .ok_or(SwapError::Underflow("swap output"))?;
        let fee = self.swap_fee.apply(dy)?;
        let dy_native = self.denormalize(to, dy - fee);
        let fee_native = self.denormalize(to, fee);
        let admin_native = self.admin_fee.apply(fee_native)?;
        Ok((dy_native, fee_native, admin_native))
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    /// Estimates the LP delta for depositing (`is_deposit`) or withdrawing
    /// the given native amounts. Fees are ignored, so deposits are
    /// overestimated and withdrawals underestimated; use the result for
    /// slippage bounds, not accounting.
    ///
    /// # Errors
    ///
    /// - [`SwapError::AmountsLengthMismatch`] on a wrong-length slice.
    /// - [`SwapError::InsufficientSupply`] for any estimate on an unseeded
    ///   pool.
    /// - [`SwapError::Underflow`] for a withdrawal exceeding a balance.
    /// - Solver errors from [`compute_d`].
    pub fn calculate_token_amount(
        &self,
        amounts: &[Amount],
        is_deposit: bool,
        now: Timestamp,
    ) -> Result<Amount> {
        let deltas = self.normalized_amounts(amounts)?;
        if self.lp_supply == 0 {
            return Err(SwapError::InsufficientSupply);
        }
        let a = self.amp.effective_a(now);
        let d0 = compute_d(&self.balances, a)?;
        let mut new_balances = self.balances.clone();
        for (balance, delta) in new_balances.iter_mut().zip(&deltas) {
            *balance = if is_deposit {
                balance
                    .checked_add(*delta)
                    .ok_or(SwapError::Overflow("deposit estimate"))?
            } else {
                balance
                    .checked_sub(*delta)
                    .ok_or(SwapError::Underflow("withdrawal estimate"))?
            };
        }
        let d1 = compute_d(&new_balances, a)?;
        let (hi, lo) = if is_deposit { (d1, d0) } else { (d0, d1) };
        let diff = hi
            .checked_sub(lo)
            .ok_or(SwapError::Underflow("invariant moved against estimate"))?;
        let lp = to_u128(
            casted_mul(self.lp_supply, diff) / d0,
            "token amount estimate",
        )?;
        Ok(Amount::new(lp))
    }

    /// Deposits native `amounts` and mints LP tokens, requiring at least
    /// `min_to_mint`.
    ///
    /// The first deposit must include every token and mints exactly the
    /// invariant `D`. Later deposits pay the imbalance fee on each token's
    /// deviation from the proportional amount.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Paused`] while the pool is paused.
    /// - [`SwapError::ZeroDeposit`] if the first deposit omits a token, or
    ///   the deposit does not grow the invariant.
    /// - [`SwapError::SlippageExceeded`] if the mint is below
    ///   `min_to_mint`.
    pub fn add_liquidity(
        &mut self,
        amounts: &[Amount],
        min_to_mint: Amount,
        now: Timestamp,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let deposits = self.normalized_amounts(amounts)?;
        let a = self.amp.effective_a(now);

        let d0 = if self.lp_supply == 0 {
            if deposits.iter().any(|&d| d == 0) {
                return Err(SwapError::ZeroDeposit(
                    "initial deposit must include every token",
                ));
            }
            0
        } else {
            compute_d(&self.balances, a)?
        };

        let mut new_balances: Vec<u128> = self
            .balances
            .iter()
            .zip(&deposits)
            .map(|(&b, &d)| b.checked_add(d).ok_or(SwapError::Overflow("deposit")))
            .collect::<Result<_>>()?;
        let d1 = compute_d(&new_balances, a)?;
        if d1 <= d0 {
            return Err(SwapError::ZeroDeposit("deposit does not grow invariant"));
        }

        // Stage the post-deposit balances and admin credits in locals;
        // nothing is written back until every check below has passed.
        let mut admin_credits = vec![0u128; self.tokens.len()];
        let (minted, balances_after) = if self.lp_supply == 0 {
            (d1, new_balances)
        } else {
            let per_token = self.swap_fee.per_token_rate(self.tokens.len() as u64);
            let mut balances_after = vec![0u128; self.tokens.len()];
            for i in 0..self.tokens.len() {
                let ideal = to_u128(
                    casted_mul(d1, self.balances[i]) / d0,
                    "ideal balance",
                )?;
                let difference = ideal.abs_diff(new_balances[i]);
                let fee = per_token.apply(difference)?;
                let admin_native = self.denormalize(i, self.admin_fee.apply(fee)?);
                admin_credits[i] = admin_native;
                balances_after[i] = new_balances[i]
                    .checked_sub(admin_native * self.precision_multipliers[i])
                    .ok_or(SwapError::Underflow("balance after deposit fee"))?;
                new_balances[i] -= fee;
            }
            let d2 = compute_d(&new_balances, a)?;
            let gain = d2
                .checked_sub(d0)
                .ok_or(SwapError::Underflow("deposit consumed by fees"))?;
            let minted = to_u128(casted_mul(self.lp_supply, gain) / d0, "lp mint")?;
            (minted, balances_after)
        };

        if minted < min_to_mint.get() {
            return Err(SwapError::SlippageExceeded("mint below minimum"));
        }
        self.lp_supply = self
            .lp_supply
            .checked_add(minted)
            .ok_or(SwapError::Overflow("lp supply"))?;
        self.balances = balances_after;
        for (ledger, credit) in self.admin_balances.iter_mut().zip(&admin_credits) {
            *ledger += credit;
        }

        tracing::debug!(minted, supply = self.lp_supply, "liquidity added");
        Ok(Amount::new(minted))
    }

    /// Quotes the proportional withdrawal for burning `lp_amount`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InsufficientSupply`] if `lp_amount` exceeds
    /// the LP supply (an unseeded pool included).
    pub fn calculate_remove_liquidity(&self, lp_amount: Amount) -> Result<Vec<Amount>> {
        if lp_amount.get() > self.lp_supply || self.lp_supply == 0 {
            return Err(SwapError::InsufficientSupply);
        }
        (0..self.tokens.len())
            .map(|i| {
                let share = to_u128(
                    casted_mul(self.balances[i], lp_amount.get()) / self.lp_supply,
                    "withdrawal share",
                )?;
                Ok(Amount::new(self.denormalize(i, share)))
            })
            .collect()
    }

    /// Burns `lp_amount` for a proportional share of every balance,
    /// requiring at least `min_amounts` of each token.
    ///
    /// This is the only balance-moving operation that works while paused:
    /// LPs can always exit proportionally.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InsufficientSupply`] if `lp_amount` exceeds supply.
    /// - [`SwapError::SlippageExceeded`] if any output is below its
    ///   minimum.
    pub fn remove_liquidity(
        &mut self,
        lp_amount: Amount,
        min_amounts: &[Amount],
    ) -> Result<Vec<Amount>> {
        if min_amounts.len() != self.tokens.len() {
            return Err(SwapError::AmountsLengthMismatch);
        }
        let outputs = self.calculate_remove_liquidity(lp_amount)?;
        for (output, minimum) in outputs.iter().zip(min_amounts) {
            if output < minimum {
                return Err(SwapError::SlippageExceeded(
                    "withdrawal output below minimum",
                ));
            }
        }
        for (i, output) in outputs.iter().enumerate() {
            self.balances[i] -= output.get() * self.precision_multipliers[i];
        }
        self.lp_supply -= lp_amount.get();

        tracing::debug!(burned = %lp_amount, supply = self.lp_supply, "liquidity removed");
        Ok(outputs)
    }

    /// Quotes a one-token withdrawal: native units of token `index` for
    /// burning `lp_amount`, net of the imbalance fee.
    ///
    /// # Errors
    ///
    /// Same conditions as
    /// [`remove_liquidity_one_token`](Self::remove_liquidity_one_token),
    /// minus the pause and slippage checks.
    pub fn calculate_withdraw_one_token(
        &self,
        lp_amount: Amount,
        index: usize,
        now: Timestamp,
    ) -> Result<Amount> {
        let (dy, _, _) = self.withdraw_one_outcome(lp_amount, index, now)?;
        Ok(Amount::new(dy))
    }

    /// Burns `lp_amount` entirely for token `index`, requiring at least
    /// `min_amount` out.
    ///
    /// The withdrawal is priced as if the pool first rebalanced to the
    /// post-burn invariant, charging the per-token imbalance fee on each
    /// balance's expected movement.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Paused`] while the pool is paused.
    /// - [`SwapError::InsufficientSupply`] if `lp_amount` exceeds supply.
    /// - [`SwapError::SlippageExceeded`] if the output is below
    ///   `min_amount`.
    pub fn remove_liquidity_one_token(
        &mut self,
        lp_amount: Amount,
        index: usize,
        min_amount: Amount,
        now: Timestamp,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let (dy_native, fee_native, admin_native) =
            self.withdraw_one_outcome(lp_amount, index, now)?;
        if dy_native < min_amount.get() {
            return Err(SwapError::SlippageExceeded(
                "withdrawal output below minimum",
            ));
        }

        let out_normalized = dy_native
            .checked_add(admin_native)
            .and_then(|out| out.checked_mul(self.precision_multipliers[index]))
            .ok_or(SwapError::Overflow("withdrawal normalization"))?;
        self.balances[index] = self.balances[index]
            .checked_sub(out_normalized)
            .ok_or(SwapError::Underflow("balance after withdrawal"))?;
        self.admin_balances[index] += admin_native;
        self.lp_supply -= lp_amount.get();

        tracing::debug!(
            index,
            burned = %lp_amount,
            dy = dy_native,
            fee = fee_native,
            "one-token liquidity removed"
        );
        Ok(Amount::new(dy_native))
    }

    /// Shared one-token-withdrawal math: `(dy, fee, admin_share)` in
    /// native units of token `index`.
    fn withdraw_one_outcome(
        &self,
        lp_amount: Amount,
        index: usize,
        now: Timestamp,
    ) -> Result<(u128, u128, u128)> {
        self.check_index(index)?;
        if lp_amount.get() > self.lp_supply || self.lp_supply == 0 {
            return Err(SwapError::InsufficientSupply);
        }

        let a = self.amp.effective_a(now);
        let d0 = compute_d(&self.balances, a)?;
        let d1 = d0
            .checked_sub(to_u128(
                casted_mul(lp_amount.get(), d0) / self.lp_supply,
                "burned invariant share",
            )?)
            .ok_or(SwapError::Underflow("post-burn invariant"))?;
        let new_y = compute_y_from_d(a, index, &self.balances, d1)?;

        // Each balance's expected move toward the post-burn invariant is
        // charged the per-token imbalance fee.
        let per_token = self.swap_fee.per_token_rate(self.tokens.len() as u64);
        let mut reduced = self.balances.clone();
        for (i, balance) in reduced.iter_mut().enumerate() {
            let proportional = to_u128(
                casted_mul(self.balances[i], d1) / d0,
                "proportional balance",
            )?;
            let expected_dx = if i == index {
                proportional
                    .checked_sub(new_y)
                    .ok_or(SwapError::Underflow("expected withdrawal delta"))?
            } else {
                self.balances[i] - proportional
            };
            *balance -= per_token.apply(expected_dx)?;
        }

        let y_after_fee = compute_y_from_d(a, index, &reduced, d1)?;
        let dy = reduced[index]
            .checked_sub(y_after_fee)
            .and_then(|gross| gross.checked_sub(1))
            .ok_or(SwapError::Underflow("withdrawal output"))?;

        let dy_native = self.denormalize(index, dy);
        let dy_without_fee = self.denormalize(index, self.balances[index] - new_y);
        let fee_native = dy_without_fee - dy_native;
        let admin_native = self.admin_fee.apply(fee_native)?;
        Ok((dy_native, fee_native, admin_native))
    }

    /// Burns LP tokens for an exact basket of native `amounts`, requiring
    /// the burn to stay at or below `max_burn`.
    ///
    /// The burn is the invariant drop plus the imbalance fee, rounded up
    /// by one LP unit.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Paused`] while the pool is paused.
    /// - [`SwapError::InsufficientSupply`] on an unseeded pool or a burn
    ///   exceeding supply.
    /// - [`SwapError::Underflow`] if some amount exceeds its balance.
    /// - [`SwapError::SlippageExceeded`] if the burn exceeds `max_burn`.
    pub fn remove_liquidity_imbalance(
        &mut self,
        amounts: &[Amount],
        max_burn: Amount,
        now: Timestamp,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let withdrawals = self.normalized_amounts(amounts)?;
        if self.lp_supply == 0 {
            return Err(SwapError::InsufficientSupply);
        }

        let a = self.amp.effective_a(now);
        let d0 = compute_d(&self.balances, a)?;
        let mut new_balances: Vec<u128> = self
            .balances
            .iter()
            .zip(&withdrawals)
            .map(|(&b, &w)| {
                b.checked_sub(w)
                    .ok_or(SwapError::Underflow("withdrawal exceeds balance"))
            })
            .collect::<Result<_>>()?;
        let d1 = compute_d(&new_balances, a)?;

        // Admin credits are staged alongside the balances and applied only
        // in the commit block below.
        let per_token = self.swap_fee.per_token_rate(self.tokens.len() as u64);
        let mut balances_after = self.balances.clone();
        let mut admin_credits = vec![0u128; self.tokens.len()];
        for i in 0..self.tokens.len() {
            let ideal = to_u128(casted_mul(d1, self.balances[i]) / d0, "ideal balance")?;
            let difference = ideal.abs_diff(new_balances[i]);
            let fee = per_token.apply(difference)?;
            let admin_native = self.denormalize(i, self.admin_fee.apply(fee)?);
            admin_credits[i] = admin_native;
            balances_after[i] = new_balances[i]
                .checked_sub(admin_native * self.precision_multipliers[i])
                .ok_or(SwapError::Underflow("balance after withdrawal fee"))?;
            new_balances[i] -= fee;
        }
        let d2 = compute_d(&new_balances, a)?;

        // +1 so rounding can never underprice the basket.
        let drop = d0
            .checked_sub(d2)
            .ok_or(SwapError::Underflow("invariant drop"))?;
        let burn = to_u128(casted_mul(self.lp_supply, drop) / d0, "lp burn")? + 1;
        if burn > self.lp_supply {
            return Err(SwapError::InsufficientSupply);
        }
        if burn > max_burn.get() {
            return Err(SwapError::SlippageExceeded("burn above maximum"));
        }

        self.balances = balances_after;
        for (ledger, credit) in self.admin_balances.iter_mut().zip(&admin_credits) {
            *ledger += credit;
        }
        self.lp_supply -= burn;

        tracing::debug!(burned = burn, supply = self.lp_supply, "imbalanced liquidity removed");
        Ok(Amount::new(burn))
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// The price of one LP token in 18-decimal units of the underlying:
    /// `D · 1e18 / supply`. Zero for an unseeded pool.
    ///
    /// Grows monotonically under swaps (fees accrue to the pool) and is
    /// the standard health indicator for a StableSwap pool.
    ///
    /// # Errors
    ///
    /// Solver errors from [`compute_d`] on degenerate balances.
    pub fn get_virtual_price(&self, now: Timestamp) -> Result<Amount> {
        if self.lp_supply == 0 {
            return Ok(Amount::ZERO);
        }
        let d = compute_d(&self.balances, self.amp.effective_a(now))?;
        let price = to_u128(
            casted_mul(d, VIRTUAL_PRICE_PRECISION) / self.lp_supply,
            "virtual price",
        )?;
        Ok(Amount::new(price))
    }

    /// The external (unscaled) amplification coefficient at `now`.
    #[must_use]
    pub fn get_a(&self, now: Timestamp) -> u128 {
        self.amp.effective_a_unscaled(now)
    }

    /// The precise (scaled) amplification coefficient at `now`.
    #[must_use]
    pub fn get_a_precise(&self, now: Timestamp) -> u128 {
        self.amp.effective_a(now)
    }

    /// The pooled tokens in index order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The token at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::IndexOutOfRange`] on a bad index.
    pub fn get_token(&self, index: usize) -> Result<Token> {
        self.check_index(index)?;
        Ok(self.tokens[index])
    }

    /// The index of the token with the given address, if pooled.
    #[must_use]
    pub fn token_index(&self, address: TokenAddress) -> Option<usize> {
        self.tokens.iter().position(|t| t.address() == address)
    }

    /// The LP token address.
    #[must_use]
    pub const fn lp_token(&self) -> TokenAddress {
        self.lp_token
    }

    /// The outstanding LP supply.
    #[must_use]
    pub const fn lp_supply(&self) -> Amount {
        Amount::new(self.lp_supply)
    }

    /// The tradable balance of token `index`, in native units.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::IndexOutOfRange`] on a bad index.
    pub fn get_token_balance(&self, index: usize) -> Result<Amount> {
        self.check_index(index)?;
        Ok(Amount::new(self.denormalize(index, self.balances[index])))
    }

    /// The accrued admin balance of token `index`, in native units.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::IndexOutOfRange`] on a bad index.
    pub fn get_admin_balance(&self, index: usize) -> Result<Amount> {
        self.check_index(index)?;
        Ok(Amount::new(self.admin_balances[index]))
    }

    /// The current swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> Fee {
        self.swap_fee
    }

    /// The current admin fee.
    #[must_use]
    pub const fn admin_fee(&self) -> Fee {
        self.admin_fee
    }

    /// Whether the pool is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// A snapshot of the pool's parameter state.
    #[must_use]
    pub const fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            initial_a_precise: self.amp.initial_a_precise(),
            future_a_precise: self.amp.future_a_precise(),
            initial_a_time: self.amp.initial_a_time(),
            future_a_time: self.amp.future_a_time(),
            swap_fee: self.swap_fee,
            admin_fee: self.admin_fee,
            lp_token: self.lp_token,
            lp_supply: Amount::new(self.lp_supply),
            paused: self.paused,
        }
    }

    // -----------------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------------

    /// Drains the admin ledger, returning the native amounts withdrawn
    /// per token.
    pub fn withdraw_admin_fees(&mut self) -> Vec<Amount> {
        let withdrawn = self
            .admin_balances
            .iter_mut()
            .map(|balance| Amount::new(core::mem::take(balance)))
            .collect();
        tracing::debug!("admin fees withdrawn");
        withdrawn
    }

    /// Sets the swap fee.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::FeeTooHigh`] above [`MAX_SWAP_FEE`].
    pub fn set_swap_fee(&mut self, fee: Fee) -> Result<()> {
        if fee.get() > MAX_SWAP_FEE {
            return Err(SwapError::FeeTooHigh("swap fee exceeds maximum"));
        }
        self.swap_fee = fee;
        tracing::debug!(fee = %fee, "swap fee updated");
        Ok(())
    }

    /// Sets the admin fee (the protocol's share of each swap fee).
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::FeeTooHigh`] above [`MAX_ADMIN_FEE`].
    pub fn set_admin_fee(&mut self, fee: Fee) -> Result<()> {
        if fee.get() > MAX_ADMIN_FEE {
            return Err(SwapError::FeeTooHigh("admin fee exceeds maximum"));
        }
        self.admin_fee = fee;
        tracing::debug!(fee = %fee, "admin fee updated");
        Ok(())
    }

    /// Pauses or unpauses the pool. A paused pool rejects swaps and all
    /// liquidity operations except proportional withdrawal.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        tracing::debug!(paused, "pause state updated");
    }

    /// Begins a linear amplification ramp. See
    /// [`AmplificationSchedule::ramp_to`].
    ///
    /// # Errors
    ///
    /// Propagates the schedule's guard-rail errors.
    pub fn ramp_a(&mut self, future_a: u128, future_time: Timestamp, now: Timestamp) -> Result<()> {
        self.amp.ramp_to(future_a, future_time, now)?;
        tracing::debug!(future_a, future_time = %future_time, "amplification ramp started");
        Ok(())
    }

    /// Stops an in-progress amplification ramp at its current value. See
    /// [`AmplificationSchedule::stop_ramp`].
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::RampNotActive`] if no ramp is running.
    pub fn stop_ramp_a(&mut self, now: Timestamp) -> Result<()> {
        self.amp.stop_ramp(now)?;
        tracing::debug!(a_precise = self.amp.future_a_precise(), "amplification ramp stopped");
        Ok(())
    }
}
