//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers five properties:
//!
//! 1. **Swap reversibility** — round-trip 0→1→0 returns ≤ original.
//! 2. **Invariant preservation** — `D` non-decreasing under zero-fee swaps.
//! 3. **Output monotonicity** — larger input ⇒ larger or equal output.
//! 4. **Liquidity conservation** — seed then full exit returns the seed.
//! 5. **No free LP tokens** — deposit then proportional exit never exceeds
//!    the deposit.

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Amount, Decimals, Fee, Timestamp, Token, TokenAddress};
use crate::math::compute_d;
use crate::pool::StableSwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const T: Timestamp = Timestamp::new(1_000);

fn token(addr_byte: u8) -> Token {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    Token::new(TokenAddress::from_bytes([addr_byte; 32]), d)
}

fn make_pool(amp: u128, swap_fee: u64, reserves: &[u128]) -> StableSwapPool {
    let tokens: Vec<Token> = (0..reserves.len()).map(|i| token(i as u8 + 1)).collect();
    let Ok(cfg) = PoolConfig::new(
        tokens,
        TokenAddress::from_bytes([9u8; 32]),
        amp,
        Fee::new(swap_fee),
        Fee::ZERO,
    ) else {
        panic!("valid config");
    };
    let Ok(mut pool) = StableSwapPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let amounts: Vec<Amount> = reserves.iter().map(|&r| Amount::new(r)).collect();
    let Ok(_) = pool.add_liquidity(&amounts, Amount::ZERO, T) else {
        panic!("seed deposit failed");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Normalized reserves between 0.001 and 1 000 000 tokens.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Amplification in the range real deployments use.
fn amplification_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000u128
}

/// Swap size as a fraction of the input reserve, in basis points of
/// one-tenth: 0.01%..=10%.
fn swap_fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn round_trip_never_profits(
        amp in amplification_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in swap_fraction_strategy(),
    ) {
        let mut pool = make_pool(amp, 10_000_000, &[ra, rb]);
        let dx = Amount::new(ra / 10_000 * frac);
        prop_assume!(!dx.is_zero());

        // Extreme imbalance can make the output round to nothing, which
        // the pool rejects; such cases prove nothing about round trips.
        let Ok(dy) = pool.swap(0, 1, dx, Amount::ZERO, T) else {
            return Ok(());
        };
        if dy.is_zero() {
            return Ok(());
        }
        let Ok(dx_back) = pool.swap(1, 0, dy, Amount::ZERO, T) else {
            return Ok(());
        };
        prop_assert!(dx_back <= dx);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant preservation under zero-fee swaps
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn invariant_non_decreasing_without_fees(
        amp in amplification_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in swap_fraction_strategy(),
    ) {
        let mut pool = make_pool(amp, 0, &[ra, rb]);
        let a = pool.get_a_precise(T);
        let Ok(b0) = pool.get_token_balance(0) else {
            return Err(TestCaseError::fail("balance read failed"));
        };
        let Ok(b1) = pool.get_token_balance(1) else {
            return Err(TestCaseError::fail("balance read failed"));
        };
        let Ok(d_before) = compute_d(&[b0.get(), b1.get()], a) else {
            return Err(TestCaseError::fail("d before failed"));
        };

        let dx = Amount::new(ra / 10_000 * frac);
        prop_assume!(!dx.is_zero());
        let Ok(_) = pool.swap(0, 1, dx, Amount::ZERO, T) else {
            return Ok(());
        };

        let Ok(b0) = pool.get_token_balance(0) else {
            return Err(TestCaseError::fail("balance read failed"));
        };
        let Ok(b1) = pool.get_token_balance(1) else {
            return Err(TestCaseError::fail("balance read failed"));
        };
        let Ok(d_after) = compute_d(&[b0.get(), b1.get()], a) else {
            return Err(TestCaseError::fail("d after failed"));
        };
        // Convergence tolerance of the solver is one unit per call.
        prop_assert!(d_after + 4 >= d_before);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Output monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn larger_input_never_pays_less(
        amp in amplification_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        frac in 1u128..=999u128,
    ) {
        let pool = make_pool(amp, 10_000_000, &[ra, rb]);
        let dx_small = Amount::new(ra / 10_000 * frac);
        let dx_large = Amount::new(ra / 10_000 * (frac + 1));
        prop_assume!(!dx_small.is_zero());

        let (Ok(dy_small), Ok(dy_large)) = (
            pool.calculate_swap(0, 1, dx_small, T),
            pool.calculate_swap(0, 1, dx_large, T),
        ) else {
            return Ok(());
        };
        prop_assert!(dy_large >= dy_small);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn full_exit_returns_the_seed(
        amp in amplification_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let mut pool = make_pool(amp, 10_000_000, &[ra, rb]);
        let supply = pool.lp_supply();
        let Ok(outputs) = pool.remove_liquidity(supply, &[Amount::ZERO, Amount::ZERO]) else {
            return Err(TestCaseError::fail("exit failed"));
        };
        prop_assert_eq!(outputs, vec![Amount::new(ra), Amount::new(rb)]);
        prop_assert_eq!(pool.lp_supply(), Amount::ZERO);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Deposit fees only reduce the mint
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn mint_never_exceeds_fee_free_estimate(
        amp in amplification_strategy(),
        reserve in reserve_strategy(),
        da in reserve_strategy(),
        db in reserve_strategy(),
    ) {
        let mut pool = make_pool(amp, 10_000_000, &[reserve, reserve]);
        let deposit = [Amount::new(da), Amount::new(db)];
        let Ok(estimate) = pool.calculate_token_amount(&deposit, true, T) else {
            return Err(TestCaseError::fail("estimate failed"));
        };
        let Ok(minted) = pool.add_liquidity(&deposit, Amount::ZERO, T) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        prop_assert!(minted <= estimate);
    }
}
