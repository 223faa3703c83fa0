//! Integration tests exercising the full system from config to pool
//! operation.
//!
//! These tests verify end-to-end flows through the public API: pool
//! construction, the trading lifecycle, all three withdrawal shapes,
//! amplification ramping across time, pausing, admin fee accounting, and
//! state snapshot round-trips.

#![allow(clippy::panic)]

use stableswap_engine::amp::{MIN_RAMP_TIME, RAMP_COOLDOWN};
use stableswap_engine::config::PoolConfig;
use stableswap_engine::domain::{Amount, Decimals, Fee, Timestamp, Token, TokenAddress};
use stableswap_engine::error::SwapError;
use stableswap_engine::pool::StableSwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const ONE: u128 = 1_000_000_000_000_000_000;
const T: Timestamp = Timestamp::new(1_700_000_000);

fn token(addr_byte: u8, decimals: u8) -> Token {
    let Ok(d) = Decimals::new(decimals) else {
        panic!("valid decimals");
    };
    Token::new(TokenAddress::from_bytes([addr_byte; 32]), d)
}

fn config(n_tokens: u8, swap_fee: u64, admin_fee: u64) -> PoolConfig {
    let tokens: Vec<Token> = (1..=n_tokens).map(|i| token(i, 18)).collect();
    let Ok(cfg) = PoolConfig::new(
        tokens,
        TokenAddress::from_bytes([99u8; 32]),
        50,
        Fee::new(swap_fee),
        Fee::new(admin_fee),
    ) else {
        panic!("valid config");
    };
    cfg
}

/// Two 18-decimal tokens, A = 50, 0.1% swap fee, seeded 1.0 + 1.0.
fn seeded_pool(admin_fee: u64) -> StableSwapPool {
    let Ok(mut pool) = StableSwapPool::from_config(&config(2, 10_000_000, admin_fee)) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.add_liquidity(&[Amount::new(ONE), Amount::new(ONE)], Amount::ZERO, T) else {
        panic!("seed deposit failed");
    };
    pool
}

// ---------------------------------------------------------------------------
// Trading lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_two_tokens() {
    let mut pool = seeded_pool(0);

    // Trade: 0.1 of token 0 for token 1.
    let Ok(dy) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap failed");
    };
    assert_eq!(dy, Amount::new(99_702_611_562_565_289));

    // Fees pushed the virtual price above par.
    let Ok(price) = pool.get_virtual_price(T) else {
        panic!("price failed");
    };
    assert_eq!(price, Amount::new(1_000_050_005_862_349_911));

    // Deposit more, imbalanced, and pay the imbalance fee.
    let Ok(minted) = pool.add_liquidity(
        &[Amount::new(ONE / 2), Amount::new(ONE / 4)],
        Amount::ZERO,
        T,
    ) else {
        panic!("second deposit failed");
    };
    assert!(minted > Amount::ZERO);

    // Exit proportionally with everything; the pool drains completely.
    let supply = pool.lp_supply();
    let Ok(outputs) = pool.remove_liquidity(supply, &[Amount::ZERO, Amount::ZERO]) else {
        panic!("exit failed");
    };
    assert_eq!(pool.lp_supply(), Amount::ZERO);
    let Ok(b0) = pool.get_token_balance(0) else {
        panic!("balance failed");
    };
    let Ok(b1) = pool.get_token_balance(1) else {
        panic!("balance failed");
    };
    assert_eq!(b0, Amount::ZERO);
    assert_eq!(b1, Amount::ZERO);
    assert!(outputs[0] > Amount::ZERO && outputs[1] > Amount::ZERO);
}

#[test]
fn three_token_pool_trades_between_any_pair() {
    let Ok(mut pool) = StableSwapPool::from_config(&config(3, 10_000_000, 0)) else {
        panic!("valid pool");
    };
    let seed = [Amount::new(ONE), Amount::new(ONE), Amount::new(ONE)];
    let Ok(minted) = pool.add_liquidity(&seed, Amount::ZERO, T) else {
        panic!("seed deposit failed");
    };
    assert_eq!(minted, Amount::new(3 * ONE));

    let Ok(dy_01) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap 0->1 failed");
    };
    let Ok(dy_21) = pool.swap(2, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap 2->1 failed");
    };
    assert!(dy_01 > Amount::ZERO);
    // The second trade into an already-depleted token 1 pays more slippage.
    assert!(dy_21 < dy_01);

    let Ok(price) = pool.get_virtual_price(T) else {
        panic!("price failed");
    };
    assert!(price > Amount::new(ONE));
}

#[test]
fn quotes_match_execution() {
    let mut pool = seeded_pool(0);
    let Ok(quote) = pool.calculate_swap(0, 1, Amount::new(ONE / 10), T) else {
        panic!("quote failed");
    };
    let Ok(dy) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap failed");
    };
    assert_eq!(quote, dy);

    let pool2 = seeded_pool(0);
    let Ok(one_token_quote) = pool2.calculate_withdraw_one_token(Amount::new(ONE / 10), 1, T)
    else {
        panic!("quote failed");
    };
    let mut pool2 = pool2;
    let Ok(dy) = pool2.remove_liquidity_one_token(Amount::new(ONE / 10), 1, Amount::ZERO, T)
    else {
        panic!("withdrawal failed");
    };
    assert_eq!(one_token_quote, dy);
}

// ---------------------------------------------------------------------------
// Withdrawal shapes
// ---------------------------------------------------------------------------

#[test]
fn withdrawal_shapes_agree_on_value() {
    // Burning the same LP amount through each shape should yield outputs
    // of comparable value; one-token and imbalanced exits pay a fee that
    // balanced exits do not.
    let lp = Amount::new(ONE / 10);

    let mut balanced = seeded_pool(0);
    let Ok(outputs) = balanced.remove_liquidity(lp, &[Amount::ZERO, Amount::ZERO]) else {
        panic!("balanced exit failed");
    };
    let balanced_total = outputs[0].get() + outputs[1].get();
    // A balanced pool pays out exactly proportionally.
    assert_eq!(balanced_total, ONE / 10);

    let mut one_sided = seeded_pool(0);
    let Ok(dy) = one_sided.remove_liquidity_one_token(lp, 0, Amount::ZERO, T) else {
        panic!("one-token exit failed");
    };
    assert_eq!(dy, Amount::new(99_898_393_914_147_000));
    assert!(dy.get() < balanced_total);
}

#[test]
fn imbalanced_withdrawal_burns_what_the_basket_costs() {
    let mut pool = seeded_pool(0);
    let Ok(burned) = pool.remove_liquidity_imbalance(
        &[Amount::new(ONE / 10), Amount::new(2 * ONE / 10)],
        Amount::new(ONE),
        T,
    ) else {
        panic!("imbalanced exit failed");
    };
    assert_eq!(burned, Amount::new(300_107_866_198_958_256));

    let Ok(b0) = pool.get_token_balance(0) else {
        panic!("balance failed");
    };
    let Ok(b1) = pool.get_token_balance(1) else {
        panic!("balance failed");
    };
    assert_eq!(b0, Amount::new(ONE - ONE / 10));
    assert_eq!(b1, Amount::new(ONE - 2 * ONE / 10));
}

#[test]
fn withdrawing_more_than_the_pool_holds_fails() {
    let mut pool = seeded_pool(0);
    let err = pool.remove_liquidity_imbalance(
        &[Amount::new(2 * ONE), Amount::ZERO],
        Amount::new(10 * ONE),
        T,
    );
    assert!(err.is_err());
    let Err(SwapError::Underflow(_)) = err else {
        panic!("expected Underflow");
    };
}

// ---------------------------------------------------------------------------
// Amplification ramping across time
// ---------------------------------------------------------------------------

#[test]
fn ramp_shifts_pricing_gradually() {
    let mut pool = seeded_pool(0);
    let start = Timestamp::new(RAMP_COOLDOWN);
    let end = start.plus(MIN_RAMP_TIME);
    let Ok(()) = pool.ramp_a(100, end, start) else {
        panic!("ramp failed");
    };

    let Ok(quote_start) = pool.calculate_swap(0, 1, Amount::new(ONE / 10), start) else {
        panic!("quote failed");
    };
    let Ok(quote_mid) =
        pool.calculate_swap(0, 1, Amount::new(ONE / 10), start.plus(MIN_RAMP_TIME / 2))
    else {
        panic!("quote failed");
    };
    let Ok(quote_end) = pool.calculate_swap(0, 1, Amount::new(ONE / 10), end) else {
        panic!("quote failed");
    };
    // Higher amplification flattens the curve: more slippage per trade,
    // so the quoted output shrinks as A rises.
    assert!(quote_start > quote_mid);
    assert!(quote_mid > quote_end);

    // Stopping mid-ramp freezes the coefficient.
    let mid = start.plus(MIN_RAMP_TIME / 2);
    let Ok(()) = pool.stop_ramp_a(mid) else {
        panic!("stop failed");
    };
    assert_eq!(pool.get_a_precise(mid), 7_500);
    assert_eq!(pool.get_a_precise(end), 7_500);
}

#[test]
fn ramp_guard_rails_hold() {
    let mut pool = seeded_pool(0);
    let start = Timestamp::new(RAMP_COOLDOWN);

    let err = pool.ramp_a(101, start.plus(MIN_RAMP_TIME), start);
    let Err(SwapError::RampFactorTooLarge) = err else {
        panic!("expected RampFactorTooLarge");
    };
    let err = pool.ramp_a(100, start.plus(MIN_RAMP_TIME - 1), start);
    let Err(SwapError::RampTooSoon(_)) = err else {
        panic!("expected RampTooSoon");
    };
    let err = pool.stop_ramp_a(start);
    let Err(SwapError::RampNotActive) = err else {
        panic!("expected RampNotActive");
    };
}

// ---------------------------------------------------------------------------
// Pausing and administration
// ---------------------------------------------------------------------------

#[test]
fn pause_blocks_entry_but_not_proportional_exit() {
    let mut pool = seeded_pool(0);
    pool.set_paused(true);

    let Err(SwapError::Paused) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("expected Paused");
    };
    let Err(SwapError::Paused) =
        pool.add_liquidity(&[Amount::new(ONE), Amount::new(ONE)], Amount::ZERO, T)
    else {
        panic!("expected Paused");
    };

    let Ok(outputs) = pool.remove_liquidity(Amount::new(ONE), &[Amount::ZERO, Amount::ZERO])
    else {
        panic!("proportional exit must work while paused");
    };
    assert_eq!(outputs.len(), 2);

    // Parameter changes are not gated either.
    let Ok(()) = pool.set_swap_fee(Fee::new(20_000_000)) else {
        panic!("fee update failed");
    };
    assert_eq!(pool.swap_fee(), Fee::new(20_000_000));
}

#[test]
fn admin_fees_accrue_and_withdraw() {
    // 10% of each swap fee goes to the protocol.
    let mut pool = seeded_pool(1_000_000_000);
    let Ok(_) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap failed");
    };

    let Ok(admin) = pool.get_admin_balance(1) else {
        panic!("admin balance failed");
    };
    assert_eq!(admin, Amount::new(9_980_241_397_654));

    // The admin share is excluded from the tradable balance.
    let Ok(balance) = pool.get_token_balance(1) else {
        panic!("balance failed");
    };
    assert_eq!(
        balance,
        Amount::new(ONE - 99_702_611_562_565_289 - 9_980_241_397_654)
    );

    let withdrawn = pool.withdraw_admin_fees();
    assert_eq!(withdrawn[1], Amount::new(9_980_241_397_654));
    let Ok(admin) = pool.get_admin_balance(1) else {
        panic!("admin balance failed");
    };
    assert_eq!(admin, Amount::ZERO);

    // Draining the ledger does not touch the tradable balance.
    let Ok(balance_after) = pool.get_token_balance(1) else {
        panic!("balance failed");
    };
    assert_eq!(balance_after, balance);
}

// ---------------------------------------------------------------------------
// Mixed decimals
// ---------------------------------------------------------------------------

#[test]
fn mixed_decimal_pool_trades_at_parity() {
    let Ok(cfg) = PoolConfig::new(
        vec![token(1, 6), token(2, 18)],
        TokenAddress::from_bytes([99u8; 32]),
        50,
        Fee::new(10_000_000),
        Fee::ZERO,
    ) else {
        panic!("valid config");
    };
    let Ok(mut pool) = StableSwapPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(minted) =
        pool.add_liquidity(&[Amount::new(1_000_000), Amount::new(ONE)], Amount::ZERO, T)
    else {
        panic!("seed deposit failed");
    };
    // LP units are always 18-decimal regardless of token decimals.
    assert_eq!(minted, Amount::new(2 * ONE));

    // 0.1 of the 6-decimal token buys the same as in an 18-decimal pool.
    let Ok(dy) = pool.swap(0, 1, Amount::new(100_000), Amount::ZERO, T) else {
        panic!("swap failed");
    };
    assert_eq!(dy, Amount::new(99_702_611_562_565_289));
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn pool_state_round_trips_through_serde() {
    let mut pool = seeded_pool(1_000_000_000);
    let Ok(_) = pool.swap(0, 1, Amount::new(ONE / 10), Amount::ZERO, T) else {
        panic!("swap failed");
    };

    let Ok(snapshot) = serde_json::to_string(&pool) else {
        panic!("serialize failed");
    };
    let Ok(restored) = serde_json::from_str::<StableSwapPool>(&snapshot) else {
        panic!("deserialize failed");
    };
    assert_eq!(restored, pool);

    // The restored pool keeps quoting identically.
    let Ok(quote_a) = pool.calculate_swap(1, 0, Amount::new(ONE / 20), T) else {
        panic!("quote failed");
    };
    let Ok(quote_b) = restored.calculate_swap(1, 0, Amount::new(ONE / 20), T) else {
        panic!("quote failed");
    };
    assert_eq!(quote_a, quote_b);
}
