use tidepool_math::*;

fn range_60() -> (U256, U256) {
    (get_sqrt_price_at_tick(-60).unwrap(), get_sqrt_price_at_tick(60).unwrap())
}

// ============================================================
// AMOUNT DELTA TESTS
// ============================================================

#[test]
fn test_amount_deltas_round_in_pool_favor() {
    let (lower, upper) = range_60();
    let liquidity = 1_000_000u128;

    assert_eq!(get_amount_0_delta(lower, upper, liquidity, true).unwrap(), 6000);
    assert_eq!(get_amount_0_delta(lower, upper, liquidity, false).unwrap(), 5999);
    assert_eq!(get_amount_1_delta(lower, upper, liquidity, true).unwrap(), 6000);
    assert_eq!(get_amount_1_delta(lower, upper, liquidity, false).unwrap(), 5999);
}

#[test]
fn test_amount_deltas_large_liquidity() {
    let (lower, upper) = range_60();
    let liquidity = 1_000_000_000_000_000_000u128;

    assert_eq!(
        get_amount_0_delta(lower, upper, liquidity, true).unwrap(),
        5999709018652707
    );
    assert_eq!(
        get_amount_1_delta(lower, upper, liquidity, false).unwrap(),
        5999709018652706
    );
}

#[test]
fn test_amount_delta_order_independent() {
    let (lower, upper) = range_60();
    assert_eq!(
        get_amount_0_delta(lower, upper, 12345, false),
        get_amount_0_delta(upper, lower, 12345, false)
    );
    assert_eq!(
        get_amount_1_delta(lower, upper, 12345, true),
        get_amount_1_delta(upper, lower, 12345, true)
    );
}

#[test]
fn test_signed_deltas() {
    let (lower, upper) = range_60();
    assert_eq!(get_amount_0_delta_signed(lower, upper, 1_000_000).unwrap(), 6000);
    assert_eq!(get_amount_0_delta_signed(lower, upper, -1_000_000).unwrap(), -5999);
    assert_eq!(get_amount_1_delta_signed(lower, upper, 1_000_000).unwrap(), 6000);
    assert_eq!(get_amount_1_delta_signed(lower, upper, -1_000_000).unwrap(), -5999);
}

#[test]
fn test_amount_0_delta_wide_intermediate() {
    // (liquidity << 96) * (upper - lower) needs 366 bits here
    let lower = get_sqrt_price_at_tick(800_000).unwrap();
    let amount = get_amount_0_delta(lower, MAX_SQRT_PRICE_X96, 1u128 << 110, false);
    assert_eq!(amount.unwrap(), 5455347382412209);
}

#[test]
fn test_amount_0_delta_overflow_reported() {
    let amount = get_amount_0_delta(MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96, 1u128 << 100, false);
    assert_eq!(amount, Err(MathError::Overflow));
}

// ============================================================
// NEXT PRICE TESTS
// ============================================================

#[test]
fn test_next_price_from_input_direction() {
    let liquidity = 1_000_000_000u128;
    let down = get_next_sqrt_price_from_input(Q96, liquidity, 1_000_000, true).unwrap();
    let up = get_next_sqrt_price_from_input(Q96, liquidity, 1_000_000, false).unwrap();
    assert!(down < Q96);
    assert!(up > Q96);
}

#[test]
fn test_next_price_from_input_zero_amount() {
    assert_eq!(get_next_sqrt_price_from_input(Q96, 1_000, 0, true).unwrap(), Q96);
    assert_eq!(get_next_sqrt_price_from_input(Q96, 1_000, 0, false).unwrap(), Q96);
}

#[test]
fn test_next_price_from_input_token1_exact() {
    // adding L/2 of token1 moves the sqrt price by exactly 0.5
    let next = get_next_sqrt_price_from_input(Q96, 1_000, 500, false).unwrap();
    assert_eq!(next, Q96 + Q96 / 2u8);
}

#[test]
fn test_next_price_requires_liquidity() {
    assert_eq!(
        get_next_sqrt_price_from_input(Q96, 0, 10, true),
        Err(MathError::ZeroLiquidity)
    );
    assert_eq!(
        get_next_sqrt_price_from_output(Q96, 0, 10, true),
        Err(MathError::ZeroLiquidity)
    );
}

#[test]
fn test_next_price_from_output_cannot_drain_reserves() {
    // token1 reserve above price 1.0 at L = 1000 is 1000 units
    assert_eq!(
        get_next_sqrt_price_from_output(Q96, 1_000, 1_000, true),
        Err(MathError::Overflow)
    );
    let next = get_next_sqrt_price_from_output(Q96, 1_000, 500, true).unwrap();
    assert_eq!(next, Q96 / 2u8);
}

#[test]
fn test_input_then_amount_is_consistent() {
    let liquidity = 5_000_000u128;
    let amount_in = 12_345u128;
    let next = get_next_sqrt_price_from_input(Q96, liquidity, amount_in, true).unwrap();
    let needed = get_amount_0_delta(next, Q96, liquidity, true).unwrap();
    assert!(needed <= amount_in, "price must not move further than the input pays for");
}
