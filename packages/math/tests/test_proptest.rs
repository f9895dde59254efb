// Property-Based Testing with Proptest
// Run with: cargo test -p tidepool-math --test test_proptest

use proptest::prelude::*;
use tidepool_math::*;

// ============================================================
// FULL MATH PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: mul_div_floor(a, b, b) = a
    #[test]
    fn prop_mul_div_identity(a in any::<u128>(), b in 1u128..) {
        prop_assert_eq!(mul_div_floor(a, b, b), Ok(a));
    }

    /// Property: ceil is floor or floor + 1
    #[test]
    fn prop_mul_div_ceil_bounds(
        a in 0u128..u128::MAX / 4,
        b in 0u128..u128::MAX / 4,
        denominator in (1u128 << 64)..u128::MAX
    ) {
        let floor = mul_div_floor(a, b, denominator);
        let ceil = mul_div_ceil(a, b, denominator);
        if let (Ok(floor), Ok(ceil)) = (floor, ceil) {
            prop_assert!(ceil == floor || ceil == floor + 1);
        }
    }

    /// Property: crediting fee growth back to the liquidity that earned it
    /// returns the fee, less at most one unit of rounding
    #[test]
    fn prop_fee_growth_credit_round_trip(fee in any::<u64>(), liquidity in 1u128..) {
        let growth = fee_growth_delta_x128(fee as u128, liquidity);
        let earned = mul_div_u256(growth, U256::from(liquidity), Q128, false).unwrap();
        prop_assert!(earned <= U256::from(fee));
        prop_assert!(earned + 1 >= U256::from(fee));
    }
}

// ============================================================
// TICK MATH PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: sqrt price strictly increases with tick
    #[test]
    fn prop_tick_monotonic(tick in MIN_TICK..MAX_TICK) {
        let price1 = get_sqrt_price_at_tick(tick).unwrap();
        let price2 = get_sqrt_price_at_tick(tick + 1).unwrap();
        prop_assert!(price2 > price1, "tick={}", tick);
    }

    /// Property: tick -> price -> tick round trip is exact
    #[test]
    fn prop_tick_round_trip(tick in MIN_TICK..MAX_TICK) {
        let price = get_sqrt_price_at_tick(tick).unwrap();
        prop_assert_eq!(get_tick_at_sqrt_price(price).unwrap(), tick);
    }

    /// Property: the tick of any valid price brackets that price
    #[test]
    fn prop_tick_brackets_price(high in 0u128..0xfffd8963u128, low in any::<u128>(), shift in 0u32..128) {
        let price = ((U256::from(high) << 128) | U256::from(low)) >> shift;
        prop_assume!(price >= MIN_SQRT_PRICE_X96);
        let tick = get_tick_at_sqrt_price(price).unwrap();
        prop_assert!(get_sqrt_price_at_tick(tick).unwrap() <= price);
        prop_assert!(get_sqrt_price_at_tick(tick + 1).unwrap() > price);
    }
}

// ============================================================
// PRICE MOVEMENT PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: input moves the price in the swap direction
    #[test]
    fn prop_price_direction(
        sqrt_price in (1u128 << 95)..(1u128 << 97),
        liquidity in 1_000u128..1_000_000_000u128,
        amount_in in 1u128..1_000_000u128
    ) {
        let sqrt_price = U256::from(sqrt_price);
        let down = get_next_sqrt_price_from_input(sqrt_price, liquidity, amount_in, true).unwrap();
        prop_assert!(down <= sqrt_price);

        let up = get_next_sqrt_price_from_input(sqrt_price, liquidity, amount_in, false).unwrap();
        prop_assert!(up >= sqrt_price);
    }

    /// Property: rounding never lets a position withdraw more than it deposited
    #[test]
    fn prop_deposit_covers_withdrawal(
        sqrt_price_a in (1u128 << 94)..(1u128 << 98),
        sqrt_price_b in (1u128 << 94)..(1u128 << 98),
        liquidity in 1u128..1_000_000_000_000u128
    ) {
        prop_assume!(sqrt_price_a != sqrt_price_b);
        let (sqrt_price_a, sqrt_price_b) = (U256::from(sqrt_price_a), U256::from(sqrt_price_b));
        let paid0 = get_amount_0_delta_signed(sqrt_price_a, sqrt_price_b, liquidity as i128).unwrap();
        let returned0 = get_amount_0_delta_signed(sqrt_price_a, sqrt_price_b, -(liquidity as i128)).unwrap();
        prop_assert!(paid0 + returned0 >= 0);

        let paid1 = get_amount_1_delta_signed(sqrt_price_a, sqrt_price_b, liquidity as i128).unwrap();
        let returned1 = get_amount_1_delta_signed(sqrt_price_a, sqrt_price_b, -(liquidity as i128)).unwrap();
        prop_assert!(paid1 + returned1 >= 0);
    }
}

// ============================================================
// SWAP STEP PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: an exact-input step never spends more than it was given
    /// and never passes its target
    #[test]
    fn prop_exact_in_step_bounded(
        current_tick in -10_000i32..10_000,
        target_offset in 1i32..5_000,
        zero_for_one: bool,
        liquidity in 1_000u128..1_000_000_000_000u128,
        amount in 1i128..1_000_000_000i128,
        fee in 0u32..100_000
    ) {
        let current = get_sqrt_price_at_tick(current_tick).unwrap();
        let target_tick = if zero_for_one { current_tick - target_offset } else { current_tick + target_offset };
        let target = get_sqrt_price_at_tick(target_tick).unwrap();

        let step = compute_swap_step(current, target, liquidity, amount, fee).unwrap();
        prop_assert!(step.amount_in + step.fee_amount <= amount as u128);
        if zero_for_one {
            prop_assert!(step.sqrt_price_next_x96 >= target && step.sqrt_price_next_x96 <= current);
        } else {
            prop_assert!(step.sqrt_price_next_x96 <= target && step.sqrt_price_next_x96 >= current);
        }
    }

    /// Property: an exact-output step never hands out more than requested
    #[test]
    fn prop_exact_out_step_bounded(
        current_tick in -10_000i32..10_000,
        target_offset in 1i32..5_000,
        zero_for_one: bool,
        liquidity in 1_000u128..1_000_000_000_000u128,
        amount in 1i128..1_000_000_000i128,
        fee in 0u32..100_000
    ) {
        let current = get_sqrt_price_at_tick(current_tick).unwrap();
        let target_tick = if zero_for_one { current_tick - target_offset } else { current_tick + target_offset };
        let target = get_sqrt_price_at_tick(target_tick).unwrap();

        let step = compute_swap_step(current, target, liquidity, -amount, fee).unwrap();
        prop_assert!(step.amount_out <= amount as u128);
    }
}
