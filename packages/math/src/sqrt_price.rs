// SPDX-License-Identifier: MIT
// Amount deltas and next-price computation

use primitive_types::U256;

use crate::constants::{Q96, RESOLUTION};
use crate::error::MathError;
use crate::full_math::{div_rounding_up_u256, mul_div_u256, u256_to_u128};
use crate::to_i128;

#[inline]
fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}

// ============================================================
// AMOUNT DELTAS
// ============================================================

/// Amount of token0 between two prices:
/// `liquidity * (upper - lower) / (upper * lower)` in Q64.96.
///
/// Rounds up when computing what a caller must pay, down when computing
/// what the pool pays out.
pub fn get_amount_0_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if lower.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    let amount = if round_up {
        let scaled = mul_div_u256(numerator1, numerator2, upper, true)?;
        div_rounding_up_u256(scaled, lower)?
    } else {
        mul_div_u256(numerator1, numerator2, upper, false)? / lower
    };

    u256_to_u128(amount)
}

/// Amount of token1 between two prices: `liquidity * (upper - lower)`.
pub fn get_amount_1_delta(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    let amount = mul_div_u256(U256::from(liquidity), upper - lower, Q96, round_up)?;
    u256_to_u128(amount)
}

/// Signed token0 delta for a liquidity change.
///
/// Positive deltas (deposits) round up; negative deltas (withdrawals) round
/// down and come back negative.
pub fn get_amount_0_delta_signed(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity_delta: i128,
) -> Result<i128, MathError> {
    if liquidity_delta < 0 {
        let amount = get_amount_0_delta(
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta.unsigned_abs(),
            false,
        )?;
        Ok(-to_i128(amount)?)
    } else {
        to_i128(get_amount_0_delta(
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta as u128,
            true,
        )?)
    }
}

/// Signed token1 delta for a liquidity change. Same rounding as token0.
pub fn get_amount_1_delta_signed(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity_delta: i128,
) -> Result<i128, MathError> {
    if liquidity_delta < 0 {
        let amount = get_amount_1_delta(
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta.unsigned_abs(),
            false,
        )?;
        Ok(-to_i128(amount)?)
    } else {
        to_i128(get_amount_1_delta(
            sqrt_price_a_x96,
            sqrt_price_b_x96,
            liquidity_delta as u128,
            true,
        )?)
    }
}

// ============================================================
// NEXT SQRT PRICE
// ============================================================

/// Price after adding or removing `amount` of token0, rounded up.
///
/// `liquidity * price / (liquidity ± amount * price)`; rounding up keeps the
/// price from moving further than the amount pays for.
fn next_sqrt_price_from_amount0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<U256, MathError> {
    if amount == 0 {
        return Ok(sqrt_price_x96);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let product = U256::from(amount).checked_mul(sqrt_price_x96);

    if add {
        if let Some(denominator) = product.and_then(|p| numerator1.checked_add(p)) {
            return mul_div_u256(numerator1, sqrt_price_x96, denominator, true);
        }
        // numerator1 / (numerator1 / price + amount)
        let denominator = (numerator1 / sqrt_price_x96)
            .checked_add(U256::from(amount))
            .ok_or(MathError::Overflow)?;
        div_rounding_up_u256(numerator1, denominator)
    } else {
        match product {
            Some(product) if numerator1 > product => {
                mul_div_u256(numerator1, sqrt_price_x96, numerator1 - product, true)
            }
            _ => Err(MathError::Overflow),
        }
    }
}

/// Price after adding or removing `amount` of token1, rounded down.
///
/// `price ± amount / liquidity`.
fn next_sqrt_price_from_amount1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<U256, MathError> {
    let scaled = U256::from(amount) << RESOLUTION;
    let liquidity = U256::from(liquidity);

    if add {
        sqrt_price_x96
            .checked_add(scaled / liquidity)
            .ok_or(MathError::Overflow)
    } else {
        let quotient = div_rounding_up_u256(scaled, liquidity)?;
        if sqrt_price_x96 <= quotient {
            return Err(MathError::Overflow);
        }
        Ok(sqrt_price_x96 - quotient)
    }
}

/// Next sqrt price given an input amount of token0 (`zero_for_one`) or
/// token1. Never overshoots the price the input can pay for.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<U256, MathError> {
    if sqrt_price_x96.is_zero() {
        return Err(MathError::SqrtPriceOutOfBounds);
    }
    if liquidity == 0 {
        return Err(MathError::ZeroLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Next sqrt price given an output amount of token1 (`zero_for_one`) or
/// token0. Always moves far enough to cover the output.
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> Result<U256, MathError> {
    if sqrt_price_x96.is_zero() {
        return Err(MathError::SqrtPriceOutOfBounds);
    }
    if liquidity == 0 {
        return Err(MathError::ZeroLiquidity);
    }

    if zero_for_one {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}
