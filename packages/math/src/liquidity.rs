// SPDX-License-Identifier: MIT
// Liquidity Calculation Functions

use primitive_types::U256;

use crate::constants::Q96;
use crate::error::MathError;
use crate::full_math::{mul_div_u256, u256_to_u128};
use crate::sqrt_price::{get_amount_0_delta, get_amount_1_delta};

/// Apply a signed delta to a liquidity value, failing instead of wrapping.
#[inline]
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, MathError> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(MathError::LiquidityUnderflow)
    } else {
        liquidity
            .checked_add(delta as u128)
            .ok_or(MathError::LiquidityOverflow)
    }
}

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}

/// Liquidity provided by `amount0` over `[sqrt_a, sqrt_b]`:
/// `amount0 * (sqrt_a * sqrt_b) / (sqrt_b - sqrt_a)`.
pub fn get_liquidity_for_amount0(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: u128,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    if lower == upper {
        return Err(MathError::DivisionByZero);
    }
    let intermediate = mul_div_u256(lower, upper, Q96, false)?;
    u256_to_u128(mul_div_u256(U256::from(amount0), intermediate, upper - lower, false)?)
}

/// Liquidity provided by `amount1` over `[sqrt_a, sqrt_b]`:
/// `amount1 / (sqrt_b - sqrt_a)`.
pub fn get_liquidity_for_amount1(
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount1: u128,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);
    u256_to_u128(mul_div_u256(U256::from(amount1), Q96, upper - lower, false)?)
}

/// Maximum liquidity that `amount0`/`amount1` can back at the current price.
///
/// Below the range only token0 counts, above it only token1, inside it the
/// scarcer side wins.
pub fn get_liquidity_for_amounts(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    amount0: u128,
    amount1: u128,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);

    if sqrt_price_x96 <= lower {
        get_liquidity_for_amount0(lower, upper, amount0)
    } else if sqrt_price_x96 < upper {
        let liquidity0 = get_liquidity_for_amount0(sqrt_price_x96, upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(lower, sqrt_price_x96, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        get_liquidity_for_amount1(lower, upper, amount1)
    }
}

/// Token amounts represented by `liquidity` at the current price, rounded
/// down.
pub fn get_amounts_for_liquidity(
    sqrt_price_x96: U256,
    sqrt_price_a_x96: U256,
    sqrt_price_b_x96: U256,
    liquidity: u128,
) -> Result<(u128, u128), MathError> {
    let (lower, upper) = sorted(sqrt_price_a_x96, sqrt_price_b_x96);

    if sqrt_price_x96 <= lower {
        Ok((get_amount_0_delta(lower, upper, liquidity, false)?, 0))
    } else if sqrt_price_x96 < upper {
        Ok((
            get_amount_0_delta(sqrt_price_x96, upper, liquidity, false)?,
            get_amount_1_delta(lower, sqrt_price_x96, liquidity, false)?,
        ))
    } else {
        Ok((0, get_amount_1_delta(lower, upper, liquidity, false)?))
    }
}
