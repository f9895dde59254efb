// SPDX-License-Identifier: MIT
// Full-precision multiply/divide

use primitive_types::{U256, U512};

use crate::constants::FEE_GROWTH_RESOLUTION;
use crate::error::MathError;

/// Narrow a 256-bit value back to `u128`.
#[inline]
pub fn u256_to_u128(value: U256) -> Result<u128, MathError> {
    if value.bits() > 128 {
        return Err(MathError::Overflow);
    }
    Ok(value.low_u128())
}

/// `floor(a * b / denominator)` with a 256-bit intermediate product.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    u256_to_u128(product / U256::from(denominator))
}

/// `ceil(a * b / denominator)` with a 256-bit intermediate product.
pub fn mul_div_ceil(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let (quotient, remainder) = product.div_mod(U256::from(denominator));
    let quotient = if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::one()
    };
    u256_to_u128(quotient)
}

/// `ceil(numerator / denominator)` in 256 bits.
#[inline]
pub(crate) fn div_rounding_up_u256(numerator: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::one())
    }
}

/// `ceil(numerator / denominator)`.
#[inline]
pub fn div_rounding_up(numerator: u128, denominator: u128) -> Result<u128, MathError> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        Ok(quotient)
    } else {
        Ok(quotient + 1)
    }
}

/// 256-bit `a * b / denominator` through a 512-bit product.
///
/// Used where one factor is already a Q96-shifted value.
pub fn mul_div_u256(
    a: U256,
    b: U256,
    denominator: U256,
    round_up: bool,
) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product: U512 = a.full_mul(b);
    let (quotient, remainder) = product.div_mod(U512::from(denominator));
    let quotient = if round_up && !remainder.is_zero() {
        quotient + U512::one()
    } else {
        quotient
    };
    U256::try_from(quotient).map_err(|_| MathError::Overflow)
}

/// Fee growth per unit of liquidity contributed by `fee_amount`:
/// `(fee_amount << 128) / liquidity`.
///
/// The Q128 unit keeps fees far below one token per unit of liquidity
/// visible to the accumulator. Returns 0 for zero liquidity; callers skip
/// the accumulator update in that case.
pub fn fee_growth_delta_x128(fee_amount: u128, liquidity: u128) -> U256 {
    if liquidity == 0 {
        return U256::zero();
    }
    (U256::from(fee_amount) << FEE_GROWTH_RESOLUTION) / U256::from(liquidity)
}
