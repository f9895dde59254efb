// TidePool Math Package
//
// Fixed-point primitives shared by every other package. Prices are carried as
// square roots in Q64.96 and fee growth in Q128, both in 256 bits;
// intermediates that can exceed 256 bits are widened to 512.

#![no_std]

pub mod constants;
pub mod error;
pub mod full_math;
pub mod liquidity;
pub mod sqrt_price;
pub mod swap_math;
pub mod tick_math;

pub use constants::*;
pub use error::MathError;
pub use primitive_types::U256;

pub use full_math::{
    div_rounding_up, fee_growth_delta_x128, mul_div_ceil, mul_div_floor, mul_div_u256, u256_to_u128,
};

pub use tick_math::{get_sqrt_price_at_tick, get_tick_at_sqrt_price};

pub use sqrt_price::{
    get_amount_0_delta,
    get_amount_0_delta_signed,
    get_amount_1_delta,
    get_amount_1_delta_signed,
    get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};

pub use swap_math::{compute_swap_step, SwapStep};

pub use liquidity::{
    add_delta,
    get_amounts_for_liquidity,
    get_liquidity_for_amount0,
    get_liquidity_for_amount1,
    get_liquidity_for_amounts,
};

/// Convert an unsigned amount into the signed token-amount domain.
#[inline]
pub fn to_i128(value: u128) -> Result<i128, MathError> {
    i128::try_from(value).map_err(|_| MathError::Overflow)
}
