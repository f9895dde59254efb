// SPDX-License-Identifier: MIT
// Tick <-> sqrt price conversion

use primitive_types::U256;

use crate::constants::{MAX_SQRT_PRICE_X96, MAX_TICK, MIN_SQRT_PRICE_X96, MIN_TICK};
use crate::error::MathError;

/// `2^128 / sqrt(1.0001)^(2^i)` for i = 0..19, in Q128.
const SQRT_RATIO_LADDER: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Calculate `sqrt(1.0001^tick) * 2^96`, rounded up.
///
/// The ratio is built in Q128 from the binary decomposition of `|tick|`,
/// inverted for positive ticks, then rounded up into Q64.96 so that
/// `get_tick_at_sqrt_price(get_sqrt_price_at_tick(t)) == t`.
///
/// # Errors
/// `TickOutOfBounds` if `tick` is outside `[MIN_TICK, MAX_TICK]`.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<U256, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfBounds);
    }

    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(SQRT_RATIO_LADDER[0])
    } else {
        U256::one() << 128u32
    };

    for (bit, factor) in SQRT_RATIO_LADDER.iter().enumerate().skip(1) {
        if abs_tick & (1u32 << bit) != 0 {
            ratio = (ratio * U256::from(*factor)) >> 128u32;
        }
    }

    if tick > 0 {
        ratio = U256::max_value() / ratio;
    }

    // Q128 -> Q64.96, rounding up
    let fraction_mask = U256::from(u32::MAX);
    let mut sqrt_price = ratio >> 32u32;
    if !(ratio & fraction_mask).is_zero() {
        sqrt_price = sqrt_price + U256::one();
    }

    Ok(sqrt_price)
}

/// Greatest tick whose sqrt price is less than or equal to `sqrt_price_x96`.
///
/// Binary search over the tick range; each step is one ladder evaluation.
///
/// # Errors
/// `SqrtPriceOutOfBounds` if the price is outside
/// `[MIN_SQRT_PRICE_X96, MAX_SQRT_PRICE_X96)`.
pub fn get_tick_at_sqrt_price(sqrt_price_x96: U256) -> Result<i32, MathError> {
    if sqrt_price_x96 < MIN_SQRT_PRICE_X96 || sqrt_price_x96 >= MAX_SQRT_PRICE_X96 {
        return Err(MathError::SqrtPriceOutOfBounds);
    }

    // sqrt_price(low) <= price < sqrt_price(high)
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if get_sqrt_price_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}
