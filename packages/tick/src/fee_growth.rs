// Fee Growth Calculations

use tidepool_math::U256;

use crate::access::TickAccess;

/// Modular `a - b` over 256 bits. Fee growth accumulators wrap.
#[inline]
pub fn wrapping_sub(a: U256, b: U256) -> U256 {
    a.overflowing_sub(b).0
}

/// Modular `a + b` over 256 bits.
#[inline]
pub fn wrapping_add(a: U256, b: U256) -> U256 {
    a.overflowing_add(b).0
}

/// Fee growth per unit of liquidity accrued inside `[lower_tick, upper_tick)`.
///
/// `global - below(lower) - above(upper)`, where each side is derived from
/// the tick's outside snapshot and where the current tick sits. All
/// arithmetic is modular; only differences of the result are meaningful.
pub fn get_fee_growth_inside<S: TickAccess + ?Sized>(
    ticks: &S,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
) -> (U256, U256) {
    let lower = ticks.read_tick(lower_tick);
    let upper = ticks.read_tick(upper_tick);

    let (below_0, below_1) = if current_tick >= lower_tick {
        (lower.fee_growth_outside_0_x128, lower.fee_growth_outside_1_x128)
    } else {
        (
            wrapping_sub(fee_growth_global_0_x128, lower.fee_growth_outside_0_x128),
            wrapping_sub(fee_growth_global_1_x128, lower.fee_growth_outside_1_x128),
        )
    };

    let (above_0, above_1) = if current_tick < upper_tick {
        (upper.fee_growth_outside_0_x128, upper.fee_growth_outside_1_x128)
    } else {
        (
            wrapping_sub(fee_growth_global_0_x128, upper.fee_growth_outside_0_x128),
            wrapping_sub(fee_growth_global_1_x128, upper.fee_growth_outside_1_x128),
        )
    };

    (
        wrapping_sub(wrapping_sub(fee_growth_global_0_x128, below_0), above_0),
        wrapping_sub(wrapping_sub(fee_growth_global_1_x128, below_1), above_1),
    )
}
