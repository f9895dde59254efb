// Tick Update and Crossing Logic

use tidepool_math::{add_delta, MAX_TICK, MAX_TICK_SPACING, MIN_TICK, U256};

use crate::access::TickAccess;
use crate::error::TickError;
use crate::fee_growth::wrapping_sub;

/// Update a tick when liquidity referencing it is added or removed.
///
/// Returns `true` when the tick flipped between empty and non-empty, in
/// which case the caller must flip its bitmap bit.
///
/// A newly referenced tick at or below the current tick assumes all fee
/// growth so far happened below it.
#[allow(clippy::too_many_arguments)]
pub fn update_tick<S: TickAccess + ?Sized>(
    ticks: &mut S,
    tick: i32,
    current_tick: i32,
    liquidity_delta: i128,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
    upper: bool,
    max_liquidity: u128,
) -> Result<bool, TickError> {
    let mut info = ticks.read_tick(tick);

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = add_delta(liquidity_gross_before, liquidity_delta)?;

    if liquidity_gross_after > max_liquidity {
        return Err(TickError::LiquidityCapExceeded);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 {
        if tick <= current_tick {
            info.fee_growth_outside_0_x128 = fee_growth_global_0_x128;
            info.fee_growth_outside_1_x128 = fee_growth_global_1_x128;
        }
        info.initialized = true;
    }

    info.liquidity_gross = liquidity_gross_after;

    // an upper boundary removes liquidity when crossed upward
    info.liquidity_net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(TickError::LiquidityOverflow)?;

    ticks.write_tick(tick, &info);

    Ok(flipped)
}

/// Cross a tick boundary during a swap.
///
/// Flips the outside fee growth snapshots and returns the tick's net
/// liquidity; the caller negates it when moving down.
pub fn cross_tick<S: TickAccess + ?Sized>(
    ticks: &mut S,
    tick: i32,
    fee_growth_global_0_x128: U256,
    fee_growth_global_1_x128: U256,
) -> i128 {
    let mut info = ticks.read_tick(tick);

    info.fee_growth_outside_0_x128 =
        wrapping_sub(fee_growth_global_0_x128, info.fee_growth_outside_0_x128);
    info.fee_growth_outside_1_x128 =
        wrapping_sub(fee_growth_global_1_x128, info.fee_growth_outside_1_x128);

    ticks.write_tick(tick, &info);

    info.liquidity_net
}

/// Drop a tick that no position references anymore.
pub fn clear_tick<S: TickAccess + ?Sized>(ticks: &mut S, tick: i32) {
    ticks.remove_tick(tick);
}

/// Per-tick gross liquidity ceiling for a spacing.
///
/// Sized so that even if every usable tick held the maximum, active
/// liquidity could not overflow `u128`.
pub fn tick_spacing_to_max_liquidity_per_tick(tick_spacing: i32) -> Result<u128, TickError> {
    if tick_spacing <= 0 || tick_spacing > MAX_TICK_SPACING {
        return Err(TickError::InvalidTickSpacing);
    }
    let min_tick = (MIN_TICK / tick_spacing) * tick_spacing;
    let max_tick = (MAX_TICK / tick_spacing) * tick_spacing;
    let num_ticks = ((max_tick - min_tick) / tick_spacing) as u128 + 1;
    Ok(u128::MAX / num_ticks)
}
