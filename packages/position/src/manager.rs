// Position Management Logic

use tidepool_math::{MAX_TICK, MIN_TICK, U256};

use crate::error::PositionError;
use crate::fees::calculate_pending_fees;
use crate::types::Position;

/// Credit fees earned since the last update, refresh the snapshots, then
/// apply `liquidity_delta`.
///
/// 1. earned = (inside - last) * liquidity >> 128, per token
/// 2. owed += earned, failing with `FeeOverflow` past `u128::MAX`
/// 3. last = inside
/// 4. liquidity += delta
///
/// A zero delta is a fee refresh and requires existing liquidity.
pub fn update_position(
    pos: &mut Position,
    liquidity_delta: i128,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(), PositionError> {
    let liquidity_next = if liquidity_delta == 0 {
        if pos.liquidity == 0 {
            return Err(PositionError::NoPosition);
        }
        pos.liquidity
    } else if liquidity_delta < 0 {
        pos.liquidity
            .checked_sub(liquidity_delta.unsigned_abs())
            .ok_or(PositionError::InsufficientLiquidity)?
    } else {
        pos.liquidity
            .checked_add(liquidity_delta as u128)
            .ok_or(PositionError::LiquidityOverflow)?
    };

    let (owed_0, owed_1) =
        calculate_pending_fees(pos, fee_growth_inside_0_x128, fee_growth_inside_1_x128)?;

    pos.liquidity = liquidity_next;
    pos.fee_growth_inside_0_last_x128 = fee_growth_inside_0_x128;
    pos.fee_growth_inside_1_last_x128 = fee_growth_inside_1_x128;
    pos.tokens_owed_0 = owed_0;
    pos.tokens_owed_1 = owed_1;

    Ok(())
}

// ============================================================
// POSITION VALIDATION
// ============================================================

/// Validate position parameters
///
/// # Arguments
/// * `lower` - Lower tick boundary
/// * `upper` - Upper tick boundary
/// * `tick_spacing` - Pool's tick spacing
pub fn validate_position_params(
    lower: i32,
    upper: i32,
    tick_spacing: i32,
) -> Result<(), PositionError> {
    if lower >= upper {
        return Err(PositionError::InvalidTickRange);
    }
    if lower < MIN_TICK {
        return Err(PositionError::TickLowerOutOfBounds);
    }
    if upper > MAX_TICK {
        return Err(PositionError::TickUpperOutOfBounds);
    }
    if tick_spacing <= 0 || lower % tick_spacing != 0 || upper % tick_spacing != 0 {
        return Err(PositionError::TickNotAligned);
    }
    Ok(())
}
