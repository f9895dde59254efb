use tidepool_math::{mul_div_u256, u256_to_u128, Q128, U256};

use crate::error::PositionError;
use crate::types::Position;

/// Fees earned by `liquidity` while fee growth inside moved from `last` to
/// `current`: `(current - last) * liquidity >> 128`.
///
/// The growth difference is modular. The product is taken in 512 bits.
pub fn fees_earned(liquidity: u128, current_x128: U256, last_x128: U256) -> Result<u128, PositionError> {
    let delta = current_x128.overflowing_sub(last_x128).0;
    let earned = mul_div_u256(delta, U256::from(liquidity), Q128, false)
        .map_err(|_| PositionError::FeeOverflow)?;
    u256_to_u128(earned).map_err(|_| PositionError::FeeOverflow)
}

/// Owed amounts the position would have after a refresh at the given fee
/// growth inside, without mutating it.
pub fn calculate_pending_fees(
    pos: &Position,
    fee_growth_inside_0_x128: U256,
    fee_growth_inside_1_x128: U256,
) -> Result<(u128, u128), PositionError> {
    let earned_0 = fees_earned(pos.liquidity, fee_growth_inside_0_x128, pos.fee_growth_inside_0_last_x128)?;
    let earned_1 = fees_earned(pos.liquidity, fee_growth_inside_1_x128, pos.fee_growth_inside_1_last_x128)?;
    Ok((
        pos.tokens_owed_0.checked_add(earned_0).ok_or(PositionError::FeeOverflow)?,
        pos.tokens_owed_1.checked_add(earned_1).ok_or(PositionError::FeeOverflow)?,
    ))
}
