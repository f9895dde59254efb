// SPDX-License-Identifier: MIT
// Single swap step within one tick range

use primitive_types::U256;

use crate::constants::FEE_DENOMINATOR;
use crate::error::MathError;
use crate::full_math::{mul_div_ceil, mul_div_floor};
use crate::sqrt_price::{
    get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};

/// Outcome of a single swap step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SwapStep {
    /// Price reached by the step
    pub sqrt_price_next_x96: U256,
    /// Input consumed, excluding fee
    pub amount_in: u128,
    /// Output produced
    pub amount_out: u128,
    /// Fee charged on the input
    pub fee_amount: u128,
}

/// Amount needed to reach the target, or `None` if it does not even fit in
/// 128 bits (and therefore can never be satisfied by a single step).
fn delta_to_target(result: Result<u128, MathError>) -> Result<Option<u128>, MathError> {
    match result {
        Ok(amount) => Ok(Some(amount)),
        Err(MathError::Overflow) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Compute one swap step from `sqrt_price_current_x96` toward
/// `sqrt_price_target_x96` with constant `liquidity`.
///
/// `amount_remaining > 0` is exact input (fee included), `< 0` is exact
/// output. Direction is implied by the relative order of the two prices.
pub fn compute_swap_step(
    sqrt_price_current_x96: U256,
    sqrt_price_target_x96: U256,
    liquidity: u128,
    amount_remaining: i128,
    fee_pips: u32,
) -> Result<SwapStep, MathError> {
    if fee_pips >= FEE_DENOMINATOR {
        return Err(MathError::Overflow);
    }

    let zero_for_one = sqrt_price_current_x96 >= sqrt_price_target_x96;
    let exact_in = amount_remaining >= 0;
    let remaining_abs = amount_remaining.unsigned_abs();
    let fee_complement = (FEE_DENOMINATOR - fee_pips) as u128;

    let mut amount_in_to_target = None;
    let mut amount_out_to_target = None;

    let sqrt_price_next_x96 = if exact_in {
        let remaining_less_fee =
            mul_div_floor(remaining_abs, fee_complement, FEE_DENOMINATOR as u128)?;
        amount_in_to_target = delta_to_target(if zero_for_one {
            get_amount_0_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, true)
        } else {
            get_amount_1_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, true)
        })?;
        match amount_in_to_target {
            Some(needed) if remaining_less_fee >= needed => sqrt_price_target_x96,
            _ => get_next_sqrt_price_from_input(
                sqrt_price_current_x96,
                liquidity,
                remaining_less_fee,
                zero_for_one,
            )?,
        }
    } else {
        amount_out_to_target = delta_to_target(if zero_for_one {
            get_amount_1_delta(sqrt_price_target_x96, sqrt_price_current_x96, liquidity, false)
        } else {
            get_amount_0_delta(sqrt_price_current_x96, sqrt_price_target_x96, liquidity, false)
        })?;
        match amount_out_to_target {
            Some(available) if remaining_abs >= available => sqrt_price_target_x96,
            _ => get_next_sqrt_price_from_output(
                sqrt_price_current_x96,
                liquidity,
                remaining_abs,
                zero_for_one,
            )?,
        }
    };

    let reached_target = sqrt_price_next_x96 == sqrt_price_target_x96;

    let (amount_in, mut amount_out) = if zero_for_one {
        let amount_in = match amount_in_to_target {
            Some(amount) if reached_target && exact_in => amount,
            _ => get_amount_0_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, true)?,
        };
        let amount_out = match amount_out_to_target {
            Some(amount) if reached_target && !exact_in => amount,
            _ => get_amount_1_delta(sqrt_price_next_x96, sqrt_price_current_x96, liquidity, false)?,
        };
        (amount_in, amount_out)
    } else {
        let amount_in = match amount_in_to_target {
            Some(amount) if reached_target && exact_in => amount,
            _ => get_amount_1_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, true)?,
        };
        let amount_out = match amount_out_to_target {
            Some(amount) if reached_target && !exact_in => amount,
            _ => get_amount_0_delta(sqrt_price_current_x96, sqrt_price_next_x96, liquidity, false)?,
        };
        (amount_in, amount_out)
    };

    // exact output never hands out more than was asked for
    if !exact_in && amount_out > remaining_abs {
        amount_out = remaining_abs;
    }

    let fee_amount = if exact_in && !reached_target {
        // the rest of the input is the fee
        remaining_abs - amount_in
    } else {
        mul_div_ceil(amount_in, fee_pips as u128, fee_complement)?
    };

    Ok(SwapStep {
        sqrt_price_next_x96,
        amount_in,
        amount_out,
        fee_amount,
    })
}
