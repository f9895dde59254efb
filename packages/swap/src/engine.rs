use tidepool_math::{
    add_delta, compute_swap_step, fee_growth_delta_x128, get_sqrt_price_at_tick,
    get_tick_at_sqrt_price, to_i128, MathError, MAX_SQRT_PRICE_X96, MAX_TICK, MIN_SQRT_PRICE_X96,
    MIN_TICK, U256,
};
use tidepool_tick::{cross_tick, next_initialized_tick_within_one_word, wrapping_add, TickAccess};

use crate::error::SwapError;
use crate::types::{SwapComputation, SwapConfig, SwapParams, SwapState};

// ============================================================
// VALIDATION
// ============================================================

/// The limit must lie strictly on the swap's side of the current price and
/// strictly inside the global bounds.
pub fn validate_price_limit(
    sqrt_price_x96: U256,
    sqrt_price_limit_x96: U256,
    zero_for_one: bool,
) -> Result<(), SwapError> {
    let valid = if zero_for_one {
        sqrt_price_limit_x96 < sqrt_price_x96 && sqrt_price_limit_x96 > MIN_SQRT_PRICE_X96
    } else {
        sqrt_price_limit_x96 > sqrt_price_x96 && sqrt_price_limit_x96 < MAX_SQRT_PRICE_X96
    };
    if valid {
        Ok(())
    } else {
        Err(SwapError::InvalidPriceLimit)
    }
}

// ============================================================
// SWAP LOOP
// ============================================================

/// Working copy advanced by each step
struct StepState {
    amount_specified_remaining: i128,
    amount_calculated: i128,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
    /// Fee growth of the input token
    fee_growth_global_x128: U256,
    fee_amount: u128,
    protocol_fee: u128,
    ticks_crossed: u32,
}

/// Walk the price from `state` toward the limit, one initialized tick (or
/// bitmap word) at a time.
///
/// Each step moves price as far as the remaining amount allows within the
/// current range, charges the fee on the consumed input, skims the
/// protocol share and spreads the rest over active liquidity. Reaching an
/// initialized tick crosses it through `ticks`, which adjusts active
/// liquidity. The loop ends when the amount is exhausted or the limit is
/// hit; every step either does one of those or reaches a tick, so it is
/// bounded by the number of words between start and limit.
///
/// Exact input when `amount_specified > 0`, exact output when `< 0`.
pub fn execute_swap<S: TickAccess + ?Sized>(
    ticks: &mut S,
    state: &SwapState,
    config: &SwapConfig,
    params: &SwapParams,
) -> Result<SwapComputation, SwapError> {
    if params.amount_specified == 0 {
        return Err(SwapError::ZeroAmount);
    }
    validate_price_limit(state.sqrt_price_x96, params.sqrt_price_limit_x96, params.zero_for_one)?;

    let zero_for_one = params.zero_for_one;
    let exact_input = params.amount_specified > 0;

    let mut step_state = StepState {
        amount_specified_remaining: params.amount_specified,
        amount_calculated: 0,
        sqrt_price_x96: state.sqrt_price_x96,
        tick: state.tick,
        liquidity: state.liquidity,
        fee_growth_global_x128: if zero_for_one {
            state.fee_growth_global_0_x128
        } else {
            state.fee_growth_global_1_x128
        },
        fee_amount: 0,
        protocol_fee: 0,
        ticks_crossed: 0,
    };

    while step_state.amount_specified_remaining != 0
        && step_state.sqrt_price_x96 != params.sqrt_price_limit_x96
    {
        let sqrt_price_start_x96 = step_state.sqrt_price_x96;

        let (tick_next, initialized) = next_initialized_tick_within_one_word(
            ticks,
            step_state.tick,
            config.tick_spacing,
            zero_for_one,
        );
        let tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);
        let sqrt_price_next_x96 = get_sqrt_price_at_tick(tick_next)?;

        let sqrt_price_target_x96 = if zero_for_one {
            sqrt_price_next_x96.max(params.sqrt_price_limit_x96)
        } else {
            sqrt_price_next_x96.min(params.sqrt_price_limit_x96)
        };

        let step = compute_swap_step(
            step_state.sqrt_price_x96,
            sqrt_price_target_x96,
            step_state.liquidity,
            step_state.amount_specified_remaining,
            config.fee_pips,
        )?;
        step_state.sqrt_price_x96 = step.sqrt_price_next_x96;

        let amount_in_with_fee = to_i128(
            step.amount_in
                .checked_add(step.fee_amount)
                .ok_or(MathError::Overflow)?,
        )?;
        let amount_out = to_i128(step.amount_out)?;

        if exact_input {
            step_state.amount_specified_remaining -= amount_in_with_fee;
            step_state.amount_calculated = step_state
                .amount_calculated
                .checked_sub(amount_out)
                .ok_or(MathError::Overflow)?;
        } else {
            step_state.amount_specified_remaining += amount_out;
            step_state.amount_calculated = step_state
                .amount_calculated
                .checked_add(amount_in_with_fee)
                .ok_or(MathError::Overflow)?;
        }

        step_state.fee_amount = step_state
            .fee_amount
            .checked_add(step.fee_amount)
            .ok_or(MathError::Overflow)?;

        let mut lp_fee = step.fee_amount;
        if config.fee_protocol > 0 {
            let protocol_share = lp_fee / config.fee_protocol as u128;
            lp_fee -= protocol_share;
            step_state.protocol_fee = step_state
                .protocol_fee
                .checked_add(protocol_share)
                .ok_or(MathError::Overflow)?;
        }

        // with no active liquidity the fee is still charged but nobody accrues it
        if step_state.liquidity > 0 {
            step_state.fee_growth_global_x128 = wrapping_add(
                step_state.fee_growth_global_x128,
                fee_growth_delta_x128(lp_fee, step_state.liquidity),
            );
        }

        if step_state.sqrt_price_x96 == sqrt_price_next_x96 {
            if initialized {
                let (fee_growth_0, fee_growth_1) = if zero_for_one {
                    (step_state.fee_growth_global_x128, state.fee_growth_global_1_x128)
                } else {
                    (state.fee_growth_global_0_x128, step_state.fee_growth_global_x128)
                };
                let mut liquidity_net = cross_tick(ticks, tick_next, fee_growth_0, fee_growth_1);
                // moving left, an upper-side net applies in reverse
                if zero_for_one {
                    liquidity_net = liquidity_net.checked_neg().ok_or(MathError::LiquidityOverflow)?;
                }
                step_state.liquidity = add_delta(step_state.liquidity, liquidity_net)?;
                step_state.ticks_crossed += 1;
            }
            step_state.tick = if zero_for_one { tick_next - 1 } else { tick_next };
        } else if step_state.sqrt_price_x96 != sqrt_price_start_x96 {
            step_state.tick = get_tick_at_sqrt_price(step_state.sqrt_price_x96)?;
        }
    }

    let specified_used = params.amount_specified - step_state.amount_specified_remaining;
    let (amount0, amount1) = if zero_for_one == exact_input {
        (specified_used, step_state.amount_calculated)
    } else {
        (step_state.amount_calculated, specified_used)
    };

    let (fee_growth_global_0_x128, fee_growth_global_1_x128) = if zero_for_one {
        (step_state.fee_growth_global_x128, state.fee_growth_global_1_x128)
    } else {
        (state.fee_growth_global_0_x128, step_state.fee_growth_global_x128)
    };

    Ok(SwapComputation {
        amount0,
        amount1,
        state: SwapState {
            sqrt_price_x96: step_state.sqrt_price_x96,
            tick: step_state.tick,
            liquidity: step_state.liquidity,
            fee_growth_global_0_x128,
            fee_growth_global_1_x128,
        },
        fee_amount: step_state.fee_amount,
        protocol_fee: step_state.protocol_fee,
        ticks_crossed: step_state.ticks_crossed,
    })
}
