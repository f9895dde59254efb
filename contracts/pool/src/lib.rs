#![no_std]

use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, token, Address, Bytes, Env, Vec, U256,
};

// External packages
use tidepool_math::{
    add_delta, fee_growth_delta_x128, get_amount_0_delta_signed, get_amount_1_delta_signed,
    get_amounts_for_liquidity, get_sqrt_price_at_tick, get_tick_at_sqrt_price, mul_div_ceil,
    FEE_DENOMINATOR, MAX_FEE_PIPS,
};
use tidepool_oracle::{self as oracle, ObservationAccess};
use tidepool_position::{calculate_pending_fees, update_position, validate_position_params};
use tidepool_swap::{execute_swap, SwapComputation, SwapConfig, SwapParams, SwapState};
use tidepool_tick::{
    clear_tick, flip_tick, get_fee_growth_inside, tick_spacing_to_max_liquidity_per_tick,
    update_tick, wrapping_add, TickAccess,
};

// Local modules
mod callee;
pub mod convert;
pub mod error;
mod events;
mod storage;
pub mod types;

pub use callee::{FeeHookClient, PoolCalleeClient};
pub use error::PoolError;

use events::*;
use storage::*;
use convert::{from_host, to_host};
use tidepool_position::Position;
use types::{Observation, PoolConfig, PoolState, PositionEntry, PositionInfo, SwapQuote, TickEntry};

/// Smallest non-zero protocol share divisor (1/4 of the fee)
const MIN_FEE_PROTOCOL: u32 = 4;
/// Largest protocol share divisor (1/10 of the fee)
const MAX_FEE_PROTOCOL: u32 = 10;

#[contract]
pub struct TidePool;

#[contractimpl]
impl TidePool {
    // ========================================================
    // CONSTRUCTION & INITIALIZATION
    // ========================================================

    /// Fix the pool's pair, fee tier and spacing.
    ///
    /// # Arguments
    /// * `admin` - Controls protocol fees and oracle growth
    /// * `token_a`, `token_b` - The pair, in either order
    /// * `fee` - Swap and flash fee in pips
    /// * `tick_spacing` - Granularity of position boundaries
    /// * `fee_hook` - Optional contract that may lower the fee per trader
    pub fn __constructor(
        env: Env,
        admin: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
        tick_spacing: i32,
        fee_hook: Option<Address>,
    ) {
        if token_a == token_b {
            panic_with_error!(&env, PoolError::IdenticalTokens);
        }
        if fee > MAX_FEE_PIPS {
            panic_with_error!(&env, PoolError::InvalidFee);
        }
        let max_liquidity_per_tick = match tick_spacing_to_max_liquidity_per_tick(tick_spacing) {
            Ok(max) => max,
            Err(err) => panic_with_error!(&env, PoolError::from(err)),
        };

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        write_pool_config(
            &env,
            &PoolConfig {
                admin,
                token0,
                token1,
                fee,
                tick_spacing,
                max_liquidity_per_tick,
                fee_hook,
            },
        );
    }

    /// Set the starting price and open the pool. Callable once.
    ///
    /// `sqrt_price_x96` is the square root of token1/token0 as Q64.96.
    pub fn initialize(env: Env, sqrt_price_x96: U256) -> Result<(), PoolError> {
        if is_initialized(&env) {
            return Err(PoolError::AlreadyInitialized);
        }

        let tick = get_tick_at_sqrt_price(from_host(&sqrt_price_x96))?;
        let (cardinality, cardinality_next) =
            oracle::initialize(&mut ObservationStore::new(&env), env.ledger().timestamp());

        let state = PoolState {
            sqrt_price_x96: sqrt_price_x96.clone(),
            tick,
            liquidity: 0,
            observation_index: 0,
            observation_cardinality: cardinality,
            observation_cardinality_next: cardinality_next,
            fee_protocol_0: 0,
            fee_protocol_1: 0,
            fee_growth_global_0_x128: U256::from_u32(&env, 0),
            fee_growth_global_1_x128: U256::from_u32(&env, 0),
            protocol_fees_0: 0,
            protocol_fees_1: 0,
        };
        write_pool_state(&env, &state);
        unlock(&env);

        log!(&env, "initialize", sqrt_price_x96, tick);
        emit_initialize(&env, sqrt_price_x96, tick);
        Ok(())
    }

    // ========================================================
    // LIQUIDITY
    // ========================================================

    /// Add `amount` liquidity to `owner`'s `[tick_lower, tick_upper)`
    /// position.
    ///
    /// The owed token amounts are requested from `sender` through
    /// `mint_callback`. Returns the amounts paid.
    pub fn mint(
        env: Env,
        sender: Address,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
        data: Bytes,
    ) -> Result<(u128, u128), PoolError> {
        sender.require_auth();
        if amount == 0 {
            return Err(PoolError::ZeroLiquidity);
        }
        lock(&env)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let liquidity_delta = i128::try_from(amount).map_err(|_| PoolError::LiquidityOverflow)?;

        let (position, amount0, amount1) = Self::modify_position(
            &env,
            &config,
            &mut state,
            &owner,
            tick_lower,
            tick_upper,
            liquidity_delta,
        )?;
        write_position(&env, &owner, tick_lower, tick_upper, &position);
        write_pool_state(&env, &state);

        let pool = env.current_contract_address();
        let token0 = token::Client::new(&env, &config.token0);
        let token1 = token::Client::new(&env, &config.token1);
        let balance0_before = if amount0 > 0 { token0.balance(&pool) } else { 0 };
        let balance1_before = if amount1 > 0 { token1.balance(&pool) } else { 0 };

        PoolCalleeClient::new(&env, &sender).mint_callback(&pool, &amount0, &amount1, &data);

        if amount0 > 0 && token0.balance(&pool) < checked_sum(balance0_before, amount0)? {
            return Err(PoolError::InsufficientPayment0);
        }
        if amount1 > 0 && token1.balance(&pool) < checked_sum(balance1_before, amount1)? {
            return Err(PoolError::InsufficientPayment1);
        }

        let (amount0, amount1) = (amount0.unsigned_abs(), amount1.unsigned_abs());
        emit_mint(&env, &sender, &owner, tick_lower, tick_upper, amount, amount0, amount1);

        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Remove `amount` liquidity from the caller's position.
    ///
    /// The released tokens are not sent; they are credited to the
    /// position's owed balances for `collect`. A zero amount only refreshes
    /// earned fees.
    pub fn burn(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount: u128,
    ) -> Result<(u128, u128), PoolError> {
        owner.require_auth();
        lock(&env)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let liquidity_delta = i128::try_from(amount).map_err(|_| PoolError::LiquidityOverflow)?;

        let (mut position, amount0, amount1) = Self::modify_position(
            &env,
            &config,
            &mut state,
            &owner,
            tick_lower,
            tick_upper,
            -liquidity_delta,
        )?;

        let (amount0, amount1) = (amount0.unsigned_abs(), amount1.unsigned_abs());
        position.tokens_owed_0 = checked_owed(position.tokens_owed_0, amount0)?;
        position.tokens_owed_1 = checked_owed(position.tokens_owed_1, amount1)?;

        write_position(&env, &owner, tick_lower, tick_upper, &position);
        write_pool_state(&env, &state);

        emit_burn(&env, &owner, tick_lower, tick_upper, amount, amount0, amount1);

        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Send up to the requested owed amounts of a position to `recipient`.
    ///
    /// Fees accrued since the position was last touched are credited only
    /// by `burn` (a zero burn is enough).
    pub fn collect(
        env: Env,
        owner: Address,
        recipient: Address,
        tick_lower: i32,
        tick_upper: i32,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        owner.require_auth();
        lock(&env)?;

        let config = read_pool_config(&env)?;
        let mut position =
            read_position(&env, &owner, tick_lower, tick_upper).ok_or(PoolError::NoPosition)?;

        let amount0 = amount0_requested.min(position.tokens_owed_0);
        let amount1 = amount1_requested.min(position.tokens_owed_1);
        position.tokens_owed_0 -= amount0;
        position.tokens_owed_1 -= amount1;
        write_position(&env, &owner, tick_lower, tick_upper, &position);

        let pool = env.current_contract_address();
        if amount0 > 0 {
            token::Client::new(&env, &config.token0).transfer(&pool, &recipient, &to_amount(amount0)?);
        }
        if amount1 > 0 {
            token::Client::new(&env, &config.token1).transfer(&pool, &recipient, &to_amount(amount1)?);
        }

        emit_collect(&env, &owner, &recipient, tick_lower, tick_upper, amount0, amount1);

        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Delete a position that has no liquidity and nothing left to collect
    pub fn close_position(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<(), PoolError> {
        owner.require_auth();
        lock(&env)?;

        let position =
            read_position(&env, &owner, tick_lower, tick_upper).ok_or(PoolError::NoPosition)?;
        if !position.is_empty() {
            return Err(PoolError::PositionNotEmpty);
        }
        remove_position(&env, &owner, tick_lower, tick_upper);

        emit_close_position(&env, &owner, tick_lower, tick_upper);

        unlock(&env);
        Ok(())
    }

    // ========================================================
    // SWAP
    // ========================================================

    /// Swap token0 for token1 (`zero_for_one`) or the reverse.
    ///
    /// `amount_specified > 0` is an exact input, `< 0` an exact output.
    /// The output is sent to `recipient` first, then `swap_callback` on
    /// `sender` must pay the input. Returns the pool's signed balance
    /// deltas `(amount0, amount1)`.
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
        data: Bytes,
    ) -> Result<(i128, i128), PoolError> {
        sender.require_auth();
        if amount_specified == 0 {
            return Err(PoolError::ZeroAmount);
        }
        lock(&env)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        let fee_pips = Self::effective_fee(&env, &config, &sender)?;

        let result = execute_swap(
            &mut TickStore::new(&env),
            &swap_state(&state),
            &SwapConfig {
                tick_spacing: config.tick_spacing,
                fee_pips,
                fee_protocol: if zero_for_one {
                    state.fee_protocol_0
                } else {
                    state.fee_protocol_1
                },
            },
            &SwapParams {
                zero_for_one,
                amount_specified,
                sqrt_price_limit_x96: from_host(&sqrt_price_limit_x96),
            },
        )?;

        // the oracle records the tick that held before this swap
        if result.state.tick != state.tick {
            let (index, cardinality) = oracle::write(
                &mut ObservationStore::new(&env),
                state.observation_index,
                env.ledger().timestamp(),
                state.tick,
                state.liquidity,
                state.observation_cardinality,
                state.observation_cardinality_next,
            );
            state.observation_index = index;
            state.observation_cardinality = cardinality;
        }

        state.sqrt_price_x96 = to_host(&env, &result.state.sqrt_price_x96);
        state.tick = result.state.tick;
        state.liquidity = result.state.liquidity;
        state.fee_growth_global_0_x128 = to_host(&env, &result.state.fee_growth_global_0_x128);
        state.fee_growth_global_1_x128 = to_host(&env, &result.state.fee_growth_global_1_x128);
        if zero_for_one {
            state.protocol_fees_0 = checked_owed(state.protocol_fees_0, result.protocol_fee)?;
        } else {
            state.protocol_fees_1 = checked_owed(state.protocol_fees_1, result.protocol_fee)?;
        }
        write_pool_state(&env, &state);

        let (amount0, amount1) = (result.amount0, result.amount1);
        let pool = env.current_contract_address();
        let (token_in, token_out, amount_in, amount_out) = if zero_for_one {
            (&config.token0, &config.token1, amount0, amount1)
        } else {
            (&config.token1, &config.token0, amount1, amount0)
        };

        if amount_out < 0 {
            token::Client::new(&env, token_out).transfer(&pool, &recipient, &-amount_out);
        }

        let token_in = token::Client::new(&env, token_in);
        let balance_before = token_in.balance(&pool);
        PoolCalleeClient::new(&env, &sender).swap_callback(&pool, &amount0, &amount1, &data);
        if token_in.balance(&pool) < checked_sum(balance_before, amount_in)? {
            return Err(PoolError::InsufficientInputAmount);
        }

        emit_swap(
            &env,
            &sender,
            &recipient,
            amount0,
            amount1,
            state.sqrt_price_x96.clone(),
            state.liquidity,
            state.tick,
        );
        log!(
            &env,
            "swap",
            amount0,
            amount1,
            state.tick,
            fee_pips,
            result.ticks_crossed
        );

        unlock(&env);
        Ok((amount0, amount1))
    }

    /// Simulate a swap at the nominal fee without changing state.
    ///
    /// Anything that would make `swap` fail comes back as an invalid quote.
    pub fn quote_swap(
        env: Env,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
    ) -> SwapQuote {
        let limit = from_host(&sqrt_price_limit_x96);
        match Self::simulate_swap(&env, zero_for_one, amount_specified, limit) {
            Ok(result) => SwapQuote {
                amount0: result.amount0,
                amount1: result.amount1,
                sqrt_price_x96_after: to_host(&env, &result.state.sqrt_price_x96),
                tick_after: result.state.tick,
                liquidity_after: result.state.liquidity,
                fee_amount: result.fee_amount,
                ticks_crossed: result.ticks_crossed,
                is_valid: true,
                error_message: None,
            },
            Err(err) => SwapQuote::invalid(&env, err.to_symbol()),
        }
    }

    // ========================================================
    // FLASH
    // ========================================================

    /// Lend `amount0`/`amount1` to `recipient` for the duration of
    /// `flash_callback` on `sender`.
    ///
    /// The pool must end up holding the lent amounts plus
    /// `ceil(amount * fee / 1e6)` of each token. Whatever is paid beyond
    /// the principal is distributed to in-range liquidity, less the
    /// protocol share.
    pub fn flash(
        env: Env,
        sender: Address,
        recipient: Address,
        amount0: u128,
        amount1: u128,
        data: Bytes,
    ) -> Result<(), PoolError> {
        sender.require_auth();
        lock(&env)?;

        let config = read_pool_config(&env)?;
        let mut state = read_pool_state(&env)?;
        if state.liquidity == 0 {
            return Err(PoolError::NoActiveLiquidity);
        }

        let fee = config.fee as u128;
        let denominator = FEE_DENOMINATOR as u128;
        let fee0 = to_amount(mul_div_ceil(amount0, fee, denominator)?)?;
        let fee1 = to_amount(mul_div_ceil(amount1, fee, denominator)?)?;

        let pool = env.current_contract_address();
        let token0 = token::Client::new(&env, &config.token0);
        let token1 = token::Client::new(&env, &config.token1);
        let balance0_before = token0.balance(&pool);
        let balance1_before = token1.balance(&pool);

        if amount0 > 0 {
            token0.transfer(&pool, &recipient, &to_amount(amount0)?);
        }
        if amount1 > 0 {
            token1.transfer(&pool, &recipient, &to_amount(amount1)?);
        }

        PoolCalleeClient::new(&env, &sender).flash_callback(&pool, &fee0, &fee1, &data);

        let balance0_after = token0.balance(&pool);
        let balance1_after = token1.balance(&pool);
        if balance0_after < checked_sum(balance0_before, fee0)? {
            return Err(PoolError::FlashNotRepaid0);
        }
        if balance1_after < checked_sum(balance1_before, fee1)? {
            return Err(PoolError::FlashNotRepaid1);
        }

        let paid0 = (balance0_after - balance0_before).unsigned_abs();
        let paid1 = (balance1_after - balance1_before).unsigned_abs();

        if paid0 > 0 {
            let protocol = protocol_share(paid0, state.fee_protocol_0);
            state.protocol_fees_0 = checked_owed(state.protocol_fees_0, protocol)?;
            let growth = wrapping_add(
                from_host(&state.fee_growth_global_0_x128),
                fee_growth_delta_x128(paid0 - protocol, state.liquidity),
            );
            state.fee_growth_global_0_x128 = to_host(&env, &growth);
        }
        if paid1 > 0 {
            let protocol = protocol_share(paid1, state.fee_protocol_1);
            state.protocol_fees_1 = checked_owed(state.protocol_fees_1, protocol)?;
            let growth = wrapping_add(
                from_host(&state.fee_growth_global_1_x128),
                fee_growth_delta_x128(paid1 - protocol, state.liquidity),
            );
            state.fee_growth_global_1_x128 = to_host(&env, &growth);
        }
        write_pool_state(&env, &state);

        emit_flash(&env, &sender, &recipient, amount0, amount1, paid0, paid1);
        log!(&env, "flash", amount0, amount1, paid0, paid1);

        unlock(&env);
        Ok(())
    }

    // ========================================================
    // ORACLE
    // ========================================================

    /// Cumulative tick and seconds-per-liquidity as of each `seconds_ago`
    /// before the current ledger time.
    pub fn observe(env: Env, seconds_agos: Vec<u32>) -> Result<(Vec<i64>, Vec<u128>), PoolError> {
        let state = read_pool_state(&env)?;
        let store = ObservationStore::new(&env);
        let time = env.ledger().timestamp();

        let mut tick_cumulatives = Vec::new(&env);
        let mut seconds_per_liquidity_cumulatives = Vec::new(&env);
        for seconds_ago in seconds_agos.iter() {
            let (tick_cumulative, seconds_per_liquidity) = oracle::observe_single(
                &store,
                time,
                seconds_ago,
                state.tick,
                state.observation_index,
                state.liquidity,
                state.observation_cardinality,
            )?;
            tick_cumulatives.push_back(tick_cumulative);
            seconds_per_liquidity_cumulatives.push_back(seconds_per_liquidity);
        }

        Ok((tick_cumulatives, seconds_per_liquidity_cumulatives))
    }

    /// Reserve oracle slots up to `observation_cardinality_next`. Admin only.
    pub fn grow_observations(
        env: Env,
        observation_cardinality_next: u32,
    ) -> Result<(), PoolError> {
        let config = read_pool_config(&env)?;
        config.admin.require_auth();
        lock(&env)?;

        let mut state = read_pool_state(&env)?;
        let old = state.observation_cardinality_next;
        let new = oracle::grow(&mut ObservationStore::new(&env), old, observation_cardinality_next)?;
        state.observation_cardinality_next = new;
        write_pool_state(&env, &state);

        if old != new {
            emit_grow_observations(&env, old, new);
        }

        unlock(&env);
        Ok(())
    }

    // ========================================================
    // PROTOCOL FEES (ADMIN)
    // ========================================================

    /// Set the protocol's share of swap and flash fees per input token.
    /// Each divisor is 0 (off) or between 4 and 10.
    pub fn set_fee_protocol(
        env: Env,
        fee_protocol_0: u32,
        fee_protocol_1: u32,
    ) -> Result<(), PoolError> {
        let config = read_pool_config(&env)?;
        config.admin.require_auth();
        lock(&env)?;

        let valid = |fee_protocol: u32| {
            fee_protocol == 0 || (MIN_FEE_PROTOCOL..=MAX_FEE_PROTOCOL).contains(&fee_protocol)
        };
        if !valid(fee_protocol_0) || !valid(fee_protocol_1) {
            return Err(PoolError::InvalidFeeProtocol);
        }

        let mut state = read_pool_state(&env)?;
        let old = (state.fee_protocol_0, state.fee_protocol_1);
        state.fee_protocol_0 = fee_protocol_0;
        state.fee_protocol_1 = fee_protocol_1;
        write_pool_state(&env, &state);

        emit_set_fee_protocol(&env, old, (fee_protocol_0, fee_protocol_1));

        unlock(&env);
        Ok(())
    }

    /// Send up to the requested accrued protocol fees to `recipient`
    pub fn collect_protocol(
        env: Env,
        recipient: Address,
        amount0_requested: u128,
        amount1_requested: u128,
    ) -> Result<(u128, u128), PoolError> {
        let config = read_pool_config(&env)?;
        config.admin.require_auth();
        lock(&env)?;

        let mut state = read_pool_state(&env)?;
        let amount0 = amount0_requested.min(state.protocol_fees_0);
        let amount1 = amount1_requested.min(state.protocol_fees_1);
        state.protocol_fees_0 -= amount0;
        state.protocol_fees_1 -= amount1;
        write_pool_state(&env, &state);

        let pool = env.current_contract_address();
        if amount0 > 0 {
            token::Client::new(&env, &config.token0).transfer(&pool, &recipient, &to_amount(amount0)?);
        }
        if amount1 > 0 {
            token::Client::new(&env, &config.token1).transfer(&pool, &recipient, &to_amount(amount1)?);
        }

        emit_collect_protocol(&env, &recipient, amount0, amount1);

        unlock(&env);
        Ok((amount0, amount1))
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn is_initialized(env: Env) -> bool {
        is_initialized(&env)
    }

    pub fn get_pool_state(env: Env) -> Result<PoolState, PoolError> {
        read_pool_state(&env)
    }

    pub fn get_pool_config(env: Env) -> Result<PoolConfig, PoolError> {
        read_pool_config(&env)
    }

    /// Stored position, if any
    pub fn get_position(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Option<PositionEntry> {
        read_position_entry(&env, &owner, tick_lower, tick_upper)
    }

    /// Position valued at the current price, with owed amounts including
    /// fees not yet credited
    pub fn get_position_info(
        env: Env,
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<PositionInfo, PoolError> {
        let state = read_pool_state(&env)?;
        let position =
            read_position(&env, &owner, tick_lower, tick_upper).ok_or(PoolError::NoPosition)?;

        let (inside_0, inside_1) = get_fee_growth_inside(
            &TickStore::read_only(&env),
            tick_lower,
            tick_upper,
            state.tick,
            from_host(&state.fee_growth_global_0_x128),
            from_host(&state.fee_growth_global_1_x128),
        );
        let (tokens_owed_0, tokens_owed_1) = calculate_pending_fees(&position, inside_0, inside_1)?;

        let (amount0, amount1) = get_amounts_for_liquidity(
            from_host(&state.sqrt_price_x96),
            get_sqrt_price_at_tick(tick_lower)?,
            get_sqrt_price_at_tick(tick_upper)?,
            position.liquidity,
        )?;

        Ok(PositionInfo {
            liquidity: position.liquidity,
            amount0,
            amount1,
            tokens_owed_0,
            tokens_owed_1,
        })
    }

    /// Stored tick; an uninitialized tick reads as all zeros
    pub fn get_tick(env: Env, tick: i32) -> TickEntry {
        let info = TickStore::read_only(&env).read_tick(tick);
        TickEntry::from_info(&env, &info)
    }

    pub fn get_tick_bitmap(env: Env, word_pos: i32) -> u128 {
        TickStore::read_only(&env).read_bitmap_word(word_pos)
    }

    pub fn get_observation(env: Env, index: u32) -> Observation {
        ObservationStore::new(&env).read_observation(index)
    }

    // ========================================================
    // INTERNAL HELPERS
    // ========================================================

    /// Apply a liquidity change to a position and the pool.
    ///
    /// Returns the updated (unsaved) position and the signed token amounts
    /// the change is worth: positive owed to the pool, negative owed to the
    /// owner. Active liquidity and the oracle are updated when the range
    /// contains the current tick.
    fn modify_position(
        env: &Env,
        config: &PoolConfig,
        state: &mut PoolState,
        owner: &Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: i128,
    ) -> Result<(Position, i128, i128), PoolError> {
        validate_position_params(tick_lower, tick_upper, config.tick_spacing)?;

        let position =
            Self::update_position_and_ticks(env, config, state, owner, tick_lower, tick_upper, liquidity_delta)?;

        if liquidity_delta == 0 {
            return Ok((position, 0, 0));
        }

        let sqrt_price_lower_x96 = get_sqrt_price_at_tick(tick_lower)?;
        let sqrt_price_upper_x96 = get_sqrt_price_at_tick(tick_upper)?;
        let sqrt_price_x96 = from_host(&state.sqrt_price_x96);

        let (amount0, amount1) = if state.tick < tick_lower {
            (
                get_amount_0_delta_signed(sqrt_price_lower_x96, sqrt_price_upper_x96, liquidity_delta)?,
                0,
            )
        } else if state.tick < tick_upper {
            let (index, cardinality) = oracle::write(
                &mut ObservationStore::new(env),
                state.observation_index,
                env.ledger().timestamp(),
                state.tick,
                state.liquidity,
                state.observation_cardinality,
                state.observation_cardinality_next,
            );
            state.observation_index = index;
            state.observation_cardinality = cardinality;

            let amounts = (
                get_amount_0_delta_signed(sqrt_price_x96, sqrt_price_upper_x96, liquidity_delta)?,
                get_amount_1_delta_signed(sqrt_price_lower_x96, sqrt_price_x96, liquidity_delta)?,
            );
            state.liquidity = add_delta(state.liquidity, liquidity_delta)?;
            amounts
        } else {
            (
                0,
                get_amount_1_delta_signed(sqrt_price_lower_x96, sqrt_price_upper_x96, liquidity_delta)?,
            )
        };

        Ok((position, amount0, amount1))
    }

    /// Update both boundary ticks and the position's fee snapshot.
    ///
    /// Ticks that become empty on removal are dropped from storage after
    /// the fee growth inside has been read from them.
    fn update_position_and_ticks(
        env: &Env,
        config: &PoolConfig,
        state: &PoolState,
        owner: &Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: i128,
    ) -> Result<Position, PoolError> {
        let mut position = read_position(env, owner, tick_lower, tick_upper).unwrap_or_default();
        if liquidity_delta < 0 && liquidity_delta.unsigned_abs() > position.liquidity {
            return Err(PoolError::InsufficientLiquidity);
        }

        let mut ticks = TickStore::new(env);
        let fee_growth_global_0_x128 = from_host(&state.fee_growth_global_0_x128);
        let fee_growth_global_1_x128 = from_host(&state.fee_growth_global_1_x128);
        let mut flipped_lower = false;
        let mut flipped_upper = false;

        if liquidity_delta != 0 {
            flipped_lower = update_tick(
                &mut ticks,
                tick_lower,
                state.tick,
                liquidity_delta,
                fee_growth_global_0_x128,
                fee_growth_global_1_x128,
                false,
                config.max_liquidity_per_tick,
            )?;
            flipped_upper = update_tick(
                &mut ticks,
                tick_upper,
                state.tick,
                liquidity_delta,
                fee_growth_global_0_x128,
                fee_growth_global_1_x128,
                true,
                config.max_liquidity_per_tick,
            )?;

            if flipped_lower {
                flip_tick(&mut ticks, tick_lower, config.tick_spacing)?;
            }
            if flipped_upper {
                flip_tick(&mut ticks, tick_upper, config.tick_spacing)?;
            }
        }

        let (inside_0, inside_1) = get_fee_growth_inside(
            &ticks,
            tick_lower,
            tick_upper,
            state.tick,
            fee_growth_global_0_x128,
            fee_growth_global_1_x128,
        );
        update_position(&mut position, liquidity_delta, inside_0, inside_1)?;

        if liquidity_delta < 0 {
            if flipped_lower {
                clear_tick(&mut ticks, tick_lower);
            }
            if flipped_upper {
                clear_tick(&mut ticks, tick_upper);
            }
        }

        Ok(position)
    }

    /// Fee for this swap: the nominal fee, or what the hook returns for
    /// `trader` if a hook is configured.
    fn effective_fee(env: &Env, config: &PoolConfig, trader: &Address) -> Result<u32, PoolError> {
        let Some(hook) = &config.fee_hook else {
            return Ok(config.fee);
        };
        let fee = FeeHookClient::new(env, hook).compute_fee(
            &env.current_contract_address(),
            trader,
            &config.fee,
        );
        if fee > config.fee {
            return Err(PoolError::FeeHookMisbehaved);
        }
        Ok(fee)
    }

    fn simulate_swap(
        env: &Env,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: tidepool_math::U256,
    ) -> Result<SwapComputation, PoolError> {
        let config = read_pool_config(env)?;
        let state = read_pool_state(env)?;

        let result = execute_swap(
            &mut TickStore::read_only(env),
            &swap_state(&state),
            &SwapConfig {
                tick_spacing: config.tick_spacing,
                fee_pips: config.fee,
                fee_protocol: if zero_for_one {
                    state.fee_protocol_0
                } else {
                    state.fee_protocol_1
                },
            },
            &SwapParams {
                zero_for_one,
                amount_specified,
                sqrt_price_limit_x96,
            },
        )?;
        Ok(result)
    }
}

// ========================================================
// HELPER FUNCTIONS
// ========================================================

fn swap_state(state: &PoolState) -> SwapState {
    SwapState {
        sqrt_price_x96: from_host(&state.sqrt_price_x96),
        tick: state.tick,
        liquidity: state.liquidity,
        fee_growth_global_0_x128: from_host(&state.fee_growth_global_0_x128),
        fee_growth_global_1_x128: from_host(&state.fee_growth_global_1_x128),
    }
}

#[inline]
fn protocol_share(fee: u128, fee_protocol: u32) -> u128 {
    if fee_protocol == 0 {
        0
    } else {
        fee / fee_protocol as u128
    }
}

/// Token amount in the token interface's signed type
#[inline]
fn to_amount(value: u128) -> Result<i128, PoolError> {
    i128::try_from(value).map_err(|_| PoolError::AmountOverflow)
}

/// Add to an owed or accrued balance, failing instead of capping
#[inline]
fn checked_owed(balance: u128, amount: u128) -> Result<u128, PoolError> {
    balance.checked_add(amount).ok_or(PoolError::MathOverflow)
}

#[inline]
fn checked_sum(balance: i128, amount: i128) -> Result<i128, PoolError> {
    balance.checked_add(amount).ok_or(PoolError::AmountOverflow)
}
