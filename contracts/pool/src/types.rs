// Pool Types

use soroban_sdk::{contracttype, Address, Env, Symbol, U256};

pub use tidepool_oracle::Observation;
pub use tidepool_position::PositionInfo;

// ============================================================
// POOL CONFIGURATION
// ============================================================

/// Immutable parameters fixed by the constructor
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// May set the protocol share, collect protocol fees and grow the oracle
    pub admin: Address,
    /// Lower-sorted token
    pub token0: Address,
    pub token1: Address,
    /// Swap and flash fee in pips (1e-6)
    pub fee: u32,
    pub tick_spacing: i32,
    /// Gross liquidity ceiling for any single tick
    pub max_liquidity_per_tick: u128,
    /// Optional contract consulted once per swap for the effective fee
    pub fee_hook: Option<Address>,
}

// ============================================================
// POOL STATE
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Current sqrt price as Q64.96
    pub sqrt_price_x96: U256,
    /// Greatest tick whose price is at or below the current price
    pub tick: i32,
    /// Liquidity of positions whose range contains the current tick
    pub liquidity: u128,
    /// Most recently written oracle slot
    pub observation_index: u32,
    /// Slots in use
    pub observation_cardinality: u32,
    /// Slots reserved; the buffer grows into them as it wraps
    pub observation_cardinality_next: u32,
    /// Protocol share divisor on token0 input, 0 when off
    pub fee_protocol_0: u32,
    pub fee_protocol_1: u32,
    /// Fee growth per unit of liquidity, Q128, wrapping
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    /// Protocol fees awaiting collection
    pub protocol_fees_0: u128,
    pub protocol_fees_1: u128,
}

// ============================================================
// TICKS AND POSITIONS
// ============================================================

/// Stored form of a tick
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickEntry {
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
    /// Q128, relative to the side of the tick away from the price
    pub fee_growth_outside_0_x128: U256,
    pub fee_growth_outside_1_x128: U256,
    pub initialized: bool,
}

/// Stored form of a position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionEntry {
    pub liquidity: u128,
    /// Q128 fee growth inside the range at the last update
    pub fee_growth_inside_0_last_x128: U256,
    pub fee_growth_inside_1_last_x128: U256,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

// ============================================================
// SWAP QUOTE
// ============================================================

/// Outcome of a dry-run swap. Failures come back as `is_valid = false`
/// with a short reason instead of an error.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapQuote {
    pub amount0: i128,
    pub amount1: i128,
    pub sqrt_price_x96_after: U256,
    pub tick_after: i32,
    pub liquidity_after: u128,
    pub fee_amount: u128,
    pub ticks_crossed: u32,
    pub is_valid: bool,
    pub error_message: Option<Symbol>,
}

impl SwapQuote {
    pub fn invalid(env: &Env, error: Symbol) -> Self {
        Self {
            amount0: 0,
            amount1: 0,
            sqrt_price_x96_after: U256::from_u32(env, 0),
            tick_after: 0,
            liquidity_after: 0,
            fee_amount: 0,
            ticks_crossed: 0,
            is_valid: false,
            error_message: Some(error),
        }
    }
}
