use tidepool_math::U256;

// ============================================================
// SWAP STATE
// ============================================================

/// Projection of pool state the engine reads and produces.
///
/// The engine never mutates the caller's copy; the final state comes back
/// in `SwapComputation` for the pool to commit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SwapState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    /// Q128
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
}

/// Pool parameters in effect for one swap
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwapConfig {
    pub tick_spacing: i32,
    /// Effective fee after any hook adjustment, in pips
    pub fee_pips: u32,
    /// Protocol share divisor for the input token, 0 when disabled
    pub fee_protocol: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwapParams {
    pub zero_for_one: bool,
    /// Positive for exact input, negative for exact output
    pub amount_specified: i128,
    pub sqrt_price_limit_x96: U256,
}

// ============================================================
// SWAP RESULT
// ============================================================

/// Result of running the swap loop
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SwapComputation {
    /// Token0 owed to the pool (positive) or paid out (negative)
    pub amount0: i128,
    /// Token1 owed to the pool (positive) or paid out (negative)
    pub amount1: i128,
    /// State after the swap
    pub state: SwapState,
    /// Total fee charged in the input token
    pub fee_amount: u128,
    /// Part of `fee_amount` skimmed for the protocol
    pub protocol_fee: u128,
    pub ticks_crossed: u32,
}
