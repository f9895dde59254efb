use primitive_types::U256;

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick value (price ≈ 2.9e-39).
pub const MIN_TICK: i32 = -887272;

/// Maximum valid tick value (price ≈ 3.4e38).
pub const MAX_TICK: i32 = 887272;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.96 format)
// ============================================================

/// Sqrt price at MIN_TICK, equal to `get_sqrt_price_at_tick(MIN_TICK)`.
pub const MIN_SQRT_PRICE_X96: U256 = U256([4295128739, 0, 0, 0]);

/// Sqrt price at MAX_TICK, equal to `get_sqrt_price_at_tick(MAX_TICK)`.
/// Valid pool prices are strictly below this value.
/// 1461446703485210103287273052203988822378723970342
pub const MAX_SQRT_PRICE_X96: U256 =
    U256([0x5d951d5263988d26, 0xefd1fc6a50648849, 0xfffd8963, 0]);

/// Sqrt price for a 1:1 price ratio (2^96).
pub const SQRT_PRICE_1_1: U256 = Q96;

// ============================================================
// FIXED POINT
// ============================================================

/// Number of fractional bits in a Q64.96 sqrt price.
pub const RESOLUTION: u32 = 96;

/// 1.0 in Q64.96.
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);

/// Number of fractional bits in a fee growth accumulator.
pub const FEE_GROWTH_RESOLUTION: u32 = 128;

/// 1.0 in Q128, the fee growth unit.
pub const Q128: U256 = U256([0, 0, 1, 0]);

// ============================================================
// FEE CONSTANTS
// ============================================================

/// Fees are expressed in pips (hundredths of a basis point).
pub const FEE_DENOMINATOR: u32 = 1_000_000;

/// Fees must be strictly below 100%.
pub const MAX_FEE_PIPS: u32 = FEE_DENOMINATOR - 1;

// ============================================================
// TICK SPACING
// ============================================================

/// Upper bound on tick spacing. Keeps the number of bitmap words touched by
/// a single word search meaningful and the per-tick liquidity cap non-trivial.
pub const MAX_TICK_SPACING: i32 = 16384;
