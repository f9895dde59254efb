// Tick Types

use tidepool_math::U256;

/// Information stored for each initialized tick
///
/// The pool persists it through its own contract type, since fee growth is
/// carried as a 256-bit Q128 value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick as a boundary
    pub liquidity_gross: u128,
    /// Net liquidity change when price crosses this tick upward
    pub liquidity_net: i128,
    /// Fee growth per unit of liquidity on the other side of this tick, token0 (Q128)
    pub fee_growth_outside_0_x128: U256,
    /// Fee growth per unit of liquidity on the other side of this tick, token1 (Q128)
    pub fee_growth_outside_1_x128: U256,
    /// Whether this tick is referenced by any position
    pub initialized: bool,
}
