use soroban_sdk::contracttype;
use tidepool_math::U256;

/// Liquidity and fee entitlement of one (owner, lower, upper) range
///
/// Persisted by the pool through its own contract type, since the fee
/// growth snapshots are 256-bit Q128 values.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub liquidity: u128,
    /// Fee growth inside the range at the last update, token0 (Q128)
    pub fee_growth_inside_0_last_x128: U256,
    /// Fee growth inside the range at the last update, token1 (Q128)
    pub fee_growth_inside_1_last_x128: U256,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}

impl Position {
    /// No liquidity and nothing left to collect
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0 && self.tokens_owed_0 == 0 && self.tokens_owed_1 == 0
    }
}

/// View of a position at the current price: underlying amounts plus owed
/// fees including those not yet credited.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub amount0: u128,
    pub amount1: u128,
    pub tokens_owed_0: u128,
    pub tokens_owed_1: u128,
}
