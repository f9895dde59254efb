use soroban_sdk::contracttype;

/// One ring buffer slot
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Observation {
    /// Ledger timestamp of the observation
    pub block_timestamp: u64,
    /// Time integral of the tick since pool initialization
    pub tick_cumulative: i64,
    /// Time integral of 1 / max(liquidity, 1), Q64.64
    pub seconds_per_liq_cumulative_x64: u128,
    /// False for slots reserved by `grow` but never written
    pub initialized: bool,
}

/// Storage seam for observation slots
pub trait ObservationAccess {
    fn read_observation(&self, index: u32) -> Observation;
    fn write_observation(&mut self, index: u32, observation: &Observation);
}
