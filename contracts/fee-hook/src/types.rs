use soroban_sdk::{contracttype, Address, Vec};

/// Discount granted to traders holding at least `min_balance` of the
/// hold token
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscountTier {
    pub min_balance: i128,
    /// Reduction of the nominal fee in basis points
    pub discount_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HookConfig {
    pub admin: Address,
    /// Token whose balance selects the tier
    pub hold_token: Address,
    /// Strictly ascending by `min_balance`
    pub tiers: Vec<DiscountTier>,
    /// Fee applied to every pool and trader when set
    pub flat_fee: Option<u32>,
}
