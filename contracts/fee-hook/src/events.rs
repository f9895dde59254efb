//! Fee hook events

use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the tier table is replaced
pub fn emit_tiers_updated(env: &Env, tier_count: u32) {
    env.events()
        .publish((Symbol::new(env, "TiersUpdated"),), (tier_count,));
}

/// Emitted when the global flat fee is set or cleared
pub fn emit_flat_fee_updated(env: &Env, fee: Option<u32>) {
    env.events()
        .publish((Symbol::new(env, "FlatFeeUpdated"),), (fee,));
}

pub fn emit_pool_fee_updated(env: &Env, pool: &Address, fee: Option<u32>) {
    env.events().publish(
        (Symbol::new(env, "PoolFeeUpdated"), pool.clone()),
        (fee,),
    );
}
