// Fee hook storage module

use soroban_sdk::{contracttype, Address, Env};

use crate::error::FeeHookError;
use crate::types::HookConfig;

#[contracttype]
pub enum HookDataKey {
    Config,
    /// Fixed fee for one pool
    PoolFee(Address),
}

const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &HookDataKey) {
    env.storage().persistent().extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

pub fn write_config(env: &Env, config: &HookConfig) {
    env.storage().persistent().set(&HookDataKey::Config, config);
    extend_ttl(env, &HookDataKey::Config);
}

pub fn read_config(env: &Env) -> Result<HookConfig, FeeHookError> {
    env.storage()
        .persistent()
        .get(&HookDataKey::Config)
        .ok_or(FeeHookError::NotInitialized)
}

pub fn read_pool_fee(env: &Env, pool: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&HookDataKey::PoolFee(pool.clone()))
}

pub fn write_pool_fee(env: &Env, pool: &Address, fee: Option<u32>) {
    let key = HookDataKey::PoolFee(pool.clone());
    match fee {
        Some(fee) => {
            env.storage().persistent().set(&key, &fee);
            extend_ttl(env, &key);
        }
        None => env.storage().persistent().remove(&key),
    }
}
