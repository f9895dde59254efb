// Interfaces the pool calls out to

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Implemented by whoever calls `mint`, `swap` or `flash`.
///
/// Each callback must leave the pool holding at least what it is owed by
/// the time it returns; the pool compares its own balances before and after.
#[contractclient(name = "PoolCalleeClient")]
pub trait PoolCallee {
    /// Pay `amount0_owed` and `amount1_owed` for freshly minted liquidity
    fn mint_callback(env: Env, pool: Address, amount0_owed: i128, amount1_owed: i128, data: Bytes);

    /// Pay the positive side of a swap. Negative amounts were already sent
    /// to the recipient.
    fn swap_callback(env: Env, pool: Address, amount0: i128, amount1: i128, data: Bytes);

    /// Return the borrowed amounts plus `fee0` and `fee1`
    fn flash_callback(env: Env, pool: Address, fee0: i128, fee1: i128, data: Bytes);
}

/// Swap fee adjustment consulted once per swap
#[contractclient(name = "FeeHookClient")]
pub trait FeeHook {
    /// Effective fee in pips for `trader`; must not exceed `nominal_fee`
    fn compute_fee(env: Env, pool: Address, trader: Address, nominal_fee: u32) -> u32;
}
