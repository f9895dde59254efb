#![no_std]

//! Balance-tiered fee hook.
//!
//! A pool configured with this hook asks it for the fee of every swap.
//! Resolution order: a per-pool override, then a flat override, then the
//! highest tier the trader's hold-token balance reaches. Every result is
//! capped at the pool's nominal fee.

use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Env, Vec};

mod error;
mod events;
mod storage;
mod types;

pub use error::FeeHookError;
pub use types::{DiscountTier, HookConfig};

use events::*;
use storage::*;

const BPS_DENOMINATOR: u32 = 10_000;
const MAX_TIERS: u32 = 16;

#[contract]
pub struct TieredFeeHook;

#[contractimpl]
impl TieredFeeHook {
    pub fn __constructor(env: Env, admin: Address, hold_token: Address, tiers: Vec<DiscountTier>) {
        if let Err(err) = validate_tiers(&tiers) {
            panic_with_error!(&env, err);
        }
        write_config(
            &env,
            &HookConfig {
                admin,
                hold_token,
                tiers,
                flat_fee: None,
            },
        );
    }

    /// Effective fee in pips for `trader` swapping on `pool`
    pub fn compute_fee(
        env: Env,
        pool: Address,
        trader: Address,
        nominal_fee: u32,
    ) -> Result<u32, FeeHookError> {
        if let Some(fee) = read_pool_fee(&env, &pool) {
            return Ok(fee.min(nominal_fee));
        }

        let config = read_config(&env)?;
        if let Some(fee) = config.flat_fee {
            return Ok(fee.min(nominal_fee));
        }

        let balance = token::Client::new(&env, &config.hold_token).balance(&trader);
        let discount_bps = config
            .tiers
            .iter()
            .filter(|tier| balance >= tier.min_balance)
            .map(|tier| tier.discount_bps)
            .last()
            .unwrap_or(0);

        let fee = apply_discount(nominal_fee, discount_bps);
        log!(&env, "compute_fee", balance, discount_bps, fee);
        Ok(fee)
    }

    // ========================================================
    // ADMIN
    // ========================================================

    pub fn set_tiers(env: Env, tiers: Vec<DiscountTier>) -> Result<(), FeeHookError> {
        let mut config = read_config(&env)?;
        config.admin.require_auth();
        validate_tiers(&tiers)?;

        let tier_count = tiers.len();
        config.tiers = tiers;
        write_config(&env, &config);
        emit_tiers_updated(&env, tier_count);
        Ok(())
    }

    /// Charge `fee` everywhere, or clear with `None`
    pub fn set_flat_fee(env: Env, fee: Option<u32>) -> Result<(), FeeHookError> {
        let mut config = read_config(&env)?;
        config.admin.require_auth();

        config.flat_fee = fee;
        write_config(&env, &config);
        emit_flat_fee_updated(&env, fee);
        Ok(())
    }

    pub fn set_pool_fee(env: Env, pool: Address, fee: Option<u32>) -> Result<(), FeeHookError> {
        let config = read_config(&env)?;
        config.admin.require_auth();

        write_pool_fee(&env, &pool, fee);
        emit_pool_fee_updated(&env, &pool, fee);
        Ok(())
    }

    // ========================================================
    // VIEWS
    // ========================================================

    pub fn get_config(env: Env) -> Result<HookConfig, FeeHookError> {
        read_config(&env)
    }

    pub fn get_pool_fee(env: Env, pool: Address) -> Option<u32> {
        read_pool_fee(&env, &pool)
    }
}

fn validate_tiers(tiers: &Vec<DiscountTier>) -> Result<(), FeeHookError> {
    if tiers.len() > MAX_TIERS {
        return Err(FeeHookError::TooManyTiers);
    }
    let mut previous: Option<i128> = None;
    for tier in tiers.iter() {
        if tier.min_balance < 0 {
            return Err(FeeHookError::NegativeThreshold);
        }
        if tier.discount_bps > BPS_DENOMINATOR {
            return Err(FeeHookError::InvalidDiscount);
        }
        if previous.is_some_and(|min| tier.min_balance <= min) {
            return Err(FeeHookError::TiersNotAscending);
        }
        previous = Some(tier.min_balance);
    }
    Ok(())
}

/// `nominal * (10000 - bps) / 10000`, rounded down
fn apply_discount(nominal_fee: u32, discount_bps: u32) -> u32 {
    let kept = (BPS_DENOMINATOR - discount_bps.min(BPS_DENOMINATOR)) as u64;
    (nominal_fee as u64 * kept / BPS_DENOMINATOR as u64) as u32
}
