#![allow(dead_code)]

use soroban_sdk::{testutils::Address as _, token, vec, Address, Env};
use tidepool_fee_hook::{DiscountTier, TieredFeeHook, TieredFeeHookClient};

pub const NOMINAL_FEE: u32 = 5000;

pub struct TestHook<'a> {
    pub client: TieredFeeHookClient<'a>,
    pub admin: Address,
    pub hold_token: Address,
    pub pool: Address,
}

/// 10% off from 100 held, 20% from 200, 30% from 300
pub fn setup_hook(env: &Env) -> TestHook<'_> {
    let admin = Address::generate(env);
    let hold_token = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let tiers = vec![
        env,
        DiscountTier { min_balance: 100, discount_bps: 1000 },
        DiscountTier { min_balance: 200, discount_bps: 2000 },
        DiscountTier { min_balance: 300, discount_bps: 3000 },
    ];
    let hook_id = env.register(TieredFeeHook, (admin.clone(), hold_token.clone(), tiers));

    TestHook {
        client: TieredFeeHookClient::new(env, &hook_id),
        admin,
        hold_token,
        pool: Address::generate(env),
    }
}

pub fn trader_holding(env: &Env, hook: &TestHook, balance: i128) -> Address {
    let trader = Address::generate(env);
    if balance > 0 {
        token::StellarAssetClient::new(env, &hook.hold_token).mint(&trader, &balance);
    }
    trader
}
