#![allow(dead_code)]

use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    token, Address, Bytes, Env,
};
use tidepool_math::U256;
use tidepool_pool::convert::{from_host, to_host};
use tidepool_pool::{TidePool, TidePoolClient};
use tidepool_tick::wrapping_sub;

// Test constants
pub const FEE: u32 = 3000; // 0.30%
pub const TICK_SPACING: i32 = 60;
pub const SQRT_PRICE_1_1: U256 = tidepool_math::SQRT_PRICE_1_1;
/// sqrt(2) in Q64.96
pub const SQRT_PRICE_2: U256 = U256([0xf3bcc908b2fb1366, 0x1_6a09_e667, 0, 0]);
pub const START_TIME: u64 = 1_000;
pub const CALLEE_FUNDING: i128 = 1_000_000_000_000_000;

// ============================================================
// TEST CALLEE
// ============================================================

#[contracttype]
enum CalleeKey {
    Tokens,
    /// Amount withheld from every payment, per token
    Shortfall,
    /// Principal to return from the next flash callback
    Loan,
}

/// Pays whatever the pool asks for out of its own balance
#[contract]
pub struct TestCallee;

#[contractimpl]
impl TestCallee {
    pub fn __constructor(env: Env, token0: Address, token1: Address) {
        env.storage().instance().set(&CalleeKey::Tokens, &(token0, token1));
    }

    pub fn set_shortfall(env: Env, short0: i128, short1: i128) {
        env.storage().instance().set(&CalleeKey::Shortfall, &(short0, short1));
    }

    pub fn set_loan(env: Env, amount0: i128, amount1: i128) {
        env.storage().instance().set(&CalleeKey::Loan, &(amount0, amount1));
    }

    pub fn mint_callback(env: Env, pool: Address, amount0_owed: i128, amount1_owed: i128, _data: Bytes) {
        pay(&env, &pool, amount0_owed, amount1_owed);
    }

    pub fn swap_callback(env: Env, pool: Address, amount0: i128, amount1: i128, _data: Bytes) {
        pay(&env, &pool, amount0.max(0), amount1.max(0));
    }

    pub fn flash_callback(env: Env, pool: Address, fee0: i128, fee1: i128, _data: Bytes) {
        let (loan0, loan1): (i128, i128) = env
            .storage()
            .instance()
            .get(&CalleeKey::Loan)
            .unwrap_or((0, 0));
        pay(&env, &pool, loan0 + fee0, loan1 + fee1);
    }
}

fn pay(env: &Env, pool: &Address, amount0: i128, amount1: i128) {
    let (token0, token1): (Address, Address) = env.storage().instance().get(&CalleeKey::Tokens).unwrap();
    let (short0, short1): (i128, i128) = env
        .storage()
        .instance()
        .get(&CalleeKey::Shortfall)
        .unwrap_or((0, 0));
    let me = env.current_contract_address();

    if amount0 - short0 > 0 {
        token::Client::new(env, &token0).transfer(&me, pool, &(amount0 - short0));
    }
    if amount1 - short1 > 0 {
        token::Client::new(env, &token1).transfer(&me, pool, &(amount1 - short1));
    }
}

// ============================================================
// SETUP
// ============================================================

pub struct TestPool<'a> {
    pub env: Env,
    pub pool: TidePoolClient<'a>,
    pub admin: Address,
    pub token0: Address,
    pub token1: Address,
    pub callee: Address,
    pub callee_client: TestCalleeClient<'a>,
}

/// Pool at price 1.0, fee 0.30%, spacing 60, no hook
pub fn setup_pool(env: &Env) -> TestPool<'_> {
    setup_custom_pool(env, FEE, TICK_SPACING, SQRT_PRICE_1_1, None)
}

pub fn setup_custom_pool(
    env: &Env,
    fee: u32,
    tick_spacing: i32,
    sqrt_price_x96: U256,
    fee_hook: Option<Address>,
) -> TestPool<'_> {
    let pool = setup_uninitialized_pool(env, fee, tick_spacing, fee_hook);
    pool.pool.initialize(&to_host(env, &sqrt_price_x96));
    pool
}

pub fn setup_uninitialized_pool(
    env: &Env,
    fee: u32,
    tick_spacing: i32,
    fee_hook: Option<Address>,
) -> TestPool<'_> {
    set_time(env, START_TIME);

    let admin = Address::generate(env);
    let token_a = create_token(env, &admin);
    let token_b = create_token(env, &admin);

    let pool_id = env.register(TidePool, (admin.clone(), token_a, token_b, fee, tick_spacing, fee_hook));
    let pool = TidePoolClient::new(env, &pool_id);
    let config = pool.get_pool_config();

    let callee = env.register(TestCallee, (config.token0.clone(), config.token1.clone()));
    mint_tokens(env, &config.token0, &callee, CALLEE_FUNDING);
    mint_tokens(env, &config.token1, &callee, CALLEE_FUNDING);

    TestPool {
        env: env.clone(),
        pool,
        admin,
        token0: config.token0,
        token1: config.token1,
        callee: callee.clone(),
        callee_client: TestCalleeClient::new(env, &callee),
    }
}

impl TestPool<'_> {
    pub fn mint(&self, owner: &Address, tick_lower: i32, tick_upper: i32, amount: u128) -> (u128, u128) {
        self.pool.mint(
            &self.callee,
            owner,
            &tick_lower,
            &tick_upper,
            &amount,
            &Bytes::new(&self.env),
        )
    }

    pub fn swap(
        &self,
        recipient: &Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: U256,
    ) -> (i128, i128) {
        self.pool.swap(
            &self.callee,
            recipient,
            &zero_for_one,
            &amount_specified,
            &to_host(&self.env, &sqrt_price_limit_x96),
            &Bytes::new(&self.env),
        )
    }

    /// Host form of a Q64.96 price, for calling the client directly
    pub fn host(&self, value: U256) -> soroban_sdk::U256 {
        to_host(&self.env, &value)
    }

    pub fn sqrt_price(&self) -> U256 {
        from_host(&self.pool.get_pool_state().sqrt_price_x96)
    }

    pub fn fee_growth_global(&self) -> (U256, U256) {
        let state = self.pool.get_pool_state();
        (
            from_host(&state.fee_growth_global_0_x128),
            from_host(&state.fee_growth_global_1_x128),
        )
    }

    /// Fee growth inside a range, rebuilt from the tick views
    pub fn fee_growth_inside(&self, tick_lower: i32, tick_upper: i32) -> (U256, U256) {
        let tick = self.pool.get_pool_state().tick;
        let (global_0, global_1) = self.fee_growth_global();
        let lower = self.pool.get_tick(&tick_lower);
        let upper = self.pool.get_tick(&tick_upper);

        let inside = |global: U256, lower_outside: U256, upper_outside: U256| {
            let below = if tick >= tick_lower {
                lower_outside
            } else {
                wrapping_sub(global, lower_outside)
            };
            let above = if tick < tick_upper {
                upper_outside
            } else {
                wrapping_sub(global, upper_outside)
            };
            wrapping_sub(wrapping_sub(global, below), above)
        };
        (
            inside(
                global_0,
                from_host(&lower.fee_growth_outside_0_x128),
                from_host(&upper.fee_growth_outside_0_x128),
            ),
            inside(
                global_1,
                from_host(&lower.fee_growth_outside_1_x128),
                from_host(&upper.fee_growth_outside_1_x128),
            ),
        )
    }

    /// Stored fee snapshots of a position
    pub fn position_snapshot(&self, owner: &Address, tick_lower: i32, tick_upper: i32) -> (U256, U256) {
        let position = self.pool.get_position(owner, &tick_lower, &tick_upper).unwrap();
        (
            from_host(&position.fee_growth_inside_0_last_x128),
            from_host(&position.fee_growth_inside_1_last_x128),
        )
    }

    pub fn balance0(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.token0).balance(who)
    }

    pub fn balance1(&self, who: &Address) -> i128 {
        token::Client::new(&self.env, &self.token1).balance(who)
    }

    pub fn pool_balances(&self) -> (i128, i128) {
        let pool = self.pool.address.clone();
        (self.balance0(&pool), self.balance1(&pool))
    }
}

// ============================================================
// TOKENS & LEDGER
// ============================================================

pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    let client = StellarAssetClient::new(env, token);
    client.mint(to, &amount);
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}
