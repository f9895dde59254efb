use soroban_sdk::{Address, Env, Symbol, U256};

// ============================================================
// EVENT NAMES
// ============================================================

pub struct EventName;

impl EventName {
    pub fn initialize(env: &Env) -> Symbol {
        Symbol::new(env, "initialize")
    }

    pub fn mint(env: &Env) -> Symbol {
        Symbol::new(env, "mint")
    }

    pub fn burn(env: &Env) -> Symbol {
        Symbol::new(env, "burn")
    }

    pub fn collect(env: &Env) -> Symbol {
        Symbol::new(env, "collect")
    }

    pub fn close_position(env: &Env) -> Symbol {
        Symbol::new(env, "close_pos")
    }

    pub fn swap(env: &Env) -> Symbol {
        Symbol::new(env, "swap")
    }

    pub fn flash(env: &Env) -> Symbol {
        Symbol::new(env, "flash")
    }

    pub fn set_fee_protocol(env: &Env) -> Symbol {
        Symbol::new(env, "set_fee_prot")
    }

    pub fn collect_protocol(env: &Env) -> Symbol {
        Symbol::new(env, "collect_prot")
    }

    pub fn grow_observations(env: &Env) -> Symbol {
        Symbol::new(env, "obs_grow")
    }
}

// ============================================================
// EVENT EMITTERS
// ============================================================

pub fn emit_initialize(env: &Env, sqrt_price_x96: U256, tick: i32) {
    env.events()
        .publish((EventName::initialize(env),), (sqrt_price_x96, tick));
}

/// Topics: ("mint", owner)
/// Data: (sender, lower, upper, liquidity, amount0, amount1)
#[allow(clippy::too_many_arguments)]
pub fn emit_mint(
    env: &Env,
    sender: &Address,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::mint(env), owner.clone()),
        (sender.clone(), tick_lower, tick_upper, liquidity, amount0, amount1),
    );
}

/// Topics: ("burn", owner)
/// Data: (lower, upper, liquidity, amount0, amount1)
pub fn emit_burn(
    env: &Env,
    owner: &Address,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::burn(env), owner.clone()),
        (tick_lower, tick_upper, liquidity, amount0, amount1),
    );
}

pub fn emit_collect(
    env: &Env,
    owner: &Address,
    recipient: &Address,
    tick_lower: i32,
    tick_upper: i32,
    amount0: u128,
    amount1: u128,
) {
    env.events().publish(
        (EventName::collect(env), owner.clone()),
        (recipient.clone(), tick_lower, tick_upper, amount0, amount1),
    );
}

pub fn emit_close_position(env: &Env, owner: &Address, tick_lower: i32, tick_upper: i32) {
    env.events().publish(
        (EventName::close_position(env), owner.clone()),
        (tick_lower, tick_upper),
    );
}

/// Topics: ("swap", sender)
/// Data: (recipient, amount0, amount1, sqrt_price_x96, liquidity, tick)
#[allow(clippy::too_many_arguments)]
pub fn emit_swap(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: i128,
    amount1: i128,
    sqrt_price_x96: U256,
    liquidity: u128,
    tick: i32,
) {
    env.events().publish(
        (EventName::swap(env), sender.clone()),
        (recipient.clone(), amount0, amount1, sqrt_price_x96, liquidity, tick),
    );
}

/// Data: (recipient, amount0, amount1, paid0, paid1)
pub fn emit_flash(
    env: &Env,
    sender: &Address,
    recipient: &Address,
    amount0: u128,
    amount1: u128,
    paid0: u128,
    paid1: u128,
) {
    env.events().publish(
        (EventName::flash(env), sender.clone()),
        (recipient.clone(), amount0, amount1, paid0, paid1),
    );
}

/// Data: (old0, old1, new0, new1)
pub fn emit_set_fee_protocol(env: &Env, old: (u32, u32), new: (u32, u32)) {
    env.events().publish(
        (EventName::set_fee_protocol(env),),
        (old.0, old.1, new.0, new.1),
    );
}

pub fn emit_collect_protocol(env: &Env, recipient: &Address, amount0: u128, amount1: u128) {
    env.events().publish(
        (EventName::collect_protocol(env),),
        (recipient.clone(), amount0, amount1),
    );
}

pub fn emit_grow_observations(env: &Env, cardinality_next_old: u32, cardinality_next_new: u32) {
    env.events().publish(
        (EventName::grow_observations(env),),
        (cardinality_next_old, cardinality_next_new),
    );
}
