// Conversions between host 256-bit integers and the packages' `U256`
//
// Contract types carry `soroban_sdk::U256` so values cross the contract
// boundary natively; the math runs on `primitive_types::U256`.

use soroban_sdk::{Env, U256 as HostU256};
use tidepool_math::U256;

use crate::types::{PositionEntry, TickEntry};
use tidepool_position::Position;
use tidepool_tick::TickInfo;

/// Package value to host value
pub fn to_host(env: &Env, value: &U256) -> HostU256 {
    let [lo_lo, lo_hi, hi_lo, hi_hi] = value.0;
    HostU256::from_parts(env, hi_hi, hi_lo, lo_hi, lo_lo)
}

/// Host value to package value
pub fn from_host(value: &HostU256) -> U256 {
    let mut bytes = [0u8; 32];
    value.to_be_bytes().copy_into_slice(&mut bytes);
    U256::from_big_endian(&bytes)
}

impl TickEntry {
    pub fn from_info(env: &Env, info: &TickInfo) -> Self {
        Self {
            liquidity_gross: info.liquidity_gross,
            liquidity_net: info.liquidity_net,
            fee_growth_outside_0_x128: to_host(env, &info.fee_growth_outside_0_x128),
            fee_growth_outside_1_x128: to_host(env, &info.fee_growth_outside_1_x128),
            initialized: info.initialized,
        }
    }

    pub fn to_info(&self) -> TickInfo {
        TickInfo {
            liquidity_gross: self.liquidity_gross,
            liquidity_net: self.liquidity_net,
            fee_growth_outside_0_x128: from_host(&self.fee_growth_outside_0_x128),
            fee_growth_outside_1_x128: from_host(&self.fee_growth_outside_1_x128),
            initialized: self.initialized,
        }
    }
}

impl PositionEntry {
    pub fn from_position(env: &Env, position: &Position) -> Self {
        Self {
            liquidity: position.liquidity,
            fee_growth_inside_0_last_x128: to_host(env, &position.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: to_host(env, &position.fee_growth_inside_1_last_x128),
            tokens_owed_0: position.tokens_owed_0,
            tokens_owed_1: position.tokens_owed_1,
        }
    }

    pub fn to_position(&self) -> Position {
        Position {
            liquidity: self.liquidity,
            fee_growth_inside_0_last_x128: from_host(&self.fee_growth_inside_0_last_x128),
            fee_growth_inside_1_last_x128: from_host(&self.fee_growth_inside_1_last_x128),
            tokens_owed_0: self.tokens_owed_0,
            tokens_owed_1: self.tokens_owed_1,
        }
    }
}
