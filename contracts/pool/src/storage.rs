// Storage module for the pool contract
//
// Every key lives in persistent storage. Sparse maps (ticks, bitmap words,
// positions, oracle slots) read as defaults when absent; presence is checked
// explicitly where absence means something different from zero.

use soroban_sdk::{contracttype, Address, Env};
use tidepool_oracle::{Observation, ObservationAccess};
use tidepool_position::Position;
use tidepool_tick::{TickAccess, TickInfo};

use crate::error::PoolError;
use crate::types::{PoolConfig, PoolState, PositionEntry, TickEntry};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    /// Constructor parameters
    Config,
    /// Price, liquidity, accumulators; present once initialized
    State,
    /// Re-entry flag; false while a mutating call is running
    Unlocked,
    /// Tick entry by tick index
    Tick(i32),
    /// Bitmap word by word position
    TickBitmap(i32),
    /// Position by (owner, lower_tick, upper_tick)
    Position(Address, i32, i32),
    /// Oracle slot by index
    Observation(u32),
}

// ============================================================
// STORAGE CONFIGURATION
// ============================================================

pub mod storage_ttl {
    /// About 1 year at 5s per ledger
    pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 6_307_200;
    pub const PERSISTENT_BUMP_AMOUNT: u32 = 6_307_200;
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(
        key,
        storage_ttl::PERSISTENT_LIFETIME_THRESHOLD,
        storage_ttl::PERSISTENT_BUMP_AMOUNT,
    );
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    extend_persistent_ttl(env, key);
}

// ============================================================
// POOL CONFIG
// ============================================================

pub fn write_pool_config(env: &Env, config: &PoolConfig) {
    write_persistent(env, &DataKey::Config, config);
}

pub fn read_pool_config(env: &Env) -> Result<PoolConfig, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Config)
        .ok_or(PoolError::NotInitialized)
}

// ============================================================
// POOL STATE
// ============================================================

#[inline]
pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::State)
}

pub fn write_pool_state(env: &Env, state: &PoolState) {
    write_persistent(env, &DataKey::State, state);
}

pub fn read_pool_state(env: &Env) -> Result<PoolState, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::State)
        .ok_or(PoolError::NotInitialized)
}

// ============================================================
// RE-ENTRY LOCK
// ============================================================

/// Take the pool lock for the duration of a mutating call.
///
/// A failed call rolls back every write it made, the lock included, so
/// only the success path needs `unlock`.
pub fn lock(env: &Env) -> Result<(), PoolError> {
    let unlocked: bool = env
        .storage()
        .persistent()
        .get(&DataKey::Unlocked)
        .ok_or(PoolError::NotInitialized)?;
    if !unlocked {
        return Err(PoolError::Locked);
    }
    env.storage().persistent().set(&DataKey::Unlocked, &false);
    Ok(())
}

pub fn unlock(env: &Env) {
    write_persistent(env, &DataKey::Unlocked, &true);
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_position_entry(
    env: &Env,
    owner: &Address,
    lower: i32,
    upper: i32,
) -> Option<PositionEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(owner.clone(), lower, upper))
}

pub fn read_position(env: &Env, owner: &Address, lower: i32, upper: i32) -> Option<Position> {
    read_position_entry(env, owner, lower, upper).map(|entry| entry.to_position())
}

pub fn write_position(env: &Env, owner: &Address, lower: i32, upper: i32, position: &Position) {
    let entry = PositionEntry::from_position(env, position);
    write_persistent(env, &DataKey::Position(owner.clone(), lower, upper), &entry);
}

pub fn remove_position(env: &Env, owner: &Address, lower: i32, upper: i32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(owner.clone(), lower, upper));
}

// ============================================================
// TICKS AND BITMAP
// ============================================================

pub fn read_tick_entry(env: &Env, tick: i32) -> Option<TickEntry> {
    env.storage().persistent().get(&DataKey::Tick(tick))
}

/// Tick registry over contract storage.
///
/// With `read_only` set, writes are dropped so a swap can be simulated
/// without touching state.
pub struct TickStore<'a> {
    env: &'a Env,
    read_only: bool,
}

impl<'a> TickStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env, read_only: false }
    }

    pub fn read_only(env: &'a Env) -> Self {
        Self { env, read_only: true }
    }
}

impl TickAccess for TickStore<'_> {
    fn read_tick(&self, tick: i32) -> TickInfo {
        read_tick_entry(self.env, tick)
            .map(|entry| entry.to_info())
            .unwrap_or_default()
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        if !self.read_only {
            let entry = TickEntry::from_info(self.env, info);
            write_persistent(self.env, &DataKey::Tick(tick), &entry);
        }
    }

    fn remove_tick(&mut self, tick: i32) {
        if !self.read_only {
            self.env.storage().persistent().remove(&DataKey::Tick(tick));
        }
    }

    fn read_bitmap_word(&self, word_pos: i32) -> u128 {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::TickBitmap(word_pos))
            .unwrap_or(0)
    }

    fn write_bitmap_word(&mut self, word_pos: i32, word: u128) {
        if self.read_only {
            return;
        }
        let key = DataKey::TickBitmap(word_pos);
        if word == 0 {
            self.env.storage().persistent().remove(&key);
        } else {
            write_persistent(self.env, &key, &word);
        }
    }
}

// ============================================================
// ORACLE
// ============================================================

/// Oracle ring buffer over contract storage
pub struct ObservationStore<'a> {
    env: &'a Env,
}

impl<'a> ObservationStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl ObservationAccess for ObservationStore<'_> {
    fn read_observation(&self, index: u32) -> Observation {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Observation(index))
            .unwrap_or_default()
    }

    fn write_observation(&mut self, index: u32, observation: &Observation) {
        write_persistent(self.env, &DataKey::Observation(index), observation);
    }
}
