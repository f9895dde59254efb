#![allow(dead_code)]

use std::collections::BTreeMap;

use tidepool_math::SQRT_PRICE_1_1;
use tidepool_swap::SwapState;
use tidepool_tick::{flip_tick, update_tick, TickAccess, TickInfo};

/// In-memory tick store for package tests
#[derive(Default)]
pub struct MemoryTicks {
    pub ticks: BTreeMap<i32, TickInfo>,
    pub words: BTreeMap<i32, u128>,
}

impl TickAccess for MemoryTicks {
    fn read_tick(&self, tick: i32) -> TickInfo {
        self.ticks.get(&tick).cloned().unwrap_or_default()
    }

    fn write_tick(&mut self, tick: i32, info: &TickInfo) {
        self.ticks.insert(tick, info.clone());
    }

    fn remove_tick(&mut self, tick: i32) {
        self.ticks.remove(&tick);
    }

    fn read_bitmap_word(&self, word_pos: i32) -> u128 {
        self.words.get(&word_pos).copied().unwrap_or(0)
    }

    fn write_bitmap_word(&mut self, word_pos: i32, word: u128) {
        self.words.insert(word_pos, word);
    }
}

impl MemoryTicks {
    pub fn with_initialized(ticks: &[i32], tick_spacing: i32) -> Self {
        let mut store = Self::default();
        for tick in ticks {
            flip_tick(&mut store, *tick, tick_spacing).unwrap();
        }
        store
    }
}

pub const TICK_SPACING: i32 = 60;
pub const FEE_PIPS: u32 = 3000;

/// Pool at price 1.0 with the given (lower, upper, liquidity) positions
pub fn setup_pool(positions: &[(i32, i32, u128)]) -> (MemoryTicks, SwapState) {
    let mut store = MemoryTicks::default();
    let mut state = SwapState {
        sqrt_price_x96: SQRT_PRICE_1_1,
        ..SwapState::default()
    };

    for (lower, upper, liquidity) in positions {
        for (tick, upper_side) in [(*lower, false), (*upper, true)] {
            let flipped = update_tick(
                &mut store,
                tick,
                state.tick,
                *liquidity as i128,
                state.fee_growth_global_0_x128,
                state.fee_growth_global_1_x128,
                upper_side,
                u128::MAX,
            )
            .unwrap();
            if flipped {
                flip_tick(&mut store, tick, TICK_SPACING).unwrap();
            }
        }
        if *lower <= state.tick && state.tick < *upper {
            state.liquidity += liquidity;
        }
    }

    (store, state)
}
