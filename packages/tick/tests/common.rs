#![allow(dead_code)]

use std::collections::BTreeMap;

use tidepool_tick::{TickAccess, TickInfo};

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
            tidepool_tick::flip_tick(&mut store, *tick, tick_spacing).unwrap();
        }
        store
    }
}
