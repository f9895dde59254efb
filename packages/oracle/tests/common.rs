#![allow(dead_code)]

use std::collections::BTreeMap;

use tidepool_oracle::*;

/// In-memory observation slots for package tests
#[derive(Default)]
pub struct MemoryObservations {
    pub slots: BTreeMap<u32, Observation>,
}

impl ObservationAccess for MemoryObservations {
    fn read_observation(&self, index: u32) -> Observation {
        self.slots.get(&index).cloned().unwrap_or_default()
    }

    fn write_observation(&mut self, index: u32, observation: &Observation) {
        self.slots.insert(index, observation.clone());
    }
}

/// Oracle under test with its cursor state
pub struct Oracle {
    pub store: MemoryObservations,
    pub index: u32,
    pub cardinality: u32,
    pub cardinality_next: u32,
    pub time: u64,
    pub tick: i32,
    pub liquidity: u128,
}

impl Oracle {
    pub fn new(time: u64, tick: i32, liquidity: u128) -> Self {
        let mut store = MemoryObservations::default();
        let (cardinality, cardinality_next) = initialize(&mut store, time);
        Self { store, index: 0, cardinality, cardinality_next, time, tick, liquidity }
    }

    pub fn grow(&mut self, next: u32) {
        self.cardinality_next = grow(&mut self.store, self.cardinality_next, next).unwrap();
    }

    /// Advance time, record the current state, then switch to new values
    pub fn update(&mut self, advance: u64, tick: i32, liquidity: u128) {
        self.time += advance;
        let (index, cardinality) = write(
            &mut self.store,
            self.index,
            self.time,
            self.tick,
            self.liquidity,
            self.cardinality,
            self.cardinality_next,
        );
        self.index = index;
        self.cardinality = cardinality;
        self.tick = tick;
        self.liquidity = liquidity;
    }

    pub fn observe(&self, seconds_ago: u32) -> Result<(i64, u128), OracleError> {
        observe_single(
            &self.store,
            self.time,
            seconds_ago,
            self.tick,
            self.index,
            self.liquidity,
            self.cardinality,
        )
    }

    /// Timestamp of the oldest observation still in the ring
    pub fn oldest_timestamp(&self) -> u64 {
        self.store
            .slots
            .values()
            .filter(|observation| observation.initialized)
            .map(|observation| observation.block_timestamp)
            .min()
            .unwrap()
    }
}
