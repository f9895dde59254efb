// Observation ring buffer

use primitive_types::U256;

use crate::error::OracleError;
use crate::types::{Observation, ObservationAccess};

/// Fractional bits of the seconds-per-liquidity accumulator.
const SECONDS_PER_LIQ_RESOLUTION: u32 = 64;

/// Extend `last` to `block_timestamp` assuming `tick` and `liquidity` held
/// over the whole elapsed interval.
pub fn transform(last: &Observation, block_timestamp: u64, tick: i32, liquidity: u128) -> Observation {
    let elapsed = block_timestamp.saturating_sub(last.block_timestamp);
    let tick_delta = (tick as i64).wrapping_mul(elapsed as i64);
    let seconds_per_liquidity_delta = ((elapsed as u128) << SECONDS_PER_LIQ_RESOLUTION) / liquidity.max(1);

    Observation {
        block_timestamp,
        tick_cumulative: last.tick_cumulative.wrapping_add(tick_delta),
        seconds_per_liq_cumulative_x64: last
            .seconds_per_liq_cumulative_x64
            .wrapping_add(seconds_per_liquidity_delta),
        initialized: true,
    }
}

/// Write the first observation. Returns `(cardinality, cardinality_next)`.
pub fn initialize<S: ObservationAccess + ?Sized>(store: &mut S, block_timestamp: u64) -> (u32, u32) {
    store.write_observation(
        0,
        &Observation {
            block_timestamp,
            tick_cumulative: 0,
            seconds_per_liq_cumulative_x64: 0,
            initialized: true,
        },
    );
    (1, 1)
}

/// Append an observation for `block_timestamp`.
///
/// At most one observation per timestamp; a second write in the same
/// timestamp is a no-op. When the cursor sits on the last slot and more
/// capacity was reserved, the buffer grows into it before wrapping.
///
/// Returns the new `(index, cardinality)`.
#[allow(clippy::too_many_arguments)]
pub fn write<S: ObservationAccess + ?Sized>(
    store: &mut S,
    index: u32,
    block_timestamp: u64,
    tick: i32,
    liquidity: u128,
    cardinality: u32,
    cardinality_next: u32,
) -> (u32, u32) {
    let last = store.read_observation(index);

    if last.block_timestamp == block_timestamp {
        return (index, cardinality);
    }

    let cardinality_updated = if cardinality_next > cardinality && index == cardinality - 1 {
        cardinality_next
    } else {
        cardinality
    };

    let index_updated = (index + 1) % cardinality_updated;
    store.write_observation(index_updated, &transform(&last, block_timestamp, tick, liquidity));

    (index_updated, cardinality_updated)
}

/// Reserve slots up to `next`. Never shrinks.
///
/// Reserved slots get a non-zero timestamp but stay uninitialized, so they
/// are skipped by searches until the cursor writes them.
pub fn grow<S: ObservationAccess + ?Sized>(
    store: &mut S,
    current: u32,
    next: u32,
) -> Result<u32, OracleError> {
    if current == 0 {
        return Err(OracleError::Uninitialized);
    }
    if next <= current {
        return Ok(current);
    }
    for slot in current..next {
        store.write_observation(
            slot,
            &Observation {
                block_timestamp: 1,
                ..Observation::default()
            },
        );
    }
    Ok(next)
}

/// Bracketing observations for `target`, oldest first.
///
/// The buffer is sorted by time starting just after `index`; uninitialized
/// reserved slots are skipped.
fn binary_search<S: ObservationAccess + ?Sized>(
    store: &S,
    target: u64,
    index: u32,
    cardinality: u32,
) -> Result<(Observation, Observation), OracleError> {
    let cardinality = cardinality as u64;
    let mut left = (index as u64 + 1) % cardinality;
    let mut right = left + cardinality - 1;

    while left <= right {
        let middle = (left + right) / 2;
        let before_or_at = store.read_observation((middle % cardinality) as u32);

        if !before_or_at.initialized {
            left = middle + 1;
            continue;
        }

        let at_or_after = store.read_observation(((middle + 1) % cardinality) as u32);
        let target_at_or_after = before_or_at.block_timestamp <= target;

        if target_at_or_after && target <= at_or_after.block_timestamp {
            return Ok((before_or_at, at_or_after));
        }

        if !target_at_or_after {
            if middle == 0 {
                break;
            }
            right = middle - 1;
        } else {
            left = middle + 1;
        }
    }

    Err(OracleError::OracleTooOld)
}

#[allow(clippy::too_many_arguments)]
fn get_surrounding_observations<S: ObservationAccess + ?Sized>(
    store: &S,
    target: u64,
    tick: i32,
    index: u32,
    liquidity: u128,
    cardinality: u32,
) -> Result<(Observation, Observation), OracleError> {
    let newest = store.read_observation(index);

    if newest.block_timestamp <= target {
        if newest.block_timestamp == target {
            return Ok((newest.clone(), newest));
        }
        let projected = transform(&newest, target, tick, liquidity);
        return Ok((newest, projected));
    }

    let mut oldest = store.read_observation((index + 1) % cardinality);
    if !oldest.initialized {
        oldest = store.read_observation(0);
    }

    if target < oldest.block_timestamp {
        return Err(OracleError::OracleTooOld);
    }

    binary_search(store, target, index, cardinality)
}

/// Cumulative values as of `seconds_ago` before `time`.
///
/// Exact hits return the stored values; times between two observations are
/// linearly interpolated; times after the newest observation are projected
/// with the current tick and liquidity.
///
/// Returns `(tick_cumulative, seconds_per_liq_cumulative_x64)`.
#[allow(clippy::too_many_arguments)]
pub fn observe_single<S: ObservationAccess + ?Sized>(
    store: &S,
    time: u64,
    seconds_ago: u32,
    tick: i32,
    index: u32,
    liquidity: u128,
    cardinality: u32,
) -> Result<(i64, u128), OracleError> {
    if cardinality == 0 {
        return Err(OracleError::Uninitialized);
    }

    if seconds_ago == 0 {
        let mut last = store.read_observation(index);
        if last.block_timestamp != time {
            last = transform(&last, time, tick, liquidity);
        }
        return Ok((last.tick_cumulative, last.seconds_per_liq_cumulative_x64));
    }

    let target = time
        .checked_sub(seconds_ago as u64)
        .ok_or(OracleError::OracleTooOld)?;

    let (before, after) = get_surrounding_observations(store, target, tick, index, liquidity, cardinality)?;

    if target == before.block_timestamp {
        Ok((before.tick_cumulative, before.seconds_per_liq_cumulative_x64))
    } else if target == after.block_timestamp {
        Ok((after.tick_cumulative, after.seconds_per_liq_cumulative_x64))
    } else {
        let observation_delta = after.block_timestamp - before.block_timestamp;
        let target_delta = target - before.block_timestamp;

        let tick_cumulative = before.tick_cumulative.wrapping_add(
            (after.tick_cumulative.wrapping_sub(before.tick_cumulative) / observation_delta as i64)
                .wrapping_mul(target_delta as i64),
        );

        let seconds_per_liquidity_delta = after
            .seconds_per_liq_cumulative_x64
            .wrapping_sub(before.seconds_per_liq_cumulative_x64);
        let interpolated = U256::from(seconds_per_liquidity_delta) * U256::from(target_delta)
            / U256::from(observation_delta);

        Ok((
            tick_cumulative,
            before
                .seconds_per_liq_cumulative_x64
                .wrapping_add(interpolated.low_u128()),
        ))
    }
}
