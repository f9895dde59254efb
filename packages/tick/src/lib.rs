#![no_std]

pub mod access;
pub mod bitmap;
pub mod error;
pub mod fee_growth;
pub mod types;
pub mod update;

pub use access::TickAccess;
pub use bitmap::{flip_tick, next_initialized_tick_within_one_word, position as bitmap_position};
pub use error::TickError;
pub use fee_growth::{get_fee_growth_inside, wrapping_add, wrapping_sub};
pub use types::TickInfo;
pub use update::{clear_tick, cross_tick, tick_spacing_to_max_liquidity_per_tick, update_tick};
