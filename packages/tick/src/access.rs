// Tick storage access

use crate::types::TickInfo;

/// Storage seam for tick entries and bitmap words.
///
/// The pool contract implements this over persistent storage; read-only
/// quoting implements it with writes discarded, and tests use in-memory maps.
/// Absent ticks read as `TickInfo::default()`, absent words as `0`.
pub trait TickAccess {
    fn read_tick(&self, tick: i32) -> TickInfo;
    fn write_tick(&mut self, tick: i32, info: &TickInfo);
    fn remove_tick(&mut self, tick: i32);
    fn read_bitmap_word(&self, word_pos: i32) -> u128;
    fn write_bitmap_word(&mut self, word_pos: i32, word: u128);
}
