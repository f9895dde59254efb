// Tick bitmap
//
// One bit per usable tick (tick / spacing), packed into 128-bit words.
// Word position is `compressed >> 7`, bit position `compressed & 127`.

use crate::access::TickAccess;
use crate::error::TickError;

/// Word and bit position of a compressed tick.
#[inline]
pub fn position(compressed: i32) -> (i32, u32) {
    (compressed >> 7, (compressed & 127) as u32)
}

#[inline]
fn compress(tick: i32, tick_spacing: i32) -> i32 {
    // rounds toward negative infinity
    tick.div_euclid(tick_spacing)
}

/// Toggle the bit for `tick`. The tick must be a multiple of the spacing.
pub fn flip_tick<S: TickAccess + ?Sized>(
    ticks: &mut S,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), TickError> {
    if tick_spacing <= 0 {
        return Err(TickError::InvalidTickSpacing);
    }
    if tick % tick_spacing != 0 {
        return Err(TickError::TickNotAligned);
    }
    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let word = ticks.read_bitmap_word(word_pos);
    ticks.write_bitmap_word(word_pos, word ^ (1u128 << bit_pos));
    Ok(())
}

/// Next initialized tick within the same bitmap word as `tick`.
///
/// With `lte` the search covers `tick` itself and everything to its left;
/// otherwise it starts strictly to the right. When no bit is set the word's
/// boundary tick is returned with `false`, so a swap step never spans more
/// than one word. The result can lie outside the valid tick range; callers
/// clamp it.
pub fn next_initialized_tick_within_one_word<S: TickAccess + ?Sized>(
    ticks: &S,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> (i32, bool) {
    let compressed = compress(tick, tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        // bits at or below bit_pos
        let mask = if bit_pos == 127 {
            u128::MAX
        } else {
            (1u128 << (bit_pos + 1)) - 1
        };
        let masked = ticks.read_bitmap_word(word_pos) & mask;

        if masked != 0 {
            let most_significant = 127 - masked.leading_zeros();
            let next = (compressed - (bit_pos - most_significant) as i32) * tick_spacing;
            (next, true)
        } else {
            ((compressed - bit_pos as i32) * tick_spacing, false)
        }
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);
        // bits at or above bit_pos
        let mask = !((1u128 << bit_pos) - 1);
        let masked = ticks.read_bitmap_word(word_pos) & mask;

        if masked != 0 {
            let least_significant = masked.trailing_zeros();
            let next = (compressed + 1 + (least_significant - bit_pos) as i32) * tick_spacing;
            (next, true)
        } else {
            ((compressed + 1 + (127 - bit_pos) as i32) * tick_spacing, false)
        }
    }
}
