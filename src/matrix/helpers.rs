//! Index arithmetic shared by the shadow buffer, frame encoder and control surface.
//!
//! These are the only places that translate `(chip, row, col)` coordinates into
//! byte positions, so every range check lives here.

use crate::matrix::chain::{COLUMNS, ChainLength, ROWS};

/// Position of the `(chip, row)` byte in the shadow buffer.
///
/// Returns `None` if `chip` is outside the chain or `row` is past the last row.
///
/// # Arguments
/// * `chain` - Length of the chain
/// * `chip` - Logical chip index, `0` is furthest from the bus master
/// * `row` - Row within the chip
///
/// # Example
/// ```
/// use max72xx_chain::matrix::{ChainLength, helpers::shadow_index};
///
/// let chain = ChainLength::new(2);
/// assert_eq!(shadow_index(chain, 1, 3), Some(11));
/// assert_eq!(shadow_index(chain, 2, 0), None);
/// assert_eq!(shadow_index(chain, 0, 8), None);
/// ```
pub fn shadow_index(chain: ChainLength, chip: u8, row: u8) -> Option<usize> {
    if !chain.contains(chip) || row >= ROWS {
        return None;
    }
    Some(usize::from(chip) * usize::from(ROWS) + usize::from(row))
}

/// Byte offset of `chip`'s opcode/data pair within a frame.
///
/// The chip nearest the bus master is the last logical index and receives
/// the last pair clocked out, so wire order is the reverse of chip order:
/// the pair sits `(len - chip - 1) * 2` bytes from the frame start.
///
/// # Example
/// ```
/// use max72xx_chain::matrix::{ChainLength, helpers::wire_offset};
///
/// let chain = ChainLength::new(4);
/// assert_eq!(wire_offset(chain, 0), Some(6));
/// assert_eq!(wire_offset(chain, 3), Some(0));
/// assert_eq!(wire_offset(chain, 4), None);
/// ```
pub fn wire_offset(chain: ChainLength, chip: u8) -> Option<usize> {
    if !chain.contains(chip) {
        return None;
    }
    Some(usize::from(chain.get() - chip - 1) * 2)
}

/// Bit mask selecting `col` within a row byte (bit 7 is the leftmost column).
///
/// Returns `None` for `col >= 8`.
pub const fn column_mask(col: u8) -> Option<u8> {
    if col >= COLUMNS {
        return None;
    }
    Some(0x80 >> col)
}

#[test]
fn offsets_for_every_chain_length() {
    for len in 1..=8usize {
        let chain = ChainLength::new(len);
        for chip in 0..chain.get() {
            let expected = (len - usize::from(chip) - 1) * 2;
            assert_eq!(wire_offset(chain, chip), Some(expected));
            // distance from the end of the frame is chip * 2
            assert_eq!(chain.frame_len() - expected - 2, usize::from(chip) * 2);
        }
        assert_eq!(wire_offset(chain, chain.get()), None);
    }
}

#[test]
fn column_masks() {
    assert_eq!(column_mask(0), Some(0x80));
    assert_eq!(column_mask(7), Some(0x01));
    assert_eq!(column_mask(8), None);
}

#[test]
fn shadow_index_edge_cases() {
    let chain = ChainLength::new(1);
    assert_eq!(shadow_index(chain, 0, 0), Some(0));
    assert_eq!(shadow_index(chain, 0, 7), Some(7));
    assert_eq!(shadow_index(chain, 1, 0), None);
    assert_eq!(shadow_index(chain, 0, 8), None);
}
