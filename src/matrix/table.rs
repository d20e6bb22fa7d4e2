use bitmaps::Bitmap;

use crate::matrix::chain::{ChainLength, MAX_CHIPS, ROWS};

const CAPACITY: usize = MAX_CHIPS as usize * ROWS as usize;

/// Mirror of every chip's digit registers.
///
/// Byte `chip * 8 + row` holds the column pattern last written to that row.
/// Callers validate coordinates before touching the table; it performs no
/// range checks of its own.
///
/// Rows whose last transmission failed are tracked as stale so they can be
/// retransmitted later.
pub(crate) struct ShadowTable {
    bytes: [u8; CAPACITY],
    len: usize,
    stale: Bitmap<CAPACITY>,
}

impl ShadowTable {
    pub(crate) fn new(chain: ChainLength) -> Self {
        Self {
            bytes: [0; CAPACITY],
            len: chain.shadow_len(),
            stale: Bitmap::new(),
        }
    }

    #[inline]
    fn index(chip: u8, row: u8) -> usize {
        usize::from(chip) * usize::from(ROWS) + usize::from(row)
    }

    pub(crate) fn get(&self, chip: u8, row: u8) -> u8 {
        self.bytes[Self::index(chip, row)]
    }

    pub(crate) fn set(&mut self, chip: u8, row: u8, value: u8) {
        self.bytes[Self::index(chip, row)] = value;
    }

    /// Zeroes every row of every chip.
    pub(crate) fn clear(&mut self) {
        self.bytes[..self.len].fill(0);
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn mark_stale(&mut self, chip: u8, row: u8, stale: bool) {
        self.stale.set(Self::index(chip, row), stale);
    }

    /// Marks every row of the chain stale.
    pub(crate) fn mark_all_stale(&mut self) {
        self.stale = Bitmap::mask(self.len);
    }

    pub(crate) fn is_stale(&self, chip: u8, row: u8) -> bool {
        self.stale.get(Self::index(chip, row))
    }

    pub(crate) fn any_stale(&self) -> bool {
        !self.stale.is_empty()
    }

    /// First stale `(chip, row)` at or after position `from`.
    pub(crate) fn next_stale(&self, from: usize) -> Option<(u8, u8)> {
        if from >= self.len {
            return None;
        }
        let idx = if from == 0 {
            self.stale.first_index()
        } else if self.stale.get(from) {
            Some(from)
        } else {
            self.stale.next_index(from)
        }?;
        let rows = usize::from(ROWS);
        // idx < 64, both halves fit in u8
        Some(((idx / rows) as u8, (idx % rows) as u8))
    }
}
