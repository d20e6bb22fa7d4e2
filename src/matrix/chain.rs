/// Largest number of chips a single chain may declare.
pub const MAX_CHIPS: u8 = 8;

/// Rows per chip (one digit register each).
pub const ROWS: u8 = 8;

/// Columns per chip (one bit per column in a row register).
pub const COLUMNS: u8 = 8;

/// Number of chips daisy-chained on the bus.
///
/// Fixed at driver construction. Requests outside `1..=MAX_CHIPS` are
/// replaced by [`MAX_CHIPS`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChainLength(u8);

impl ChainLength {
    /// The longest supported chain.
    pub const MAX: Self = Self(MAX_CHIPS);

    /// Clamps a requested chip count into a valid chain length.
    ///
    /// ```
    /// use max72xx_chain::matrix::ChainLength;
    ///
    /// assert_eq!(ChainLength::new(3).get(), 3);
    /// assert_eq!(ChainLength::new(0).get(), 8);
    /// assert_eq!(ChainLength::new(42).get(), 8);
    /// ```
    pub fn new(requested: usize) -> Self {
        match u8::try_from(requested) {
            Ok(len) if (1..=MAX_CHIPS).contains(&len) => Self(len),
            _ => Self::MAX,
        }
    }

    /// Number of chips in the chain.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true if `chip` addresses a chip in this chain.
    #[inline]
    pub const fn contains(self, chip: u8) -> bool {
        chip < self.0
    }

    /// Bytes in one bus frame: an opcode/data pair per chip.
    #[inline]
    pub const fn frame_len(self) -> usize {
        self.0 as usize * 2
    }

    /// Bytes in the shadow buffer: one per row per chip.
    #[inline]
    pub const fn shadow_len(self) -> usize {
        self.0 as usize * ROWS as usize
    }

    /// Total lit-able columns across the chain.
    #[inline]
    pub const fn width(self) -> u32 {
        self.0 as u32 * COLUMNS as u32
    }
}

impl Default for ChainLength {
    fn default() -> Self {
        Self::MAX
    }
}
