/// Register addresses of the MAX7219/MAX7221.
///
/// The address is the first byte of each opcode/data pair on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Pass-through; a chip receiving this pair keeps its state.
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    /// Data `0x00` shuts the chip down, `0x01` resumes normal operation.
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

/// Highest valid value for [`Register::Intensity`].
pub const MAX_INTENSITY: u8 = 0x0F;

/// Highest valid value for [`Register::ScanLimit`] (all eight rows scanned).
pub const MAX_SCAN_LIMIT: u8 = 7;

impl Register {
    /// Wire address of the register.
    #[inline]
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register driving `row`, or `None` past the last row.
    pub const fn digit(row: u8) -> Option<Self> {
        match row {
            0 => Some(Self::Digit0),
            1 => Some(Self::Digit1),
            2 => Some(Self::Digit2),
            3 => Some(Self::Digit3),
            4 => Some(Self::Digit4),
            5 => Some(Self::Digit5),
            6 => Some(Self::Digit6),
            7 => Some(Self::Digit7),
            _ => None,
        }
    }
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        reg.addr()
    }
}
