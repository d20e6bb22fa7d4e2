use heapless::Vec;

use crate::matrix::{
    chain::{ChainLength, MAX_CHIPS},
    helpers::wire_offset,
    register::Register,
};

/// Longest frame the driver ever builds.
pub const MAX_FRAME_LEN: usize = MAX_CHIPS as usize * 2;

/// One bus transaction: an opcode/data pair for every chip in the chain.
///
/// Exactly one pair addresses a real register; every other pair is
/// `NoOp/0x00`, which the receiving chip passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// Builds the frame that writes `data` to `register` on chip `target` only.
    ///
    /// A `target` outside `chain` yields an all-NOP frame.
    ///
    /// ```
    /// use max72xx_chain::matrix::{ChainLength, Frame, Register};
    ///
    /// let frame = Frame::encode(ChainLength::new(2), 1, Register::Digit3, 0x0F);
    /// assert_eq!(frame.as_bytes(), &[0x04, 0x0F, 0x00, 0x00]);
    /// ```
    pub fn encode(chain: ChainLength, target: u8, register: Register, data: u8) -> Self {
        let mut bytes: Vec<u8, MAX_FRAME_LEN> = core::iter::repeat(Register::NoOp.addr())
            .take(chain.frame_len())
            .collect();

        if let Some(pair) = wire_offset(chain, target).and_then(|off| bytes.get_mut(off..off + 2)) {
            pair.copy_from_slice(&[register.addr(), data]);
        }

        Self { bytes }
    }

    /// Bytes in wire order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The `(opcode, data)` pair at wire position `slot` (0 = first on the wire).
    pub fn pair(&self, slot: usize) -> Option<(u8, u8)> {
        let off = slot.checked_mul(2)?;
        match self.bytes.get(off..off + 2)? {
            [opcode, data] => Some((*opcode, *data)),
            _ => None,
        }
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
