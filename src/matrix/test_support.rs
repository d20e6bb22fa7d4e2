//! Test support utilities - only compiled in test builds.

use embedded_hal::spi::{self, ErrorKind, ErrorType, Operation, SpiDevice};
use heapless::Vec;

use crate::matrix::{builder::LedMatrixBuilder, driver::LedMatrix, frame::MAX_FRAME_LEN};

/// Enough for initializing and redrawing a full chain several times over.
const FRAME_CAPACITY: usize = 512;

/// Bus error raised by [`MockSpi`] while failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// SPI device that records every written frame.
#[derive(Debug, Default)]
pub struct MockSpi {
    frames: Vec<Vec<u8, MAX_FRAME_LEN>, FRAME_CAPACITY>,
    failing: bool,
}

impl MockSpi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Vec<u8, MAX_FRAME_LEN>] {
        &self.frames
    }

    pub fn frame(&self, idx: usize) -> &[u8] {
        &self.frames[idx]
    }

    /// Forgets recorded frames.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// While failing, writes return [`MockError`] and are not recorded.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl ErrorType for MockSpi {
    type Error = MockError;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.failing {
            return Err(MockError);
        }
        for op in operations.iter() {
            if let Operation::Write(buf) = op {
                let frame = Vec::from_slice(buf).expect("frame longer than a full chain");
                self.frames.push(frame).expect("mock frame log full");
            }
        }
        Ok(())
    }
}

/// Frames sent while initializing a chain of `chips`.
pub fn init_frames(chips: usize) -> usize {
    // display test + scan limit + 8 rows
    chips * 10
}

/// Helper to create an initialized matrix on a recording bus.
pub fn test_matrix(chips: usize) -> LedMatrix<MockSpi> {
    LedMatrixBuilder::new(MockSpi::new())
        .chain_length(chips)
        .build()
        .unwrap()
}
