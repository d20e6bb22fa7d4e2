//! Basic example: driving a two-chip chain
//!
//! This example demonstrates:
//! - Building a driver with the typestate builder
//! - Single-LED, row and column updates
//! - How each update becomes one frame on the wire
//! - Reading the shadow buffer back

use core::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use max72xx_chain::prelude::*;

/// Suppresses printing while the chain is being initialized.
static QUIET: AtomicBool = AtomicBool::new(true);

/// Stand-in SPI device that prints every frame instead of clocking it out.
struct PrintBus;

impl ErrorType for PrintBus {
    type Error = Infallible;
}

impl SpiDevice for PrintBus {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        for op in operations.iter() {
            if let Operation::Write(frame) = op {
                if !QUIET.load(Ordering::Relaxed) {
                    println!("  frame {:02X?}", frame);
                }
            }
        }
        Ok(())
    }
}

pub fn main() {
    // Initialization writes 10 frames per chip; keep them out of the output
    let mut matrix = LedMatrixBuilder::new(PrintBus)
        .chain_length(2)
        .intensity(0x04)
        .power_on()
        .build()
        .unwrap();
    QUIET.store(false, Ordering::Relaxed);

    // ========== Single LED ==========
    // Chip 0 is furthest from the MCU, so its pair is last on the wire
    println!("set_cell(0, 0, 0, on)");
    matrix.set_cell(0, 0, 0, true).unwrap();
    assert_eq!(matrix.row(0, 0), Some(0x80));

    // ========== Whole row ==========
    // Chip 1 is nearest the MCU, so its pair is first on the wire
    println!("set_row(1, 3, 0x0F)");
    matrix.set_row(1, 3, 0x0F).unwrap();

    // ========== Whole column ==========
    // Built from single-LED updates: one frame per row
    println!("set_column(0, 7, 0xFF)");
    matrix.set_column(0, 7, 0xFF).unwrap();
    for row in 0..ROWS {
        assert_eq!(matrix.cell(0, row, 7), Some(true));
    }

    // ========== Out of range ==========
    // Nothing is written and the shadow stays untouched
    let update = matrix.set_row(5, 0, 0xFF).unwrap();
    assert_eq!(update, Update::Skipped);
    println!("set_row(5, ..) -> {:?}", update);

    println!("shadow: {:02X?}", matrix.shadow());
}
