//! Shared example: serializing access with a critical section
//!
//! This example demonstrates:
//! - Wrapping the driver in `SharedMatrix`
//! - Reaching it from several threads without interleaving frames
//! - Recovering from a failed write with `resync`

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;

use embedded_hal::spi::{self, ErrorKind, ErrorType, Operation, SpiDevice};
use max72xx_chain::prelude::*;

#[derive(Debug)]
struct BusDown;

impl spi::Error for BusDown {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// SPI device whose link can be pulled at runtime.
struct FlakyBus {
    down: Arc<AtomicBool>,
}

impl ErrorType for FlakyBus {
    type Error = BusDown;
}

impl SpiDevice for FlakyBus {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), BusDown> {
        if self.down.load(Ordering::SeqCst) {
            return Err(BusDown);
        }
        Ok(())
    }
}

pub fn main() {
    let down = Arc::new(AtomicBool::new(false));
    let matrix = LedMatrixBuilder::new(FlakyBus { down: down.clone() })
        .chain_length(2)
        .power_on()
        .build()
        .unwrap();

    let shared = Arc::new(SharedMatrix::new(matrix));

    // ========== Concurrent writers ==========
    // Each thread owns one chip; the critical section keeps frames whole
    let workers: Vec<_> = (0..2u8)
        .map(|chip| {
            let shared = shared.clone();
            thread::spawn(move || {
                for row in 0..ROWS {
                    shared.with(|m| m.set_row(chip, row, 0x81)).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    // ========== Bus failure ==========
    down.store(true, Ordering::SeqCst);
    let result = shared.with(|m| m.set_cell(1, 4, 3, true));
    println!("write while bus down: {:?}", result);
    assert!(shared.with(|m| m.is_stale(1, 4)));

    // ========== Recovery ==========
    down.store(false, Ordering::SeqCst);
    shared.with(|m| m.resync()).unwrap();
    assert!(!shared.with(|m| m.any_stale()));

    shared.with(|m| println!("shadow after resync: {:02X?}", m.shadow()));
}
