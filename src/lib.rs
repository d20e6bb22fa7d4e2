//! A `no_std`, no-alloc driver for daisy-chained MAX7219/MAX7221 8x8 LED matrices.
//!
//! Up to eight chips share one SPI bus. Each write shifts a frame with one
//! opcode/data pair per chip through the whole chain; only the addressed chip
//! receives a real register write, every other chip receives a no-op.
//!
//! # Features
//!
//! - **Zero heap allocation** - Shadow buffer and frames are fixed-capacity
//! - **Shadow row buffer** - Single-LED updates are read-modify-write against
//!   the last value sent, never against the hardware
//! - **Stale-row tracking** - Rows whose write failed can be resent with `resync`
//! - **Rasterizer** - Any `embedded-graphics` image, or the chain-sized [`Canvas`](matrix::Canvas),
//!   can be pushed to the whole chain
//! - **Chain-wide helpers** - Every single-chip operation has an `_all` variant
//!
//! # Architecture
//!
//! Data flows one way, from the control surface to the bus:
//!
//! ```text
//! ┌────────────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────┐
//! │ LedMatrix          │────▶│ ShadowTable  │────▶│ Frame        │────▶│ SPI     │
//! │ set_cell / set_row │     │ chip*8 + row │     │ NOP..pair..  │     │ write() │
//! │ draw (rasterize)   │     │ stale bitmap │     │ NOP          │     │         │
//! └────────────────────┘     └──────────────┘     └──────────────┘     └─────────┘
//! ```
//!
//! Nothing is ever read back from the chips.
//!
//! # Example
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
//! # struct Bus;
//! # impl ErrorType for Bus { type Error = Infallible; }
//! # impl SpiDevice for Bus {
//! #     fn transaction(&mut self, _ops: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
//! #         Ok(())
//! #     }
//! # }
//! # let spi = Bus;
//! use max72xx_chain::prelude::*;
//!
//! // Two chips; initialization blanks them and leaves them shut down
//! let mut matrix = LedMatrixBuilder::new(spi)
//!     .chain_length(2)
//!     .intensity(0x02)
//!     .power_on()
//!     .build()
//!     .unwrap();
//!
//! // Top-left LED of the chip furthest from the MCU
//! matrix.set_cell(0, 0, 0, true).unwrap();
//!
//! // Bottom row of the nearest chip
//! matrix.set_row(1, 7, 0xFF).unwrap();
//!
//! assert_eq!(matrix.row(0, 0), Some(0x80));
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod matrix;

pub mod prelude {
    pub use crate::matrix::prelude::*;
}
