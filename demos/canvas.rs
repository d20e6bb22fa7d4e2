//! Canvas example: rendering shapes with embedded-graphics
//!
//! This example demonstrates:
//! - Drawing primitives onto a chain-sized `Canvas`
//! - Pushing the canvas to every chip with `draw`
//! - Drawing a raw 1-bit image that needs resampling

use core::convert::Infallible;

use embedded_graphics::{
    image::ImageRaw,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
use max72xx_chain::prelude::*;

/// SPI device that only counts frames.
#[derive(Default)]
struct CountingBus {
    frames: usize,
}

impl ErrorType for CountingBus {
    type Error = Infallible;
}

impl SpiDevice for CountingBus {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        self.frames += operations
            .iter()
            .filter(|op| matches!(op, Operation::Write(_)))
            .count();
        Ok(())
    }
}

/// 4x4 smiley, upscaled to 8x8 per chip by the rasterizer
const SMILEY_4X4: [u8; 4] = [0b1001_0000, 0b0000_0000, 0b1001_0000, 0b0110_0000];

fn print_chain<SPI>(matrix: &LedMatrix<SPI>) {
    let chips = matrix.chain().get();
    for row in 0..ROWS {
        let mut line = String::new();
        for chip in 0..chips {
            for col in 0..COLUMNS {
                let lit = matrix.cell(chip, row, col).unwrap_or(false);
                line.push(if lit { '#' } else { '.' });
            }
            line.push(' ');
        }
        println!("{}", line);
    }
    println!();
}

pub fn main() {
    let chain = ChainLength::new(4);
    let mut matrix = LedMatrixBuilder::new(CountingBus::default())
        .chain_length(usize::from(chain.get()))
        .build()
        .unwrap();

    // ========== Canvas ==========
    let mut canvas = Canvas::new(chain);
    Circle::new(Point::new(1, 1), 6)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut canvas)
        .unwrap();
    Line::new(Point::new(10, 7), Point::new(31, 0))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut canvas)
        .unwrap();

    matrix.draw(&canvas, BinaryColor::On).unwrap();
    print_chain(&matrix);

    // ========== Resampled image ==========
    // A 4x4 source stretched across 32x8
    let image = ImageRaw::<BinaryColor>::new(&SMILEY_4X4, 4);
    matrix.draw(&image, BinaryColor::On).unwrap();
    print_chain(&matrix);

    let bus = matrix.release();
    // init (10 per chip) + two full redraws (8 per chip each)
    assert_eq!(bus.frames, 4 * 10 + 2 * 4 * 8);
    println!("{} frames written", bus.frames);
}
