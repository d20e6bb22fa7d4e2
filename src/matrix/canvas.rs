use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    image::GetPixel,
    pixelcolor::BinaryColor,
};

use crate::matrix::chain::{ChainLength, ROWS};

/// Off-screen monochrome surface covering the whole chain.
///
/// Render text or shapes with `embedded-graphics`, then push the result in
/// one pass with [`LedMatrix::draw`](crate::matrix::LedMatrix::draw) using
/// `BinaryColor::On` as the foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    chain: ChainLength,
    // bit 63 is column 0
    rows: [u64; ROWS as usize],
}

impl Canvas {
    pub fn new(chain: ChainLength) -> Self {
        Self {
            chain,
            rows: [0; ROWS as usize],
        }
    }

    pub fn chain(&self) -> ChainLength {
        self.chain
    }

    /// Returns true if the cell at `(x, y)` is lit. Out-of-bounds cells are unlit.
    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        self.mask(x, y)
            .is_some_and(|(row, mask)| self.rows[row] & mask != 0)
    }

    fn mask(&self, x: u32, y: u32) -> Option<(usize, u64)> {
        if x >= self.chain.width() || y >= u32::from(ROWS) {
            return None;
        }
        Some((y as usize, 1u64 << (63 - x)))
    }

    fn point_mask(&self, p: Point) -> Option<(usize, u64)> {
        let x = u32::try_from(p.x).ok()?;
        let y = u32::try_from(p.y).ok()?;
        self.mask(x, y)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.chain.width(), u32::from(ROWS))
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((row, mask)) = self.point_mask(point) {
                match color {
                    BinaryColor::On => self.rows[row] |= mask,
                    BinaryColor::Off => self.rows[row] &= !mask,
                }
            }
        }
        Ok(())
    }
}

impl GetPixel for Canvas {
    type Color = BinaryColor;

    fn pixel(&self, p: Point) -> Option<Self::Color> {
        let (row, mask) = self.point_mask(p)?;
        Some(BinaryColor::from(self.rows[row] & mask != 0))
    }
}
