//! Converts an image into per-chip row bytes.

use embedded_graphics::{
    geometry::{OriginDimensions, Point},
    image::GetPixel,
};

use crate::matrix::chain::{COLUMNS, ChainLength, MAX_CHIPS, ROWS};

/// Row bytes for every chip, ready to be written with `set_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    chain: ChainLength,
    rows: [[u8; MAX_CHIPS as usize]; ROWS as usize],
}

impl Raster {
    pub fn chain(&self) -> ChainLength {
        self.chain
    }

    /// Column pattern for `(chip, row)`, bit 7 leftmost.
    pub fn byte(&self, chip: u8, row: u8) -> Option<u8> {
        if !self.chain.contains(chip) {
            return None;
        }
        self.rows
            .get(usize::from(row))
            .and_then(|r| r.get(usize::from(chip)))
            .copied()
    }
}

/// Resamples `image` to `8 * chain` columns by 8 rows and thresholds it.
///
/// A destination cell is lit iff the nearest source pixel equals `foreground`.
/// Pixels the source cannot provide count as unlit.
pub fn rasterize<I>(image: &I, foreground: I::Color, chain: ChainLength) -> Raster
where
    I: GetPixel + OriginDimensions,
{
    let src = image.size();
    let dst_w = chain.width();
    let dst_h = u32::from(ROWS);
    let mut rows = [[0u8; MAX_CHIPS as usize]; ROWS as usize];

    for (row, chips) in (0..ROWS).zip(rows.iter_mut()) {
        let sy = sample(u32::from(row), dst_h, src.height);
        for (chip, byte) in (0..chain.get()).zip(chips.iter_mut()) {
            for col in 0..COLUMNS {
                let x = u32::from(chip) * u32::from(COLUMNS) + u32::from(col);
                let sx = sample(x, dst_w, src.width);
                let lit = match (i32::try_from(sx), i32::try_from(sy)) {
                    (Ok(px), Ok(py)) => image.pixel(Point::new(px, py)) == Some(foreground),
                    _ => false,
                };
                if lit {
                    *byte |= 0x80 >> col;
                }
            }
        }
    }

    Raster { chain, rows }
}

/// Nearest source coordinate for the centre of destination cell `dst`.
fn sample(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    if dst_len == 0 {
        return 0;
    }
    let scaled = (2 * u64::from(dst) + 1) * u64::from(src_len) / (2 * u64::from(dst_len));
    // scaled < src_len <= u32::MAX
    scaled as u32
}
