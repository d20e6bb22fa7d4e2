use embedded_graphics::{geometry::OriginDimensions, image::GetPixel};
use embedded_hal::spi::SpiDevice;

use crate::matrix::{
    MatrixError, Update,
    builder::LedMatrixBuilder,
    chain::{COLUMNS, ChainLength, ROWS},
    frame::Frame,
    helpers::{column_mask, shadow_index},
    macros::impl_chain_wide,
    raster::rasterize,
    register::{MAX_INTENSITY, MAX_SCAN_LIMIT, Register},
    table::ShadowTable,
};

/// Driver for a daisy chain of MAX7219/MAX7221 8x8 matrices on one SPI device.
///
/// Every mutating operation updates the shadow buffer and then writes one
/// frame per affected chip row. Nothing is batched or queued; each call
/// returns once its writes have completed.
///
/// Chip `0` is the chip furthest from the bus master. Chips, rows and
/// columns outside the chain yield [`Update::Skipped`] without touching the
/// shadow buffer or the bus.
pub struct LedMatrix<SPI> {
    spi: SPI,
    chain: ChainLength,
    table: ShadowTable,
}

impl<SPI> core::fmt::Debug for LedMatrix<SPI> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LedMatrix")
            .field("chain", &self.chain)
            .field("shadow", &self.table.as_bytes())
            .finish_non_exhaustive()
    }
}

impl<SPI> LedMatrix<SPI> {
    /// Number of chips this driver addresses.
    pub fn chain(&self) -> ChainLength {
        self.chain
    }

    /// Last pattern written to `(chip, row)`, or `None` if out of range.
    pub fn row(&self, chip: u8, row: u8) -> Option<u8> {
        shadow_index(self.chain, chip, row)?;
        Some(self.table.get(chip, row))
    }

    /// Whether the cell at `(chip, row, col)` is lit in the shadow buffer.
    pub fn cell(&self, chip: u8, row: u8, col: u8) -> Option<bool> {
        let mask = column_mask(col)?;
        self.row(chip, row).map(|byte| byte & mask != 0)
    }

    /// The whole shadow buffer, `chip * 8 + row` ordered.
    pub fn shadow(&self) -> &[u8] {
        self.table.as_bytes()
    }

    /// Returns true if the last write to `(chip, row)` failed on the bus.
    pub fn is_stale(&self, chip: u8, row: u8) -> bool {
        shadow_index(self.chain, chip, row).is_some() && self.table.is_stale(chip, row)
    }

    /// Returns true if any row's last write failed on the bus.
    pub fn any_stale(&self) -> bool {
        self.table.any_stale()
    }

    /// Gives the SPI device back, dropping the shadow state.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> LedMatrix<SPI>
where
    SPI: SpiDevice,
{
    /// Takes ownership of `spi` and initializes a chain of `chips` chips.
    ///
    /// Chip counts outside `1..=8` become 8. The display is left shut down;
    /// see [`LedMatrixBuilder`] for intensity and power-on at construction.
    pub fn new(spi: SPI, chips: usize) -> Result<Self, MatrixError<SPI::Error>> {
        LedMatrixBuilder::new(spi).chain_length(chips).build()
    }

    pub(crate) fn uninit(spi: SPI, chain: ChainLength) -> Self {
        Self {
            spi,
            chain,
            table: ShadowTable::new(chain),
        }
    }

    /// Per chip: leave display-test mode, scan all rows, blank every row.
    pub(crate) fn init(&mut self) -> Result<(), MatrixError<SPI::Error>> {
        debug!("initializing chain of {} chips", self.chain.get());
        for chip in 0..self.chain.get() {
            self.set_display_test(chip, false)?;
            self.set_scan_limit(chip, MAX_SCAN_LIMIT)?;
            self.clear(chip)?;
        }
        Ok(())
    }

    /// Switches `chip` between normal operation and shutdown.
    ///
    /// Writes `0x01` to the shutdown register when `on`, `0x00` otherwise.
    /// Register contents survive shutdown.
    pub fn set_power(&mut self, chip: u8, on: bool) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) {
            return Ok(self.skip("set_power", chip));
        }
        self.transmit(chip, Register::Shutdown, u8::from(on))?;
        Ok(Update::Sent)
    }

    /// Enables or disables display-test mode (all LEDs lit) on `chip`.
    pub fn set_display_test(
        &mut self,
        chip: u8,
        on: bool,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) {
            return Ok(self.skip("set_display_test", chip));
        }
        self.transmit(chip, Register::DisplayTest, u8::from(on))?;
        Ok(Update::Sent)
    }

    /// Sets how many rows `chip` scans: `limit + 1` rows, `limit` in `0..=7`.
    ///
    /// Values above 7 are skipped, not clamped.
    pub fn set_scan_limit(
        &mut self,
        chip: u8,
        limit: u8,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) || limit > MAX_SCAN_LIMIT {
            return Ok(self.skip("set_scan_limit", chip));
        }
        self.transmit(chip, Register::ScanLimit, limit)?;
        Ok(Update::Sent)
    }

    /// Sets the brightness of `chip`, `level` in `0x0..=0xF`.
    ///
    /// Values above `0xF` are skipped, not clamped.
    pub fn set_intensity(
        &mut self,
        chip: u8,
        level: u8,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) || level > MAX_INTENSITY {
            return Ok(self.skip("set_intensity", chip));
        }
        self.transmit(chip, Register::Intensity, level)?;
        Ok(Update::Sent)
    }

    /// Turns off every LED of `chip`, one row per transaction.
    pub fn clear(&mut self, chip: u8) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) {
            return Ok(self.skip("clear", chip));
        }
        for row in 0..ROWS {
            self.write_row(chip, row, 0)?;
        }
        Ok(Update::Sent)
    }

    /// Lights or darkens a single LED, leaving the rest of its row as is.
    pub fn set_cell(
        &mut self,
        chip: u8,
        row: u8,
        col: u8,
        lit: bool,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        let (Some(_), Some(mask)) = (shadow_index(self.chain, chip, row), column_mask(col)) else {
            return Ok(self.skip("set_cell", chip));
        };
        let current = self.table.get(chip, row);
        let value = if lit { current | mask } else { current & !mask };
        self.write_row(chip, row, value)?;
        Ok(Update::Sent)
    }

    /// Replaces a whole row of `chip`; bit 7 of `value` is the leftmost column.
    pub fn set_row(
        &mut self,
        chip: u8,
        row: u8,
        value: u8,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        if shadow_index(self.chain, chip, row).is_none() {
            return Ok(self.skip("set_row", chip));
        }
        self.write_row(chip, row, value)?;
        Ok(Update::Sent)
    }

    /// Replaces a whole column of `chip`; bit 7 of `value` is row 0.
    ///
    /// Costs one transaction per row.
    pub fn set_column(
        &mut self,
        chip: u8,
        col: u8,
        value: u8,
    ) -> Result<Update, MatrixError<SPI::Error>> {
        if !self.chain.contains(chip) || col >= COLUMNS {
            return Ok(self.skip("set_column", chip));
        }
        for row in 0..ROWS {
            let lit = (value >> (7 - row)) & 0x01 == 0x01;
            self.set_cell(chip, row, col, lit)?;
        }
        Ok(Update::Sent)
    }

    impl_chain_wide! {
        /// [`set_power`](Self::set_power) on every chip.
        set_power(on: bool);
        /// [`set_display_test`](Self::set_display_test) on every chip.
        set_display_test(on: bool);
        /// [`set_scan_limit`](Self::set_scan_limit) on every chip.
        set_scan_limit(limit: u8);
        /// [`set_intensity`](Self::set_intensity) on every chip.
        set_intensity(level: u8);
        /// [`set_row`](Self::set_row) with the same pattern on every chip.
        set_row(row: u8, value: u8);
        /// [`set_column`](Self::set_column) with the same pattern on every chip.
        set_column(col: u8, value: u8);
    }

    /// [`clear`](Self::clear) on every chip.
    ///
    /// The shadow buffer is zeroed first and every row stays stale until its
    /// frame goes out, so after a bus error [`resync`](Self::resync) finishes
    /// the clear.
    pub fn clear_all(&mut self) -> Result<Update, MatrixError<SPI::Error>> {
        self.table.clear();
        self.table.mark_all_stale();
        for chip in 0..self.chain.get() {
            for row in 0..ROWS {
                self.write_row(chip, row, 0)?;
            }
        }
        Ok(Update::Sent)
    }

    /// Shows `image` across the whole chain.
    ///
    /// The image is resampled to `8 * chain` by 8 cells; a cell is lit iff its
    /// pixel equals `foreground`. Writes every row of every chip.
    pub fn draw<I>(
        &mut self,
        image: &I,
        foreground: I::Color,
    ) -> Result<Update, MatrixError<SPI::Error>>
    where
        I: GetPixel + OriginDimensions,
    {
        let raster = rasterize(image, foreground, self.chain);
        trace!("drawing {}x{} image", image.size().width, image.size().height);

        let mut update = Update::Sent;
        for row in 0..ROWS {
            for chip in 0..self.chain.get() {
                let value = raster.byte(chip, row).unwrap_or_default();
                update = update.and(self.set_row(chip, row, value)?);
            }
        }
        Ok(update)
    }

    /// Retransmits every row whose last write failed.
    ///
    /// Stops at the first bus error; rows not yet retried stay stale.
    pub fn resync(&mut self) -> Result<Update, MatrixError<SPI::Error>> {
        let mut from = 0;
        while let Some((chip, row)) = self.table.next_stale(from) {
            trace!("resync chip {} row {}", chip, row);
            let value = self.table.get(chip, row);
            self.write_row(chip, row, value)?;
            from = usize::from(chip) * usize::from(ROWS) + usize::from(row) + 1;
        }
        Ok(Update::Sent)
    }

    /// Stores `value` in the shadow buffer, then sends it to the row's digit
    /// register. `(chip, row)` must already be validated.
    fn write_row(&mut self, chip: u8, row: u8, value: u8) -> Result<(), MatrixError<SPI::Error>> {
        let Some(register) = Register::digit(row) else {
            return Ok(());
        };
        self.table.set(chip, row, value);
        match self.transmit(chip, register, value) {
            Ok(()) => {
                self.table.mark_stale(chip, row, false);
                Ok(())
            }
            Err(e) => {
                self.table.mark_stale(chip, row, true);
                Err(e)
            }
        }
    }

    fn transmit(
        &mut self,
        chip: u8,
        register: Register,
        data: u8,
    ) -> Result<(), MatrixError<SPI::Error>> {
        let frame = Frame::encode(self.chain, chip, register, data);
        self.spi.write(frame.as_bytes()).map_err(|e| {
            warn!("bus write failed: chip {} register {}", chip, register);
            MatrixError::Bus(e)
        })
    }

    fn skip(&self, op: &'static str, chip: u8) -> Update {
        debug!("{} skipped: chip {} or argument out of range", op, chip);
        Update::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::test_support::{MockSpi, init_frames, test_matrix};
    use embedded_graphics::{image::ImageRaw, pixelcolor::BinaryColor};

    const OP_DIGIT0: u8 = 0x01;

    #[test]
    fn init_sends_test_scan_and_clear_per_chip() {
        let matrix = LedMatrix::new(MockSpi::new(), 2).unwrap();
        let spi = matrix.release();

        assert_eq!(spi.frames().len(), 2 * 10);
        assert_eq!(spi.frames().len(), init_frames(2));
        // chip 0 sits last on the wire
        assert_eq!(spi.frame(0), &[0x00, 0x00, 0x0F, 0x00]);
        assert_eq!(spi.frame(1), &[0x00, 0x00, 0x0B, 0x07]);
        for row in 0..8u8 {
            assert_eq!(spi.frame(2 + usize::from(row)), &[0x00, 0x00, OP_DIGIT0 + row, 0x00]);
        }
        // then chip 1, first on the wire
        assert_eq!(spi.frame(10), &[0x0F, 0x00, 0x00, 0x00]);
        assert_eq!(spi.frame(11), &[0x0B, 0x07, 0x00, 0x00]);
    }

    #[test]
    fn init_leaves_shadow_zeroed() {
        let matrix = test_matrix(3);
        assert_eq!(matrix.shadow(), &[0u8; 24]);
        assert!(!matrix.any_stale());
    }

    #[test]
    fn out_of_range_chain_request_uses_eight_chips() {
        let matrix = test_matrix(0);
        assert_eq!(matrix.chain(), ChainLength::MAX);
        assert_eq!(matrix.shadow().len(), 64);
    }

    #[test]
    fn single_cell_on_single_chip() {
        let mut matrix = test_matrix(1);
        matrix.clear(0).unwrap();
        matrix.spi.reset();

        assert_eq!(matrix.set_cell(0, 0, 0, true).unwrap(), Update::Sent);

        assert_eq!(matrix.row(0, 0), Some(0x80));
        assert_eq!(matrix.spi.frames().len(), 1);
        assert_eq!(matrix.spi.frame(0), &[OP_DIGIT0, 0x80]);
    }

    #[test]
    fn set_row_on_far_chip_of_two() {
        let mut matrix = test_matrix(2);
        matrix.spi.reset();

        matrix.set_row(1, 3, 0x0F).unwrap();

        assert_eq!(matrix.spi.frames().len(), 1);
        // the highest chip index leads the frame
        assert_eq!(matrix.spi.frame(0), &[OP_DIGIT0 + 3, 0x0F, 0x00, 0x00]);
        assert_eq!(matrix.row(1, 3), Some(0x0F));

        matrix.set_row(0, 3, 0x0F).unwrap();
        assert_eq!(matrix.spi.frame(1), &[0x00, 0x00, OP_DIGIT0 + 3, 0x0F]);
    }

    #[test]
    fn set_cell_round_trip_restores_row() {
        let mut matrix = test_matrix(3);
        for chip in 0..3u8 {
            for row in 0..8u8 {
                for col in 0..8u8 {
                    matrix.spi.reset();
                    let mask = 0x80 >> col;
                    let before = (0x5A ^ row) & !mask;
                    matrix.set_row(chip, row, before).unwrap();

                    matrix.set_cell(chip, row, col, true).unwrap();
                    assert_eq!(matrix.row(chip, row), Some(before | mask));
                    matrix.set_cell(chip, row, col, false).unwrap();
                    assert_eq!(matrix.row(chip, row), Some(before));
                    assert_eq!(matrix.spi.frames().len(), 3);
                }
            }
        }
    }

    #[test]
    fn set_cell_keeps_neighbours() {
        let mut matrix = test_matrix(1);
        matrix.set_row(0, 2, 0b1000_0001).unwrap();
        matrix.set_cell(0, 2, 3, true).unwrap();
        assert_eq!(matrix.row(0, 2), Some(0b1001_0001));
        assert_eq!(matrix.cell(0, 2, 3), Some(true));
        matrix.set_cell(0, 2, 0, false).unwrap();
        assert_eq!(matrix.row(0, 2), Some(0b0001_0001));
    }

    #[test]
    fn set_row_full_reads_back() {
        let mut matrix = test_matrix(4);
        matrix.set_row(2, 6, 0xFF).unwrap();
        assert_eq!(matrix.row(2, 6), Some(0xFF));
    }

    #[test]
    fn set_column_matches_direct_pattern() {
        let mut via_column = test_matrix(2);
        let mut via_rows = test_matrix(2);
        let pattern = 0b1011_0010;
        let col = 5;

        via_column.spi.reset();
        via_column.set_column(1, col, pattern).unwrap();
        assert_eq!(via_column.spi.frames().len(), 8);

        for row in 0..8u8 {
            let bit = (pattern >> (7 - row)) & 1;
            via_rows.set_row(1, row, bit << (7 - col)).unwrap();
        }
        assert_eq!(via_column.shadow(), via_rows.shadow());
    }

    #[test]
    fn clear_zeroes_shadow() {
        let mut matrix = test_matrix(3);
        for chip in 0..3u8 {
            for row in 0..8u8 {
                matrix.set_row(chip, row, 0xFF).unwrap();
            }
        }
        matrix.spi.reset();

        matrix.clear_all().unwrap();

        assert_eq!(matrix.spi.frames().len(), 3 * 8);
        for chip in 0..3u8 {
            for row in 0..8u8 {
                assert_eq!(matrix.row(chip, row), Some(0));
            }
        }
    }

    #[test]
    fn failing_clear_all_leaves_rest_for_resync() {
        let mut matrix = test_matrix(2);
        matrix.set_row_all(2, 0xFF).unwrap();
        matrix.spi.set_failing(true);

        assert!(matrix.clear_all().is_err());

        assert!(matrix.shadow().iter().all(|b| *b == 0));
        for chip in 0..2u8 {
            for row in 0..8u8 {
                assert!(matrix.is_stale(chip, row));
            }
        }

        matrix.spi.set_failing(false);
        matrix.spi.reset();
        matrix.resync().unwrap();
        assert_eq!(matrix.spi.frames().len(), 2 * 8);
        assert_eq!(matrix.spi.frame(2), &[0x00, 0x00, OP_DIGIT0 + 2, 0x00]);
        assert!(!matrix.any_stale());
    }

    #[test]
    fn out_of_range_addressing_is_skipped() {
        let mut matrix = test_matrix(2);
        matrix.set_row(0, 0, 0x3C).unwrap();
        let before = *matrix.shadow().first().unwrap();
        matrix.spi.reset();

        assert_eq!(matrix.set_cell(2, 0, 0, true).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_cell(0, 8, 0, true).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_cell(0, 0, 8, true).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_row(2, 0, 0xFF).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_row(0, 8, 0xFF).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_column(2, 0, 0xFF).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_column(0, 8, 0xFF).unwrap(), Update::Skipped);
        assert_eq!(matrix.clear(2).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_power(2, true).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_intensity(2, 1).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_scan_limit(2, 1).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_display_test(2, true).unwrap(), Update::Skipped);

        assert!(matrix.spi.frames().is_empty());
        assert_eq!(matrix.shadow()[0], before);
        assert!(matrix.shadow()[1..].iter().all(|b| *b == 0));
        assert_eq!(matrix.row(2, 0), None);
        assert_eq!(matrix.cell(0, 0, 8), None);
    }

    #[test]
    fn register_values_are_range_checked() {
        let mut matrix = test_matrix(1);
        matrix.spi.reset();

        assert_eq!(matrix.set_scan_limit(0, 8).unwrap(), Update::Skipped);
        assert_eq!(matrix.set_intensity(0, 0x10).unwrap(), Update::Skipped);
        assert!(matrix.spi.frames().is_empty());

        assert_eq!(matrix.set_scan_limit(0, 0).unwrap(), Update::Sent);
        assert_eq!(matrix.set_intensity(0, 0x0F).unwrap(), Update::Sent);
        assert_eq!(matrix.spi.frame(0), &[0x0B, 0x00]);
        assert_eq!(matrix.spi.frame(1), &[0x0A, 0x0F]);
    }

    #[test]
    fn power_maps_to_shutdown_register() {
        let mut matrix = test_matrix(1);
        matrix.spi.reset();

        matrix.set_power(0, true).unwrap();
        matrix.set_power(0, false).unwrap();

        assert_eq!(matrix.spi.frame(0), &[0x0C, 0x01]);
        assert_eq!(matrix.spi.frame(1), &[0x0C, 0x00]);
    }

    #[test]
    fn chain_wide_ops_send_one_frame_per_chip() {
        let mut matrix = test_matrix(3);
        matrix.spi.reset();

        assert_eq!(matrix.set_intensity_all(0x04).unwrap(), Update::Sent);

        assert_eq!(matrix.spi.frames().len(), 3);
        assert_eq!(matrix.spi.frame(0), &[0x00, 0x00, 0x00, 0x00, 0x0A, 0x04]);
        assert_eq!(matrix.spi.frame(1), &[0x00, 0x00, 0x0A, 0x04, 0x00, 0x00]);
        assert_eq!(matrix.spi.frame(2), &[0x0A, 0x04, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn chain_wide_row_and_column() {
        let mut matrix = test_matrix(2);
        matrix.set_row_all(4, 0xAA).unwrap();
        assert_eq!(matrix.row(0, 4), Some(0xAA));
        assert_eq!(matrix.row(1, 4), Some(0xAA));

        matrix.spi.reset();
        matrix.set_column_all(0, 0xFF).unwrap();
        assert_eq!(matrix.spi.frames().len(), 16);
        for chip in 0..2u8 {
            for row in 0..8u8 {
                assert_eq!(matrix.cell(chip, row, 0), Some(true));
            }
        }
        assert_eq!(matrix.set_row_all(8, 0xFF).unwrap(), Update::Skipped);
    }

    #[test]
    fn draw_writes_every_row_of_every_chip() {
        let mut data = [0u8; 16];
        data[0] = 0xF0; // row 0, left chip
        data[3] = 0x0F; // row 1, right chip
        let image = ImageRaw::<BinaryColor>::new(&data, 16);

        let mut matrix = test_matrix(2);
        matrix.spi.reset();

        assert_eq!(matrix.draw(&image, BinaryColor::On).unwrap(), Update::Sent);

        assert_eq!(matrix.spi.frames().len(), 16);
        assert_eq!(matrix.row(0, 0), Some(0xF0));
        assert_eq!(matrix.row(1, 0), Some(0x00));
        assert_eq!(matrix.row(0, 1), Some(0x00));
        assert_eq!(matrix.row(1, 1), Some(0x0F));
        // row-major, chip 0 first
        assert_eq!(matrix.spi.frame(0), &[0x00, 0x00, OP_DIGIT0, 0xF0]);
        assert_eq!(matrix.spi.frame(1), &[OP_DIGIT0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn bus_failure_propagates_and_marks_row_stale() {
        let mut matrix = test_matrix(2);
        matrix.spi.set_failing(true);

        let err = matrix.set_cell(1, 2, 0, true).unwrap_err();
        assert!(matches!(err, MatrixError::Bus(_)));

        // shadow keeps the intended value; the chip may disagree until resync
        assert_eq!(matrix.row(1, 2), Some(0x80));
        assert!(matrix.is_stale(1, 2));
        assert!(matrix.any_stale());

        // further operations still work once the bus recovers
        matrix.spi.set_failing(false);
        matrix.spi.reset();
        matrix.set_row(0, 0, 0x01).unwrap();
        assert!(matrix.is_stale(1, 2));

        matrix.spi.reset();
        assert_eq!(matrix.resync().unwrap(), Update::Sent);
        assert_eq!(matrix.spi.frames().len(), 1);
        assert_eq!(matrix.spi.frame(0), &[OP_DIGIT0 + 2, 0x80, 0x00, 0x00]);
        assert!(!matrix.any_stale());
    }

    #[test]
    fn successful_write_clears_stale_row() {
        let mut matrix = test_matrix(1);
        matrix.spi.set_failing(true);
        assert!(matrix.set_row(0, 5, 0x11).is_err());
        matrix.spi.set_failing(false);

        matrix.set_row(0, 5, 0x22).unwrap();

        assert!(!matrix.is_stale(0, 5));
        assert_eq!(matrix.row(0, 5), Some(0x22));
    }

    #[test]
    fn failing_clear_stops_at_first_row() {
        let mut matrix = test_matrix(1);
        matrix.set_row_all(0, 0xFF).unwrap();
        matrix.set_row_all(1, 0xFF).unwrap();
        matrix.spi.set_failing(true);

        assert!(matrix.clear(0).is_err());

        assert_eq!(matrix.row(0, 0), Some(0x00));
        assert!(matrix.is_stale(0, 0));
        assert_eq!(matrix.row(0, 1), Some(0xFF));
        assert!(!matrix.is_stale(0, 1));
    }

    #[test]
    fn resync_stops_at_first_failure() {
        let mut matrix = test_matrix(1);
        matrix.spi.set_failing(true);
        let _ = matrix.set_row(0, 1, 0x01);
        let _ = matrix.set_row(0, 6, 0x06);

        assert!(matrix.resync().is_err());
        assert!(matrix.is_stale(0, 1));
        assert!(matrix.is_stale(0, 6));

        matrix.spi.set_failing(false);
        matrix.spi.reset();
        matrix.resync().unwrap();
        assert_eq!(matrix.spi.frames().len(), 2);
        assert_eq!(matrix.spi.frame(0), &[OP_DIGIT0 + 1, 0x01]);
        assert_eq!(matrix.spi.frame(1), &[OP_DIGIT0 + 6, 0x06]);
    }

    #[test]
    fn release_returns_bus() {
        let matrix = test_matrix(1);
        let spi = matrix.release();
        assert_eq!(spi.frames().len(), init_frames(1));
    }
}
