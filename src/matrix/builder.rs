use core::marker::PhantomData;

use embedded_hal::spi::SpiDevice;

use crate::matrix::{
    MatrixError,
    chain::ChainLength,
    driver::LedMatrix,
};

// Builder states
pub struct NeedChainLength;
pub struct Ready;

/// Typestate builder for [`LedMatrix`].
///
/// ```
/// # use core::convert::Infallible;
/// # use embedded_hal::spi::{ErrorType, Operation, SpiDevice};
/// # struct Bus;
/// # impl ErrorType for Bus { type Error = Infallible; }
/// # impl SpiDevice for Bus {
/// #     fn transaction(&mut self, _ops: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
/// #         Ok(())
/// #     }
/// # }
/// use max72xx_chain::prelude::*;
///
/// let matrix = LedMatrixBuilder::new(Bus)
///     .chain_length(4) // Chips on the bus, 1..=8
///     .intensity(0x03) // Brightness applied to every chip
///     .power_on() // Leave shutdown once initialized
///     .build()
///     .unwrap();
/// assert_eq!(matrix.chain().get(), 4);
/// ```
pub struct LedMatrixBuilder<SPI, State> {
    spi: SPI,
    chain: ChainLength,
    intensity: Option<u8>,
    power_on: bool,
    _state: PhantomData<State>,
}

// Start the builder
impl<SPI> LedMatrixBuilder<SPI, NeedChainLength> {
    pub fn new(spi: SPI) -> Self {
        LedMatrixBuilder {
            spi,
            chain: ChainLength::MAX,
            intensity: None,
            power_on: false,
            _state: PhantomData,
        }
    }

    /// Set the number of chained chips.
    ///
    /// Values outside `1..=8` select the maximum chain of 8.
    pub fn chain_length(self, chips: usize) -> LedMatrixBuilder<SPI, Ready> {
        LedMatrixBuilder {
            spi: self.spi,
            chain: ChainLength::new(chips),
            intensity: None,
            power_on: false,
            _state: PhantomData,
        }
    }

    /// Use the longest supported chain.
    pub fn max_chain(self) -> LedMatrixBuilder<SPI, Ready> {
        self.chain_length(usize::from(ChainLength::MAX.get()))
    }
}

impl<SPI> LedMatrixBuilder<SPI, Ready>
where
    SPI: SpiDevice,
{
    /// Brightness written to every chip after initialization, `0x0..=0xF`.
    ///
    /// Out-of-range levels are skipped and the chips keep their power-on brightness.
    pub fn intensity(mut self, level: u8) -> Self {
        self.intensity = Some(level);
        self
    }

    /// Take every chip out of shutdown after initialization.
    pub fn power_on(mut self) -> Self {
        self.power_on = true;
        self
    }

    /// Initializes the chain and returns the driver.
    ///
    /// Sends, per chip, the display-test release, a full scan limit and eight
    /// blank rows; then the configured intensity and power state chain-wide.
    pub fn build(self) -> Result<LedMatrix<SPI>, MatrixError<SPI::Error>> {
        let mut matrix = LedMatrix::uninit(self.spi, self.chain);
        matrix.init()?;

        if let Some(level) = self.intensity {
            matrix.set_intensity_all(level)?;
        }
        if self.power_on {
            matrix.set_power_all(true)?;
        }

        Ok(matrix)
    }
}
