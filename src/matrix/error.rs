/// Errors that can occur while driving the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError<E> {
    /// The SPI write for a frame failed.
    Bus(E),
}

impl<E> MatrixError<E> {
    /// Returns the underlying bus error.
    pub fn into_bus(self) -> E {
        match self {
            MatrixError::Bus(e) => e,
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for MatrixError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::Bus(e) => write!(f, "bus write failed: {:?}", e),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for MatrixError<E> {}
