use core::cell::RefCell;

use critical_section::Mutex;

use crate::matrix::driver::LedMatrix;

/// A [`LedMatrix`] that can be reached from several execution contexts.
///
/// The driver itself is single-owner. Wrapping it here serializes every
/// access through a critical section, so a main loop and an interrupt
/// handler can both drive the chain without interleaving frames.
pub struct SharedMatrix<SPI> {
    inner: Mutex<RefCell<LedMatrix<SPI>>>,
}

impl<SPI> core::fmt::Debug for SharedMatrix<SPI> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedMatrix").finish_non_exhaustive()
    }
}

impl<SPI> SharedMatrix<SPI> {
    pub const fn new(matrix: LedMatrix<SPI>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(matrix)),
        }
    }

    /// Runs `f` with exclusive access to the driver inside a critical section.
    ///
    /// # Panics
    /// Panics if called re-entrantly from within `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut LedMatrix<SPI>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Unwraps the driver.
    pub fn into_inner(self) -> LedMatrix<SPI> {
        self.inner.into_inner().into_inner()
    }
}
