/// Outcome of a control-surface operation that did not fail on the bus.
///
/// Out-of-range chips, rows, columns and register values are not errors;
/// the operation is skipped without touching the shadow buffer or the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Update {
    /// Every transaction of the operation was written.
    Sent,
    /// Nothing was done because an argument was out of range.
    Skipped,
}

impl Update {
    /// Returns true if the operation reached the bus.
    #[inline]
    pub fn is_sent(&self) -> bool {
        matches!(self, Update::Sent)
    }

    /// Combines the outcomes of a multi-step operation.
    ///
    /// The result is `Sent` only if both steps were sent.
    #[inline]
    pub fn and(self, other: Update) -> Update {
        match (self, other) {
            (Update::Sent, Update::Sent) => Update::Sent,
            _ => Update::Skipped,
        }
    }
}
