/// Generates `<op>_all` methods that run a single-chip operation on every
/// chip of the chain, one chip at a time.
///
/// Each entry names an existing `op(chip, args..)` method; the generated
/// method takes the same arguments minus `chip`, stops at the first bus
/// error, and reports `Skipped` if any chip skipped.
macro_rules! impl_chain_wide {
    ($(
        $(#[$meta:meta])*
        $op:ident($($arg:ident: $ty:ty),*);
    )*) => {
        paste::paste! {
            $(
                $(#[$meta])*
                pub fn [<$op _all>](
                    &mut self
                    $(, $arg: $ty)*
                ) -> Result<Update, MatrixError<SPI::Error>> {
                    let mut update = Update::Sent;
                    for chip in 0..self.chain.get() {
                        update = update.and(self.$op(chip $(, $arg)*)?);
                    }
                    Ok(update)
                }
            )*
        }
    };
}

pub(super) use impl_chain_wide;
