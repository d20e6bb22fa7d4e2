#[macro_use]
mod fmt;

pub mod builder;
pub mod canvas;
pub mod chain;
pub mod driver;
pub mod error;
pub mod frame;
pub mod helpers;
mod macros;
pub mod raster;
pub mod register;
pub mod shared;
pub(crate) mod table;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::LedMatrixBuilder;
pub use canvas::Canvas;
pub use chain::{COLUMNS, ChainLength, MAX_CHIPS, ROWS};
pub use driver::LedMatrix;
pub use error::MatrixError;
pub use frame::{Frame, MAX_FRAME_LEN};
pub use raster::{Raster, rasterize};
pub use register::{MAX_INTENSITY, MAX_SCAN_LIMIT, Register};
pub use shared::SharedMatrix;
pub use types::Update;

pub mod prelude {
    pub use super::{
        COLUMNS, Canvas, ChainLength, Frame, LedMatrix, LedMatrixBuilder, MAX_CHIPS,
        MAX_INTENSITY, MAX_SCAN_LIMIT, MatrixError, ROWS, Raster, Register, SharedMatrix, Update,
    };
}
