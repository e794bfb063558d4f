//! Side-by-side composition

use super::access::{get_data, set_data};
use super::Pix;
use crate::error::{Error, Result};

impl Pix {
    /// Join two images of equal height and depth left to right.
    ///
    /// The result has width `self.width() + right.width()` and takes
    /// `spp` from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the heights differ and
    /// [`Error::InvalidParameter`] if the depths differ.
    pub fn concat_horizontal(&self, right: &Pix) -> Result<Pix> {
        if self.height() != right.height() {
            return Err(Error::DimensionMismatch {
                expected: (right.width(), self.height()),
                actual: right.dimensions(),
            });
        }
        if self.depth() != right.depth() {
            return Err(Error::InvalidParameter(format!(
                "cannot concatenate {} bpp with {} bpp",
                self.depth().bits(),
                right.depth().bits()
            )));
        }

        let depth = self.depth();
        let lw = self.width();
        let mut out = Pix::new(lw + right.width(), self.height(), depth)?.to_mut();
        out.set_spp(self.spp());

        for y in 0..self.height() {
            let left_line = self.row_data(y);
            let right_line = right.row_data(y);
            let dst = out.row_data_mut(y);
            for x in 0..lw {
                set_data(dst, x, depth, get_data(left_line, x, depth));
            }
            for x in 0..right.width() {
                set_data(dst, lw + x, depth, get_data(right_line, x, depth));
            }
        }

        Ok(out.into())
    }
}
