//! Masking operations
//!
//! A mask is any image whose nonzero pixels are foreground. Masks may be
//! 1 bpp or 8 bpp; a thresholded 8 bpp image with values 0/255 works the
//! same as a binary one.

use super::access::get_data;
use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Check that this image can act as a mask (1 or 8 bpp).
    pub fn check_mask_depth(&self) -> Result<()> {
        match self.depth() {
            PixelDepth::Bit1 | PixelDepth::Bit8 => Ok(()),
            d => Err(Error::UnsupportedDepth(d.bits())),
        }
    }

    /// Check whether every pixel is zero.
    pub fn is_zero(&self) -> bool {
        self.data().iter().all(|&w| w == 0)
    }
}

impl PixMut {
    /// Set every pixel under the mask's foreground to `val`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask has an unsupported depth or a
    /// different size.
    pub fn set_masked(&mut self, mask: &Pix, val: u32) -> Result<()> {
        self.fill_by_mask(mask, val, true)
    }

    /// Set every pixel under the mask's background to `val`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask has an unsupported depth or a
    /// different size.
    pub fn set_unmasked(&mut self, mask: &Pix, val: u32) -> Result<()> {
        self.fill_by_mask(mask, val, false)
    }

    fn fill_by_mask(&mut self, mask: &Pix, val: u32, foreground: bool) -> Result<()> {
        mask.check_mask_depth()?;
        if (mask.width(), mask.height()) != (self.width(), self.height()) {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: mask.dimensions(),
            });
        }
        let mdepth = mask.depth();
        for y in 0..self.height() {
            let mline = mask.row_data(y);
            for x in 0..self.width() {
                if (get_data(mline, x, mdepth) != 0) == foreground {
                    self.set_pixel_unchecked(x, y, val);
                }
            }
        }
        Ok(())
    }
}
