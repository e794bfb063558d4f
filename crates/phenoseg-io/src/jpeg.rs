//! JPEG image format support
//!
//! Writes 8 bpp grayscale and 32 bpp RGB images with the `jpeg-encoder`
//! crate. Reading JPEG is not supported.

use crate::{IoError, IoResult};
use jpeg_encoder::{ColorType, Encoder};
use phenoseg_core::{Pix, PixelDepth, color};
use std::io::Write;

/// Default JPEG quality (1..=100)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Write a JPEG image.
///
/// # Arguments
/// * `pix` - 8 bpp grayscale or 32 bpp RGB image
/// * `writer` - Destination
/// * `quality` - Encoder quality, clamped to 1..=100
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for other depths and
/// [`IoError::InvalidData`] if a dimension exceeds 65535.
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let (w, h) = pix.dimensions();
    let too_large = || IoError::InvalidData(format!("JPEG dimensions too large: {w}x{h}"));
    let width = u16::try_from(w).map_err(|_| too_large())?;
    let height = u16::try_from(h).map_err(|_| too_large())?;

    let (color_type, data) = match pix.depth() {
        PixelDepth::Bit8 => {
            let mut data = Vec::with_capacity((w * h) as usize);
            for y in 0..h {
                for x in 0..w {
                    data.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
            (ColorType::Luma, data)
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity((w * h * 3) as usize);
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    data.extend_from_slice(&[r, g, b]);
                }
            }
            (ColorType::Rgb, data)
        }
        d => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG output for {} bpp",
                d.bits()
            )));
        }
    };

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
