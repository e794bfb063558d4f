//! phenoseg-io - Image I/O
//!
//! Reading and writing of the raster formats the segmentation step
//! persists:
//!
//! - **PNG** (feature `png-format`) - read and write
//! - **JPEG** (feature `jpeg`) - write only
//!
//! # Examples
//!
//! ```no_run
//! use phenoseg_core::{Pix, PixelDepth};
//! use phenoseg_io::{ImageFormat, write_image};
//!
//! let pix = Pix::new(64, 64, PixelDepth::Bit32).unwrap();
//! write_image(&pix, "/tmp/out.jpg", ImageFormat::Jpeg).unwrap();
//! ```

pub mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_extension};
pub use phenoseg_core::ImageFormat;

use phenoseg_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read an image from a file, detecting its format from the header.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for formats without a reader.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    match detect_format(path)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(BufReader::new(File::open(path)?)),
        other => Err(IoError::UnsupportedFormat(format!(
            "no reader for {:?}",
            other
        ))),
    }
}

/// Write an image to a file in the given format.
///
/// The parent directory must already exist.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => {
            let mut writer = BufWriter::new(File::create(path)?);
            png::write_png(pix, &mut writer)?;
            writer.flush()?;
        }
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => {
            let mut writer = BufWriter::new(File::create(path)?);
            jpeg::write_jpeg(pix, &mut writer, jpeg::DEFAULT_JPEG_QUALITY)?;
            writer.flush()?;
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "no writer for {:?}",
                other
            )));
        }
    }
    Ok(())
}

/// Write an image, choosing the format from the path's extension.
pub fn write_image_auto<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let format = format_from_extension(path.as_ref());
    write_image(pix, path, format)
}
