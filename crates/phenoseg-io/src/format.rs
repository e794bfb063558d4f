//! Image format detection
//!
//! Formats are detected from magic numbers when reading and from the file
//! extension when writing.

use crate::{IoError, IoResult};
use phenoseg_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
}

/// Detect image format from a file's header bytes
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from the first bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.starts_with(magic::PNG) {
        Ok(ImageFormat::Png)
    } else if data.starts_with(magic::JPEG) {
        Ok(ImageFormat::Jpeg)
    } else {
        Err(IoError::UnsupportedFormat(
            "unrecognized image header".to_string(),
        ))
    }
}

/// Choose an output format from a path's extension (case-insensitive)
pub fn format_from_extension<P: AsRef<Path>>(path: P) -> ImageFormat {
    match path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => ImageFormat::Png,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_bytes() {
        assert_eq!(
            detect_format_from_bytes(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormat::Jpeg
        );
        assert!(detect_format_from_bytes(b"BM").is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("a/b_watershed.jpg"), ImageFormat::Jpeg);
        assert_eq!(format_from_extension("x.JPEG"), ImageFormat::Jpeg);
        assert_eq!(format_from_extension("x.png"), ImageFormat::Png);
        assert_eq!(format_from_extension("noext"), ImageFormat::Unknown);
    }
}
