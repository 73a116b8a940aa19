//! Natural image size from encoded bytes.
//!
//! Hosts that hold the image file (rather than a rendered `<img>` element)
//! can derive the size the overlay needs without decoding any pixels. Only
//! the header is read. The EXIF orientation is honoured the way browsers
//! honour it when reporting `naturalWidth`/`naturalHeight`: a 90° or 270°
//! rotation swaps the dimensions.

use std::io::Cursor;

use exif::{In, Tag};
use image::{ImageError, ImageReader};
use log::debug;

use crate::error::CropError;
use crate::ImageSize;

/// Read display dimensions from JPEG or PNG bytes.
///
/// # Errors
///
/// Returns `CropError::UnsupportedFormat` if the format is not recognised,
/// `CropError::CorruptedImage` if the header cannot be read, and
/// `CropError::EmptyImage` if the header reports a zero dimension.
pub fn probe_image_size(bytes: &[u8]) -> Result<ImageSize, CropError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropError::CorruptedImage(e.to_string()))?;

    if reader.format().is_none() {
        return Err(CropError::UnsupportedFormat);
    }

    let (width, height) = reader.into_dimensions().map_err(|e| match e {
        ImageError::Unsupported(_) => CropError::UnsupportedFormat,
        other => CropError::CorruptedImage(other.to_string()),
    })?;

    let orientation = exif_orientation(bytes);
    debug!("probed {width}x{height} image, exif orientation {orientation:?}");

    if orientation.is_some_and(is_quarter_turn) {
        ImageSize::new(height, width)
    } else {
        ImageSize::new(width, height)
    }
}

/// Raw EXIF `Orientation` value, if the container carries one.
fn exif_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Orientations 5-8 rotate by 90° or 270°, with or without a mirror.
fn is_quarter_turn(orientation: u32) -> bool {
    (5..=8).contains(&orientation)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal valid JPEG bytes (1x1 pixel, no EXIF)
    const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    /// `MINIMAL_JPEG` with an APP1 Exif segment carrying `Orientation = value`.
    fn jpeg_with_orientation(value: u8) -> Vec<u8> {
        let app1: [u8; 36] = [
            0xFF, 0xE1, 0x00, 0x22, b'E', b'x', b'i', b'f', 0x00, 0x00, // APP1 header
            b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // big-endian TIFF, IFD0 at 8
            0x00, 0x01, // one entry
            0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, value, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let mut bytes = MINIMAL_JPEG[..2].to_vec();
        bytes.extend_from_slice(&app1);
        bytes.extend_from_slice(&MINIMAL_JPEG[2..]);
        bytes
    }

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_probe_jpeg() {
        let size = probe_image_size(MINIMAL_JPEG).unwrap();
        assert_eq!(size, ImageSize::new(1, 1).unwrap());
    }

    #[test]
    fn test_probe_png() {
        let bytes = encode_png(40, 30);
        let size = probe_image_size(&bytes).unwrap();
        assert_eq!(size.width, 40);
        assert_eq!(size.height, 30);
    }

    #[test]
    fn test_probe_unknown_format() {
        assert_eq!(
            probe_image_size(&[0x00, 0x01, 0x02, 0x03]),
            Err(CropError::UnsupportedFormat)
        );
    }

    #[test]
    fn test_probe_empty_bytes() {
        assert!(probe_image_size(&[]).is_err());
    }

    #[test]
    fn test_quarter_turns() {
        assert!(!is_quarter_turn(1));
        assert!(!is_quarter_turn(3));
        assert!(!is_quarter_turn(4));
        assert!(is_quarter_turn(5));
        assert!(is_quarter_turn(6));
        assert!(is_quarter_turn(8));
        assert!(!is_quarter_turn(9));
    }

    #[test]
    fn test_exif_orientation_read() {
        assert_eq!(exif_orientation(&jpeg_with_orientation(6)), Some(6));
        assert_eq!(exif_orientation(MINIMAL_JPEG), None);
        assert_eq!(exif_orientation(&[0x00, 0x01, 0x02]), None);
    }

    #[test]
    fn test_probe_jpeg_with_exif() {
        let size = probe_image_size(&jpeg_with_orientation(8)).unwrap();
        assert_eq!(size, ImageSize::new(1, 1).unwrap());
    }

    #[test]
    fn test_probe_truncated_jpeg() {
        let result = probe_image_size(&MINIMAL_JPEG[0..20]);
        assert!(matches!(result, Err(CropError::CorruptedImage(_))));
    }
}
