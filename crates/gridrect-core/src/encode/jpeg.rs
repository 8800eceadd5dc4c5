//! JPEG encoding for export.
//!
//! Uses the `image` crate's JPEG encoder with a configurable quality
//! setting for balancing file size and fidelity.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival
/// * 80-90: Good quality, recommended for most saves
/// * Below 60: Low quality, visible artifacts on grid lines
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid inputs always produce a parseable JPEG container.
        #[test]
        fn prop_encode_valid_jpeg(
            width in 1u32..32,
            height in 1u32..32,
            quality in 1u8..=100,
        ) {
            let pixels = vec![99u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            let len = jpeg.len();
            prop_assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: mismatched buffer lengths never panic, always error.
        #[test]
        fn prop_bad_length_is_error(
            width in 1u32..32,
            height in 1u32..32,
            extra in 1usize..16,
        ) {
            let pixels = vec![0u8; (width * height * 3) as usize + extra];
            let result = encode_jpeg(&pixels, width, height, 90);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "expected InvalidPixelData error, got {:?}",
                result
            );
        }
    }
}
