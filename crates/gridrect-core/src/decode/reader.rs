//! Multi-format image decoding with EXIF orientation handling.
//!
//! The tool loads the formats the host file dialog offers: PNG, JPEG, BMP
//! and GIF. Phone photos of graph paper usually arrive as JPEGs whose pixel
//! rows are stored rotated, so the EXIF orientation tag is applied before
//! the image reaches the point-picking UI - corner coordinates always refer
//! to the upright raster.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes match no known format,
/// `DecodeError::UnsupportedFormat` for recognized formats outside the
/// PNG/JPEG/BMP/GIF set, and `DecodeError::CorruptedFile` when decoding
/// fails partway.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    // Extract EXIF orientation before decoding discards the metadata
    let orientation = extract_orientation(bytes);

    let img = decode_any(bytes)?;
    let oriented = apply_orientation(img, orientation);

    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Decode an image from bytes without applying EXIF orientation.
///
/// Use this when the caller handles orientation itself or the raster is
/// known to be upright already.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_any(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

fn decode_any(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp | ImageFormat::Gif => {}
        other => {
            return Err(DecodeError::UnsupportedFormat(
                other.extensions_str().first().unwrap_or(&"unknown").to_string(),
            ))
        }
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
