//! Image decoding WASM bindings.
//!
//! This module exposes the gridrect-core decoding functions to JavaScript,
//! turning a file's bytes into the upright RGB raster the correction UI
//! works on.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG/JPEG/BMP/GIF bytes with EXIF orientation applied
//! - [`decode_image_raw`] - Decode without applying EXIF orientation
//! - [`get_orientation`] - Read the EXIF orientation value from the bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@gridrect/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use gridrect_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// Accepts any of the supported container formats (PNG, JPEG, BMP, GIF) and
/// automatically applies EXIF orientation correction, so corner coordinates
/// clicked on the displayed image line up with the pixel data.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsDecodedImage` containing the decoded RGB pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not one of the supported formats
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image from bytes without applying EXIF orientation.
///
/// Use this when the host applies orientation itself, for example when it
/// renders through a canvas that already honors the EXIF tag.
#[wasm_bindgen]
pub fn decode_image_raw(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image_no_orientation(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation value (1-8) from image bytes.
///
/// Returns 1 (normal orientation) when the bytes carry no EXIF data.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u32 {
    decode::get_orientation(bytes) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_orientation_no_exif() {
        // PNG magic carries no EXIF; defaults to normal
        let bytes = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(get_orientation(&bytes), 1);
    }

    #[test]
    fn test_get_orientation_empty() {
        assert_eq!(get_orientation(&[]), 1);
    }
}
