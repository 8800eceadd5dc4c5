//! Image encoding WASM bindings.
//!
//! This module exposes the gridrect-core encoding functions to JavaScript,
//! enabling the save workflow to write the rectified image as PNG, JPEG or
//! BMP.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGB pixel data to PNG bytes (lossless, the default)
//! - [`encode_jpeg`] - Encode RGB pixel data to JPEG bytes with a quality setting
//! - [`encode_bmp`] - Encode RGB pixel data to BMP bytes (uncompressed)
//! - [`encode_png_from_image`] - Encode a JsDecodedImage to PNG bytes
//! - [`encode_jpeg_from_image`] - Encode a JsDecodedImage to JPEG bytes
//! - [`encode_bmp_from_image`] - Encode a JsDecodedImage to BMP bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_from_image } from '@gridrect/wasm';
//!
//! const rectified = rectify_image(image, corners, 4, 4, 0);
//! const pngBytes = encode_png_from_image(rectified);
//! await writable.write(new Blob([pngBytes], { type: 'image/png' }));
//! ```

use crate::types::JsDecodedImage;
use gridrect_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to PNG bytes.
///
/// PNG is lossless and the recommended save format for grid scans: flat
/// color and sharp lines compress well and pick up no ringing artifacts.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest; recommended: 90)
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to BMP bytes.
///
/// BMP is uncompressed; it remains in the save dialog for downstream tools
/// that only read plain bitmaps.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
#[wasm_bindgen]
pub fn encode_bmp(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_bmp(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to PNG bytes.
///
/// Convenience wrapper for images already held in WASM memory, such as the
/// output of `rectify_image`.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png(&pixels, image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to JPEG bytes.
///
/// See [`encode_jpeg`] for the quality setting.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_jpeg(&pixels, image.width(), image.height(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsDecodedImage to BMP bytes.
#[wasm_bindgen]
pub fn encode_bmp_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_bmp(&pixels, image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
