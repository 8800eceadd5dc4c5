//! Gridrect WASM - WebAssembly bindings for Gridrect
//!
//! This crate provides WASM bindings to expose the gridrect-core
//! perspective-rectification functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (PNG/JPEG/BMP/GIF, EXIF orientation)
//! - `rectify` - Corner ordering, grid overlay and the rectification warp
//! - `encode` - Image encoding bindings (PNG and JPEG export)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, rectify_image, encode_png_from_image } from '@gridrect/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//!
//! // Four corner clicks, any order, as a flat Float64Array
//! const coords = new Float64Array([700, 80, 90, 110, 110, 520, 680, 500]);
//! const rectified = rectify_image(image, coords, 4, 4, 0);
//! const png = encode_png_from_image(rectified);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod rectify;
mod types;

// Re-export public types
pub use decode::{decode_image, decode_image_raw, get_orientation};
pub use encode::{
    encode_bmp, encode_bmp_from_image, encode_jpeg, encode_jpeg_from_image, encode_png,
    encode_png_from_image,
};
pub use rectify::{grid_points, order_corners, rectify_image};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&format!("gridrect-wasm {} loaded", version()).into());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
