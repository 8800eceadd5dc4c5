//! Image encoding boundary for Gridrect.
//!
//! The rectified raster leaves the core as encoded bytes for the host's
//! file writer: PNG for lossless saves (the default), JPEG with a quality
//! setting for smaller files, BMP for tools that only read plain bitmaps.
//!
//! # Examples
//!
//! ```ignore
//! use gridrect_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod bmp;
mod jpeg;
mod png;

pub use bmp::encode_bmp;
pub use jpeg::encode_jpeg;
pub use png::encode_png;

use thiserror::Error;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Shared validation for both encoders.
fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
