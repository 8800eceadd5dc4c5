//! Image decoding boundary for Gridrect.
//!
//! This module provides functionality for:
//! - Decoding the formats the host load dialog offers (PNG, JPEG, BMP, GIF)
//! - EXIF orientation correction so corner clicks refer to the upright raster
//!
//! All operations are synchronous and single-threaded; the host hands in a
//! byte buffer and gets back RGB pixel data.
//!
//! # Examples
//!
//! ```ignore
//! use gridrect_core::decode::decode_image;
//!
//! let bytes = std::fs::read("graph-paper.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
