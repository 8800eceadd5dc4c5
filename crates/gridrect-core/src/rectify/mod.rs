//! Perspective rectification: warping the clicked quadrilateral into an
//! upright rectangle.
//!
//! The transform is solved from the destination rectangle corners to the
//! source corners, so the per-pixel loop applies it directly (inverse
//! mapping) without inverting a matrix. It is recomputed from scratch on
//! every call - the solve is a single 8x8 system, so there is nothing worth
//! caching between point drags.
//!
//! # Output sizing
//!
//! The destination cell edge is derived from the source quadrilateral: the
//! longest of the two horizontal edges divided by the column count, and the
//! longest of the two vertical edges divided by the row count. The raster is
//! that cell size re-multiplied, so it is an exact grid multiple and an
//! already-axis-aligned quadrilateral rectifies to a straight crop.

mod sample;

pub use sample::SampleFilter;

use log::debug;
use thiserror::Error;

use crate::corners::OrderedCorners;
use crate::decode::DecodedImage;
use crate::homography::{Homography, HomographyError};
use crate::{GridSpec, Point};

/// Errors from rectification input validation and the transform solve.
#[derive(Debug, Error, PartialEq)]
pub enum RectifyError {
    /// Grid rows or columns below 1.
    #[error("grid must have at least 1 row and 1 column, got {rows}x{cols}")]
    InvalidGrid { rows: u32, cols: u32 },

    /// A corner point lies outside the source image.
    #[error("corner ({x}, {y}) lies outside the {width}x{height} image")]
    PointOutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    /// The source image has no pixels.
    #[error("source image is empty")]
    EmptyImage,

    /// The corner geometry admits no perspective transform.
    #[error(transparent)]
    Homography(#[from] HomographyError),
}

/// Warp the quadrilateral spanned by `corners` into an upright rectangle.
///
/// Pure function of its inputs: identical arguments produce an identical
/// raster. Destination pixels that map outside the source image are black.
///
/// # Errors
///
/// - `RectifyError::InvalidGrid` if `grid` has zero rows or columns
/// - `RectifyError::PointOutOfBounds` if a corner falls outside the image
///   (a point exactly on the edge is valid)
/// - `RectifyError::EmptyImage` for a zero-sized source
/// - `RectifyError::Homography` when the corners are collinear or duplicate
pub fn rectify(
    image: &DecodedImage,
    corners: &OrderedCorners,
    grid: GridSpec,
    filter: SampleFilter,
) -> Result<DecodedImage, RectifyError> {
    if !grid.is_valid() {
        return Err(RectifyError::InvalidGrid {
            rows: grid.rows,
            cols: grid.cols,
        });
    }
    if image.is_empty() {
        return Err(RectifyError::EmptyImage);
    }
    for p in corners.as_array() {
        if p.x < 0.0 || p.y < 0.0 || p.x > image.width as f64 || p.y > image.height as f64 {
            return Err(RectifyError::PointOutOfBounds {
                x: p.x,
                y: p.y,
                width: image.width,
                height: image.height,
            });
        }
    }

    let (dst_w, dst_h) = output_size(corners, grid);

    // Destination rectangle corners in TL, TR, BR, BL order
    let dst_corners = [
        Point::new(0.0, 0.0),
        Point::new(dst_w as f64, 0.0),
        Point::new(dst_w as f64, dst_h as f64),
        Point::new(0.0, dst_h as f64),
    ];
    let src_corners = corners.as_array();
    let h = Homography::from_correspondences(&dst_corners, &src_corners)?;

    debug!(
        "rectifying {}x{} quad region into {}x{} raster ({}x{} grid)",
        image.width, image.height, dst_w, dst_h, grid.rows, grid.cols
    );

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];
    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src = h.project(Point::new(dst_x as f64, dst_y as f64));
            let pixel = sample::sample(image, src.x, src.y, filter);

            let idx = ((dst_y * dst_w + dst_x) * 3) as usize;
            output[idx..idx + 3].copy_from_slice(&pixel);
        }
    }

    Ok(DecodedImage::new(dst_w, dst_h, output))
}

/// Destination raster size derived from the source edges and grid density.
fn output_size(corners: &OrderedCorners, grid: GridSpec) -> (u32, u32) {
    let tl = corners.top_left();
    let tr = corners.top_right();
    let br = corners.bottom_right();
    let bl = corners.bottom_left();

    let top = tl.distance_to(tr);
    let bottom = bl.distance_to(br);
    let left = tl.distance_to(bl);
    let right = tr.distance_to(br);

    let cell_w = top.max(bottom) / grid.cols as f64;
    let cell_h = left.max(right) / grid.rows as f64;

    let w = (cell_w * grid.cols as f64).round().max(1.0) as u32;
    let h = (cell_h * grid.rows as f64).round().max(1.0) as u32;
    (w, h)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
