//! Perspective rectification WASM bindings.
//!
//! This module exposes corner ordering, the grid overlay lattice, and the
//! rectification warp to JavaScript. Corner coordinates cross the boundary
//! as a flat `Float64Array` of 8 values (`[x0, y0, x1, y1, x2, y2, x3, y3]`),
//! in any click order; structured results come back through
//! `serde-wasm-bindgen` as plain JavaScript objects.
//!
//! # Functions
//!
//! - [`order_corners`] - Assign TL/TR/BR/BL roles to four clicked points
//! - [`grid_points`] - Compute the overlay lattice for the clicked quad
//! - [`rectify_image`] - Warp the clicked quad to an upright rectangle
//!
//! # Example
//!
//! ```typescript
//! import { order_corners, rectify_image } from '@gridrect/wasm';
//!
//! const coords = new Float64Array([700, 80, 90, 110, 110, 520, 680, 500]);
//! const roles = order_corners(coords);
//! console.log(roles.top_left, roles.degenerate);
//!
//! const rectified = rectify_image(image, coords, 4, 4, 0);
//! ```

use gridrect_core::{GridLattice, GridSpec, Point};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, JsDecodedImage};

/// Corner roles in the shape JavaScript consumes.
///
/// Serialized to `{ top_left: {x, y}, ..., degenerate: bool }`.
#[derive(Serialize)]
struct CornerRoles {
    top_left: Point,
    top_right: Point,
    bottom_right: Point,
    bottom_left: Point,
    degenerate: bool,
}

/// Parse a flat coordinate array into four points.
fn points_from_flat(coords: &[f64]) -> Result<Vec<Point>, JsValue> {
    if coords.len() != 8 {
        return Err(JsValue::from_str(&format!(
            "expected 8 coordinate values (4 x/y pairs), got {}",
            coords.len()
        )));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

fn ordered_from_flat(coords: &[f64]) -> Result<gridrect_core::OrderedCorners, JsValue> {
    let points = points_from_flat(coords)?;
    gridrect_core::order_corners(&points).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Assign TL/TR/BR/BL roles to four clicked points.
///
/// Points may arrive in any order; the roles are inferred from the geometry.
/// The result carries a `degenerate` flag when the points were duplicate or
/// collinear so the UI can warn without blocking the edit.
///
/// # Arguments
///
/// * `coords` - Flat `Float64Array` of 8 values: `[x0, y0, ..., x3, y3]`
///
/// # Returns
///
/// A plain object `{ top_left, top_right, bottom_right, bottom_left,
/// degenerate }` where each corner is `{ x, y }`.
#[wasm_bindgen]
pub fn order_corners(coords: &[f64]) -> Result<JsValue, JsValue> {
    let ordered = ordered_from_flat(coords)?;
    let roles = CornerRoles {
        top_left: ordered.top_left(),
        top_right: ordered.top_right(),
        bottom_right: ordered.bottom_right(),
        bottom_left: ordered.bottom_left(),
        degenerate: ordered.is_degenerate(),
    };
    serde_wasm_bindgen::to_value(&roles).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute the grid overlay lattice for four clicked points.
///
/// Returns a `rows` x `cols` lattice of points bilinearly blended from the
/// clicked quad's corners, as an array of `{ x, y }` objects in row-major
/// order. The host draws these as the live overlay while the user adjusts
/// corners.
///
/// # Arguments
///
/// * `coords` - Flat `Float64Array` of 8 values: `[x0, y0, ..., x3, y3]`
/// * `rows` - Number of grid rows (must be >= 1)
/// * `cols` - Number of grid columns (must be >= 1)
#[wasm_bindgen]
pub fn grid_points(coords: &[f64], rows: u32, cols: u32) -> Result<JsValue, JsValue> {
    let grid = GridSpec::new(rows, cols);
    if !grid.is_valid() {
        return Err(JsValue::from_str(&format!(
            "grid must have at least 1 row and 1 column, got {rows}x{cols}"
        )));
    }

    let ordered = ordered_from_flat(coords)?;
    let lattice = GridLattice::from_corners(&ordered, grid);
    serde_wasm_bindgen::to_value(lattice.points()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Warp the clicked quad to an upright rectangle.
///
/// Orders the corners, solves the perspective transform and resamples the
/// source image so the quad fills the output edge to edge. Output dimensions
/// are derived from the quad's edge lengths and rounded to multiples of the
/// grid counts, so an axis-aligned quad comes back as an exact crop.
///
/// # Arguments
///
/// * `image` - Source image to warp
/// * `coords` - Flat `Float64Array` of 8 values: `[x0, y0, ..., x3, y3]`
/// * `rows` - Number of grid rows (must be >= 1)
/// * `cols` - Number of grid columns (must be >= 1)
/// * `filter` - Resampling filter: 0=Bilinear (preview), 1=Lanczos3 (export)
///
/// # Errors
///
/// Returns an error if:
/// - The coordinate array does not hold exactly 4 points
/// - Any point lies outside the image bounds
/// - The grid has zero rows or columns
#[wasm_bindgen]
pub fn rectify_image(
    image: &JsDecodedImage,
    coords: &[f64],
    rows: u32,
    cols: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let ordered = ordered_from_flat(coords)?;
    let src = image.to_decoded();

    gridrect_core::rectify(&src, &ordered, GridSpec::new(rows, cols), filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn square_coords() -> [f64; 8] {
        [10.0, 10.0, 90.0, 10.0, 90.0, 90.0, 10.0, 90.0]
    }

    #[wasm_bindgen_test]
    fn test_order_corners_wrong_count() {
        let result = order_corners(&[1.0, 2.0, 3.0]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_order_corners_square() {
        let result = order_corners(&square_coords());
        assert!(result.is_ok());
    }

    #[wasm_bindgen_test]
    fn test_grid_points_count() {
        let result = grid_points(&square_coords(), 4, 4).unwrap();
        let points: Vec<Point> = serde_wasm_bindgen::from_value(result).unwrap();
        assert_eq!(points.len(), 16);
    }

    #[wasm_bindgen_test]
    fn test_grid_points_is_js_array() {
        // Hosts iterate the result directly, so it must arrive as an Array
        let result = grid_points(&square_coords(), 2, 2).unwrap();
        assert!(js_sys::Array::is_array(&result));
        let array = js_sys::Array::from(&result);
        assert_eq!(array.length(), 4);
    }

    #[wasm_bindgen_test]
    fn test_grid_points_zero_rows_errors() {
        let result = grid_points(&square_coords(), 0, 4);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_rectify_image_square() {
        let img = JsDecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
        let result = rectify_image(&img, &square_coords(), 4, 4, 0);
        assert!(result.is_ok());

        let rectified = result.unwrap();
        assert_eq!(rectified.width(), 80);
        assert_eq!(rectified.height(), 80);
    }

    #[wasm_bindgen_test]
    fn test_rectify_image_out_of_bounds() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let result = rectify_image(&img, &square_coords(), 4, 4, 0);
        assert!(result.is_err());
    }
}
