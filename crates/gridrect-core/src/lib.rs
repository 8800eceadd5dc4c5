//! Gridrect Core - Perspective rectification library
//!
//! This crate provides the core functionality for Gridrect: ordering four
//! user-clicked corner points, solving the four-point homography, and warping
//! the enclosed quadrilateral into an upright grid-aligned raster. It also
//! carries the image decode/encode boundary and the interactive session state
//! the host UI mutates.

pub mod corners;
pub mod decode;
pub mod encode;
pub mod grid;
pub mod homography;
pub mod rectify;
pub mod session;

pub use corners::{order_corners, CornerError, OrderedCorners};
pub use grid::GridLattice;
pub use homography::{Homography, HomographyError};
pub use rectify::{rectify, RectifyError, SampleFilter};
pub use session::{CorrectionSession, RectifiedOutput, SessionError};

/// A 2D point in source-image pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal coordinate in pixels (grows right).
    pub x: f64,
    /// Vertical coordinate in pixels (grows down).
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Output grid density: how many cells the rectified raster is divided into.
///
/// The grid sizes the output raster and the overlay lattice. It places no
/// constraint on where the corner points may be clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    /// Number of grid rows (vertical cell count).
    pub rows: u32,
    /// Number of grid columns (horizontal cell count).
    pub cols: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        // The host UI starts with a 4x4 grid
        Self { rows: 4, cols: 4 }
    }
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// A grid is usable when it has at least one row and one column.
    pub fn is_valid(&self) -> bool {
        self.rows >= 1 && self.cols >= 1
    }
}
