//! Grid overlay lattice.
//!
//! While the user positions the corner points, the host UI draws a rows x
//! cols lattice over the image so the grid lines can be eyeballed against the
//! photographed graph paper. Each lattice point is a bilinear blend of the
//! four ordered corners: for row fraction r and column fraction c,
//!
//! ```text
//! p = TL*(1-r)*(1-c) + TR*(1-r)*c + BR*r*c + BL*r*(1-c)
//! ```
//!
//! The lattice also supports nearest-point lookup for snap-to-grid picking.

use crate::corners::OrderedCorners;
use crate::{GridSpec, Point};

/// A rows x cols lattice of points interpolated from the four corners.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLattice {
    rows: u32,
    cols: u32,
    points: Vec<Point>,
}

impl GridLattice {
    /// Build the lattice for the given corners and grid density.
    ///
    /// A grid with a single row or column degenerates to a line of points
    /// along the corresponding edge.
    pub fn from_corners(corners: &OrderedCorners, grid: GridSpec) -> Self {
        let rows = grid.rows.max(1);
        let cols = grid.cols.max(1);

        let tl = corners.top_left();
        let tr = corners.top_right();
        let br = corners.bottom_right();
        let bl = corners.bottom_left();

        let mut points = Vec::with_capacity((rows * cols) as usize);
        for i in 0..rows {
            let r = if rows > 1 {
                i as f64 / (rows - 1) as f64
            } else {
                0.0
            };
            for j in 0..cols {
                let c = if cols > 1 {
                    j as f64 / (cols - 1) as f64
                } else {
                    0.0
                };

                let x = tl.x * (1.0 - r) * (1.0 - c)
                    + tr.x * (1.0 - r) * c
                    + br.x * r * c
                    + bl.x * r * (1.0 - c);
                let y = tl.y * (1.0 - r) * (1.0 - c)
                    + tr.y * (1.0 - r) * c
                    + br.y * r * c
                    + bl.y * r * (1.0 - c);

                points.push(Point::new(x, y));
            }
        }

        Self { rows, cols, points }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// The lattice point at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if row or col is outside the lattice.
    pub fn point(&self, row: u32, col: u32) -> Point {
        assert!(row < self.rows && col < self.cols, "lattice index out of range");
        self.points[(row * self.cols + col) as usize]
    }

    /// All lattice points in row-major order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The lattice point closest to `p`.
    pub fn nearest_point(&self, p: Point) -> Point {
        let mut best = self.points[0];
        let mut best_dist = best.distance_to(p);
        for &candidate in &self.points[1..] {
            let dist = candidate.distance_to(p);
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }
}
