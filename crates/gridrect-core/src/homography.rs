//! Four-point homography estimation and projection.
//!
//! A homography is the 3x3 homogeneous matrix mapping one planar
//! quadrilateral onto another. Four point correspondences pin it down
//! exactly: fixing h22 = 1 leaves eight unknowns and each correspondence
//! contributes two linear equations, so the solve is a closed-form 8x8
//! LU decomposition rather than an iterative fit.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use thiserror::Error;

use crate::Point;

/// Errors from homography estimation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HomographyError {
    /// The correspondence system has no unique solution, which happens when
    /// three or more points on either side are collinear or coincident.
    #[error("corner correspondences are singular (collinear or duplicate points)")]
    Singular,
}

/// A 3x3 perspective transform over homogeneous 2D coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    m: Matrix3<f64>,
}

impl Homography {
    /// Solve the homography mapping each `src[i]` exactly onto `dst[i]`.
    ///
    /// Builds the standard DLT rows with h22 fixed at 1:
    ///
    /// ```text
    /// [ sx sy 1  0  0 0 -sx*dx -sy*dx ] [h] = [dx]
    /// [ 0  0  0 sx sy 1 -sx*dy -sy*dy ]       [dy]
    /// ```
    ///
    /// Returns `HomographyError::Singular` when the system is rank-deficient.
    pub fn from_correspondences(
        src: &[Point; 4],
        dst: &[Point; 4],
    ) -> Result<Self, HomographyError> {
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for i in 0..4 {
            let (sx, sy) = (src[i].x, src[i].y);
            let (dx, dy) = (dst[i].x, dst[i].y);

            let r = 2 * i;
            a[(r, 0)] = sx;
            a[(r, 1)] = sy;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -sx * dx;
            a[(r, 7)] = -sy * dx;
            b[r] = dx;

            a[(r + 1, 3)] = sx;
            a[(r + 1, 4)] = sy;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -sx * dy;
            a[(r + 1, 7)] = -sy * dy;
            b[r + 1] = dy;
        }

        let h = a.lu().solve(&b).ok_or(HomographyError::Singular)?;

        Ok(Self {
            m: Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0),
        })
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    /// Project a point through the transform.
    ///
    /// Returns NaN coordinates if the point maps to the line at infinity.
    pub fn project(&self, p: Point) -> Point {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        if v[2].abs() < 1e-15 {
            return Point::new(f64::NAN, f64::NAN);
        }
        Point::new(v[0] / v[2], v[1] / v[2])
    }

    /// The inverse transform, if the matrix is invertible.
    pub fn try_inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }

    /// The underlying 3x3 matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.m
    }
}
