//! Corner-role assignment for the four clicked points.
//!
//! The user clicks the grid corners in any order; before the homography can be
//! solved each point must be assigned a role: top-left, top-right,
//! bottom-right, bottom-left. The assignment uses the sum/difference
//! heuristic: the point with the smallest (x + y) is top-left and the largest
//! is bottom-right; of the remaining two, the smaller (y - x) is top-right.
//! This keeps the rectified image from coming out rotated or mirrored for any
//! quadrilateral whose corners actually sit in distinct quadrants.
//!
//! Ties on either extremum are resolved by input index: the earlier click
//! wins the lower-index role. Degenerate input (duplicate or collinear
//! points) still produces an ordering, flagged so the host can warn instead
//! of blocking an interactive edit.

use log::warn;
use thiserror::Error;

use crate::Point;

/// Squared distance below which two corners count as duplicates.
const DUPLICATE_EPSILON_SQ: f64 = 1e-12;

/// Twice-the-triangle-area threshold below which three corners count as
/// collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// Errors from corner-role assignment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CornerError {
    /// Ordering needs exactly four points.
    #[error("expected exactly 4 corner points, got {0}")]
    WrongPointCount(usize),
}

/// Four corner points with assigned roles.
///
/// Stored in TL, TR, BR, BL order. `degenerate` is set when the input
/// contained duplicate or collinear points; the ordering is then best-effort
/// and the host should warn the user rather than refuse to continue.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrderedCorners {
    corners: [Point; 4],
    degenerate: bool,
}

impl OrderedCorners {
    pub fn top_left(&self) -> Point {
        self.corners[0]
    }

    pub fn top_right(&self) -> Point {
        self.corners[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.corners[2]
    }

    pub fn bottom_left(&self) -> Point {
        self.corners[3]
    }

    /// Corners in TL, TR, BR, BL order.
    pub fn as_array(&self) -> [Point; 4] {
        self.corners
    }

    /// True when the input quadrilateral was duplicate or collinear.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Assign TL/TR/BR/BL roles to four unordered points.
///
/// Returns `CornerError::WrongPointCount` unless exactly four points are
/// supplied. Degenerate geometry never fails; it is reported through
/// [`OrderedCorners::is_degenerate`].
pub fn order_corners(points: &[Point]) -> Result<OrderedCorners, CornerError> {
    if points.len() != 4 {
        return Err(CornerError::WrongPointCount(points.len()));
    }

    // Top-left minimizes x + y; first extremum wins so ties resolve by
    // input index.
    let mut tl = 0;
    for i in 1..4 {
        if points[i].x + points[i].y < points[tl].x + points[tl].y {
            tl = i;
        }
    }

    // Bottom-right maximizes x + y among the remaining points.
    let mut br = usize::MAX;
    for i in 0..4 {
        if i == tl {
            continue;
        }
        if br == usize::MAX || points[i].x + points[i].y > points[br].x + points[br].y {
            br = i;
        }
    }

    // The two leftovers split on y - x: smaller is top-right.
    let rest: Vec<usize> = (0..4).filter(|&i| i != tl && i != br).collect();
    let (tr, bl) = {
        let (a, b) = (rest[0], rest[1]);
        if points[b].y - points[b].x < points[a].y - points[a].x {
            (b, a)
        } else {
            (a, b)
        }
    };

    let corners = [points[tl], points[tr], points[br], points[bl]];
    let degenerate = is_degenerate_quad(&corners);
    if degenerate {
        warn!("corner points are duplicate or collinear; ordering is best-effort");
    }

    Ok(OrderedCorners {
        corners,
        degenerate,
    })
}

/// Degeneracy check: any duplicate pair, or any three corners collinear.
fn is_degenerate_quad(corners: &[Point; 4]) -> bool {
    for i in 0..4 {
        for j in (i + 1)..4 {
            let dx = corners[i].x - corners[j].x;
            let dy = corners[i].y - corners[j].y;
            if dx * dx + dy * dy < DUPLICATE_EPSILON_SQ {
                return true;
            }
        }
    }

    for i in 0..4 {
        for j in (i + 1)..4 {
            for k in (j + 1)..4 {
                if cross_magnitude(corners[i], corners[j], corners[k]) < COLLINEAR_EPSILON {
                    return true;
                }
            }
        }
    }

    false
}

/// |cross product| of (b - a) and (c - a); twice the triangle area.
fn cross_magnitude(a: Point, b: Point, c: Point) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs()
}
