//! Interactive correction session state.
//!
//! The host UI owns exactly one of these per open image. Click, drag and
//! right-click-delete events mutate the point list; every mutation is
//! synchronous and the host re-renders from the returned state, so there is
//! no incremental bookkeeping to invalidate. Rectification always recomputes
//! from scratch.

use log::{info, warn};
use thiserror::Error;

use crate::corners::{order_corners, CornerError};
use crate::decode::DecodedImage;
use crate::grid::GridLattice;
use crate::rectify::{rectify, RectifyError, SampleFilter};
use crate::{GridSpec, Point};

/// A correction needs exactly this many corner points.
pub const CORNER_COUNT: usize = 4;

/// Default hit-test radius, in image pixels, for picking an existing point.
pub const DEFAULT_HIT_RADIUS: f64 = 10.0;

/// Errors from running a correction on the current session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No image has been loaded yet.
    #[error("no image loaded")]
    NoImage,

    /// The user has not placed all four corner points.
    #[error("need exactly {CORNER_COUNT} corner points, have {0}")]
    IncompletePoints(usize),

    #[error(transparent)]
    Corner(#[from] CornerError),

    #[error(transparent)]
    Rectify(#[from] RectifyError),
}

/// Result of a correction pass.
#[derive(Debug, Clone)]
pub struct RectifiedOutput {
    /// The rectified raster.
    pub image: DecodedImage,
    /// True when the corner geometry was degenerate and the host should
    /// warn the user that the result is best-effort.
    pub degenerate: bool,
}

/// All mutable state behind the correction UI: the loaded image, the corner
/// points placed so far, the grid density, and the preview lock that freezes
/// point editing while the rectified overlay is shown.
#[derive(Debug, Clone, Default)]
pub struct CorrectionSession {
    image: Option<DecodedImage>,
    points: Vec<Point>,
    grid: GridSpec,
    preview_locked: bool,
}

impl CorrectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a new image, discarding any points from the previous one.
    pub fn load_image(&mut self, image: DecodedImage) {
        info!("loaded {}x{} image into session", image.width, image.height);
        self.image = Some(image);
        self.clear_points();
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn set_grid(&mut self, grid: GridSpec) {
        self.grid = grid;
    }

    /// True while the rectified preview is shown and points are frozen.
    pub fn preview_locked(&self) -> bool {
        self.preview_locked
    }

    pub fn set_preview_locked(&mut self, locked: bool) {
        self.preview_locked = locked;
    }

    /// Add a corner point. Returns false when editing is locked or all four
    /// points are already placed.
    pub fn add_point(&mut self, p: Point) -> bool {
        if self.preview_locked || self.points.len() >= CORNER_COUNT {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Index of the first point within `radius` of `p`, if any.
    pub fn point_near(&self, p: Point, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .position(|candidate| candidate.distance_to(p) < radius)
    }

    /// Move an existing point (drag). Returns false when locked or the
    /// index is stale.
    pub fn move_point(&mut self, index: usize, p: Point) -> bool {
        if self.preview_locked || index >= self.points.len() {
            return false;
        }
        self.points[index] = p;
        true
    }

    /// Remove the first point within `radius` of `p` (right-click delete).
    pub fn remove_point_near(&mut self, p: Point, radius: f64) -> Option<Point> {
        if self.preview_locked {
            return None;
        }
        let index = self.point_near(p, radius)?;
        Some(self.points.remove(index))
    }

    /// Drop all points and unlock editing.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.preview_locked = false;
    }

    /// The overlay lattice for the current points, once all four are placed.
    pub fn lattice(&self) -> Option<GridLattice> {
        if self.points.len() != CORNER_COUNT {
            return None;
        }
        let corners = order_corners(&self.points).ok()?;
        Some(GridLattice::from_corners(&corners, self.grid))
    }

    /// Run a full correction pass over the current state.
    ///
    /// Orders the points, solves the transform and warps the image. A
    /// degenerate corner layout still produces output; it is reported in
    /// the result so the host can warn.
    pub fn rectified(&self, filter: SampleFilter) -> Result<RectifiedOutput, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        if self.points.len() != CORNER_COUNT {
            return Err(SessionError::IncompletePoints(self.points.len()));
        }

        let corners = order_corners(&self.points)?;
        if corners.is_degenerate() {
            warn!("rectifying with degenerate corner geometry");
        }

        let rectified = rectify(image, &corners, self.grid, filter)?;
        Ok(RectifiedOutput {
            image: rectified,
            degenerate: corners.is_degenerate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    fn session_with_rect() -> CorrectionSession {
        let mut s = CorrectionSession::new();
        s.load_image(gray_image(800, 600));
        s.add_point(Point::new(100.0, 100.0));
        s.add_point(Point::new(700.0, 100.0));
        s.add_point(Point::new(700.0, 500.0));
        s.add_point(Point::new(100.0, 500.0));
        s
    }

    #[test]
    fn test_add_point_caps_at_four() {
        let mut s = session_with_rect();
        assert_eq!(s.points().len(), 4);
        assert!(!s.add_point(Point::new(1.0, 1.0)));
        assert_eq!(s.points().len(), 4);
    }

    #[test]
    fn test_load_image_resets_points() {
        let mut s = session_with_rect();
        s.load_image(gray_image(100, 100));
        assert!(s.points().is_empty());
        assert!(!s.preview_locked());
    }

    #[test]
    fn test_point_near_hit_and_miss() {
        let s = session_with_rect();
        assert_eq!(
            s.point_near(Point::new(103.0, 98.0), DEFAULT_HIT_RADIUS),
            Some(0)
        );
        assert_eq!(
            s.point_near(Point::new(400.0, 300.0), DEFAULT_HIT_RADIUS),
            None
        );
    }

    #[test]
    fn test_move_point() {
        let mut s = session_with_rect();
        assert!(s.move_point(1, Point::new(650.0, 120.0)));
        assert_eq!(s.points()[1], Point::new(650.0, 120.0));
        assert!(!s.move_point(9, Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_remove_point_near() {
        let mut s = session_with_rect();
        let removed = s.remove_point_near(Point::new(698.0, 502.0), DEFAULT_HIT_RADIUS);
        assert_eq!(removed, Some(Point::new(700.0, 500.0)));
        assert_eq!(s.points().len(), 3);

        // Nothing nearby
        assert_eq!(
            s.remove_point_near(Point::new(400.0, 300.0), DEFAULT_HIT_RADIUS),
            None
        );
    }

    #[test]
    fn test_preview_lock_freezes_editing() {
        let mut s = session_with_rect();
        s.set_preview_locked(true);

        assert!(!s.move_point(0, Point::new(0.0, 0.0)));
        assert_eq!(
            s.remove_point_near(Point::new(100.0, 100.0), DEFAULT_HIT_RADIUS),
            None
        );

        let mut s2 = CorrectionSession::new();
        s2.set_preview_locked(true);
        assert!(!s2.add_point(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_clear_points_unlocks() {
        let mut s = session_with_rect();
        s.set_preview_locked(true);
        s.clear_points();
        assert!(!s.preview_locked());
        assert!(s.points().is_empty());
    }

    #[test]
    fn test_lattice_requires_four_points() {
        let mut s = CorrectionSession::new();
        assert!(s.lattice().is_none());
        s.add_point(Point::new(0.0, 0.0));
        s.add_point(Point::new(10.0, 0.0));
        s.add_point(Point::new(10.0, 10.0));
        assert!(s.lattice().is_none());
        s.add_point(Point::new(0.0, 10.0));
        assert!(s.lattice().is_some());
    }

    #[test]
    fn test_lattice_follows_grid_spec() {
        let mut s = session_with_rect();
        s.set_grid(GridSpec::new(3, 5));
        let lattice = s.lattice().unwrap();
        assert_eq!(lattice.rows(), 3);
        assert_eq!(lattice.cols(), 5);
    }

    #[test]
    fn test_rectified_without_image() {
        let s = CorrectionSession::new();
        assert!(matches!(
            s.rectified(SampleFilter::Bilinear),
            Err(SessionError::NoImage)
        ));
    }

    #[test]
    fn test_rectified_with_too_few_points() {
        let mut s = CorrectionSession::new();
        s.load_image(gray_image(100, 100));
        s.add_point(Point::new(10.0, 10.0));

        assert!(matches!(
            s.rectified(SampleFilter::Bilinear),
            Err(SessionError::IncompletePoints(1))
        ));
    }

    #[test]
    fn test_rectified_full_pass() {
        let s = session_with_rect();
        let output = s.rectified(SampleFilter::Bilinear).unwrap();
        assert_eq!(output.image.width, 600);
        assert_eq!(output.image.height, 400);
        assert!(!output.degenerate);
    }

    #[test]
    fn test_rectified_flags_degenerate_geometry() {
        let mut s = CorrectionSession::new();
        s.load_image(gray_image(100, 100));
        s.add_point(Point::new(10.0, 10.0));
        s.add_point(Point::new(10.0, 10.0));
        s.add_point(Point::new(90.0, 90.0));
        s.add_point(Point::new(10.0, 90.0));

        let output = s.rectified(SampleFilter::Bilinear).unwrap();
        assert!(output.degenerate);
    }

    #[test]
    fn test_rectified_surfaces_out_of_bounds() {
        let mut s = CorrectionSession::new();
        s.load_image(gray_image(50, 50));
        s.add_point(Point::new(-5.0, 10.0));
        s.add_point(Point::new(40.0, 10.0));
        s.add_point(Point::new(40.0, 40.0));
        s.add_point(Point::new(10.0, 40.0));

        assert!(matches!(
            s.rectified(SampleFilter::Bilinear),
            Err(SessionError::Rectify(RectifyError::PointOutOfBounds { .. }))
        ));
    }
}
