//! Path building operations for Canvas.

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::path::{Path, PathSink, TransformedPath};
use crate::shapes;
use kurbo::Point;

impl Canvas {
    fn sink(&mut self) -> TransformedPath<'_> {
        TransformedPath {
            path: &mut self.path,
            transform: self.state.transform,
        }
    }

    /// The current path in device space.
    pub fn current_path(&self) -> &Path {
        &self.path
    }

    /// Begin a new subpath at the given point.
    pub fn move_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "canvas", "move_to {} {}", x, y);
        self.sink().move_to(Point::new(x, y));
    }

    /// Add a straight line to the given point.
    ///
    /// Without a current point this behaves like `move_to`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        log::debug!(target: "canvas", "line_to {} {}", x, y);
        self.sink().line_to(Point::new(x, y));
    }

    /// Add a cubic Bézier curve.
    pub fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        log::debug!(target: "canvas", "curve_to {} {} {} {} {} {}", cp1x, cp1y, cp2x, cp2y, x, y);
        self.sink().curve_to(
            Point::new(cp1x, cp1y),
            Point::new(cp2x, cp2y),
            Point::new(x, y),
        );
    }

    /// Add a quadratic Bézier curve (stored as the equivalent cubic).
    pub fn quadratic_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        log::debug!(target: "canvas", "quadratic_to {} {} {} {}", cpx, cpy, x, y);
        let t = self.state.transform;
        self.path.quad_to(t * Point::new(cpx, cpy), t * Point::new(x, y));
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "close_path");
        self.path.close();
    }

    /// Discard every subpath.
    pub fn clear_path(&mut self) {
        log::debug!(target: "canvas", "clear_path");
        self.path.clear();
    }

    /// End the current subpath without closing it; the next segment needs a new start point.
    pub fn new_sub_path(&mut self) {
        self.path.new_sub_path();
    }

    // --- Shapes ---

    pub fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        log::debug!(target: "canvas", "draw_rectangle {} {} {} {}", x, y, width, height);
        shapes::rectangle(&mut self.sink(), x, y, width, height);
    }

    /// Rectangle with quarter-circle corners; the radius is clamped to half the smaller side.
    pub fn draw_rounded_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        log::debug!(target: "canvas", "draw_rounded_rectangle {} {} {} {} {}", x, y, width, height, radius);
        shapes::rounded_rectangle(&mut self.sink(), x, y, width, height, radius);
    }

    pub fn draw_circle(&mut self, x: f64, y: f64, radius: f64) {
        log::debug!(target: "canvas", "draw_circle {} {} {}", x, y, radius);
        shapes::circle(&mut self.sink(), x, y, radius);
    }

    pub fn draw_ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64) {
        log::debug!(target: "canvas", "draw_ellipse {} {} {} {}", x, y, rx, ry);
        shapes::ellipse(&mut self.sink(), x, y, rx, ry);
    }

    /// A single open segment; stroke it to make it visible.
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        log::debug!(target: "canvas", "draw_line {} {} {} {}", x1, y1, x2, y2);
        shapes::line(&mut self.sink(), x1, y1, x2, y2);
    }

    /// Circular arc from `angle1` to `angle2` in radians.
    pub fn draw_arc(&mut self, x: f64, y: f64, r: f64, angle1: f64, angle2: f64) -> CanvasResult<()> {
        self.draw_elliptical_arc(x, y, r, r, angle1, angle2)
    }

    /// Elliptical arc from `angle1` to `angle2` in radians.
    ///
    /// Every argument must be finite. A sweep longer than a full turn draws
    /// exactly one turn.
    pub fn draw_elliptical_arc(
        &mut self,
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        angle1: f64,
        angle2: f64,
    ) -> CanvasResult<()> {
        log::debug!(target: "canvas", "draw_elliptical_arc {} {} {} {} {} {}", x, y, rx, ry, angle1, angle2);
        if ![x, y, rx, ry, angle1, angle2].iter().all(|v| v.is_finite()) {
            return Err(CanvasError::invalid_parameter(format!(
                "arc arguments must be finite, got ({x}, {y}, {rx}, {ry}, {angle1}, {angle2})"
            )));
        }
        shapes::elliptical_arc(&mut self.sink(), x, y, rx, ry, angle1, angle2);
        Ok(())
    }

    pub fn draw_regular_polygon(&mut self, n: u32, x: f64, y: f64, r: f64, rotation: f64) {
        log::debug!(target: "canvas", "draw_regular_polygon {} {} {} {} {}", n, x, y, r, rotation);
        shapes::regular_polygon(&mut self.sink(), n, x, y, r, rotation);
    }
}

#[cfg(test)]
mod tests {
    use crate::path::PathCommand;
    use crate::{Canvas, ErrorKind};
    use kurbo::Point;
    use rstest::rstest;

    #[test]
    fn test_points_are_transformed_on_insertion() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.translate(5.0, 5.0);
        canvas.move_to(1.0, 1.0);
        canvas.identity();
        canvas.line_to(1.0, 1.0);
        assert_eq!(
            canvas.current_path().commands(),
            &[
                PathCommand::MoveTo(Point::new(6.0, 6.0)),
                PathCommand::LineTo(Point::new(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn test_shapes_accumulate_subpaths() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_rectangle(0.0, 0.0, 2.0, 2.0);
        canvas.draw_circle(5.0, 5.0, 2.0);
        assert_eq!(canvas.current_path().subpath_count(), 2);
        canvas.clear_path();
        assert!(canvas.current_path().is_empty());
    }

    #[test]
    fn test_close_path_keeps_path() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(3.0, 0.0);
        canvas.close_path();
        assert_eq!(canvas.current_path().commands().len(), 3);
    }

    #[rstest]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    #[case(f64::NAN)]
    fn test_non_finite_arc_angle_rejected(#[case] angle: f64) {
        let mut canvas = Canvas::new(10, 10).unwrap();
        let err = canvas.draw_arc(5.0, 5.0, 3.0, 0.0, angle).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(canvas.current_path().is_empty());
    }

    #[test]
    fn test_arc_sweep_beyond_full_turn_is_bounded() {
        let mut long = Canvas::new(10, 10).unwrap();
        long.draw_arc(5.0, 5.0, 3.0, 0.0, 1.0e7).unwrap();
        let mut full = Canvas::new(10, 10).unwrap();
        full.draw_arc(5.0, 5.0, 3.0, 0.0, std::f64::consts::TAU).unwrap();
        assert_eq!(
            long.current_path().commands().len(),
            full.current_path().commands().len()
        );
    }
}
