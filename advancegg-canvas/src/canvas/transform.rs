//! Transform operations for Canvas.

use super::Canvas;
use kurbo::{Affine, Point};

impl Canvas {
    /// Translate the canvas.
    pub fn translate(&mut self, x: f64, y: f64) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.state.transform *= Affine::translate((x, y));
    }

    /// Rotate the canvas (radians, clockwise on screen).
    pub fn rotate(&mut self, angle: f64) {
        log::debug!(target: "canvas", "rotate {}", angle);
        self.state.transform *= Affine::rotate(angle);
    }

    /// Rotate about the point `(x, y)`.
    pub fn rotate_about(&mut self, angle: f64, x: f64, y: f64) {
        log::debug!(target: "canvas", "rotate_about {} {} {}", angle, x, y);
        self.state.transform *= Affine::rotate_about(angle, Point::new(x, y));
    }

    /// Scale the canvas.
    pub fn scale(&mut self, x: f64, y: f64) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.transform *= Affine::scale_non_uniform(x, y);
    }

    /// Reset the transform to identity.
    pub fn identity(&mut self) {
        log::debug!(target: "canvas", "identity");
        self.state.transform = Affine::IDENTITY;
    }

    /// Get the current transformation matrix.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Map a user-space point to device space.
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.state.transform * Point::new(x, y);
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::Canvas;

    #[test]
    fn test_transforms_compose_in_call_order() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.translate(10.0, 0.0);
        canvas.scale(2.0, 2.0);
        assert_eq!(canvas.transform_point(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn test_push_pop_restores_transform() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.push();
        canvas.rotate(1.0);
        canvas.pop();
        assert_eq!(canvas.transform_point(3.0, 4.0), (3.0, 4.0));
    }
}
