//! Linear and radial gradients shared between canvases.

use crate::color::Rgba;
use crate::error::{CanvasError, CanvasResult};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A color stop in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset position (0.0 to 1.0).
    pub offset: f64,
    /// Color at this stop.
    pub color: Rgba,
}

/// How a gradient maps device points to a stop parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    /// Projection onto the axis `(x0, y0) -> (x1, y1)`.
    Linear,
    /// Interpolation from the circle at `(x0, y0)` with radius `r0` to the
    /// circle at `(x1, y1)` with radius `r1`.
    Radial { r0: f64, r1: f64 },
}

/// Geometry and stops of a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientData {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub shape: GradientShape,
    /// Stops sorted by offset; equal offsets keep insertion order.
    pub stops: Vec<GradientStop>,
}

impl GradientData {
    /// Color at parameter `t` along the gradient axis.
    ///
    /// Outside the stop range the nearest end stop is used. When several
    /// stops share an offset, the one added last wins at that offset.
    pub fn color_at(&self, t: f64) -> Rgba {
        sample_stops(&self.stops, t)
    }

    /// Stop parameter at a device-space point.
    ///
    /// Linear gradients project onto the axis and clamp to `[0, 1]`. Radial
    /// gradients return the largest `t` whose interpolated circle passes
    /// through the point with a non-negative radius, unclamped; `None` means
    /// no such circle exists and the point is left transparent.
    pub fn parameter_at(&self, x: f64, y: f64) -> Option<f64> {
        match self.shape {
            GradientShape::Linear => {
                let dx = self.x1 - self.x0;
                let dy = self.y1 - self.y0;
                let len2 = dx * dx + dy * dy;
                if len2 <= f64::EPSILON {
                    return Some(0.0);
                }
                Some((((x - self.x0) * dx + (y - self.y0) * dy) / len2).clamp(0.0, 1.0))
            }
            GradientShape::Radial { r0, r1 } => self.radial_parameter(r0, r1, x, y),
        }
    }

    fn radial_parameter(&self, r0: f64, r1: f64, x: f64, y: f64) -> Option<f64> {
        let (cdx, cdy, cdr) = (self.x1 - self.x0, self.y1 - self.y0, r1 - r0);
        let (dx, dy) = (x - self.x0, y - self.y0);
        // Solve |p - c(t)| = r(t) for t, with c and r linear in t.
        let a = cdx * cdx + cdy * cdy - cdr * cdr;
        let b = dx * cdx + dy * cdy + r0 * cdr;
        let c = dx * dx + dy * dy - r0 * r0;
        let visible = |t: f64| r0 + t * cdr >= 0.0;
        if a.abs() <= f64::EPSILON {
            if b == 0.0 {
                return None;
            }
            let t = 0.5 * c / b;
            return visible(t).then_some(t);
        }
        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let (t0, t1) = ((b + root) / a, (b - root) / a);
        let (hi, lo) = if t0 >= t1 { (t0, t1) } else { (t1, t0) };
        [hi, lo].into_iter().find(|&t| visible(t))
    }
}

/// Sample a sorted stop list at `t`.
pub(crate) fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    // Number of stops at or before t; the last of them is the lower bracket.
    let idx = stops.partition_point(|s| s.offset <= t);
    if idx == 0 {
        return first.color;
    }
    if idx == stops.len() {
        return stops[idx - 1].color;
    }
    let a = &stops[idx - 1];
    let b = &stops[idx];
    let local = ((t - a.offset) / (b.offset - a.offset)) as f32;
    a.color.lerp(b.color, local)
}

/// A gradient resource.
///
/// Cloning a `Gradient` clones the handle, not the stops: every canvas that
/// binds a clone sees stops added later. Concurrent mutation from several
/// threads needs external coordination to get a deterministic stop order.
#[derive(Debug, Clone)]
pub struct Gradient {
    inner: Arc<RwLock<GradientData>>,
}

impl Gradient {
    /// Create a new linear gradient from `(x0, y0)` to `(x1, y1)` in device space.
    pub fn new_linear(x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasResult<Self> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(CanvasError::invalid_parameter(
                "gradient endpoints must be finite",
            ));
        }
        Ok(Self::with_geometry(x0, y0, x1, y1, GradientShape::Linear))
    }

    /// Create a radial gradient from the circle `(x0, y0, r0)` to the circle
    /// `(x1, y1, r1)` in device space. Radii must be non-negative.
    pub fn new_radial(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> CanvasResult<Self> {
        if ![x0, y0, r0, x1, y1, r1].iter().all(|v| v.is_finite()) {
            return Err(CanvasError::invalid_parameter(
                "gradient circles must be finite",
            ));
        }
        if r0 < 0.0 || r1 < 0.0 {
            return Err(CanvasError::invalid_parameter(format!(
                "gradient radii must be non-negative, got {r0} and {r1}"
            )));
        }
        Ok(Self::with_geometry(x0, y0, x1, y1, GradientShape::Radial { r0, r1 }))
    }

    fn with_geometry(x0: f64, y0: f64, x1: f64, y1: f64, shape: GradientShape) -> Self {
        Self {
            inner: Arc::new(RwLock::new(GradientData {
                x0,
                y0,
                x1,
                y1,
                shape,
                stops: Vec::new(),
            })),
        }
    }

    pub fn shape(&self) -> GradientShape {
        self.read().shape
    }

    /// Add a color stop to the gradient.
    pub fn add_color_stop(&self, offset: f64, color: Rgba) -> CanvasResult<()> {
        if !(offset.is_finite() && (0.0..=1.0).contains(&offset)) {
            return Err(CanvasError::InvalidGradientStop(offset));
        }
        log::debug!(target: "canvas", "addColorStop {} {:?}", offset, color);
        let mut data = self.write();
        // Insert after every stop with an offset <= this one so equal offsets
        // stay in insertion order.
        let idx = data.stops.partition_point(|s| s.offset <= offset);
        data.stops.insert(idx, GradientStop { offset, color });
        Ok(())
    }

    /// Snapshot of the current geometry and stops.
    pub fn snapshot(&self) -> GradientData {
        self.read().clone()
    }

    /// Number of stops added so far.
    pub fn stop_count(&self) -> usize {
        self.read().stops.len()
    }

    /// Color at stop parameter `t`.
    pub fn color_at(&self, t: f64) -> Rgba {
        self.read().color_at(t)
    }

    /// Whether two handles refer to the same gradient.
    pub fn ptr_eq(&self, other: &Gradient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, GradientData> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, GradientData> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn black_white() -> Gradient {
        let g = Gradient::new_linear(0.0, 0.0, 100.0, 0.0).unwrap();
        g.add_color_stop(0.0, Rgba::BLACK).unwrap();
        g.add_color_stop(1.0, Rgba::WHITE).unwrap();
        g
    }

    #[test]
    fn test_midpoint_is_mid_gray() {
        let c = black_white().color_at(0.5);
        assert_eq!(c, Rgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_stops_sorted_on_insertion() {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        g.add_color_stop(1.0, Rgba::WHITE).unwrap();
        g.add_color_stop(0.0, Rgba::BLACK).unwrap();
        let data = g.snapshot();
        assert_eq!(data.stops[0].offset, 0.0);
        assert_eq!(data.stops[1].offset, 1.0);
    }

    #[rstest]
    #[case(-0.5)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn test_invalid_stop_rejected(#[case] offset: f64) {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        assert!(matches!(
            g.add_color_stop(offset, Rgba::BLACK),
            Err(CanvasError::InvalidGradientStop(_))
        ));
        assert_eq!(g.stop_count(), 0);
    }

    #[test]
    fn test_monotonic_between_stops() {
        let g = black_white();
        let mut last = -1.0f32;
        for i in 0..=20 {
            let c = g.color_at(i as f64 / 20.0);
            assert!(c.r >= last);
            last = c.r;
        }
    }

    #[test]
    fn test_extrapolates_with_end_stops() {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        g.add_color_stop(0.25, red).unwrap();
        g.add_color_stop(0.75, blue).unwrap();
        assert_eq!(g.color_at(0.0), red);
        assert_eq!(g.color_at(1.0), blue);
    }

    #[test]
    fn test_duplicate_offset_last_wins() {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let green = Rgba::new(0.0, 1.0, 0.0, 1.0);
        g.add_color_stop(0.0, Rgba::BLACK).unwrap();
        g.add_color_stop(0.5, red).unwrap();
        g.add_color_stop(0.5, green).unwrap();
        g.add_color_stop(1.0, Rgba::WHITE).unwrap();
        assert_eq!(g.color_at(0.5), green);
        // Just below the shared offset interpolates towards the first of the pair.
        let below = g.color_at(0.49);
        assert!(below.r > 0.9 && below.g < 0.01);
    }

    #[test]
    fn test_projection_clamps() {
        let data = black_white().snapshot();
        assert_eq!(data.parameter_at(-10.0, 5.0), Some(0.0));
        assert_eq!(data.parameter_at(50.0, 99.0), Some(0.5));
        assert_eq!(data.parameter_at(200.0, 0.0), Some(1.0));
    }

    #[test]
    fn test_clones_share_stops() {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        let bound = g.clone();
        g.add_color_stop(0.0, Rgba::WHITE).unwrap();
        assert_eq!(bound.stop_count(), 1);
        assert!(bound.ptr_eq(&g));
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let g = Gradient::new_linear(0.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(g.color_at(0.3), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_concentric_radial_parameter_is_distance_over_radius() {
        let data = Gradient::new_radial(50.0, 50.0, 0.0, 50.0, 50.0, 40.0)
            .unwrap()
            .snapshot();
        assert_eq!(data.parameter_at(50.0, 50.0), Some(0.0));
        let t = data.parameter_at(70.0, 50.0).unwrap();
        assert!((t - 0.5).abs() < 1e-12);
        let t = data.parameter_at(50.0, 130.0).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_radial_with_inner_radius_starts_at_inner_circle() {
        let data = Gradient::new_radial(0.0, 0.0, 10.0, 0.0, 0.0, 20.0)
            .unwrap()
            .snapshot();
        assert!(data.parameter_at(10.0, 0.0).unwrap().abs() < 1e-12);
        assert!((data.parameter_at(0.0, 15.0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_radial_outside_cone_has_no_parameter() {
        // Two equal circles side by side sweep a band; points beyond it are uncovered.
        let data = Gradient::new_radial(0.0, 0.0, 5.0, 20.0, 0.0, 5.0)
            .unwrap()
            .snapshot();
        assert!(data.parameter_at(10.0, 0.0).is_some());
        assert_eq!(data.parameter_at(10.0, 30.0), None);
    }

    #[rstest]
    #[case(-1.0, 5.0)]
    #[case(1.0, f64::NAN)]
    fn test_invalid_radial_rejected(#[case] r0: f64, #[case] r1: f64) {
        assert!(Gradient::new_radial(0.0, 0.0, r0, 0.0, 0.0, r1).is_err());
    }
}
