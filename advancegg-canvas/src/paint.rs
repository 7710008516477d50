//! Paint selection and per-pixel paint resolution.

use crate::color::Rgba;
use crate::gradient::{sample_stops, Gradient, GradientData, GradientShape, GradientStop};

/// The active paint of a canvas: a solid color or a shared gradient.
#[derive(Debug, Clone)]
pub enum Paint {
    /// Solid color fill.
    Solid(Rgba),
    /// Linear gradient fill, shared with every other canvas holding a clone.
    LinearGradient(Gradient),
    /// Radial gradient fill, shared the same way.
    RadialGradient(Gradient),
}

impl Paint {
    /// Paint with `gradient`, picking the variant from its shape.
    pub fn gradient(gradient: &Gradient) -> Self {
        match gradient.shape() {
            GradientShape::Linear => Paint::LinearGradient(gradient.clone()),
            GradientShape::Radial { .. } => Paint::RadialGradient(gradient.clone()),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        // Default is opaque black
        Paint::Solid(Rgba::BLACK)
    }
}

/// Paint resolved for one drawing operation.
///
/// Gradient stops are snapshotted once per operation so sampling never
/// touches the shared lock.
#[derive(Debug, Clone)]
pub(crate) enum PaintSampler {
    Solid(Rgba),
    Linear {
        x0: f64,
        y0: f64,
        dx: f64,
        dy: f64,
        inv_len2: f64,
        stops: Vec<GradientStop>,
        alpha: f32,
    },
    Radial {
        data: GradientData,
        alpha: f32,
    },
}

impl PaintSampler {
    pub(crate) fn new(paint: &Paint, global_alpha: f32) -> Self {
        match paint {
            Paint::Solid(color) => PaintSampler::Solid(color.with_alpha_scaled(global_alpha)),
            Paint::LinearGradient(gradient) => {
                let GradientData {
                    x0,
                    y0,
                    x1,
                    y1,
                    stops,
                    ..
                } = gradient.snapshot();
                let (dx, dy) = (x1 - x0, y1 - y0);
                let len2 = dx * dx + dy * dy;
                PaintSampler::Linear {
                    x0,
                    y0,
                    dx,
                    dy,
                    inv_len2: if len2 <= f64::EPSILON { 0.0 } else { 1.0 / len2 },
                    stops,
                    alpha: global_alpha,
                }
            }
            Paint::RadialGradient(gradient) => PaintSampler::Radial {
                data: gradient.snapshot(),
                alpha: global_alpha,
            },
        }
    }

    /// Color at the device-space point `(x, y)` (normally a pixel center).
    #[inline]
    pub(crate) fn sample(&self, x: f64, y: f64) -> Rgba {
        match self {
            PaintSampler::Solid(color) => *color,
            PaintSampler::Linear {
                x0,
                y0,
                dx,
                dy,
                inv_len2,
                stops,
                alpha,
            } => {
                let t = (((x - x0) * dx + (y - y0) * dy) * inv_len2).clamp(0.0, 1.0);
                sample_stops(stops, t).with_alpha_scaled(*alpha)
            }
            PaintSampler::Radial { data, alpha } => match data.parameter_at(x, y) {
                Some(t) => sample_stops(&data.stops, t).with_alpha_scaled(*alpha),
                None => Rgba::TRANSPARENT,
            },
        }
    }

    /// Whether every sample is the same color.
    pub(crate) fn uniform(&self) -> Option<Rgba> {
        match self {
            PaintSampler::Solid(color) => Some(*color),
            PaintSampler::Linear { .. } | PaintSampler::Radial { .. } => None,
        }
    }
}
