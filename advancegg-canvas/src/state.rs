//! Drawing state that can be saved and restored.

use crate::paint::Paint;
use crate::style::{FillRule, LineCap, LineJoin, StrokeStyle};
use kurbo::Affine;

/// Drawing state that can be saved and restored with `push`/`pop`.
#[derive(Debug, Clone)]
pub struct DrawingState {
    /// Current paint.
    pub paint: Paint,
    /// Current line width in user units.
    pub line_width: f64,
    /// Current line cap style.
    pub line_cap: LineCap,
    /// Current line join style.
    pub line_join: LineJoin,
    /// Current miter limit.
    pub miter_limit: f64,
    /// Current line dash pattern.
    pub line_dash: Vec<f64>,
    /// Current line dash offset.
    pub line_dash_offset: f64,
    /// Rule used by `fill` for self-overlapping paths.
    pub fill_rule: FillRule,
    /// Current global alpha.
    pub global_alpha: f32,
    /// Current transform matrix.
    pub transform: Affine,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            paint: Paint::default(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            fill_rule: FillRule::default(),
            global_alpha: 1.0,
            transform: Affine::IDENTITY,
        }
    }
}

impl DrawingState {
    /// Stroke parameters mapped into device units by the current transform.
    pub(crate) fn device_stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.line_width,
            cap: self.line_cap,
            join: self.line_join,
            miter_limit: self.miter_limit,
            dash: self.line_dash.clone(),
            dash_offset: self.line_dash_offset,
        }
        .scaled(transform_scale(self.transform))
    }
}

/// Average axis scale of an affine transform.
pub(crate) fn transform_scale(t: Affine) -> f64 {
    let [a, b, c, d, _, _] = t.as_coeffs();
    ((a * a + b * b).sqrt() + (c * c + d * d).sqrt()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_of_rotation_is_one() {
        let t = Affine::rotate(0.7);
        assert!((transform_scale(t) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_device_stroke_scales_width_and_dash() {
        let state = DrawingState {
            line_width: 2.0,
            line_dash: vec![3.0, 1.0],
            transform: Affine::scale(2.0),
            ..DrawingState::default()
        };
        let style = state.device_stroke_style();
        assert_eq!(style.width, 4.0);
        assert_eq!(style.dash, vec![6.0, 2.0]);
    }
}
