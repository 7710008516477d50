//! Color values and 8-bit premultiplied pixel conversions.

use crate::error::{CanvasError, CanvasResult};
use tiny_skia::PremultipliedColorU8;

/// A straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from caller-supplied components, clamping each to `[0, 1]`.
    ///
    /// Non-finite components are rejected.
    pub fn from_components(r: f64, g: f64, b: f64, a: f64) -> CanvasResult<Self> {
        if ![r, g, b, a].iter().all(|c| c.is_finite()) {
            return Err(CanvasError::invalid_parameter(format!(
                "color components must be finite, got ({r}, {g}, {b}, {a})"
            )));
        }
        Ok(Self::new(
            r.clamp(0.0, 1.0) as f32,
            g.clamp(0.0, 1.0) as f32,
            b.clamp(0.0, 1.0) as f32,
            a.clamp(0.0, 1.0) as f32,
        ))
    }

    /// Build a color from 8-bit straight components.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or any CSS color string.
    pub fn parse(s: &str) -> CanvasResult<Self> {
        let parsed = csscolorparser::parse(s.trim())
            .map_err(|e| CanvasError::ColorParseError(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = parsed.to_array();
        Ok(Self::new(r, g, b, a))
    }

    /// Component-wise linear interpolation; `t = 0` yields `self`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Multiply alpha by `factor`.
    pub fn with_alpha_scaled(self, factor: f32) -> Rgba {
        Rgba {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Round to 8-bit straight components.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            unit_to_u8(self.r),
            unit_to_u8(self.g),
            unit_to_u8(self.b),
            unit_to_u8(self.a),
        ]
    }

    /// Premultiply and round into a pixel.
    pub fn to_premultiplied(self) -> PremultipliedColorU8 {
        let [r, g, b, a] = self.to_rgba8();
        premultiply(r, g, b, a)
    }
}

#[inline]
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
pub(crate) fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Premultiply straight 8-bit components with rounding.
#[inline]
pub(crate) fn premultiply(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
    let mul = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
    // Every component is <= alpha after the multiply, which is all from_rgba checks.
    PremultipliedColorU8::from_rgba(mul(r), mul(g), mul(b), a)
        .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

/// Undo premultiplication with rounding.
///
/// `premultiply(demultiply(p)) == p` for every valid premultiplied pixel.
#[inline]
pub(crate) fn demultiply(p: PremultipliedColorU8) -> [u8; 4] {
    let a = p.alpha();
    match a {
        0 => [0, 0, 0, 0],
        255 => [p.red(), p.green(), p.blue(), 255],
        _ => {
            let div = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            [div(p.red()), div(p.green()), div(p.blue()), a]
        }
    }
}
