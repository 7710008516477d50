//! Pixel filters. Each one reads a pixmap and returns a new one of the same size.
//!
//! Blur works on premultiplied channels so transparent pixels do not bleed
//! color. The per-pixel color transforms work on straight color and keep
//! alpha unchanged.

use crate::color::{clamp_u8, demultiply, premultiply};
use crate::error::{CanvasError, CanvasResult};
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Normalized Gaussian weights for a blur of `radius` pixels.
///
/// The kernel has `2 * ceil(radius) + 1` taps and `sigma = radius / 2`,
/// unless `ceil(radius)` exceeds `max_half`. Then it has `2 * max_half + 1`
/// taps and the weight of each cut tail is added to its end tap. With
/// clamp-to-edge sampling and `max_half` at least the image extent, every
/// cut tap reads the same edge pixel as the end tap, so the result is
/// unchanged.
pub(crate) fn gaussian_kernel(radius: f64, max_half: usize) -> Vec<f32> {
    let full_half = radius.ceil();
    let half = full_half.min(max_half as f64) as i64;
    let sigma = radius / 2.0;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (-half..=half)
        .map(|i| (-((i * i) as f64) / denom).exp())
        .collect();
    if (half as f64) < full_half {
        let tail = gaussian_tail(sigma, half as f64 + 0.5, full_half + 0.5);
        if let Some(first) = weights.first_mut() {
            *first += tail;
        }
        if let Some(last) = weights.last_mut() {
            *last += tail;
        }
    }
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Unnormalized Gaussian mass between `from` and `to` (both >= 0), in the
/// same units as the sampled taps `exp(-i^2 / 2 sigma^2)`.
fn gaussian_tail(sigma: f64, from: f64, to: f64) -> f64 {
    let scale = sigma * std::f64::consts::SQRT_2;
    let mass = sigma * (std::f64::consts::PI / 2.0).sqrt();
    (mass * (erfc(from / scale) - erfc(to / scale))).max(0.0)
}

/// Complementary error function for `x >= 0` (Abramowitz and Stegun 7.1.26).
fn erfc(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A: [f64; 5] = [
        0.254_829_592,
        -0.284_496_736,
        1.421_413_741,
        -1.453_152_027,
        1.061_405_429,
    ];
    let t = 1.0 / (1.0 + P * x);
    let poly = A.iter().rev().fold(0.0, |acc, a| acc * t + a) * t;
    poly * (-x * x).exp()
}

/// Separable Gaussian blur with clamp-to-edge sampling. `radius == 0` copies.
pub fn blur(src: &Pixmap, radius: f64) -> CanvasResult<Pixmap> {
    if !(radius.is_finite() && radius >= 0.0) {
        return Err(CanvasError::invalid_parameter(format!(
            "blur radius must be non-negative, got {radius}"
        )));
    }
    log::debug!(target: "filter", "blur radius {}", radius);
    if radius == 0.0 {
        return Ok(src.clone());
    }
    let (w, h) = (src.width() as usize, src.height() as usize);
    let kernel = gaussian_kernel(radius, w.max(h));
    let half = (kernel.len() / 2) as i64;
    let clamp = |v: i64, len: usize| v.clamp(0, len as i64 - 1) as usize;

    let mut horizontal = vec![[0.0f32; 4]; w * h];
    let pixels = src.pixels();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = clamp(x as i64 + k as i64 - half, w);
                let p = pixels[y * w + sx];
                acc[0] += p.red() as f32 * weight;
                acc[1] += p.green() as f32 * weight;
                acc[2] += p.blue() as f32 * weight;
                acc[3] += p.alpha() as f32 * weight;
            }
            horizontal[y * w + x] = acc;
        }
    }

    let mut out = src.clone();
    let out_pixels = out.pixels_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = clamp(y as i64 + k as i64 - half, h);
                let p = horizontal[sy * w + x];
                for c in 0..4 {
                    acc[c] += p[c] * weight;
                }
            }
            let a = clamp_u8(acc[3]);
            let c = |v: f32| clamp_u8(v).min(a);
            out_pixels[y * w + x] = PremultipliedColorU8::from_rgba(c(acc[0]), c(acc[1]), c(acc[2]), a)
                .unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }
    }
    Ok(out)
}

/// Replace RGB with `0.299 R + 0.587 G + 0.114 B`.
pub fn grayscale(src: &Pixmap) -> Pixmap {
    log::debug!(target: "filter", "grayscale");
    let mut out = src.clone();
    for p in out.pixels_mut() {
        // Luminance is linear, so it can be taken on premultiplied values.
        let lum = clamp_u8(
            0.299 * p.red() as f32 + 0.587 * p.green() as f32 + 0.114 * p.blue() as f32,
        )
        .min(p.alpha());
        *p = PremultipliedColorU8::from_rgba(lum, lum, lum, p.alpha()).unwrap_or(*p);
    }
    out
}

/// Multiply RGB by `factor`, clamping to the valid range.
pub fn brightness(src: &Pixmap, factor: f64) -> CanvasResult<Pixmap> {
    let factor = non_negative("brightness", factor)?;
    log::debug!(target: "filter", "brightness {}", factor);
    Ok(map_straight(src, |[r, g, b, a]| {
        let s = |c: u8| clamp_u8(c as f32 * factor);
        [s(r), s(g), s(b), a]
    }))
}

/// Scale distance from mid-gray: `(c - 128) * factor + 128`.
pub fn contrast(src: &Pixmap, factor: f64) -> CanvasResult<Pixmap> {
    let factor = non_negative("contrast", factor)?;
    log::debug!(target: "filter", "contrast {}", factor);
    Ok(map_straight(src, |[r, g, b, a]| {
        let s = |c: u8| clamp_u8((c as f32 - 128.0) * factor + 128.0);
        [s(r), s(g), s(b), a]
    }))
}

/// Replace each channel with `255 - c`.
pub fn invert(src: &Pixmap) -> Pixmap {
    log::debug!(target: "filter", "invert");
    map_straight(src, |[r, g, b, a]| [255 - r, 255 - g, 255 - b, a])
}

/// Classic sepia tone matrix.
pub fn sepia(src: &Pixmap) -> Pixmap {
    log::debug!(target: "filter", "sepia");
    map_straight(src, |[r, g, b, a]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        [
            clamp_u8(0.393 * r + 0.769 * g + 0.189 * b),
            clamp_u8(0.349 * r + 0.686 * g + 0.168 * b),
            clamp_u8(0.272 * r + 0.534 * g + 0.131 * b),
            a,
        ]
    })
}

fn non_negative(name: &str, v: f64) -> CanvasResult<f32> {
    if !(v.is_finite() && v >= 0.0) {
        return Err(CanvasError::invalid_parameter(format!(
            "{name} factor must be non-negative, got {v}"
        )));
    }
    Ok(v as f32)
}

/// Apply `f` to every pixel in straight-alpha form. Transparent pixels are skipped.
fn map_straight(src: &Pixmap, f: impl Fn([u8; 4]) -> [u8; 4]) -> Pixmap {
    let mut out = src.clone();
    for p in out.pixels_mut() {
        if p.alpha() == 0 {
            continue;
        }
        let [r, g, b, a] = f(demultiply(*p));
        *p = premultiply(r, g, b, a);
    }
    out
}
