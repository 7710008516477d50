//! Source-over blending into premultiplied RGBA8 pixmaps.
//!
//! Blending runs in `f32` on 0..=255 premultiplied values and each channel is
//! rounded once on write. Results are clamped so color never exceeds alpha.

use crate::color::Rgba;
use crate::paint::PaintSampler;
use crate::raster::CoverageMask;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Blend a straight-alpha color over `dst` with the given coverage.
#[inline]
pub(crate) fn blend_over(dst: PremultipliedColorU8, src: Rgba, coverage: f32) -> PremultipliedColorU8 {
    let a = src.a * coverage;
    if a <= 0.0 {
        return dst;
    }
    let inv = 1.0 - a;
    let out_a = a * 255.0 + dst.alpha() as f32 * inv;
    let out_r = src.r * a * 255.0 + dst.red() as f32 * inv;
    let out_g = src.g * a * 255.0 + dst.green() as f32 * inv;
    let out_b = src.b * a * 255.0 + dst.blue() as f32 * inv;
    pack(out_r, out_g, out_b, out_a)
}

/// Blend a premultiplied source pixel over `dst`, scaled by `opacity`.
#[inline]
pub(crate) fn blend_premultiplied(
    dst: PremultipliedColorU8,
    src: PremultipliedColorU8,
    opacity: f32,
) -> PremultipliedColorU8 {
    if src.alpha() == 0 || opacity <= 0.0 {
        return dst;
    }
    let inv = 1.0 - src.alpha() as f32 / 255.0 * opacity;
    pack(
        src.red() as f32 * opacity + dst.red() as f32 * inv,
        src.green() as f32 * opacity + dst.green() as f32 * inv,
        src.blue() as f32 * opacity + dst.blue() as f32 * inv,
        src.alpha() as f32 * opacity + dst.alpha() as f32 * inv,
    )
}

#[inline]
fn pack(r: f32, g: f32, b: f32, a: f32) -> PremultipliedColorU8 {
    let a = a.round().clamp(0.0, 255.0);
    let c = |v: f32| v.round().clamp(0.0, a) as u8;
    PremultipliedColorU8::from_rgba(c(r), c(g), c(b), a as u8)
        .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

/// Paint `sampler` through `mask` onto `pixmap`.
pub(crate) fn composite_mask(pixmap: &mut Pixmap, mask: &CoverageMask, sampler: &PaintSampler) {
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let uniform = sampler.uniform();
    let pixels = pixmap.pixels_mut();
    for ly in 0..mask.height() {
        let y = mask.top() + ly as i32;
        if y < 0 || y >= height {
            continue;
        }
        for (lx, &coverage) in mask.row(ly).iter().enumerate() {
            let x = mask.left() + lx as i32;
            if coverage <= 0.0 || x < 0 || x >= width {
                continue;
            }
            let color = match uniform {
                Some(c) => c,
                None => sampler.sample(x as f64 + 0.5, y as f64 + 0.5),
            };
            let idx = (y * width + x) as usize;
            pixels[idx] = blend_over(pixels[idx], color, coverage);
        }
    }
}

/// Blend all of `src` over `dst` (same size) with an extra opacity factor.
pub(crate) fn composite_pixmap(dst: &mut Pixmap, src: &Pixmap, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    for (d, s) in dst.pixels_mut().iter_mut().zip(src.pixels()) {
        *d = blend_premultiplied(*d, *s, opacity);
    }
}

/// Overwrite every pixel with the paint, without blending.
pub(crate) fn fill_pixmap(pixmap: &mut Pixmap, sampler: &PaintSampler) {
    let width = pixmap.width() as usize;
    if let Some(color) = sampler.uniform() {
        pixmap.pixels_mut().fill(color.to_premultiplied());
        return;
    }
    for (i, p) in pixmap.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (i % width, i / width);
        *p = sampler
            .sample(x as f64 + 0.5, y as f64 + 0.5)
            .to_premultiplied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Paint;
    use rstest::rstest;

    fn px(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba(r, g, b, a).unwrap()
    }

    #[test]
    fn test_opaque_source_replaces() {
        let out = blend_over(px(0, 0, 255, 255), Rgba::new(1.0, 0.0, 0.0, 1.0), 1.0);
        assert_eq!(out, px(255, 0, 0, 255));
    }

    #[test]
    fn test_half_coverage_over_transparent() {
        let out = blend_over(PremultipliedColorU8::TRANSPARENT, Rgba::WHITE, 0.5);
        assert_eq!(out, px(128, 128, 128, 128));
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        let out = blend_over(px(0, 0, 0, 255), Rgba::new(1.0, 1.0, 1.0, 0.5), 1.0);
        assert_eq!(out, px(128, 128, 128, 255));
    }

    #[rstest]
    #[case(1.0, px(255, 0, 0, 255))]
    #[case(0.5, px(128, 0, 0, 128))]
    #[case(0.0, PremultipliedColorU8::TRANSPARENT)]
    fn test_layer_opacity(#[case] opacity: f32, #[case] expected: PremultipliedColorU8) {
        let out = blend_premultiplied(PremultipliedColorU8::TRANSPARENT, px(255, 0, 0, 255), opacity);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_fill_pixmap_replaces_everything() {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        let sampler = PaintSampler::new(&Paint::Solid(Rgba::new(0.0, 1.0, 0.0, 1.0)), 1.0);
        fill_pixmap(&mut pixmap, &sampler);
        assert!(pixmap.pixels().iter().all(|p| *p == px(0, 255, 0, 255)));
    }
}
