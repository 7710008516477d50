//! Text operations for Canvas.

use super::Canvas;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{Font, Glyph};
use crate::style::TextAlign;
use kurbo::Affine;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path as FsPath;

impl Canvas {
    /// Load a font file at `size` pixels, replacing any previously loaded font.
    pub fn load_font(&mut self, path: impl AsRef<FsPath>, size: f64) -> CanvasResult<()> {
        self.font = Some(Font::load(path, size)?);
        Ok(())
    }

    /// Use in-memory font data at `size` pixels, replacing any previously loaded font.
    pub fn load_font_bytes(&mut self, data: Vec<u8>, size: f64) -> CanvasResult<()> {
        log::debug!(target: "text", "load font from {} bytes", data.len());
        self.font = Some(Font::from_bytes(data, size)?);
        Ok(())
    }

    /// The loaded font, if any.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Width and height of `text` in the loaded font, in user units.
    pub fn measure_string(&mut self, text: &str) -> CanvasResult<(f64, f64)> {
        let font = self.font.as_mut().ok_or(CanvasError::NoFontLoaded)?;
        Ok(font.measure(text))
    }

    /// Width of the widest line and total height of `text` split on `\n`.
    ///
    /// Lines are `line_spacing` font heights apart; the height counts the
    /// first line's full font height plus the spacing of the others, so a
    /// single line measures the same as [`Canvas::measure_string`].
    pub fn measure_multiline_string(&mut self, text: &str, line_spacing: f64) -> CanvasResult<(f64, f64)> {
        check_line_spacing(line_spacing)?;
        let font = self.font.as_mut().ok_or(CanvasError::NoFontLoaded)?;
        let lines: Vec<&str> = text.split('\n').collect();
        let width = lines
            .iter()
            .map(|line| font.measure(line).0)
            .fold(0.0, f64::max);
        let font_height = font.ascent() + font.descent();
        Ok((width, block_height(lines.len(), font_height, line_spacing)))
    }

    /// Break `text` into lines no wider than `width` where possible.
    ///
    /// Explicit newlines always break. Words are separated by whitespace and
    /// rejoined with single spaces; a word wider than `width` gets a line
    /// of its own.
    pub fn word_wrap(&mut self, text: &str, width: f64) -> CanvasResult<Vec<String>> {
        if !(width.is_finite() && width >= 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "wrap width must be non-negative, got {width}"
            )));
        }
        let font = self.font.as_mut().ok_or(CanvasError::NoFontLoaded)?;
        Ok(wrap_words(text, width, |line| font.measure(line).0))
    }

    /// Word-wrap `text` to `width` and draw the lines as one block.
    ///
    /// The block is `width` wide and anchored like
    /// [`Canvas::draw_string_anchored`]: `(x, y)` sits at fraction `(ax, ay)`
    /// of it. Each line is aligned inside the block by `align`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_string_wrapped(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        ax: f64,
        ay: f64,
        width: f64,
        line_spacing: f64,
        align: TextAlign,
    ) -> CanvasResult<()> {
        log::debug!(target: "text", "draw_string_wrapped {:?} {} {} width {}", text, x, y, width);
        check_line_spacing(line_spacing)?;
        let lines = self.word_wrap(text, width)?;
        let font_height = self.font.as_ref().map_or(0.0, |f| f.ascent() + f.descent());
        let height = block_height(lines.len(), font_height, line_spacing);
        let left = x - ax * width;
        let mut top = y - ay * height;
        let (line_x, line_ax) = match align {
            TextAlign::Left => (left, 0.0),
            TextAlign::Center => (left + width / 2.0, 0.5),
            TextAlign::Right => (left + width, 1.0),
        };
        for line in &lines {
            self.draw_string_anchored(line, line_x, top, line_ax, 0.0)?;
            top += font_height * line_spacing;
        }
        Ok(())
    }

    /// Draw `text` left to right with its baseline starting at `(x, y)`.
    ///
    /// Under a translate-only transform each glyph's cached bitmap is
    /// placed at the nearest whole device pixel, so fractional origins snap.
    /// Any other transform fills the transformed outlines exactly.
    pub fn draw_string(&mut self, text: &str, x: f64, y: f64) -> CanvasResult<()> {
        log::debug!(target: "text", "draw_string {:?} {} {}", text, x, y);
        let glyphs = self.layout(text)?;
        let t = self.state.transform;
        let [a, b, c, d, _, _] = t.as_coeffs();
        let translate_only = a == 1.0 && b == 0.0 && c == 0.0 && d == 1.0;

        let mut pen = 0.0;
        for glyph in glyphs {
            let origin = t * kurbo::Point::new(x + pen, y);
            if translate_only {
                self.blit_glyph(&glyph, origin.x, origin.y);
            } else {
                let placement = t * Affine::translate((x + pen, y));
                self.fill_device_path(&glyph.outline().transformed(placement));
            }
            pen += glyph.advance();
        }
        Ok(())
    }

    /// Draw `text` so that the point `(x, y)` sits at fraction `(ax, ay)` of its bounding box.
    ///
    /// `(0, 0)` is the top-left corner, `(0.5, 0.5)` the center and `(1, 1)`
    /// the bottom-right. The box height is the font's ascent plus descent.
    pub fn draw_string_anchored(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        ax: f64,
        ay: f64,
    ) -> CanvasResult<()> {
        log::debug!(target: "text", "draw_string_anchored {:?} {} {} {} {}", text, x, y, ax, ay);
        let (w, h) = self.measure_string(text)?;
        let ascent = self.font.as_ref().map_or(0.0, Font::ascent);
        self.draw_string(text, x - ax * w, y - ay * h + ascent)
    }

    /// Draw `text` clockwise along a circle centered at `(x, y)`.
    ///
    /// The first glyph starts at angle 0 (the rightmost point). Each glyph's
    /// baseline is tangent to the circle with its top facing outward, and
    /// the angle advances by `advance / radius`. Drawing stops once the text
    /// has gone all the way round.
    pub fn draw_text_on_circle(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        radius: f64,
    ) -> CanvasResult<()> {
        log::debug!(target: "text", "draw_text_on_circle {:?} {} {} {}", text, x, y, radius);
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        let glyphs = self.layout(text)?;
        let t = self.state.transform;
        let angles = circle_angles(glyphs.iter().map(|g| g.advance()), radius);
        for (glyph, angle) in glyphs.iter().zip(angles) {
            let (sin, cos) = angle.sin_cos();
            let placement = t
                * Affine::translate((x + radius * cos, y + radius * sin))
                * Affine::rotate(angle + FRAC_PI_2);
            self.fill_device_path(&glyph.outline().transformed(placement));
        }
        Ok(())
    }

    /// Cached glyphs for every code point of `text`.
    fn layout(&mut self, text: &str) -> CanvasResult<Vec<std::sync::Arc<Glyph>>> {
        let font = self.font.as_mut().ok_or(CanvasError::NoFontLoaded)?;
        Ok(text.chars().map(|ch| font.glyph(ch)).collect())
    }

    /// Composite a glyph's cached coverage with its origin at the nearest device pixel.
    ///
    /// Bitmaps are rasterized once with the origin on a pixel corner, so
    /// the fractional part of `(x, y)` is dropped.
    fn blit_glyph(&mut self, glyph: &Glyph, x: f64, y: f64) {
        let rasterizer = self.rasterizer;
        if let Some(mask) = glyph.bitmap(&rasterizer) {
            let moved = mask.clone().translated(x.round() as i32, y.round() as i32);
            self.paint_mask(&moved);
        }
    }
}

/// Start angle of each glyph laid along a circle, stopping before the
/// first glyph that would end past a full turn.
fn circle_angles(advances: impl IntoIterator<Item = f64>, radius: f64) -> Vec<f64> {
    let mut angles = Vec::new();
    let mut angle = 0.0;
    for advance in advances {
        let next = angle + advance / radius;
        if next > TAU {
            break;
        }
        angles.push(angle);
        angle = next;
    }
    angles
}

/// Greedy word wrap of `text` using `measure` for line widths.
fn wrap_words(text: &str, width: f64, mut measure: impl FnMut(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measure(&candidate) > width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// Height of `lines` lines of `font_height`, `line_spacing` heights apart.
fn block_height(lines: usize, font_height: f64, line_spacing: f64) -> f64 {
    lines as f64 * font_height * line_spacing - (line_spacing - 1.0) * font_height
}

fn check_line_spacing(line_spacing: f64) -> CanvasResult<()> {
    if !(line_spacing.is_finite() && line_spacing > 0.0) {
        return Err(CanvasError::invalid_parameter(format!(
            "line spacing must be positive, got {line_spacing}"
        )));
    }
    Ok(())
}
