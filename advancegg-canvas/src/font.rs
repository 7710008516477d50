//! Font loading, glyph outlines and the per-font glyph cache.

use crate::error::{CanvasError, CanvasResult};
use crate::path::{Path, PathSink};
use crate::raster::{Clip, CoverageMask, Rasterizer};
use crate::style::FillRule;
use kurbo::Point;
use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::{Arc, OnceLock};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// A rendered glyph at a fixed pixel size.
///
/// The outline is in pixels with the pen origin at `(0, 0)` on the
/// baseline and y growing downward.
#[derive(Debug)]
pub struct Glyph {
    advance: f64,
    outline: Path,
    bitmap: OnceLock<Option<CoverageMask>>,
}

impl Glyph {
    /// Horizontal advance in pixels.
    pub fn advance(&self) -> f64 {
        self.advance
    }

    pub fn outline(&self) -> &Path {
        &self.outline
    }

    /// Coverage of the outline at the origin, rasterized on first use.
    pub(crate) fn bitmap(&self, rasterizer: &Rasterizer) -> Option<&CoverageMask> {
        self.bitmap
            .get_or_init(|| rasterizer.fill_bez(&self.outline.to_bez_path(), FillRule::NonZero, Clip::unbounded()))
            .as_ref()
    }
}

/// A TrueType/OpenType font bound at one pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    path: Option<PathBuf>,
    size: f64,
    data: Arc<Vec<u8>>,
    scale: f64,
    ascent: f64,
    descent: f64,
    line_gap: f64,
    glyphs: HashMap<(char, u64), Arc<Glyph>>,
}

impl Font {
    /// Load a font file at `size` pixels per em.
    pub fn load(path: impl AsRef<FsPath>, size: f64) -> CanvasResult<Font> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| CanvasError::FontLoadFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut font = Self::parse(data, size, path)?;
        font.path = Some(path.to_path_buf());
        log::debug!(target: "text", "loaded font {} at {}px", path.display(), size);
        Ok(font)
    }

    /// Build a font from in-memory font data.
    pub fn from_bytes(data: Vec<u8>, size: f64) -> CanvasResult<Font> {
        Self::parse(data, size, FsPath::new("<memory>"))
    }

    fn parse(data: Vec<u8>, size: f64, origin: &FsPath) -> CanvasResult<Font> {
        if !(size.is_finite() && size > 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "font size must be positive, got {size}"
            )));
        }
        let face = Face::parse(&data, 0).map_err(|e| CanvasError::FontLoadFailure {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        let scale = size / face.units_per_em() as f64;
        let ascent = face.ascender() as f64 * scale;
        let descent = -(face.descender() as f64) * scale;
        let line_gap = face.line_gap() as f64 * scale;
        Ok(Font {
            path: None,
            size,
            data: Arc::new(data),
            scale,
            ascent,
            descent,
            line_gap,
            glyphs: HashMap::new(),
        })
    }

    /// File the font was loaded from, if any.
    pub fn path(&self) -> Option<&FsPath> {
        self.path.as_deref()
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Distance from the baseline to the top of the em box, in pixels.
    pub fn ascent(&self) -> f64 {
        self.ascent
    }

    /// Distance from the baseline to the bottom of the em box, in pixels (positive).
    pub fn descent(&self) -> f64 {
        self.descent
    }

    /// Recommended baseline-to-baseline distance.
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.line_gap
    }

    /// Number of glyphs currently cached.
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Width and height of `text` on a single line.
    ///
    /// The height is `ascent + descent` regardless of the characters used.
    pub fn measure(&mut self, text: &str) -> (f64, f64) {
        let width = text.chars().map(|ch| self.glyph(ch).advance).sum();
        (width, self.ascent + self.descent)
    }

    /// The cached glyph for `ch`, loading it on first use.
    pub fn glyph(&mut self, ch: char) -> Arc<Glyph> {
        let key = (ch, self.size.to_bits());
        if let Some(glyph) = self.glyphs.get(&key) {
            return Arc::clone(glyph);
        }
        let glyph = Arc::new(self.build_glyph(ch));
        self.glyphs.insert(key, Arc::clone(&glyph));
        glyph
    }

    fn build_glyph(&self, ch: char) -> Glyph {
        let empty = || Glyph {
            advance: 0.0,
            outline: Path::new(),
            bitmap: OnceLock::new(),
        };
        // Already validated in `parse`.
        let Ok(face) = Face::parse(&self.data, 0) else {
            return empty();
        };
        let id = face.glyph_index(ch).unwrap_or_else(|| {
            log::warn!(target: "text", "no glyph for {ch:?}, using .notdef");
            GlyphId(0)
        });
        let advance = face.glyph_hor_advance(id).unwrap_or(0) as f64 * self.scale;
        let mut builder = OutlineCollector {
            path: Path::new(),
            scale: self.scale,
        };
        face.outline_glyph(id, &mut builder);
        Glyph {
            advance,
            outline: builder.path,
            bitmap: OnceLock::new(),
        }
    }
}

/// Collects font-unit outlines into a pixel-space path with y pointing down.
struct OutlineCollector {
    path: Path,
    scale: f64,
}

impl OutlineCollector {
    fn pt(&self, x: f32, y: f32) -> Point {
        Point::new(x as f64 * self.scale, -(y as f64) * self.scale)
    }
}

impl OutlineBuilder for OutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.pt(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.pt(x1, y1), self.pt(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.pt(x1, y1), self.pt(x2, y2), self.pt(x, y));
        self.path.curve_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.path.close();
    }
}
