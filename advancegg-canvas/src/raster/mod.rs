//! Scan conversion of fills and strokes into per-pixel coverage.

mod mask;
mod scanline;
mod stroke;

pub use mask::CoverageMask;
pub(crate) use scanline::Clip;

use crate::config::CanvasConfig;
use crate::path::Path;
use crate::style::{FillRule, StrokeStyle};
use kurbo::BezPath;

/// Turns device-space paths into coverage masks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    tolerance: f64,
    subsamples: u32,
}

impl Rasterizer {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            subsamples: config.subsamples,
        }
    }

    /// Coverage of `path` filled with `rule`, clipped to a `width`×`height` canvas.
    pub fn fill(&self, path: &Path, rule: FillRule, width: u32, height: u32) -> Option<CoverageMask> {
        self.fill_bez(&path.to_bez_path(), rule, Clip::canvas(width, height))
    }

    /// Coverage of `path` stroked with `style`, clipped to a `width`×`height` canvas.
    pub fn stroke(
        &self,
        path: &Path,
        style: &StrokeStyle,
        width: u32,
        height: u32,
    ) -> Option<CoverageMask> {
        if !(style.width > 0.0 && style.width.is_finite()) || path.is_empty() {
            return None;
        }
        let outline = stroke::stroke_outline(&path.to_bez_path(), style, self.tolerance);
        self.fill_bez(&outline, FillRule::NonZero, Clip::canvas(width, height))
    }

    pub(crate) fn fill_bez(&self, path: &BezPath, rule: FillRule, clip: Clip) -> Option<CoverageMask> {
        let mut edges = scanline::build_edges(path.iter(), self.tolerance);
        scanline::rasterize(&mut edges, rule, clip, self.subsamples)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(&CanvasConfig::default())
    }
}
