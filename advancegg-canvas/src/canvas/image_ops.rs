//! Filters, encoding and decoding for Canvas.
//!
//! Every filter returns a new canvas that owns its own pixels and inherits
//! the source configuration; the source is never modified.

use super::Canvas;
use crate::codec;
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::filter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path as FsPath;
use tiny_skia::Pixmap;

impl Canvas {
    fn derived(&self, pixmap: Pixmap) -> Canvas {
        Canvas::from_pixmap(pixmap, self.config.clone())
    }

    /// Gaussian blur; see [`filter::blur`].
    pub fn apply_blur(&self, radius: f64) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::blur(&self.pixmap, radius)?))
    }

    pub fn apply_grayscale(&self) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::grayscale(&self.pixmap)))
    }

    /// Multiply color channels by `factor` (must be non-negative).
    pub fn apply_brightness(&self, factor: f64) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::brightness(&self.pixmap, factor)?))
    }

    /// Scale contrast around mid-gray by `factor` (must be non-negative).
    pub fn apply_contrast(&self, factor: f64) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::contrast(&self.pixmap, factor)?))
    }

    pub fn apply_invert(&self) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::invert(&self.pixmap)))
    }

    pub fn apply_sepia(&self) -> CanvasResult<Canvas> {
        Ok(self.derived(filter::sepia(&self.pixmap)))
    }

    // --- Encoding ---

    /// Encode the canvas as PNG, using the configured pixel density.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        codec::encode_png(&self.pixmap, self.config.ppi)
    }

    /// Encode the canvas as JPEG with `quality` in `0..=100`.
    pub fn to_jpeg(&self, quality: i32) -> CanvasResult<Vec<u8>> {
        codec::encode_jpeg(&self.pixmap, quality)
    }

    pub fn save_png(&self, path: impl AsRef<FsPath>) -> CanvasResult<()> {
        let path = path.as_ref();
        log::debug!(target: "canvas", "save_png {}", path.display());
        write_file(path, &self.to_png()?)
    }

    pub fn save_jpeg(&self, path: impl AsRef<FsPath>, quality: i32) -> CanvasResult<()> {
        let path = path.as_ref();
        log::debug!(target: "canvas", "save_jpeg {} quality {}", path.display(), quality);
        write_file(path, &self.to_jpeg(quality)?)
    }

    // --- Decoding ---

    /// Create a canvas from PNG data.
    pub fn from_png_bytes(bytes: &[u8]) -> CanvasResult<Canvas> {
        Self::from_png_bytes_with_config(bytes, CanvasConfig::default())
    }

    pub fn from_png_bytes_with_config(bytes: &[u8], config: CanvasConfig) -> CanvasResult<Canvas> {
        config.validate()?;
        let pixmap = codec::decode_png(bytes)?;
        config.check_dimensions(pixmap.width(), pixmap.height())?;
        Ok(Canvas::from_pixmap(pixmap, config))
    }

    /// Create a canvas from a PNG file.
    pub fn load_png(path: impl AsRef<FsPath>) -> CanvasResult<Canvas> {
        let bytes = std::fs::read(path)?;
        Self::from_png_bytes(&bytes)
    }
}

fn write_file(path: &FsPath, bytes: &[u8]) -> CanvasResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
