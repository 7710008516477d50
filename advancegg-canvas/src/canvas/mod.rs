//! The drawing canvas: a pixel buffer plus drawing state and current path.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::color::{demultiply, Rgba};
use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::font::Font;
use crate::gradient::Gradient;
use crate::paint::Paint;
use crate::path::Path;
use crate::raster::Rasterizer;
use crate::state::DrawingState;
use crate::style::{FillRule, LineCap, LineJoin};
use tiny_skia::Pixmap;

/// Builder for [`Canvas`].
pub struct CanvasBuilder {
    width: u32,
    height: u32,
    config: CanvasConfig,
}

impl CanvasBuilder {
    /// Create a new builder with specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            config: CanvasConfig::default(),
        }
    }

    /// Use a custom rendering configuration.
    pub fn with_config(mut self, config: CanvasConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the Canvas.
    pub fn build(self) -> CanvasResult<Canvas> {
        Canvas::with_config(self.width, self.height, self.config)
    }
}

/// An RGBA raster surface with immediate-mode drawing operations.
///
/// Pixels start fully transparent. Path coordinates are mapped through the
/// current transform when they are added, so the stored path is always in
/// device space.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Premultiplied pixel buffer.
    pub(crate) pixmap: Pixmap,
    pub(crate) config: CanvasConfig,
    pub(crate) rasterizer: Rasterizer,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
    /// Current path, in device space.
    pub(crate) path: Path,
    pub(crate) font: Option<Font>,
}

impl Canvas {
    /// Create a transparent canvas with the default configuration.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Self::with_config(width, height, CanvasConfig::default())
    }

    /// Create a new builder for more configuration options.
    pub fn builder(width: u32, height: u32) -> CanvasBuilder {
        CanvasBuilder::new(width, height)
    }

    /// Create a transparent canvas with a custom configuration.
    pub fn with_config(width: u32, height: u32, config: CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        config.check_dimensions(width, height)?;
        let pixmap =
            Pixmap::new(width, height).ok_or(CanvasError::InvalidDimensions { width, height })?;
        log::debug!(target: "canvas", "new canvas {}x{}", width, height);
        Ok(Self::from_pixmap(pixmap, config))
    }

    /// Wrap an existing pixmap; the caller has already validated its size.
    pub(crate) fn from_pixmap(pixmap: Pixmap, config: CanvasConfig) -> Self {
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            pixmap,
            rasterizer: Rasterizer::new(&config),
            config,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path: Path::new(),
            font: None,
        }
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The internal premultiplied RGBA buffer (`width * height * 4` bytes).
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA of one pixel, or `None` outside the canvas.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixmap
            .pixel(x, y)
            .map(demultiply)
    }

    /// Straight-alpha RGBA bytes for the whole canvas, row-major.
    pub fn image_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            data.extend_from_slice(&demultiply(*p));
        }
        data
    }

    /// Save the current drawing state.
    pub fn push(&mut self) {
        log::debug!(target: "canvas", "push");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state.
    pub fn pop(&mut self) {
        log::debug!(target: "canvas", "pop");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// The current drawing state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    // --- Paint setters ---

    /// Set an opaque color from components in `[0, 1]`.
    pub fn set_rgb(&mut self, r: f64, g: f64, b: f64) -> CanvasResult<()> {
        self.set_rgba(r, g, b, 1.0)
    }

    /// Set a color from components in `[0, 1]`. Out-of-range values are clamped.
    pub fn set_rgba(&mut self, r: f64, g: f64, b: f64, a: f64) -> CanvasResult<()> {
        let color = Rgba::from_components(r, g, b, a)?;
        self.set_color(color);
        Ok(())
    }

    /// Set the color from `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn set_hex_color(&mut self, hex: &str) -> CanvasResult<()> {
        let trimmed = hex.trim().trim_start_matches('#');
        if !matches!(trimmed.len(), 3 | 4 | 6 | 8) || !trimmed.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(CanvasError::ColorParseError(hex.to_string()));
        }
        self.set_color(Rgba::parse(&format!("#{trimmed}"))?);
        Ok(())
    }

    /// Set the color from any CSS color string.
    pub fn set_color_str(&mut self, color: &str) -> CanvasResult<()> {
        self.set_color(Rgba::parse(color)?);
        Ok(())
    }

    pub fn set_color(&mut self, color: Rgba) {
        log::debug!(target: "canvas", "set color {:?}", color);
        self.state.paint = Paint::Solid(color);
    }

    /// Paint with a shared gradient. Later stop changes stay visible.
    pub fn set_gradient(&mut self, gradient: &Gradient) {
        log::debug!(target: "canvas", "set gradient");
        self.state.paint = Paint::gradient(gradient);
    }

    pub fn paint(&self) -> &Paint {
        &self.state.paint
    }

    // --- Line style setters ---

    /// Set the line width. Must be finite and positive.
    pub fn set_line_width(&mut self, width: f64) -> CanvasResult<()> {
        if !(width.is_finite() && width > 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "line width must be positive, got {width}"
            )));
        }
        self.state.line_width = width;
        Ok(())
    }

    /// Set the line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Set the line join style.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Set the miter limit. Must be finite and at least 1.
    pub fn set_miter_limit(&mut self, limit: f64) -> CanvasResult<()> {
        if !(limit.is_finite() && limit >= 1.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "miter limit must be >= 1, got {limit}"
            )));
        }
        self.state.miter_limit = limit;
        Ok(())
    }

    /// Set the dash pattern used by `stroke`. An empty pattern means solid.
    pub fn set_dash(&mut self, pattern: &[f64], offset: f64) -> CanvasResult<()> {
        validate_dash(pattern)?;
        if !offset.is_finite() {
            return Err(CanvasError::invalid_parameter("dash offset must be finite"));
        }
        self.state.line_dash = pattern.to_vec();
        self.state.line_dash_offset = offset;
        Ok(())
    }

    /// Multiply every painted alpha by `alpha`, clamped to `[0, 1]`.
    pub fn set_global_alpha(&mut self, alpha: f64) -> CanvasResult<()> {
        if alpha.is_nan() {
            return Err(CanvasError::invalid_parameter("global alpha is NaN"));
        }
        self.state.global_alpha = alpha.clamp(0.0, 1.0) as f32;
        Ok(())
    }

    /// Choose how `fill` treats self-overlapping paths. Strokes always use nonzero.
    pub fn set_fill_rule(&mut self, rule: FillRule) {
        log::debug!(target: "canvas", "set fill rule {:?}", rule);
        self.state.fill_rule = rule;
    }

    pub fn fill_rule(&self) -> FillRule {
        self.state.fill_rule
    }
}

pub(crate) fn validate_dash(pattern: &[f64]) -> CanvasResult<()> {
    if pattern.iter().any(|&v| !v.is_finite() || v < 0.0) {
        return Err(CanvasError::invalid_parameter(
            "dash lengths must be finite and non-negative",
        ));
    }
    Ok(())
}
