//! Pure Rust immediate-mode 2D graphics engine.
//!
//! A [`Canvas`] owns an RGBA pixel buffer, a drawing state and a current
//! path. Paths are scan-converted with the nonzero winding rule into
//! anti-aliased coverage and blended source-over with the current paint.
//! [`LayerManager`] composites named canvases with per-layer opacity, the
//! filter operations produce new canvases, and text is drawn from
//! TrueType/OpenType outlines. It uses:
//! - `tiny-skia` for premultiplied pixel storage
//! - `kurbo` for curve flattening, stroke outlines and affine transforms
//! - `ttf-parser` for glyph outlines and metrics
//! - `png` and `image` for PNG/JPEG encoding
//!
//! # Example
//!
//! ```rust,no_run
//! use advancegg_canvas::Canvas;
//!
//! # fn main() -> advancegg_canvas::CanvasResult<()> {
//! let mut canvas = Canvas::new(100, 100)?;
//! canvas.set_rgb(1.0, 0.0, 0.0)?;
//! canvas.draw_circle(50.0, 50.0, 30.0);
//! canvas.fill();
//! canvas.save_png("circle.png")?;
//! # Ok(())
//! # }
//! ```

mod canvas;
pub mod codec;
mod color;
mod composite;
mod config;
mod error;
pub mod filter;
mod font;
mod gradient;
mod layers;
mod paint;
mod path;
pub mod raster;
pub mod shapes;
mod state;
mod style;

// Re-export public API
pub use canvas::{Canvas, CanvasBuilder};
pub use color::Rgba;
pub use config::{CanvasConfig, MAX_DIMENSION};
pub use error::{CanvasError, CanvasResult, ErrorKind};
pub use font::{Font, Glyph};
pub use gradient::{Gradient, GradientData, GradientShape, GradientStop};
pub use layers::{Layer, LayerManager};
pub use paint::Paint;
pub use path::{Path, PathCommand, PathSink};
pub use raster::{CoverageMask, Rasterizer};
pub use state::DrawingState;
pub use style::{FillRule, LineCap, LineJoin, StrokeStyle, TextAlign};
