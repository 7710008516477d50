//! Rendering configuration shared by canvases, layers and filters.

use crate::error::{CanvasError, CanvasResult};

/// Maximum canvas dimension (same as Chrome).
pub const MAX_DIMENSION: u32 = 32767;

/// Backend configuration for a canvas.
///
/// Every canvas derived from another one (filters, layer flattening,
/// decoding) inherits the configuration of its source.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    /// Maximum distance, in device pixels, between a curve and the line
    /// segments that approximate it during scan conversion.
    pub tolerance: f64,
    /// Sub-scanlines sampled per pixel row. Horizontal coverage is exact, so
    /// this is the only anti-aliasing knob.
    pub subsamples: u32,
    /// Largest accepted width or height.
    pub max_dimension: u32,
    /// Pixel density recorded in PNG metadata.
    pub ppi: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            subsamples: 4,
            max_dimension: MAX_DIMENSION,
            ppi: 72.0,
        }
    }
}

impl CanvasConfig {
    /// Check that every field is within range.
    pub fn validate(&self) -> CanvasResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(4..=16).contains(&self.subsamples) {
            return Err(CanvasError::invalid_parameter(format!(
                "subsamples must be in 4..=16, got {}",
                self.subsamples
            )));
        }
        if self.max_dimension == 0 || self.max_dimension > MAX_DIMENSION {
            return Err(CanvasError::invalid_parameter(format!(
                "max_dimension must be in 1..={MAX_DIMENSION}, got {}",
                self.max_dimension
            )));
        }
        if !(self.ppi.is_finite() && self.ppi > 0.0) {
            return Err(CanvasError::invalid_parameter(format!(
                "ppi must be positive, got {}",
                self.ppi
            )));
        }
        Ok(())
    }

    /// Validate canvas dimensions against this configuration.
    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> CanvasResult<()> {
        if width == 0 || height == 0 || width > self.max_dimension || height > self.max_dimension
        {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(())
    }
}
