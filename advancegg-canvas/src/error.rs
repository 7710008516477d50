//! Error types for advancegg-canvas.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas, layer, filter, text and codec operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A handle that was never issued or has already been destroyed.
    #[error("Invalid handle: {0}")]
    InvalidHandle(i64),

    /// A parameter outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid gradient stop offset (must be 0.0-1.0).
    #[error("Invalid gradient stop offset: {0} (must be 0.0-1.0)")]
    InvalidGradientStop(f64),

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// No layer with the given name.
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    /// A layer with the given name already exists.
    #[error("Duplicate layer name: {0}")]
    DuplicateLayer(String),

    /// Font file missing, unreadable or not a font.
    #[error("Failed to load font {}: {reason}", path.display())]
    FontLoadFailure { path: PathBuf, reason: String },

    /// Text drawing was requested before any font was loaded.
    #[error("No font loaded")]
    NoFontLoaded,

    /// PNG encoding or decoding error.
    #[error("PNG error: {0}")]
    PngError(String),

    /// JPEG encoding error.
    #[error("JPEG error: {0}")]
    JpegError(String),

    /// I/O error while reading or writing a file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse error classification shared with the handle layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CreationFailure,
    InvalidHandle,
    InvalidParameter,
    FontLoadFailure,
    EncodeFailure,
}

impl CanvasError {
    /// The error kind this error is reported as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CanvasError::InvalidDimensions { .. } => ErrorKind::CreationFailure,
            CanvasError::InvalidHandle(_) => ErrorKind::InvalidHandle,
            CanvasError::InvalidParameter(_)
            | CanvasError::InvalidGradientStop(_)
            | CanvasError::ColorParseError(_)
            | CanvasError::UnknownLayer(_)
            | CanvasError::DuplicateLayer(_)
            | CanvasError::NoFontLoaded => ErrorKind::InvalidParameter,
            CanvasError::FontLoadFailure { .. } => ErrorKind::FontLoadFailure,
            CanvasError::PngError(_) | CanvasError::JpegError(_) | CanvasError::Io(_) => {
                ErrorKind::EncodeFailure
            }
        }
    }

    pub(crate) fn invalid_parameter(msg: impl Into<String>) -> Self {
        CanvasError::InvalidParameter(msg.into())
    }
}

impl From<png::EncodingError> for CanvasError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(e) => CanvasError::Io(e),
            other => CanvasError::PngError(other.to_string()),
        }
    }
}

impl From<png::DecodingError> for CanvasError {
    fn from(err: png::DecodingError) -> Self {
        match err {
            png::DecodingError::IoError(e) => CanvasError::Io(e),
            other => CanvasError::PngError(other.to_string()),
        }
    }
}

impl From<image::ImageError> for CanvasError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => CanvasError::Io(e),
            other => CanvasError::JpegError(other.to_string()),
        }
    }
}
