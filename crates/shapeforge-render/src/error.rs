//! Render error types.

use resvg::usvg;
use shapeforge_core::PatternKind;
use thiserror::Error;

/// Rendering errors.
///
/// Everything except [`RenderError::InvalidDimensions`] is scoped to a single
/// shape; the compositor logs those and moves on.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid output size: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("No style definition for pattern: {0}")]
    UnknownPattern(PatternKind),
    #[error("SVG error: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Failed to allocate {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    /// Failure reported by a [`ShapeDecoder`](crate::ShapeDecoder) other than
    /// the resvg one, which maps its errors to the variants above.
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
