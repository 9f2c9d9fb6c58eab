//! Hand-off of a finished raster to an external image transform.

use crate::compositor::Compositor;
use crate::catalog::PatternCatalog;
use crate::decode::{BoxFuture, ShapeDecoder};
use crate::error::RenderError;
use shapeforge_core::Shape;
use thiserror::Error;

/// Names accepted by [`provider`].
pub const PROVIDERS: [&str; 1] = [Passthrough::NAME];

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unknown export provider: {0}")]
    UnknownProvider(String),
    /// Failure reported by a [`RasterTransform`]. [`Passthrough`] never
    /// fails; external image services return this.
    #[error("Conversion failed: {0}")]
    Conversion(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Opaque `PNG bytes -> bytes` transform applied to an exported raster.
pub trait RasterTransform {
    fn name(&self) -> &str;

    fn convert<'a>(&'a self, png: Vec<u8>) -> BoxFuture<'a, Result<Vec<u8>, ExportError>>;
}

/// Returns the image unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Passthrough {
    pub const NAME: &'static str = "passthrough";
}

impl RasterTransform for Passthrough {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn convert<'a>(&'a self, png: Vec<u8>) -> BoxFuture<'a, Result<Vec<u8>, ExportError>> {
        Box::pin(async move { Ok(png) })
    }
}

/// Look up a transform by name.
pub fn provider(name: &str) -> Result<Box<dyn RasterTransform>, ExportError> {
    match name {
        Passthrough::NAME => Ok(Box::new(Passthrough)),
        other => Err(ExportError::UnknownProvider(other.to_string())),
    }
}

/// Render, encode as PNG and run the result through `transform`.
pub async fn export_png<D: ShapeDecoder, C: PatternCatalog>(
    compositor: &Compositor<D, C>,
    shapes: &[Shape],
    width: u32,
    height: u32,
    transform: &dyn RasterTransform,
) -> Result<Vec<u8>, ExportError> {
    let raster = compositor.render(shapes, width, height).await?;
    if raster.skipped() > 0 {
        log::warn!("Exporting with {} shape(s) missing", raster.skipped());
    }
    let png = raster.encode_png()?;
    log::info!("Encoded {}x{} PNG: {} bytes", width, height, png.len());
    transform.convert(png).await
}
