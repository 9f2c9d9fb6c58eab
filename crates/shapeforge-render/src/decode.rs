//! Turning shape documents into bitmaps.

use crate::error::{RenderError, RenderResult};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::future::Future;
use std::pin::Pin;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Rasterizes one SVG document.
///
/// Decoding is latent and may fail per document. The returned bitmap is
/// stretched over the shape's bounding box when composited, so its pixel size
/// only affects sampling quality.
pub trait ShapeDecoder {
    fn decode<'a>(&'a self, svg: &'a str) -> BoxFuture<'a, RenderResult<Pixmap>>;
}

/// CPU decoder backed by resvg.
pub struct ResvgDecoder {
    options: usvg::Options<'static>,
}

impl Default for ResvgDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResvgDecoder {
    pub fn new() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Parse and render synchronously into a pixmap covering the document
    /// size rounded up to whole pixels.
    pub fn rasterize(&self, svg: &str) -> RenderResult<Pixmap> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let size = tree.size();
        let width = size.width().ceil().max(1.0) as u32;
        let height = size.height().ceil().max(1.0) as u32;

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })?;
        let scale =
            Transform::from_scale(width as f32 / size.width(), height as f32 / size.height());
        resvg::render(&tree, scale, &mut pixmap.as_mut());
        Ok(pixmap)
    }
}

impl ShapeDecoder for ResvgDecoder {
    fn decode<'a>(&'a self, svg: &'a str) -> BoxFuture<'a, RenderResult<Pixmap>> {
        Box::pin(async move { self.rasterize(svg) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterize_rounds_up() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20.5" height="10" viewBox="0 0 100 100" preserveAspectRatio="none"><rect width="100" height="100" fill="#FF0000"/></svg>"##;
        let pixmap = pollster::block_on(ResvgDecoder::new().decode(svg)).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (21, 10));
        let center = pixmap.pixel(10, 5).unwrap().demultiply();
        assert_eq!((center.red(), center.green(), center.blue(), center.alpha()), (255, 0, 0, 255));
    }

    #[test]
    fn test_malformed_document_fails() {
        let result = ResvgDecoder::new().rasterize("<svg");
        assert!(matches!(result, Err(RenderError::Svg(_))));
    }
}
