//! ShapeForge Render Library
//!
//! Fill resolution, per-shape SVG documents and CPU compositing into a PNG.
//! Rasterization uses resvg.

pub mod catalog;
mod compositor;
pub mod decode;
mod error;
pub mod export;
mod resolver;
pub mod svg;

pub use catalog::{BuiltinCatalog, PatternCatalog, StyleBody, StyleDefinition};
pub use compositor::{Compositor, Raster, RenderOptions};
pub use decode::{ResvgDecoder, ShapeDecoder};
pub use error::{RenderError, RenderResult};
pub use export::{ExportError, Passthrough, RasterTransform, export_png};
pub use resolver::{ResolvedFill, StyleResolver};
