//! Flattening a shape list into one raster.

use crate::catalog::{BuiltinCatalog, PatternCatalog};
use crate::decode::{ResvgDecoder, ShapeDecoder};
use crate::error::{RenderError, RenderResult};
use crate::resolver::StyleResolver;
use crate::svg::shape_document;
use peniko::Color;
use resvg::tiny_skia::{self, FilterQuality, Pixmap, PixmapPaint, Transform};
use shapeforge_core::{Shape, ShapeColor};

/// Compositor settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Opaque fill behind all shapes.
    pub background: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(255, 255, 255, 255),
        }
    }
}

/// A finished, flattened image.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: Pixmap,
    skipped: usize,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Number of shapes left out because they failed to render.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight (non-premultiplied) RGBA at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Straight RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let rgba = self.to_rgba8();
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
        }
        Ok(png_data)
    }
}

/// Draws shapes in ascending z-order, each rotated about its own center.
pub struct Compositor<D = ResvgDecoder, C = BuiltinCatalog> {
    resolver: StyleResolver<C>,
    decoder: D,
    options: RenderOptions,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Compositor using the built-in catalog and the resvg decoder.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_parts(StyleResolver::builtin(), ResvgDecoder::new(), options)
    }
}

impl<D: ShapeDecoder, C: PatternCatalog> Compositor<D, C> {
    pub fn with_parts(resolver: StyleResolver<C>, decoder: D, options: RenderOptions) -> Self {
        Self {
            resolver,
            decoder,
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `shapes` onto a `width` x `height` canvas.
    ///
    /// Shapes are drawn one at a time in z-order, each decode awaited before
    /// the next shape starts. A shape that fails to resolve or decode is
    /// logged and left out; only an unusable canvas size fails the batch.
    pub async fn render(&self, shapes: &[Shape], width: u32, height: u32) -> RenderResult<Raster> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let mut canvas =
            Pixmap::new(width, height).ok_or(RenderError::PixmapAlloc { width, height })?;
        let bg = ShapeColor::from(self.options.background);
        canvas.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        let mut sorted: Vec<&Shape> = shapes.iter().collect();
        sorted.sort_by_key(|s| s.z_index);

        let mut skipped = 0;
        for shape in sorted {
            match self.rasterize_shape(shape).await {
                Ok(bitmap) => draw_shape(&mut canvas, shape, &bitmap),
                Err(err) => {
                    log::error!("Failed to render shape {}: {}", shape.id, err);
                    skipped += 1;
                }
            }
        }

        log::debug!(
            "Rendered {} of {} shapes at {}x{}",
            shapes.len() - skipped,
            shapes.len(),
            width,
            height
        );
        Ok(Raster {
            pixmap: canvas,
            skipped,
        })
    }

    async fn rasterize_shape(&self, shape: &Shape) -> RenderResult<Pixmap> {
        let fill = self.resolver.resolve_fill(shape.pattern, shape.id, shape.fill)?;
        let document = shape_document(shape, &fill);
        self.decoder.decode(&document).await
    }
}

/// Stretch `bitmap` over the shape's bounding box and rotate it about the center.
fn draw_shape(canvas: &mut Pixmap, shape: &Shape, bitmap: &Pixmap) {
    let top_left = shape.top_left();
    let transform = Transform::from_rotate_at(shape.rotation as f32, shape.x as f32, shape.y as f32)
        .pre_translate(top_left.x as f32, top_left.y as f32)
        .pre_scale(
            shape.width as f32 / bitmap.width() as f32,
            shape.height as f32 / bitmap.height() as f32,
        );
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    canvas.draw_pixmap(0, 0, bitmap.as_ref(), &paint, transform, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StyleDefinition;
    use crate::decode::BoxFuture;
    use shapeforge_core::{PatternKind, ShapeKind};

    const RED: ShapeColor = ShapeColor::rgb(255, 0, 0);
    const BLUE: ShapeColor = ShapeColor::rgb(0, 0, 255);
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn rect(x: f64, y: f64, w: f64, h: f64, z_index: i64, fill: ShapeColor) -> Shape {
        let mut shape = Shape::new(ShapeKind::Rectangle, x, y, z_index, fill);
        shape.width = w;
        shape.height = h;
        shape
    }

    fn rgba(color: ShapeColor) -> [u8; 4] {
        [color.r, color.g, color.b, 255]
    }

    fn assert_near(actual: Option<[u8; 4]>, expected: [u8; 4]) {
        let actual = actual.expect("pixel out of bounds");
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 2, "{actual:?} != {expected:?}");
        }
    }

    /// Catalog that knows no patterns at all.
    struct EmptyCatalog;

    impl PatternCatalog for EmptyCatalog {
        fn lookup(&self, _: PatternKind) -> Option<StyleDefinition> {
            None
        }
    }

    /// Decoder that rejects documents drawn in a given color.
    struct RejectColor(&'static str);

    impl ShapeDecoder for RejectColor {
        fn decode<'a>(&'a self, svg: &'a str) -> BoxFuture<'a, RenderResult<Pixmap>> {
            Box::pin(async move {
                if svg.contains(self.0) {
                    Err(RenderError::Decode("rejected".into()))
                } else {
                    ResvgDecoder::new().rasterize(svg)
                }
            })
        }
    }

    #[test]
    fn test_background_fill() {
        let raster = pollster::block_on(Compositor::new().render(&[], 8, 4)).unwrap();
        assert_eq!((raster.width(), raster.height()), (8, 4));
        assert_eq!(raster.pixel(0, 0), Some(WHITE));
        assert_eq!(raster.pixel(7, 3), Some(WHITE));
        assert_eq!(raster.pixel(8, 0), None);

        let options = RenderOptions {
            background: Color::from_rgba8(10, 20, 30, 255),
        };
        let raster =
            pollster::block_on(Compositor::with_options(options).render(&[], 2, 2)).unwrap();
        assert_eq!(raster.pixel(1, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_zero_size_fails_batch() {
        let shapes = [rect(10.0, 10.0, 20.0, 20.0, 1, RED)];
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let result = pollster::block_on(Compositor::new().render(&shapes, w, h));
            assert!(matches!(result, Err(RenderError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn test_shape_lands_at_top_left() {
        // Element is inset 5% of the box: 100x100 at center (60, 60) covers 15..105.
        let shapes = [rect(60.0, 60.0, 100.0, 100.0, 1, RED)];
        let raster = pollster::block_on(Compositor::new().render(&shapes, 120, 120)).unwrap();
        assert_near(raster.pixel(60, 60), rgba(RED));
        assert_near(raster.pixel(20, 20), rgba(RED));
        assert_near(raster.pixel(12, 60), WHITE);
        assert_near(raster.pixel(108, 60), WHITE);
    }

    #[test]
    fn test_higher_z_paints_on_top() {
        // Red first in insertion order but above blue.
        let shapes = [
            rect(50.0, 50.0, 100.0, 100.0, 2, RED),
            rect(50.0, 50.0, 100.0, 100.0, 1, BLUE),
        ];
        let raster = pollster::block_on(Compositor::new().render(&shapes, 100, 100)).unwrap();
        assert_near(raster.pixel(50, 50), rgba(RED));
    }

    #[test]
    fn test_equal_z_keeps_insertion_order() {
        let shapes = [
            rect(50.0, 50.0, 100.0, 100.0, 1, RED),
            rect(50.0, 50.0, 100.0, 100.0, 1, BLUE),
        ];
        let raster = pollster::block_on(Compositor::new().render(&shapes, 100, 100)).unwrap();
        assert_near(raster.pixel(50, 50), rgba(BLUE));
    }

    #[test]
    fn test_rotation_about_center() {
        // 100x20 bar centered at (100, 100); (100, 70) is only covered when upright.
        let mut bar = rect(100.0, 100.0, 100.0, 20.0, 1, RED);
        let raster = pollster::block_on(
            Compositor::new().render(std::slice::from_ref(&bar), 200, 200),
        )
        .unwrap();
        assert_near(raster.pixel(100, 70), WHITE);
        assert_near(raster.pixel(70, 100), rgba(RED));

        bar.rotation = 90.0;
        let raster = pollster::block_on(Compositor::new().render(&[bar], 200, 200)).unwrap();
        assert_near(raster.pixel(100, 70), rgba(RED));
        assert_near(raster.pixel(70, 100), WHITE);
    }

    #[test]
    fn test_unknown_pattern_skips_only_that_shape() {
        let mut dotted = rect(30.0, 50.0, 40.0, 40.0, 2, BLUE);
        dotted.pattern = PatternKind::Dots;
        let shapes = [
            rect(70.0, 50.0, 40.0, 40.0, 1, RED),
            dotted,
            rect(50.0, 20.0, 20.0, 20.0, 3, RED),
        ];

        let compositor = Compositor::with_parts(
            StyleResolver::new(EmptyCatalog),
            ResvgDecoder::new(),
            RenderOptions::default(),
        );
        let raster = pollster::block_on(compositor.render(&shapes, 100, 100)).unwrap();
        assert_eq!(raster.skipped(), 1);
        assert_near(raster.pixel(30, 50), WHITE);
        assert_near(raster.pixel(70, 50), rgba(RED));
        assert_near(raster.pixel(50, 20), rgba(RED));
    }

    #[test]
    fn test_decode_failure_skips_only_that_shape() {
        let shapes = [
            rect(25.0, 50.0, 40.0, 40.0, 1, RED),
            rect(75.0, 50.0, 40.0, 40.0, 2, BLUE),
        ];
        let compositor = Compositor::with_parts(
            StyleResolver::builtin(),
            RejectColor("#0000FF"),
            RenderOptions::default(),
        );
        let raster = pollster::block_on(compositor.render(&shapes, 100, 100)).unwrap();
        assert_eq!(raster.skipped(), 1);
        assert_near(raster.pixel(25, 50), rgba(RED));
        assert_near(raster.pixel(75, 50), WHITE);
    }

    #[test]
    fn test_every_pattern_renders() {
        let shapes: Vec<Shape> = PatternKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, pattern)| {
                let mut shape = rect(30.0 + 40.0 * i as f64, 30.0, 40.0, 40.0, 1, BLUE);
                shape.pattern = pattern;
                shape
            })
            .collect();
        let raster = pollster::block_on(Compositor::new().render(&shapes, 700, 60)).unwrap();
        assert_eq!(raster.skipped(), 0);
    }

    #[test]
    fn test_encode_png_signature() {
        let shapes = [rect(5.0, 5.0, 20.0, 20.0, 1, RED)];
        let raster = pollster::block_on(Compositor::new().render(&shapes, 10, 10)).unwrap();
        let png = raster.encode_png().unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        assert_eq!(raster.to_rgba8().len(), 10 * 10 * 4);
    }
}
