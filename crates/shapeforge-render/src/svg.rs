//! Per-shape SVG documents.

use crate::resolver::ResolvedFill;
use shapeforge_core::Shape;
use shapeforge_core::shapes::ShapeElement;
use std::fmt::Write;

/// Build a self-contained SVG for one shape, sized to its bounding box.
///
/// The kind's element is drawn in a `0 0 100 100` view box stretched to the
/// shape's width and height. Rotation is not part of the document; the
/// compositor applies it when placing the bitmap.
pub fn shape_document(shape: &Shape, fill: &ResolvedFill) -> String {
    let mut attrs = format!(r#"fill="{}""#, fill.fill_value());
    if let Some(filter_id) = fill.filter_id() {
        let _ = write!(attrs, r#" filter="url(#{filter_id})""#);
    }

    let element = match shape.definition().element {
        ShapeElement::Rect => format!(r#"<rect x="5" y="5" width="90" height="90" {attrs}/>"#),
        ShapeElement::Ellipse => format!(r#"<ellipse cx="50" cy="50" rx="45" ry="45" {attrs}/>"#),
        ShapeElement::Polygon(points) => format!(r#"<polygon points="{points}" {attrs}/>"#),
        ShapeElement::Path(d) => format!(r#"<path d="{d}" {attrs}/>"#),
    };

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 100 100" preserveAspectRatio="none"><defs>{}</defs>{element}</svg>"#,
        shape.width,
        shape.height,
        fill.defs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StyleResolver;
    use shapeforge_core::{PatternKind, ShapeColor, ShapeKind};

    fn document(kind: ShapeKind, pattern: PatternKind) -> String {
        let mut shape = Shape::new(kind, 0.0, 0.0, 1, ShapeColor::rgb(0xE7, 0x4C, 0x3C));
        shape.width = 120.0;
        shape.height = 80.5;
        shape.pattern = pattern;
        let fill = StyleResolver::builtin()
            .resolve_fill(shape.pattern, shape.id, shape.fill)
            .unwrap();
        shape_document(&shape, &fill)
    }

    #[test]
    fn test_document_is_sized_to_shape() {
        let svg = document(ShapeKind::Rectangle, PatternKind::Solid);
        assert!(svg.contains(r#"width="120" height="80.5" viewBox="0 0 100 100" preserveAspectRatio="none""#));
        assert!(svg.contains(r##"<rect x="5" y="5" width="90" height="90" fill="#E74C3C"/>"##));
        assert!(svg.contains("<defs></defs>"));
    }

    #[test]
    fn test_element_per_kind() {
        assert!(document(ShapeKind::Circle, PatternKind::Solid).contains("<ellipse "));
        assert!(document(ShapeKind::Triangle, PatternKind::Solid).contains(r#"<polygon points="50,5 95,95 5,95""#));
        assert!(document(ShapeKind::Arrow, PatternKind::Solid).contains(r#"<path d="M5,40"#));
    }

    #[test]
    fn test_pattern_and_filter_references() {
        let tiled = document(ShapeKind::Hexagon, PatternKind::Checkerboard);
        assert!(tiled.contains(r#"fill="url(#pattern-checkerboard-"#));
        assert!(tiled.contains("<defs><pattern "));

        let textured = document(ShapeKind::Star, PatternKind::Chalk);
        assert!(textured.contains(r##"fill="#E74C3C" filter="url(#filter-chalk-"##));
        assert!(textured.contains("<defs><filter "));
    }
}
