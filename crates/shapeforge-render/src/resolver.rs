//! Fill resolution: base color plus pattern to something an SVG element can use.

use crate::catalog::{BuiltinCatalog, PatternCatalog, StyleBody};
use crate::error::{RenderError, RenderResult};
use shapeforge_core::{PatternKind, ShapeColor, ShapeId};

/// A fill ready to be written into a shape document.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedFill {
    /// Plain color, no definitions needed.
    Color(ShapeColor),
    /// Tiled pattern, referenced as `url(#id)`.
    Pattern { id: String, defs: String },
    /// Flat color with a filter applied to the element.
    Filtered {
        color: ShapeColor,
        filter_id: String,
        defs: String,
    },
}

impl ResolvedFill {
    /// Contents for the document's `<defs>`.
    pub fn defs(&self) -> &str {
        match self {
            ResolvedFill::Color(_) => "",
            ResolvedFill::Pattern { defs, .. } | ResolvedFill::Filtered { defs, .. } => defs,
        }
    }

    /// Value of the element's `fill` attribute.
    pub fn fill_value(&self) -> String {
        match self {
            ResolvedFill::Color(color) | ResolvedFill::Filtered { color, .. } => color.to_hex(),
            ResolvedFill::Pattern { id, .. } => format!("url(#{id})"),
        }
    }

    /// Id of the filter to apply to the element, if any.
    pub fn filter_id(&self) -> Option<&str> {
        match self {
            ResolvedFill::Filtered { filter_id, .. } => Some(filter_id),
            _ => None,
        }
    }
}

/// Resolves fills against a [`PatternCatalog`].
///
/// Generated ids are namespaced by shape so two shapes using the same pattern
/// never share a definition.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver<C = BuiltinCatalog> {
    catalog: C,
}

impl StyleResolver {
    /// Resolver backed by the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(BuiltinCatalog)
    }
}

impl<C: PatternCatalog> StyleResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn resolve_fill(
        &self,
        pattern: PatternKind,
        shape_id: ShapeId,
        base_color: ShapeColor,
    ) -> RenderResult<ResolvedFill> {
        if pattern == PatternKind::Solid {
            return Ok(ResolvedFill::Color(base_color));
        }

        let definition = self
            .catalog
            .lookup(pattern)
            .ok_or(RenderError::UnknownPattern(pattern))?;
        let color = base_color.to_hex();

        Ok(match definition.body {
            StyleBody::Tile(tile) => {
                let id = format!("pattern-{pattern}-{shape_id}");
                let defs = tile.to_svg(&id, &color);
                ResolvedFill::Pattern { id, defs }
            }
            StyleBody::Filter(filter) => {
                let filter_id = format!("filter-{pattern}-{shape_id}");
                let defs = filter.to_svg(&filter_id, &color);
                ResolvedFill::Filtered {
                    color: base_color,
                    filter_id,
                    defs,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StyleDefinition;

    const BLUE: ShapeColor = ShapeColor::rgb(0x4A, 0x90, 0xD9);

    struct EmptyCatalog;

    impl PatternCatalog for EmptyCatalog {
        fn lookup(&self, _: PatternKind) -> Option<StyleDefinition> {
            None
        }
    }

    #[test]
    fn test_solid_is_direct_color() {
        let fill = StyleResolver::builtin()
            .resolve_fill(PatternKind::Solid, ShapeId::new_v4(), BLUE)
            .unwrap();
        assert_eq!(fill, ResolvedFill::Color(BLUE));
        assert_eq!(fill.defs(), "");
        assert_eq!(fill.fill_value(), "#4A90D9");
        assert_eq!(fill.filter_id(), None);
    }

    #[test]
    fn test_basic_pattern_is_namespaced_by_shape() {
        let resolver = StyleResolver::builtin();
        let a = ShapeId::new_v4();
        let b = ShapeId::new_v4();
        let fill_a = resolver.resolve_fill(PatternKind::StripesH, a, BLUE).unwrap();
        let fill_b = resolver.resolve_fill(PatternKind::StripesH, b, BLUE).unwrap();

        assert_eq!(fill_a.fill_value(), format!("url(#pattern-stripes-h-{a})"));
        assert!(fill_a.defs().contains(&format!(r#"id="pattern-stripes-h-{a}""#)));
        assert!(fill_a.defs().contains("#4A90D9"));
        assert_ne!(fill_a.defs(), fill_b.defs());
    }

    #[test]
    fn test_texture_keeps_flat_color_and_filter() {
        let id = ShapeId::new_v4();
        let fill = StyleResolver::builtin()
            .resolve_fill(PatternKind::Marble, id, BLUE)
            .unwrap();
        let expected = format!("filter-marble-{id}");
        assert_eq!(fill.fill_value(), "#4A90D9");
        assert_eq!(fill.filter_id(), Some(expected.as_str()));
        assert!(fill.defs().contains(&format!(r#"<filter id="{expected}""#)));
    }

    #[test]
    fn test_catalog_miss_is_an_error() {
        let resolver = StyleResolver::new(EmptyCatalog);
        let err = resolver
            .resolve_fill(PatternKind::Dots, ShapeId::new_v4(), BLUE)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownPattern(PatternKind::Dots)));

        // Solid never consults the catalog.
        assert!(resolver.resolve_fill(PatternKind::Solid, ShapeId::new_v4(), BLUE).is_ok());
    }
}
