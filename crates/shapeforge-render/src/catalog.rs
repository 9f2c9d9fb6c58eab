//! Pattern and texture catalog.
//!
//! Basic patterns are SVG tiles and texture patterns are SVG filter chains.
//! Both are stored as templates where `currentColor` stands for the shape's
//! base color; filter templates also carry a `FILTER_ID` placeholder for the
//! per-shape filter id.

use shapeforge_core::{PatternCategory, PatternKind};

/// Placeholder for the base color in tile and filter templates.
pub const BASE_COLOR_PLACEHOLDER: &str = "currentColor";
/// Placeholder for the filter id in filter templates.
pub const FILTER_ID_PLACEHOLDER: &str = "FILTER_ID";

/// Edge length of a basic pattern tile.
const TILE: f64 = 20.0;

/// A repeating tile, laid out in `userSpaceOnUse` units of the shape's view box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    pub width: f64,
    pub height: f64,
    pub content: &'static str,
}

impl TileSpec {
    /// `<pattern>` element with the given id and base color.
    pub fn to_svg(&self, id: &str, color: &str) -> String {
        format!(
            r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{}" height="{}">{}</pattern>"#,
            self.width,
            self.height,
            self.content.replace(BASE_COLOR_PLACEHOLDER, color)
        )
    }
}

/// A filter chain applied to the shape element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub template: &'static str,
}

impl FilterSpec {
    /// `<filter>` element with the given id and base color.
    pub fn to_svg(&self, id: &str, color: &str) -> String {
        self.template
            .replace(FILTER_ID_PLACEHOLDER, id)
            .replace(BASE_COLOR_PLACEHOLDER, color)
    }
}

/// How a pattern is realized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleBody {
    Tile(TileSpec),
    Filter(FilterSpec),
}

/// Catalog entry for one pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDefinition {
    pub pattern: PatternKind,
    /// Human-readable label.
    pub name: &'static str,
    pub category: PatternCategory,
    pub body: StyleBody,
}

/// Source of style definitions.
pub trait PatternCatalog {
    fn lookup(&self, pattern: PatternKind) -> Option<StyleDefinition>;
}

/// The built-in catalog covering every [`PatternKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn definitions(&self) -> &'static [StyleDefinition] {
        &DEFINITIONS
    }
}

impl PatternCatalog for BuiltinCatalog {
    fn lookup(&self, pattern: PatternKind) -> Option<StyleDefinition> {
        DEFINITIONS.iter().find(|d| d.pattern == pattern).copied()
    }
}

const fn tile(
    pattern: PatternKind,
    name: &'static str,
    width: f64,
    content: &'static str,
) -> StyleDefinition {
    StyleDefinition {
        pattern,
        name,
        category: PatternCategory::Basic,
        body: StyleBody::Tile(TileSpec {
            width,
            height: width,
            content,
        }),
    }
}

const fn filter(
    pattern: PatternKind,
    name: &'static str,
    template: &'static str,
) -> StyleDefinition {
    StyleDefinition {
        pattern,
        name,
        category: PatternCategory::Texture,
        body: StyleBody::Filter(FilterSpec { template }),
    }
}

static DEFINITIONS: [StyleDefinition; 17] = [
    tile(
        PatternKind::Solid,
        "Solid",
        10.0,
        r#"<rect width="10" height="10" fill="currentColor"/>"#,
    ),
    tile(
        PatternKind::StripesH,
        "Horizontal Stripes",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<rect width="20" height="10" fill="rgba(255,255,255,0.3)"/>"#,
        ),
    ),
    tile(
        PatternKind::StripesV,
        "Vertical Stripes",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<rect width="10" height="20" fill="rgba(255,255,255,0.3)"/>"#,
        ),
    ),
    tile(
        PatternKind::StripesD,
        "Diagonal Stripes",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<path d="M0,0 L20,20 M-5,15 L5,25 M15,-5 L25,5" stroke="rgba(255,255,255,0.3)" stroke-width="6" fill="none"/>"#,
        ),
    ),
    tile(
        PatternKind::Dots,
        "Polka Dots",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<circle cx="10" cy="10" r="4" fill="rgba(255,255,255,0.4)"/>"#,
        ),
    ),
    tile(
        PatternKind::Checkerboard,
        "Checkerboard",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<rect width="10" height="10" fill="rgba(255,255,255,0.3)"/>"#,
            r#"<rect x="10" y="10" width="10" height="10" fill="rgba(255,255,255,0.3)"/>"#,
        ),
    ),
    tile(
        PatternKind::Crosshatch,
        "Crosshatch",
        TILE,
        concat!(
            r#"<rect width="20" height="20" fill="currentColor"/>"#,
            r#"<path d="M0,0 L20,20 M20,0 L0,20" stroke="rgba(255,255,255,0.25)" stroke-width="2" fill="none"/>"#,
        ),
    ),
    filter(
        PatternKind::Metallic,
        "Metallic",
        r##"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feGaussianBlur in="SourceGraphic" stdDeviation="0.5" result="blur"/>
<feSpecularLighting in="blur" surfaceScale="5" specularConstant="0.75" specularExponent="20" lighting-color="#ffffff" result="specular">
<fePointLight x="-5000" y="-10000" z="20000"/>
</feSpecularLighting>
<feComposite in="specular" in2="SourceGraphic" operator="in" result="specular2"/>
<feComposite in="SourceGraphic" in2="specular2" operator="arithmetic" k1="0" k2="1" k3="1" k4="0"/>
</filter>"##,
    ),
    filter(
        PatternKind::Paper,
        "Paper / Kraft",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.04" numOctaves="5" result="noise"/>
<feDiffuseLighting in="noise" lighting-color="currentColor" surfaceScale="2" result="light">
<feDistantLight azimuth="45" elevation="60"/>
</feDiffuseLighting>
<feBlend in="SourceGraphic" in2="light" mode="multiply"/>
</filter>"#,
    ),
    filter(
        PatternKind::Watercolor,
        "Watercolor",
        r#"<filter id="FILTER_ID" x="-20%" y="-20%" width="140%" height="140%">
<feTurbulence type="fractalNoise" baseFrequency="0.02" numOctaves="3" result="noise"/>
<feDisplacementMap in="SourceGraphic" in2="noise" scale="8" xChannelSelector="R" yChannelSelector="G" result="displaced"/>
<feGaussianBlur in="displaced" stdDeviation="1.5" result="blur"/>
<feComponentTransfer>
<feFuncA type="linear" slope="0.85"/>
</feComponentTransfer>
</filter>"#,
    ),
    filter(
        PatternKind::Chalk,
        "Chalk / Crayon",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.5" numOctaves="4" result="noise"/>
<feDisplacementMap in="SourceGraphic" in2="noise" scale="3" xChannelSelector="R" yChannelSelector="G" result="displaced"/>
<feComponentTransfer in="displaced">
<feFuncA type="discrete" tableValues="0 0.3 0.6 0.8 1"/>
</feComponentTransfer>
</filter>"#,
    ),
    filter(
        PatternKind::Wood,
        "Wood Grain",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.02 0.15" numOctaves="2" result="noise"/>
<feColorMatrix in="noise" type="saturate" values="0" result="gray"/>
<feBlend in="SourceGraphic" in2="gray" mode="overlay"/>
</filter>"#,
    ),
    filter(
        PatternKind::Marble,
        "Marble",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="turbulence" baseFrequency="0.015" numOctaves="3" result="noise"/>
<feDisplacementMap in="SourceGraphic" in2="noise" scale="15" xChannelSelector="R" yChannelSelector="G" result="displaced"/>
<feGaussianBlur in="displaced" stdDeviation="0.5"/>
</filter>"#,
    ),
    filter(
        PatternKind::Fabric,
        "Fabric / Linen",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.15 0.15" numOctaves="2" result="noise"/>
<feDiffuseLighting in="noise" lighting-color="currentColor" surfaceScale="1" result="light">
<feDistantLight azimuth="135" elevation="50"/>
</feDiffuseLighting>
<feBlend in="SourceGraphic" in2="light" mode="multiply"/>
</filter>"#,
    ),
    filter(
        PatternKind::Glitter,
        "Glitter / Sparkle",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.8" numOctaves="1" result="noise"/>
<feComponentTransfer in="noise" result="spots">
<feFuncR type="discrete" tableValues="0 0 0 0 0 0 0 0 0 1"/>
<feFuncG type="discrete" tableValues="0 0 0 0 0 0 0 0 0 1"/>
<feFuncB type="discrete" tableValues="0 0 0 0 0 0 0 0 0 1"/>
</feComponentTransfer>
<feComposite in="spots" in2="SourceGraphic" operator="in" result="glitter"/>
<feBlend in="SourceGraphic" in2="glitter" mode="screen"/>
</filter>"#,
    ),
    // Static frame of the animated hue sweep.
    filter(
        PatternKind::Foil,
        "Holographic Foil",
        r##"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="turbulence" baseFrequency="0.05" numOctaves="2" result="noise"/>
<feColorMatrix in="noise" type="hueRotate" values="0" result="hue"/>
<feBlend in="SourceGraphic" in2="hue" mode="overlay"/>
<feSpecularLighting surfaceScale="3" specularConstant="1" specularExponent="30" lighting-color="#ffffff" result="specular">
<fePointLight x="-5000" y="-5000" z="10000"/>
</feSpecularLighting>
<feComposite in="specular" in2="SourceGraphic" operator="in" result="spec2"/>
<feBlend in="SourceGraphic" in2="spec2" mode="screen"/>
</filter>"##,
    ),
    filter(
        PatternKind::Concrete,
        "Concrete / Stone",
        r#"<filter id="FILTER_ID" x="0%" y="0%" width="100%" height="100%">
<feTurbulence type="fractalNoise" baseFrequency="0.1" numOctaves="4" result="noise"/>
<feColorMatrix in="noise" type="saturate" values="0" result="gray"/>
<feBlend in="SourceGraphic" in2="gray" mode="multiply" result="blend"/>
<feComponentTransfer in="blend">
<feFuncR type="linear" slope="0.9" intercept="0.05"/>
<feFuncG type="linear" slope="0.9" intercept="0.05"/>
<feFuncB type="linear" slope="0.9" intercept="0.05"/>
</feComponentTransfer>
</filter>"#,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_pattern() {
        let catalog = BuiltinCatalog;
        for pattern in PatternKind::ALL {
            let def = catalog.lookup(pattern).expect("missing definition");
            assert_eq!(def.pattern, pattern);
            assert_eq!(def.category, pattern.category());
            match def.body {
                StyleBody::Tile(_) => assert!(!pattern.is_texture(), "{pattern}"),
                StyleBody::Filter(_) => assert!(pattern.is_texture(), "{pattern}"),
            }
        }
        assert_eq!(catalog.definitions().len(), PatternKind::ALL.len());
    }

    #[test]
    fn test_tile_substitutes_color() {
        let Some(StyleDefinition {
            body: StyleBody::Tile(spec),
            ..
        }) = BuiltinCatalog.lookup(PatternKind::Dots)
        else {
            panic!("dots should be a tile");
        };
        let svg = spec.to_svg("pattern-dots-1", "#FF0000");
        assert!(svg.starts_with(r#"<pattern id="pattern-dots-1" patternUnits="userSpaceOnUse" width="20" height="20">"#));
        assert!(svg.contains(r##"fill="#FF0000""##));
        assert!(!svg.contains(BASE_COLOR_PLACEHOLDER));
    }

    #[test]
    fn test_filter_substitutes_id_and_color() {
        let Some(StyleDefinition {
            body: StyleBody::Filter(spec),
            ..
        }) = BuiltinCatalog.lookup(PatternKind::Paper)
        else {
            panic!("paper should be a filter");
        };
        let svg = spec.to_svg("filter-paper-1", "#00FF00");
        assert!(svg.contains(r#"id="filter-paper-1""#));
        assert!(svg.contains(r##"lighting-color="#00FF00""##));
        assert!(!svg.contains(FILTER_ID_PLACEHOLDER));
        assert!(!svg.contains(BASE_COLOR_PLACEHOLDER));
    }
}
