//! Symbolic fill pattern identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pattern category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternCategory {
    /// Tileable fill built from repeating simple geometry.
    Basic,
    /// Post-process filter simulating a material, parameterized by base color.
    Texture,
}

/// Fill pattern of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    #[default]
    Solid,
    StripesH,
    StripesV,
    StripesD,
    Dots,
    Checkerboard,
    Crosshatch,
    Metallic,
    Paper,
    Watercolor,
    Chalk,
    Wood,
    Marble,
    Fabric,
    Glitter,
    Foil,
    Concrete,
}

impl PatternKind {
    pub const ALL: [PatternKind; 17] = [
        PatternKind::Solid,
        PatternKind::StripesH,
        PatternKind::StripesV,
        PatternKind::StripesD,
        PatternKind::Dots,
        PatternKind::Checkerboard,
        PatternKind::Crosshatch,
        PatternKind::Metallic,
        PatternKind::Paper,
        PatternKind::Watercolor,
        PatternKind::Chalk,
        PatternKind::Wood,
        PatternKind::Marble,
        PatternKind::Fabric,
        PatternKind::Glitter,
        PatternKind::Foil,
        PatternKind::Concrete,
    ];

    pub fn category(self) -> PatternCategory {
        match self {
            PatternKind::Solid
            | PatternKind::StripesH
            | PatternKind::StripesV
            | PatternKind::StripesD
            | PatternKind::Dots
            | PatternKind::Checkerboard
            | PatternKind::Crosshatch => PatternCategory::Basic,
            _ => PatternCategory::Texture,
        }
    }

    pub fn is_texture(self) -> bool {
        self.category() == PatternCategory::Texture
    }

    /// Wire name, also used to key generated SVG definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Solid => "solid",
            PatternKind::StripesH => "stripes-h",
            PatternKind::StripesV => "stripes-v",
            PatternKind::StripesD => "stripes-d",
            PatternKind::Dots => "dots",
            PatternKind::Checkerboard => "checkerboard",
            PatternKind::Crosshatch => "crosshatch",
            PatternKind::Metallic => "metallic",
            PatternKind::Paper => "paper",
            PatternKind::Watercolor => "watercolor",
            PatternKind::Chalk => "chalk",
            PatternKind::Wood => "wood",
            PatternKind::Marble => "marble",
            PatternKind::Fabric => "fabric",
            PatternKind::Glitter => "glitter",
            PatternKind::Foil => "foil",
            PatternKind::Concrete => "concrete",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
