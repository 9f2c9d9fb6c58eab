//! Predefined shape kinds.
//!
//! Every kind is drawn inside a `0 0 100 100` view box that is stretched to
//! the shape's bounding box at render time.

use serde::{Deserialize, Serialize};

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Heart,
    Hexagon,
    Diamond,
    Cloud,
    Arrow,
    SpeechBubble,
}

/// SVG element used to draw a shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeElement {
    /// `<rect x="5" y="5" width="90" height="90">`
    Rect,
    /// `<ellipse cx="50" cy="50" rx="45" ry="45">`
    Ellipse,
    /// `<polygon points="...">`
    Polygon(&'static str),
    /// `<path d="...">`
    Path(&'static str),
}

/// Static metadata for a shape kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    pub name: &'static str,
    pub element: ShapeElement,
    /// Default width / height.
    pub aspect_ratio: f64,
    /// Whether handle resizes keep the aspect ratio.
    pub lock_aspect_ratio: bool,
}

const fn def(
    kind: ShapeKind,
    name: &'static str,
    element: ShapeElement,
    aspect_ratio: f64,
    lock_aspect_ratio: bool,
) -> ShapeDefinition {
    ShapeDefinition {
        kind,
        name,
        element,
        aspect_ratio,
        lock_aspect_ratio,
    }
}

static DEFINITIONS: [ShapeDefinition; 10] = [
    def(ShapeKind::Rectangle, "Rectangle", ShapeElement::Rect, 1.0, false),
    def(ShapeKind::Circle, "Circle", ShapeElement::Ellipse, 1.0, true),
    def(
        ShapeKind::Triangle,
        "Triangle",
        ShapeElement::Polygon("50,5 95,95 5,95"),
        1.0,
        false,
    ),
    def(
        ShapeKind::Star,
        "Star",
        ShapeElement::Path("M50,5 L61,40 L98,40 L68,62 L79,97 L50,75 L21,97 L32,62 L2,40 L39,40 Z"),
        1.0,
        true,
    ),
    def(
        ShapeKind::Heart,
        "Heart",
        ShapeElement::Path(
            "M50,88 C20,55 5,35 5,25 C5,10 20,5 35,5 C42,5 50,12 50,20 C50,12 58,5 65,5 C80,5 95,10 95,25 C95,35 80,55 50,88 Z",
        ),
        1.0,
        true,
    ),
    def(
        ShapeKind::Hexagon,
        "Hexagon",
        ShapeElement::Polygon("50,3 93,25 93,75 50,97 7,75 7,25"),
        0.866,
        true,
    ),
    def(
        ShapeKind::Diamond,
        "Diamond",
        ShapeElement::Polygon("50,5 95,50 50,95 5,50"),
        1.0,
        false,
    ),
    def(
        ShapeKind::Cloud,
        "Cloud",
        ShapeElement::Path(
            "M25,60 C10,60 5,50 10,40 C5,30 15,20 30,25 C35,10 55,10 65,20 C75,10 95,15 95,35 C100,45 95,55 80,55 C85,65 70,70 60,65 C50,75 30,70 25,60 Z",
        ),
        1.5,
        false,
    ),
    def(
        ShapeKind::Arrow,
        "Arrow",
        ShapeElement::Path("M5,40 L60,40 L60,20 L95,50 L60,80 L60,60 L5,60 Z"),
        1.5,
        false,
    ),
    def(
        ShapeKind::SpeechBubble,
        "Speech Bubble",
        ShapeElement::Path(
            "M10,10 L90,10 Q95,10 95,15 L95,55 Q95,60 90,60 L35,60 L20,80 L25,60 L10,60 Q5,60 5,55 L5,15 Q5,10 10,10 Z",
        ),
        1.2,
        false,
    ),
];

impl ShapeKind {
    /// All kinds, in palette order.
    pub const ALL: [ShapeKind; 10] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Hexagon,
        ShapeKind::Diamond,
        ShapeKind::Cloud,
        ShapeKind::Arrow,
        ShapeKind::SpeechBubble,
    ];

    /// Static definition for this kind.
    pub fn definition(self) -> &'static ShapeDefinition {
        &DEFINITIONS[self as usize]
    }

    /// Wire name (`speechBubble`, `rectangle`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
            ShapeKind::Heart => "heart",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Cloud => "cloud",
            ShapeKind::Arrow => "arrow",
            ShapeKind::SpeechBubble => "speechBubble",
        }
    }
}
