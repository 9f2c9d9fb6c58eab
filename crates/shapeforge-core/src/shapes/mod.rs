//! Shape definitions for the canvas.

mod color;
mod kind;
mod pattern;

pub use color::{ParseColorError, ShapeColor};
pub use kind::{ShapeDefinition, ShapeElement, ShapeKind};
pub use pattern::{PatternCategory, PatternKind};

use crate::geometry::{Geometry, SizeLimits, normalize_rotation};
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default width and height of a new shape.
pub const DEFAULT_SHAPE_SIZE: f64 = 100.0;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A single styled primitive placed on the canvas.
///
/// Position is the center of the bounding box. Rotation is in degrees,
/// clockwise, about that center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Center X position.
    pub x: f64,
    /// Center Y position.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, normalized to `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    /// Base color.
    pub fill: ShapeColor,
    #[serde(default)]
    pub pattern: PatternKind,
    /// Paint order; higher paints later.
    pub z_index: i64,
}

impl Shape {
    /// Create a shape with default size and pattern.
    pub fn new(kind: ShapeKind, x: f64, y: f64, z_index: i64, fill: ShapeColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width: DEFAULT_SHAPE_SIZE,
            height: DEFAULT_SHAPE_SIZE,
            rotation: 0.0,
            fill,
            pattern: PatternKind::default(),
            z_index,
        }
    }

    /// Static definition for this shape's kind.
    pub fn definition(&self) -> &'static ShapeDefinition {
        self.kind.definition()
    }

    /// Center of the bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Top-left corner of the unrotated bounding box.
    pub fn top_left(&self) -> Point {
        Point::new(self.x - self.width / 2.0, self.y - self.height / 2.0)
    }

    /// Unrotated bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.top_left(), Size::new(self.width, self.height))
    }

    /// Center-based geometry of the shape.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Rotation about the center as an affine transform (degrees to radians).
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation.to_radians(), self.center())
    }

    /// Check if a point (in world coordinates) lies inside the rotated bounding box.
    pub fn contains(&self, point: Point) -> bool {
        let local = self.rotation_transform().inverse() * point;
        self.bounds().contains(local)
    }

    /// Merge the fields set in `patch`, clamping size and normalizing rotation.
    pub fn apply(&mut self, patch: &ShapePatch, limits: SizeLimits) {
        if let Some(position) = patch.position {
            self.x = position.x;
            self.y = position.y;
        }
        if let Some(size) = patch.size {
            self.width = limits.clamp(size.width);
            self.height = limits.clamp(size.height);
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = normalize_rotation(rotation);
        }
        if let Some(fill) = patch.fill {
            self.fill = fill;
        }
        if let Some(pattern) = patch.pattern {
            self.pattern = pattern;
        }
    }
}

/// A partial update to a shape. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
    pub fill: Option<ShapeColor>,
    pub pattern: Option<PatternKind>,
}

impl ShapePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn fill(mut self, fill: ShapeColor) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Patch carrying a full center-based geometry.
    pub fn geometry(geometry: Geometry) -> Self {
        Self::new()
            .position(geometry.x, geometry.y)
            .size(geometry.width, geometry.height)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
