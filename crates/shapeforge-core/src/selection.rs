//! Selection handles and manipulation gestures.

use crate::geometry::Geometry;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Distance from shape edge to rotation handle (in world units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle, resizes both dimensions.
    Corner(Corner),
    /// Edge midpoint handle, resizes one dimension.
    Edge(Edge),
    /// Rotation handle (positioned above the shape).
    Rotate,
}

impl HandleKind {
    /// The eight resize handles, compass order starting at top-left.
    pub const RESIZE: [HandleKind; 8] = [
        HandleKind::Corner(Corner::TopLeft),
        HandleKind::Edge(Edge::Top),
        HandleKind::Corner(Corner::TopRight),
        HandleKind::Edge(Edge::Right),
        HandleKind::Corner(Corner::BottomRight),
        HandleKind::Edge(Edge::Bottom),
        HandleKind::Corner(Corner::BottomLeft),
        HandleKind::Edge(Edge::Left),
    ];

    /// Compass name (`nw`, `n`, ..., `rotate`).
    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::Corner(Corner::TopLeft) => "nw",
            HandleKind::Corner(Corner::TopRight) => "ne",
            HandleKind::Corner(Corner::BottomLeft) => "sw",
            HandleKind::Corner(Corner::BottomRight) => "se",
            HandleKind::Edge(Edge::Top) => "n",
            HandleKind::Edge(Edge::Right) => "e",
            HandleKind::Edge(Edge::Bottom) => "s",
            HandleKind::Edge(Edge::Left) => "w",
            HandleKind::Rotate => "rotate",
        }
    }

    /// Offset from the shape center in unrotated local space.
    fn local_offset(self, half_w: f64, half_h: f64) -> Vec2 {
        match self {
            HandleKind::Corner(Corner::TopLeft) => Vec2::new(-half_w, -half_h),
            HandleKind::Corner(Corner::TopRight) => Vec2::new(half_w, -half_h),
            HandleKind::Corner(Corner::BottomLeft) => Vec2::new(-half_w, half_h),
            HandleKind::Corner(Corner::BottomRight) => Vec2::new(half_w, half_h),
            HandleKind::Edge(Edge::Top) => Vec2::new(0.0, -half_h),
            HandleKind::Edge(Edge::Right) => Vec2::new(half_w, 0.0),
            HandleKind::Edge(Edge::Bottom) => Vec2::new(0.0, half_h),
            HandleKind::Edge(Edge::Left) => Vec2::new(-half_w, 0.0),
            HandleKind::Rotate => Vec2::new(0.0, -half_h - ROTATE_HANDLE_OFFSET),
        }
    }
}

/// Error for unrecognized handle names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown handle: {0:?}")]
pub struct ParseHandleError(pub String);

impl FromStr for HandleKind {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "nw" => HandleKind::Corner(Corner::TopLeft),
            "ne" => HandleKind::Corner(Corner::TopRight),
            "sw" => HandleKind::Corner(Corner::BottomLeft),
            "se" => HandleKind::Corner(Corner::BottomRight),
            "n" => HandleKind::Edge(Edge::Top),
            "e" => HandleKind::Edge(Edge::Right),
            "s" => HandleKind::Edge(Edge::Bottom),
            "w" => HandleKind::Edge(Edge::Left),
            "rotate" => HandleKind::Rotate,
            other => return Err(ParseHandleError(other.to_string())),
        })
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in world coordinates) hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Get the selection handles for a shape: eight resize handles plus the
/// rotation handle, all rotated with the shape about its center.
pub fn get_handles(shape: &Shape) -> Vec<Handle> {
    let center = shape.center();
    let rotate = shape.rotation_transform();
    let (half_w, half_h) = (shape.width / 2.0, shape.height / 2.0);

    HandleKind::RESIZE
        .into_iter()
        .chain(std::iter::once(HandleKind::Rotate))
        .map(|kind| Handle::new(rotate * (center + kind.local_offset(half_w, half_h)), kind))
        .collect()
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(shape: &Shape, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// State of an active pointer gesture on a single shape.
#[derive(Debug, Clone)]
pub struct Gesture {
    /// The shape being manipulated.
    pub shape_id: ShapeId,
    /// The handle being dragged (None = moving the whole shape).
    pub handle: Option<HandleKind>,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Shape geometry when the gesture began.
    pub start: Geometry,
    /// Shape rotation when the gesture began.
    pub start_rotation: f64,
}

impl Gesture {
    /// Create a new gesture.
    pub fn new(shape: &Shape, handle: Option<HandleKind>, start_point: Point) -> Self {
        Self {
            shape_id: shape.id,
            handle,
            start_point,
            current_point: start_point,
            start: shape.geometry(),
            start_rotation: shape.rotation,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}
