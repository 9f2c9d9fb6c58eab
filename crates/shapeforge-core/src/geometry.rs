//! Resize and rotate arithmetic.
//!
//! Shapes are positioned by their center, so dragging one side of the box by
//! `d` moves the center by `d / 2` along that axis. Nothing here holds state.

use crate::selection::{Corner, Edge, HandleKind};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed width or height.
pub const MIN_SHAPE_SIZE: f64 = 20.0;
/// Largest allowed width or height.
pub const MAX_SHAPE_SIZE: f64 = 500.0;

/// Inclusive bounds for shape width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: MIN_SHAPE_SIZE,
            max: MAX_SHAPE_SIZE,
        }
    }
}

impl SizeLimits {
    /// Clamp a dimension into `[min, max]`. NaN clamps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Center-based box: position plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Normalize degrees into `[0, 360)` with floored modulo.
///
/// Non-finite input normalizes to 0.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    ((degrees % 360.0) + 360.0) % 360.0
}

/// Angle of `pointer` around `center` in degrees, where straight up is 0
/// and angles grow clockwise on a y-down canvas.
pub fn rotation_from_pointer(center: Point, pointer: Point) -> f64 {
    let v = pointer - center;
    normalize_rotation(v.y.atan2(v.x).to_degrees() + 90.0)
}

/// Compute the new box produced by dragging `handle` by `delta` from `start`.
///
/// With `lock_aspect`, corner handles follow whichever dimension changed more
/// and derive the other from `start.width / start.height`; edge handles
/// always derive the dimension they do not touch. Both dimensions are clamped
/// into `limits` last, so the ratio can drift once a clamp engages. The
/// recentering offsets come from the raw drag and are not re-derived after
/// the aspect adjustment.
pub fn resize_from_handle(
    handle: HandleKind,
    delta: Vec2,
    start: Geometry,
    lock_aspect: bool,
    limits: SizeLimits,
) -> Geometry {
    let Geometry {
        x: start_x,
        y: start_y,
        width: start_w,
        height: start_h,
    } = start;
    let (dx, dy) = (delta.x, delta.y);

    let mut width = start_w;
    let mut height = start_h;
    let mut x = start_x;
    let mut y = start_y;

    match handle {
        HandleKind::Corner(Corner::BottomRight) => {
            width = start_w + dx;
            height = start_h + dy;
        }
        HandleKind::Corner(Corner::BottomLeft) => {
            width = start_w - dx;
            height = start_h + dy;
            x = start_x + dx / 2.0;
        }
        HandleKind::Corner(Corner::TopRight) => {
            width = start_w + dx;
            height = start_h - dy;
            y = start_y + dy / 2.0;
        }
        HandleKind::Corner(Corner::TopLeft) => {
            width = start_w - dx;
            height = start_h - dy;
            x = start_x + dx / 2.0;
            y = start_y + dy / 2.0;
        }
        HandleKind::Edge(Edge::Right) => {
            width = start_w + dx;
        }
        HandleKind::Edge(Edge::Left) => {
            width = start_w - dx;
            x = start_x + dx / 2.0;
        }
        HandleKind::Edge(Edge::Bottom) => {
            height = start_h + dy;
        }
        HandleKind::Edge(Edge::Top) => {
            height = start_h - dy;
            y = start_y + dy / 2.0;
        }
        HandleKind::Rotate => return start,
    }

    if lock_aspect && start_h > 0.0 {
        let aspect = start_w / start_h;
        match handle {
            HandleKind::Corner(_) => {
                if (width - start_w).abs() > (height - start_h).abs() {
                    height = width / aspect;
                } else {
                    width = height * aspect;
                }
            }
            HandleKind::Edge(Edge::Left | Edge::Right) => height = width / aspect,
            HandleKind::Edge(Edge::Top | Edge::Bottom) => width = height * aspect,
            HandleKind::Rotate => {}
        }
    }

    Geometry {
        x,
        y,
        width: limits.clamp(width),
        height: limits.clamp(height),
    }
}
