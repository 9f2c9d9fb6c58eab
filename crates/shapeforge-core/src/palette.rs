//! Rotating default colors for new shapes.

use crate::shapes::ShapeColor;

/// Default colors for new shapes, handed out in order.
pub const DEFAULT_SHAPE_COLORS: [ShapeColor; 8] = [
    ShapeColor::rgb(0x4A, 0x90, 0xD9), // Blue
    ShapeColor::rgb(0xE7, 0x4C, 0x3C), // Red
    ShapeColor::rgb(0x2E, 0xCC, 0x71), // Green
    ShapeColor::rgb(0xF3, 0x9C, 0x12), // Orange
    ShapeColor::rgb(0x9B, 0x59, 0xB6), // Purple
    ShapeColor::rgb(0x1A, 0xBC, 0x9C), // Teal
    ShapeColor::rgb(0xE9, 0x1E, 0x63), // Pink
    ShapeColor::rgb(0x00, 0xBC, 0xD4), // Cyan
];

/// Fallback fill when no rotation is in play.
pub const DEFAULT_FILL_COLOR: ShapeColor = DEFAULT_SHAPE_COLORS[0];

/// Cycles through [`DEFAULT_SHAPE_COLORS`].
#[derive(Debug, Clone, Default)]
pub struct ColorRotation {
    index: usize,
}

impl ColorRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next color, wrapping around the palette.
    pub fn next_color(&mut self) -> ShapeColor {
        let color = DEFAULT_SHAPE_COLORS[self.index % DEFAULT_SHAPE_COLORS.len()];
        self.index = self.index.wrapping_add(1);
        color
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}
