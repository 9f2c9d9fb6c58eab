//! ShapeForge Core Library
//!
//! Platform-agnostic shape model, editing operations and undo history for the
//! ShapeForge editor.

pub mod config;
pub mod geometry;
pub mod history;
pub mod palette;
pub mod selection;
pub mod shapes;
pub mod store;

pub use config::{ConfigError, EditorConfig};
pub use geometry::{
    Geometry, SizeLimits, normalize_rotation, resize_from_handle, rotation_from_pointer,
};
pub use history::{HistoryManager, Snapshot};
pub use palette::{ColorRotation, DEFAULT_SHAPE_COLORS};
pub use selection::{Corner, Edge, Gesture, Handle, HandleKind, get_handles, hit_test_handles};
pub use shapes::{PatternCategory, PatternKind, Shape, ShapeColor, ShapeId, ShapeKind, ShapePatch};
pub use store::ShapeStore;
