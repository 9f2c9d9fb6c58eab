//! The shape store: the live shape collection, selection and editing operations.

use crate::config::EditorConfig;
use crate::geometry::{Geometry, normalize_rotation, resize_from_handle, rotation_from_pointer};
use crate::history::HistoryManager;
use crate::palette::ColorRotation;
use crate::selection::{Gesture, HandleKind};
use crate::shapes::{PatternKind, Shape, ShapeColor, ShapeId, ShapeKind, ShapePatch};
use kurbo::{Point, Vec2};
use std::collections::HashSet;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Owns the shapes (in insertion order), the selection and the undo history.
///
/// Operations on ids that are not in the collection are silent no-ops, and
/// out-of-range sizes and rotations are clamped or normalized rather than
/// rejected.
#[derive(Debug)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    colors: ColorRotation,
    history: HistoryManager,
    gesture: Option<Gesture>,
    config: EditorConfig,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeStore {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create an empty store.
    pub fn with_config(config: EditorConfig) -> Self {
        Self::with_shapes(Vec::new(), config)
    }

    /// Create a store holding a loaded scene. The scene becomes the first
    /// undo floor; sizes and rotations are brought into range and repeated
    /// ids are replaced with fresh ones.
    pub fn with_shapes(mut shapes: Vec<Shape>, config: EditorConfig) -> Self {
        let mut seen = HashSet::with_capacity(shapes.len());
        for shape in &mut shapes {
            if !seen.insert(shape.id) {
                let fresh = ShapeId::new_v4();
                log::warn!("duplicate shape id {} in loaded scene, reassigned {}", shape.id, fresh);
                shape.id = fresh;
                seen.insert(fresh);
            }
            let patch = ShapePatch::new()
                .size(shape.width, shape.height)
                .rotation(shape.rotation);
            shape.apply(&patch, config.size_limits);
        }
        let mut history = HistoryManager::new(config.history_capacity, config.debounce());
        history.init(shapes.clone());
        Self {
            shapes,
            selected: None,
            colors: ColorRotation::new(),
            history,
            gesture: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    fn save(&mut self, immediate: bool) {
        self.history.save_state(self.shapes.clone(), immediate);
    }

    fn next_z_index(&self) -> i64 {
        self.shapes
            .iter()
            .map(|s| s.z_index)
            .max()
            .map_or(1, |max| max + 1)
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes in paint order: ascending z-index, ties in insertion order.
    pub fn sorted_shapes(&self) -> Vec<&Shape> {
        let mut sorted: Vec<&Shape> = self.shapes.iter().collect();
        sorted.sort_by_key(|s| s.z_index);
        sorted
    }

    pub fn has_shapes(&self) -> bool {
        !self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Topmost shape whose rotated bounds contain `point`.
    pub fn shape_at(&self, point: Point) -> Option<&Shape> {
        self.sorted_shapes()
            .into_iter()
            .rev()
            .find(|s| s.contains(point))
    }

    /// Add a shape of `kind` centered at (`x`, `y`) on top of the stack and select it.
    pub fn add_shape(&mut self, kind: ShapeKind, x: f64, y: f64) -> Shape {
        let mut shape = Shape::new(kind, x, y, self.next_z_index(), self.colors.next_color());
        let size = self.config.size_limits.clamp(self.config.default_size);
        shape.width = size;
        shape.height = size;

        log::debug!("add {} {} at ({x}, {y})", kind.as_str(), shape.id);
        self.shapes.push(shape.clone());
        self.selected = Some(shape.id);
        self.save(true);
        shape
    }

    /// Remove a shape.
    pub fn remove_shape(&mut self, id: ShapeId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        self.shapes.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("remove {id}");
        self.save(true);
    }

    /// Merge `patch` into a shape. With `save_to_history` a debounced save is
    /// requested; otherwise nothing is recorded (intermediate drag frames).
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch, save_to_history: bool) {
        let limits = self.config.size_limits;
        let Some(shape) = self.get_mut(id) else {
            return;
        };
        shape.apply(patch, limits);
        if save_to_history {
            self.save(false);
        }
    }

    /// Select a shape and bring it to the front, or clear the selection with `None`.
    ///
    /// The z-index bump is not recorded in history. Unknown ids are ignored.
    pub fn select_shape(&mut self, id: Option<ShapeId>) {
        let Some(id) = id else {
            self.selected = None;
            return;
        };
        let z_index = self.next_z_index();
        if let Some(shape) = self.get_mut(id) {
            shape.z_index = z_index;
            self.selected = Some(id);
        }
    }

    pub fn deselect_shape(&mut self) {
        self.selected = None;
    }

    pub fn delete_selected_shape(&mut self) {
        if let Some(id) = self.selected {
            self.remove_shape(id);
        }
    }

    /// Remove every shape and wipe history. Not undoable.
    ///
    /// Unlike a fresh store, no empty floor is recorded, so the first shape
    /// added afterwards cannot be undone.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
        self.selected = None;
        self.gesture = None;
        self.colors.reset();
        self.history.clear();
        log::debug!("cleared canvas");
    }

    /// Copy a shape with a new id, offset on both axes and placed on top; the
    /// copy becomes the selection. Not recorded in history.
    pub fn duplicate_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let offset = self.config.duplicate_offset;
        let z_index = self.next_z_index();
        let original = self.get(id)?;
        let duplicate = Shape {
            id: ShapeId::new_v4(),
            x: original.x + offset,
            y: original.y + offset,
            z_index,
            ..original.clone()
        };
        self.shapes.push(duplicate.clone());
        self.selected = Some(duplicate.id);
        Some(duplicate)
    }

    /// Set a shape's center. Not recorded in history.
    pub fn move_shape(&mut self, id: ShapeId, x: f64, y: f64) {
        self.update_shape(id, &ShapePatch::new().position(x, y), false);
    }

    /// Set a shape's size, clamped into the configured limits. Not recorded in history.
    pub fn resize_shape(&mut self, id: ShapeId, width: f64, height: f64) {
        self.update_shape(id, &ShapePatch::new().size(width, height), false);
    }

    /// Resize by dragging `handle` by (`delta_x`, `delta_y`) from `start`,
    /// keeping the aspect ratio when the shape's kind asks for it.
    /// Not recorded in history.
    pub fn resize_shape_from_handle(
        &mut self,
        id: ShapeId,
        handle: HandleKind,
        delta_x: f64,
        delta_y: f64,
        start: Geometry,
    ) {
        let Some(shape) = self.get(id) else {
            return;
        };
        let lock_aspect = shape.definition().lock_aspect_ratio;
        let geometry = resize_from_handle(
            handle,
            Vec2::new(delta_x, delta_y),
            start,
            lock_aspect,
            self.config.size_limits,
        );
        self.update_shape(id, &ShapePatch::geometry(geometry), false);
    }

    /// Set a shape's rotation, normalized to `[0, 360)`. Not recorded in history.
    pub fn rotate_shape(&mut self, id: ShapeId, degrees: f64) {
        self.update_shape(id, &ShapePatch::new().rotation(degrees), false);
    }

    pub fn set_shape_color(&mut self, id: ShapeId, fill: ShapeColor) {
        if self.get(id).is_some() {
            self.update_shape(id, &ShapePatch::new().fill(fill), false);
            self.save(true);
        }
    }

    pub fn set_shape_pattern(&mut self, id: ShapeId, pattern: PatternKind) {
        if self.get(id).is_some() {
            self.update_shape(id, &ShapePatch::new().pattern(pattern), false);
            self.save(true);
        }
    }

    /// Record the current state now. Called once at the end of a continuous gesture.
    pub fn commit_to_history(&mut self) {
        self.save(true);
    }

    /// Fire a debounced history save whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.history.poll(now)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(shapes) => {
                self.restore(shapes);
                true
            }
            None => false,
        }
    }

    /// Restore the next snapshot. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(shapes) => {
                self.restore(shapes);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.gesture = None;
        if self.selected.is_some_and(|id| self.index_of(id).is_none()) {
            self.selected = None;
        }
    }

    /// Start a pointer gesture on a shape: a move when `handle` is None,
    /// otherwise a resize or rotation.
    pub fn begin_gesture(&mut self, id: ShapeId, handle: Option<HandleKind>, point: Point) -> bool {
        match self.get(id) {
            Some(shape) => {
                self.gesture = Some(Gesture::new(shape, handle, point));
                true
            }
            None => false,
        }
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Apply the active gesture for the pointer at `point`. Not recorded in history.
    pub fn update_gesture(&mut self, point: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        gesture.current_point = point;
        let gesture = gesture.clone();
        let delta = gesture.delta();

        match gesture.handle {
            None => {
                let center = gesture.start.center() + delta;
                self.move_shape(gesture.shape_id, center.x, center.y);
            }
            Some(HandleKind::Rotate) => {
                let center = gesture.start.center();
                let swept = rotation_from_pointer(center, gesture.current_point)
                    - rotation_from_pointer(center, gesture.start_point);
                let rotation = normalize_rotation(gesture.start_rotation + swept);
                self.rotate_shape(gesture.shape_id, rotation);
            }
            Some(handle) => {
                let (dx, dy) = (delta.x, delta.y);
                self.resize_shape_from_handle(gesture.shape_id, handle, dx, dy, gesture.start);
            }
        }
    }

    /// Finish the active gesture, recording one snapshot if the shape changed.
    pub fn end_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let changed = self
            .get(gesture.shape_id)
            .is_some_and(|s| s.geometry() != gesture.start || s.rotation != gesture.start_rotation);
        if changed {
            self.commit_to_history();
        }
    }
}
