//! The editor surface the wall tool drives.

use indexmap::IndexMap;
use log::{debug, error};

use plenum_core::{
    geometry::Point,
    identifier::ObjectId,
    object::{DrawingObject, LineData},
    polyline::{PolyLine, Split},
};

use super::mode::EditMode;
use crate::{Drawing, config::WallConfig, error::PlenumError, repository::GraphRepository};

/// Gesture a wall can be armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    AddCorner,
    SplitWall,
}

/// How an interactive draw finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTrigger {
    /// The pointer was released, completing one segment.
    Release,
    /// Drawing stopped for any other reason.
    End,
}

/// Style of newly drawn walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallStyle {
    thickness: f64,
    border_thickness: f64,
    line_pattern: u8,
    show_area: bool,
    horizontal_text: bool,
}

impl WallStyle {
    /// Solid walls of the configured thickness with horizontal labels and
    /// no area dimension.
    pub fn from_config(config: &WallConfig) -> Self {
        let thickness = config.effective_thickness();
        Self {
            thickness,
            border_thickness: thickness / 2.0,
            line_pattern: 0,
            show_area: false,
            horizontal_text: true,
        }
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn border_thickness(&self) -> f64 {
        self.border_thickness
    }

    /// Dash pattern index; 0 is solid.
    pub fn line_pattern(&self) -> u8 {
        self.line_pattern
    }

    pub fn show_area(&self) -> bool {
        self.show_area
    }

    pub fn horizontal_text(&self) -> bool {
        self.horizontal_text
    }
}

impl Default for WallStyle {
    fn default() -> Self {
        Self::from_config(&WallConfig::default())
    }
}

/// Editor operations the wall tool relies on.
pub trait WallCanvas {
    fn selection(&self) -> Vec<ObjectId>;

    fn select(&mut self, ids: &[ObjectId]);

    fn set_edit_mode(&mut self, mode: EditMode);

    /// Commits any in-place text or shape edit.
    fn close_edit(&mut self);

    /// Aborts the current modal operation.
    fn cancel_operation(&mut self);

    /// Clears interactive draw state.
    fn reset_object_draw(&mut self);

    /// Starts drawing a new wall the user will drag out.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor cannot start a draw.
    fn begin_wall(&mut self, style: &WallStyle) -> Result<(), PlenumError>;

    /// Visible objects, in z-order.
    fn visible_objects(&self) -> Vec<ObjectId>;

    fn object(&self, id: ObjectId) -> Option<&DrawingObject>;

    /// Attaches a one-shot gesture handler to `id`.
    fn arm_gesture(&mut self, id: ObjectId, gesture: Gesture);

    /// Detaches every gesture handler.
    fn disarm_gestures(&mut self);

    /// Inserts a corner into the wall `target` at `hit`.
    ///
    /// Returns whether a corner was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit fails part-way.
    fn add_corner(&mut self, target: ObjectId, hit: Point) -> Result<bool, PlenumError>;

    /// Splits the wall `target` at the segment under `hit`.
    ///
    /// Returns whether the wall was split.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit fails part-way.
    fn split_wall(&mut self, target: ObjectId, hit: Point) -> Result<bool, PlenumError>;

    /// Restores editor invariants after a failed gesture.
    fn exception_cleanup(&mut self, error: &PlenumError);
}

/// [`WallCanvas`] over an in-memory drawing.
#[derive(Debug, Clone)]
pub struct EditorCanvas {
    drawing: Drawing,
    hit_tolerance: f64,
    selection: Vec<ObjectId>,
    edit_mode: EditMode,
    armed: IndexMap<ObjectId, Gesture>,
    pending_wall: Option<WallStyle>,
    failures: Vec<String>,
}

impl EditorCanvas {
    pub fn new(drawing: Drawing, config: &WallConfig) -> Self {
        Self {
            drawing,
            hit_tolerance: config.hit_tolerance(),
            selection: Vec::new(),
            edit_mode: EditMode::Default,
            armed: IndexMap::new(),
            pending_wall: None,
            failures: Vec::new(),
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn drawing_mut(&mut self) -> &mut Drawing {
        &mut self.drawing
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Gesture `id` is armed for, if any.
    pub fn armed(&self, id: ObjectId) -> Option<Gesture> {
        self.armed.get(&id).copied()
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Style of the wall being drawn, while a draw is in progress.
    pub fn pending_wall(&self) -> Option<&WallStyle> {
        self.pending_wall.as_ref()
    }

    /// Messages of the failures passed to [`WallCanvas::exception_cleanup`].
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Completes the wall being drawn along `points`.
    ///
    /// # Errors
    ///
    /// Returns [`PlenumError::Model`] when `points` cannot form a wall and
    /// [`PlenumError::IdsExhausted`] when the drawing has no id left for it.
    /// Returns `Ok(None)` when no draw is in progress.
    pub fn finish_wall(&mut self, points: Vec<Point>) -> Result<Option<ObjectId>, PlenumError> {
        if self.pending_wall.is_none() {
            return Ok(None);
        }
        let polyline = PolyLine::open(points)?;
        let id = self.drawing.next_id().ok_or(PlenumError::IdsExhausted)?;
        self.drawing.insert(DrawingObject::wall(id, polyline));
        self.drawing.mark_dirty(id, true);
        self.pending_wall = None;
        debug!(id:?; "Wall drawn");
        Ok(Some(id))
    }

    fn wall_polyline(&self, target: ObjectId) -> Result<Option<&PolyLine>, PlenumError> {
        let object = self
            .drawing
            .get(target)
            .ok_or(PlenumError::NotFound(target))?;
        if !object.is_wall() {
            return Ok(None);
        }
        Ok(object.as_line().and_then(LineData::polyline))
    }
}

fn rebuilt_wall(template: &DrawingObject, id: ObjectId, polyline: PolyLine) -> DrawingObject {
    DrawingObject::wall(id, polyline).with_locked(template.is_locked())
}

impl WallCanvas for EditorCanvas {
    fn selection(&self) -> Vec<ObjectId> {
        self.selection.clone()
    }

    fn select(&mut self, ids: &[ObjectId]) {
        self.selection = ids
            .iter()
            .copied()
            .filter(|id| self.drawing.contains(*id))
            .collect();
    }

    fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    fn close_edit(&mut self) {}

    fn cancel_operation(&mut self) {
        self.pending_wall = None;
    }

    fn reset_object_draw(&mut self) {
        self.pending_wall = None;
    }

    fn begin_wall(&mut self, style: &WallStyle) -> Result<(), PlenumError> {
        self.pending_wall = Some(*style);
        Ok(())
    }

    fn visible_objects(&self) -> Vec<ObjectId> {
        self.drawing.visible_objects()
    }

    fn object(&self, id: ObjectId) -> Option<&DrawingObject> {
        self.drawing.get(id)
    }

    fn arm_gesture(&mut self, id: ObjectId, gesture: Gesture) {
        self.armed.insert(id, gesture);
    }

    fn disarm_gestures(&mut self) {
        self.armed.clear();
    }

    fn add_corner(&mut self, target: ObjectId, hit: Point) -> Result<bool, PlenumError> {
        if self.wall_polyline(target)?.is_none() {
            return Ok(false);
        }
        let tolerance = self.hit_tolerance;
        let Some(object) = self.drawing.get_mut(target) else {
            return Err(PlenumError::NotFound(target));
        };
        let inserted = object
            .as_line_mut()
            .and_then(LineData::polyline_mut)
            .and_then(|polyline| polyline.add_corner(hit, tolerance))
            .is_some();
        if inserted {
            object.refresh_line_geometry();
            self.drawing.mark_dirty(target, true);
        }
        Ok(inserted)
    }

    fn split_wall(&mut self, target: ObjectId, hit: Point) -> Result<bool, PlenumError> {
        let Some(polyline) = self.wall_polyline(target)? else {
            return Ok(false);
        };
        let Some(segment) = polyline.hit_segment(hit, self.hit_tolerance) else {
            return Ok(false);
        };
        let split = polyline.split_at(segment)?;
        let Some(template) = self.drawing.get(target).cloned() else {
            return Err(PlenumError::NotFound(target));
        };

        let pieces = match split {
            Split::Opened(opened) => vec![opened],
            Split::Divided(pieces) => pieces,
        };
        let mut pieces = pieces.into_iter();
        let first = pieces.next();
        let rest: Vec<PolyLine> = pieces.collect();
        let ids = self
            .drawing
            .fresh_ids(rest.len())
            .ok_or(PlenumError::IdsExhausted)?;

        match first {
            Some(first) => {
                self.drawing.insert(rebuilt_wall(&template, target, first));
                self.drawing.mark_dirty(target, true);
            }
            None => {
                self.drawing.remove(target);
            }
        }
        for (id, piece) in ids.into_iter().zip(rest) {
            self.drawing.insert(rebuilt_wall(&template, id, piece));
            self.drawing.mark_dirty(id, true);
        }
        debug!(wall:? = target, segment; "Wall split");
        Ok(true)
    }

    fn exception_cleanup(&mut self, error: &PlenumError) {
        error!(error = error.to_string(); "Wall gesture failed");
        self.pending_wall = None;
        self.failures.push(error.to_string());
    }
}
