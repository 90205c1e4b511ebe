//! The wall tool: modal driver of wall drawing, corner insertion and
//! wall splitting.

use log::{debug, info};

use plenum_core::{geometry::Point, identifier::ObjectId};

use super::{
    canvas::{DrawTrigger, Gesture, WallCanvas, WallStyle},
    mode::{DrawMode, EditMode, ModeEvent},
};
use crate::{config::WallConfig, error::PlenumError};

/// Modal wall tool.
///
/// Every entry point leaves the tool in a valid [`DrawMode`]; failed
/// gestures reset to [`DrawMode::Idle`] before their error is returned.
#[derive(Debug, Clone)]
pub struct WallTool {
    mode: DrawMode,
    style: WallStyle,
    saved_selection: Vec<ObjectId>,
    armed: Vec<ObjectId>,
}

impl WallTool {
    pub fn new(config: &WallConfig) -> Self {
        Self {
            mode: DrawMode::Idle,
            style: WallStyle::from_config(config),
            saved_selection: Vec::new(),
            armed: Vec::new(),
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn style(&self) -> &WallStyle {
        &self.style
    }

    /// Walls armed for the current gesture.
    pub fn armed(&self) -> &[ObjectId] {
        &self.armed
    }

    fn transition(&mut self, event: ModeEvent) {
        let next = self.mode.next(event);
        if next != self.mode {
            info!(from:? = self.mode, to:? = next, event:?; "Wall tool mode changed");
        }
        self.mode = next;
    }

    /// Enters wall drawing and starts the first segment.
    ///
    /// Does nothing when walls are already being added.
    ///
    /// # Errors
    ///
    /// Returns the canvas error when the draw cannot start; the tool is then
    /// idle again.
    pub fn start_adding_walls<C>(&mut self, canvas: &mut C) -> Result<(), PlenumError>
    where
        C: WallCanvas + ?Sized,
    {
        if self.mode == DrawMode::AddingWalls {
            debug!("Already adding walls");
            return Ok(());
        }
        if self.mode.is_gesture() {
            self.cancel_gesture(canvas);
        }
        canvas.close_edit();
        self.saved_selection = canvas.selection();
        self.transition(ModeEvent::StartAddingWalls);
        self.add_wall(canvas)
    }

    fn add_wall<C>(&mut self, canvas: &mut C) -> Result<(), PlenumError>
    where
        C: WallCanvas + ?Sized,
    {
        let selection = canvas.selection();
        if let Err(err) = canvas.begin_wall(&self.style) {
            self.transition(ModeEvent::Cancel);
            canvas.cancel_operation();
            return Err(err);
        }
        canvas.set_edit_mode(EditMode::Edit);
        canvas.select(&selection);
        Ok(())
    }

    /// Reacts to the end of an interactive draw.
    ///
    /// While adding walls a released segment starts the next one and any
    /// other ending stops wall drawing.
    ///
    /// # Errors
    ///
    /// Returns the canvas error when the next segment cannot start.
    pub fn post_object_draw<C>(
        &mut self,
        canvas: &mut C,
        trigger: DrawTrigger,
    ) -> Result<(), PlenumError>
    where
        C: WallCanvas + ?Sized,
    {
        if self.mode != DrawMode::AddingWalls {
            return Ok(());
        }
        match trigger {
            DrawTrigger::Release => {
                self.transition(ModeEvent::DrawReleased);
                self.add_wall(canvas)
            }
            DrawTrigger::End => {
                self.stop_adding_walls(canvas);
                Ok(())
            }
        }
    }

    /// Leaves wall drawing and restores the selection held when it began.
    ///
    /// Outside wall drawing this cancels whatever modal operation is active.
    pub fn stop_adding_walls<C>(&mut self, canvas: &mut C)
    where
        C: WallCanvas + ?Sized,
    {
        match self.mode {
            DrawMode::AddingWalls => {
                self.transition(ModeEvent::DrawEnded);
                if canvas.selection().is_empty() {
                    canvas.cancel_operation();
                } else {
                    canvas.reset_object_draw();
                }
                canvas.set_edit_mode(EditMode::Default);
                let restore = std::mem::take(&mut self.saved_selection);
                if !restore.is_empty() {
                    canvas.select(&restore);
                }
            }
            DrawMode::AddingCorner | DrawMode::SplittingWall => self.cancel_gesture(canvas),
            DrawMode::Idle => canvas.cancel_operation(),
        }
    }

    /// Arms every visible, unlocked wall for corner insertion.
    ///
    /// Returns the number of armed walls.
    pub fn start_add_corner<C>(&mut self, canvas: &mut C) -> usize
    where
        C: WallCanvas + ?Sized,
    {
        self.start_gesture(canvas, Gesture::AddCorner)
    }

    /// Arms every visible, unlocked wall for splitting.
    ///
    /// Returns the number of armed walls.
    pub fn start_split_wall<C>(&mut self, canvas: &mut C) -> usize
    where
        C: WallCanvas + ?Sized,
    {
        self.start_gesture(canvas, Gesture::SplitWall)
    }

    fn start_gesture<C>(&mut self, canvas: &mut C, gesture: Gesture) -> usize
    where
        C: WallCanvas + ?Sized,
    {
        self.stop_adding_walls(canvas);
        canvas.close_edit();
        canvas.cancel_operation();
        canvas.set_edit_mode(EditMode::Edit);

        self.armed = canvas
            .visible_objects()
            .into_iter()
            .filter(|&id| {
                canvas
                    .object(id)
                    .is_some_and(|object| object.is_wall() && !object.is_locked())
            })
            .collect();
        for &id in &self.armed {
            canvas.arm_gesture(id, gesture);
        }

        self.transition(match gesture {
            Gesture::AddCorner => ModeEvent::StartAddCorner,
            Gesture::SplitWall => ModeEvent::StartSplitWall,
        });
        debug!(gesture:?, armed = self.armed.len(); "Walls armed");
        self.armed.len()
    }

    /// Completes the armed gesture on `target` at `hit`.
    ///
    /// Returns whether the wall changed. Gestures on walls that were not
    /// armed are ignored. Whatever the outcome, the tool is idle afterwards.
    ///
    /// # Errors
    ///
    /// A failing edit is handed to [`WallCanvas::exception_cleanup`] and then
    /// returned.
    pub fn complete_gesture<C>(
        &mut self,
        canvas: &mut C,
        target: ObjectId,
        hit: Point,
    ) -> Result<bool, PlenumError>
    where
        C: WallCanvas + ?Sized,
    {
        let gesture = match self.mode {
            DrawMode::AddingCorner => Gesture::AddCorner,
            DrawMode::SplittingWall => Gesture::SplitWall,
            DrawMode::Idle | DrawMode::AddingWalls => return Ok(false),
        };
        if !self.armed.contains(&target) {
            debug!(wall:? = target; "Gesture on unarmed object ignored");
            return Ok(false);
        }

        let result = match gesture {
            Gesture::AddCorner => canvas.add_corner(target, hit),
            Gesture::SplitWall => canvas.split_wall(target, hit),
        };
        self.finish_gesture(canvas, ModeEvent::GestureCompleted);

        match result {
            Ok(changed) => {
                info!(wall:? = target, gesture:?, changed; "Wall gesture completed");
                Ok(changed)
            }
            Err(err) => {
                canvas.exception_cleanup(&err);
                Err(err)
            }
        }
    }

    /// Abandons an armed gesture.
    pub fn cancel_gesture<C>(&mut self, canvas: &mut C)
    where
        C: WallCanvas + ?Sized,
    {
        self.finish_gesture(canvas, ModeEvent::Cancel);
    }

    fn finish_gesture<C>(&mut self, canvas: &mut C, event: ModeEvent)
    where
        C: WallCanvas + ?Sized,
    {
        canvas.disarm_gestures();
        self.armed.clear();
        canvas.set_edit_mode(EditMode::Default);
        canvas.cancel_operation();
        canvas.reset_object_draw();
        self.transition(event);
    }

    /// Handles an editor-wide edit-mode change.
    ///
    /// Modes other than default, edit and the link modes end any wall
    /// activity. Returns whether the tool reacted.
    pub fn notify_edit_mode<C>(&mut self, canvas: &mut C, mode: EditMode) -> bool
    where
        C: WallCanvas + ?Sized,
    {
        if mode.keeps_wall_tool() || self.mode == DrawMode::Idle {
            return false;
        }
        if self.mode.is_gesture() {
            self.cancel_gesture(canvas);
        } else {
            self.stop_adding_walls(canvas);
        }
        self.transition(ModeEvent::EditModeChanged(mode));
        true
    }
}

impl Default for WallTool {
    fn default() -> Self {
        Self::new(&WallConfig::default())
    }
}
