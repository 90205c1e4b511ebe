//! Plenum - the shape-connectivity engine of an HVAC schematic editor.
//!
//! Drawings are made of shapes, connectors and lines tied together by
//! hooks. This crate discovers what is connected to what, repositions
//! connected shapes when the user inserts or moves one, picks the next
//! selection and runs the modal wall-editing tool. All operations work
//! against a [`GraphRepository`]; [`Drawing`] is the in-memory one.

pub mod config;
pub mod connectivity;
mod drawing;
mod error;
mod repository;
pub mod wall;

pub use plenum_core::{geometry, identifier, object, polyline};

pub use connectivity::{Rejection, ShiftOutcome, ShiftRequest};
pub use drawing::Drawing;
pub use error::PlenumError;
pub use repository::GraphRepository;

use log::{debug, info};

use config::AppConfig;
use connectivity::{Component, TreeTop};
use identifier::ObjectId;
use wall::WallTool;

/// Entry point bundling the connectivity operations with a configuration.
///
/// # Examples
///
/// ```rust
/// use plenum::{
///     Drawing, Engine, ShiftRequest,
///     geometry::{Direction, Point, Rect},
///     identifier::ObjectId,
///     object::{DrawingObject, Hook},
/// };
///
/// let (source, target, line) = (ObjectId::new(1), ObjectId::new(2), ObjectId::new(3));
/// let mut drawing: Drawing = [
///     DrawingObject::shape(source, Rect::new(0.0, 0.0, 50.0, 40.0)),
///     DrawingObject::shape(target, Rect::new(200.0, 0.0, 50.0, 40.0)),
///     DrawingObject::line(line, Point::new(50.0, 20.0), Point::new(200.0, 20.0))
///         .with_hook(Hook::new(source))
///         .with_hook(Hook::new(target)),
/// ]
/// .into_iter()
/// .collect();
///
/// let engine = Engine::default();
/// let request = ShiftRequest::insert(source, target, line, Direction::Right);
/// assert!(engine.shift(&mut drawing, &request).is_applied());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: AppConfig,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Everything connected to `start`, without crossing `exclude_line`.
    pub fn component<R>(
        &self,
        repo: &R,
        start: ObjectId,
        exclude_line: Option<ObjectId>,
    ) -> Component
    where
        R: GraphRepository + ?Sized,
    {
        let component = connectivity::line_component(repo, start, exclude_line);
        debug!(start:?, size = component.len(); "Component discovered");
        component
    }

    /// Root of the hook tree `start` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`PlenumError::HookCycle`] when the hooks above `start` loop.
    pub fn tree_top<R>(
        &self,
        repo: &mut R,
        start: ObjectId,
        mark_links: bool,
    ) -> Result<TreeTop, PlenumError>
    where
        R: GraphRepository + ?Sized,
    {
        let mut acc = TreeTop::with_level();
        connectivity::find_tree_top(repo, start, mark_links, &mut acc)?;
        Ok(acc)
    }

    /// Applies a shift with the configured spacing.
    pub fn shift<R>(&self, repo: &mut R, request: &ShiftRequest) -> ShiftOutcome
    where
        R: GraphRepository + ?Sized,
    {
        let outcome = connectivity::shift_connected_shapes(repo, self.config.spacing(), request);
        if let ShiftOutcome::Rejected(reason) = &outcome {
            info!(reason:?; "Shift rejected");
        }
        outcome
    }

    /// Object to select once `current` goes away.
    pub fn next_selection<R>(&self, repo: &R, current: ObjectId) -> Option<ObjectId>
    where
        R: GraphRepository + ?Sized,
    {
        connectivity::next_selection(repo, current)
    }

    /// A wall tool styled by the wall configuration.
    pub fn wall_tool(&self) -> WallTool {
        WallTool::new(self.config.walls())
    }
}
