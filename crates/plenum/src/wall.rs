//! Interactive wall editing.
//!
//! Walls are drawn one segment at a time and later refined by adding
//! corners or splitting them. [`WallTool`] owns the modal state
//! ([`DrawMode`]) and drives an editor through the [`WallCanvas`]
//! collaborator; [`EditorCanvas`] implements that collaborator over an
//! in-memory [`Drawing`](crate::Drawing).

mod canvas;
mod mode;
mod tool;

pub use canvas::{DrawTrigger, EditorCanvas, Gesture, WallCanvas, WallStyle};
pub use mode::{DrawMode, EditMode, ModeEvent};
pub use tool::WallTool;
