//! Graph traversal and repositioning over hook-connected objects.
//!
//! Objects are linked by primary hooks, connector arrays and two-ended
//! lines. This module answers the questions an editor asks of that graph
//! while the user inserts, moves or deletes shapes.
//!
//! # Pipeline
//!
//! ```text
//! User gesture
//!     ↓ component  (which objects are connected?)
//! Component
//!     ↓ filter     (which of them lie beyond the source?)
//! Partition
//!     ↓ shift      (move them, or reject the move)
//! Translated drawing
//! ```
//!
//! # Submodules
//!
//! - [`component`] - Connected-component discovery
//! - [`filter`] - Directional partitioning with bounding boxes
//! - [`navigate`] - Next selection and parent queries
//! - [`shift`] - Insert and move shifts with collision rejection
//! - [`tree_top`] - Ascent to the root of a hook tree

pub mod component;
pub mod filter;
pub mod navigate;
pub mod shift;
pub mod tree_top;

pub use component::{Component, connector_tree, line_component, line_tree};
pub use filter::{Partition, filter_chart_shapes};
pub use navigate::{container_parent, next_selection, parent_connector, select_container_parent};
pub use shift::{Rejection, ShiftOutcome, ShiftRequest, shift_connected_shapes};
pub use tree_top::{Ascent, TreeTop, ascend, find_tree_top};
