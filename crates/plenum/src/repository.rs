//! The object-store contract the connectivity engine runs against.
//!
//! Every traversal in this crate takes a [`GraphRepository`] explicitly
//! instead of reaching for a global document. [`Drawing`](crate::Drawing)
//! is the in-memory implementation; an editor embeds the engine by
//! implementing this trait over its own block store.

use plenum_core::{geometry::Point, identifier::ObjectId, object::DrawingObject};

/// Object lookup, link adjacency and geometry mutation over a drawing.
///
/// Lookups of missing ids return `None` or an empty list; implementations
/// must never fail on a deleted object.
pub trait GraphRepository {
    /// Resolves an id to its current object.
    fn resolve(&self, id: ObjectId) -> Option<&DrawingObject>;

    /// Total number of objects in the drawing.
    fn object_count(&self) -> usize;

    /// Flags an object for redraw, or clears the flag.
    fn mark_dirty(&mut self, id: ObjectId, flag: bool);

    /// Connector-class objects linked to `id` through one of their hooks.
    fn child_connectors(&self, id: ObjectId) -> Vec<ObjectId>;

    /// Line-class objects linked to `id` through one of their hooks.
    fn child_lines(&self, id: ObjectId) -> Vec<ObjectId>;

    /// First child connector of `id` other than `exclude`.
    ///
    /// This is the connector array hanging off `id`, if any.
    fn child_array_anchor(&self, id: ObjectId, exclude: Option<ObjectId>) -> Option<ObjectId> {
        self.child_connectors(id)
            .into_iter()
            .find(|&child| Some(child) != exclude)
    }

    /// Offsets an object's geometry and schedules it for redraw.
    fn translate(&mut self, id: ObjectId, offset: Point);

    /// Removes the primary hook of `id`.
    fn prune_primary_hook(&mut self, id: ObjectId);
}
