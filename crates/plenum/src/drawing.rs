//! In-memory object store.

use indexmap::{IndexMap, IndexSet};
use log::{trace, warn};

use plenum_core::{
    geometry::Point,
    identifier::ObjectId,
    object::{BaseClass, DrawingObject},
};

use crate::repository::GraphRepository;

/// A drawing held in memory, in z-order.
///
/// Link adjacency is derived from hooks: an object holding a hook onto `X`
/// is a link child of `X`. Objects touched by [`GraphRepository::mark_dirty`]
/// or [`GraphRepository::translate`] are collected in a dirty set that a
/// renderer drains with [`Drawing::take_dirty`].
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    objects: IndexMap<ObjectId, DrawingObject>,
    dirty: IndexSet<ObjectId>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object, replacing any object with the same id.
    ///
    /// A replaced object keeps its position in z-order.
    pub fn insert(&mut self, object: DrawingObject) -> Option<DrawingObject> {
        self.objects.insert(object.id(), object)
    }

    /// Removes an object, preserving the order of the rest.
    pub fn remove(&mut self, id: ObjectId) -> Option<DrawingObject> {
        self.dirty.shift_remove(&id);
        self.objects.shift_remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&DrawingObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DrawingObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in z-order.
    pub fn objects(&self) -> impl Iterator<Item = &DrawingObject> {
        self.objects.values()
    }

    /// Ids of the visible objects, in z-order.
    pub fn visible_objects(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Smallest id above every id in use, or `None` once `u32::MAX` is
    /// taken.
    pub fn next_id(&self) -> Option<ObjectId> {
        match self.objects.keys().map(|id| id.get()).max() {
            Some(max) => max.checked_add(1).map(ObjectId::new),
            None => Some(ObjectId::new(0)),
        }
    }

    /// `count` consecutive unused ids starting at [`Drawing::next_id`].
    pub fn fresh_ids(&self, count: usize) -> Option<Vec<ObjectId>> {
        if count == 0 {
            return Some(Vec::new());
        }
        let first = self.next_id()?.get();
        (0..u32::try_from(count).ok()?)
            .map(|offset| first.checked_add(offset).map(ObjectId::new))
            .collect()
    }

    pub fn is_dirty(&self, id: ObjectId) -> bool {
        self.dirty.contains(&id)
    }

    /// Drains the dirty set in the order objects were flagged.
    pub fn take_dirty(&mut self) -> Vec<ObjectId> {
        self.dirty.drain(..).collect()
    }

    fn link_children(&self, id: ObjectId, class: BaseClass) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|object| object.base_class() == class)
            .filter(|object| object.hooks().iter().any(|hook| hook.parent_id() == id))
            .map(DrawingObject::id)
            .collect()
    }
}

impl FromIterator<DrawingObject> for Drawing {
    fn from_iter<T: IntoIterator<Item = DrawingObject>>(iter: T) -> Self {
        let mut drawing = Self::new();
        for object in iter {
            drawing.insert(object);
        }
        drawing
    }
}

impl GraphRepository for Drawing {
    fn resolve(&self, id: ObjectId) -> Option<&DrawingObject> {
        self.objects.get(&id)
    }

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn mark_dirty(&mut self, id: ObjectId, flag: bool) {
        if flag {
            self.dirty.insert(id);
        } else {
            self.dirty.shift_remove(&id);
        }
    }

    fn child_connectors(&self, id: ObjectId) -> Vec<ObjectId> {
        self.link_children(id, BaseClass::Connector)
    }

    fn child_lines(&self, id: ObjectId) -> Vec<ObjectId> {
        self.link_children(id, BaseClass::Line)
    }

    fn translate(&mut self, id: ObjectId, offset: Point) {
        let Some(object) = self.objects.get_mut(&id) else {
            trace!(id:?; "Translate skipped missing object");
            return;
        };
        object.translate(offset);
        self.dirty.insert(id);
    }

    fn prune_primary_hook(&mut self, id: ObjectId) {
        let Some(hook) = self
            .objects
            .get_mut(&id)
            .and_then(DrawingObject::remove_primary_hook)
        else {
            return;
        };
        warn!(id:?, parent:? = hook.parent_id(); "Pruned primary hook");
        self.dirty.insert(id);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use plenum_core::{
        geometry::Rect,
        object::{ConnectorArrayList, ConnectorData, Hook},
    };

    use super::*;

    fn id(raw: u32) -> ObjectId {
        ObjectId::new(raw)
    }

    fn sample() -> Drawing {
        let shape = DrawingObject::shape(id(1), Rect::new(0.0, 0.0, 50.0, 40.0));
        let connector = DrawingObject::connector(
            id(2),
            Rect::new(60.0, 0.0, 10.0, 100.0),
            ConnectorData::new(ConnectorArrayList::new(Some(id(1)), Vec::new())),
        )
        .with_hook(Hook::new(id(1)));
        let line = DrawingObject::line(id(3), Point::new(50.0, 20.0), Point::new(200.0, 20.0))
            .with_hook(Hook::new(id(1)))
            .with_hook(Hook::new(id(4)));
        let other = DrawingObject::shape(id(4), Rect::new(200.0, 0.0, 50.0, 40.0));
        [shape, connector, line, other].into_iter().collect()
    }

    #[test]
    fn test_link_children_by_class() {
        let drawing = sample();
        assert_eq!(drawing.child_connectors(id(1)), vec![id(2)]);
        assert_eq!(drawing.child_lines(id(1)), vec![id(3)]);
        assert_eq!(drawing.child_lines(id(4)), vec![id(3)]);
        assert!(drawing.child_connectors(id(4)).is_empty());
        assert!(drawing.child_lines(id(99)).is_empty());
    }

    #[test]
    fn test_child_array_anchor_honours_exclude() {
        let drawing = sample();
        assert_eq!(drawing.child_array_anchor(id(1), None), Some(id(2)));
        assert_eq!(drawing.child_array_anchor(id(1), Some(id(2))), None);
    }

    #[test]
    fn test_translate_moves_and_marks_dirty() {
        let mut drawing = sample();
        drawing.translate(id(4), Point::new(-10.0, 5.0));

        let frame = drawing.resolve(id(4)).expect("shape exists").frame();
        assert_approx_eq!(f64, frame.x(), 190.0);
        assert_approx_eq!(f64, frame.y(), 5.0);
        assert_eq!(drawing.take_dirty(), vec![id(4)]);
        assert!(!drawing.is_dirty(id(4)));
    }

    #[test]
    fn test_translate_missing_is_silent() {
        let mut drawing = sample();
        drawing.translate(id(42), Point::new(1.0, 1.0));
        assert!(drawing.take_dirty().is_empty());
    }

    #[test]
    fn test_mark_dirty_toggles() {
        let mut drawing = sample();
        drawing.mark_dirty(id(1), true);
        assert!(drawing.is_dirty(id(1)));
        drawing.mark_dirty(id(1), false);
        assert!(!drawing.is_dirty(id(1)));
    }

    #[test]
    fn test_prune_primary_hook() {
        let mut drawing = sample();
        drawing.prune_primary_hook(id(3));
        let hooks = drawing.resolve(id(3)).expect("line exists").hooks();
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].parent_id(), id(4));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut drawing = sample();
        drawing.remove(id(2));
        assert_eq!(drawing.visible_objects(), vec![id(1), id(3), id(4)]);
        assert_eq!(drawing.next_id(), Some(id(5)));
        assert_eq!(drawing.fresh_ids(2), Some(vec![id(5), id(6)]));
    }

    #[test]
    fn test_ids_exhausted_at_top_of_range() {
        let top = ObjectId::new(u32::MAX - 1);
        let mut drawing: Drawing = [DrawingObject::shape(top, Rect::default())]
            .into_iter()
            .collect();
        assert_eq!(drawing.next_id(), Some(ObjectId::new(u32::MAX)));
        assert_eq!(drawing.fresh_ids(2), None);

        drawing.insert(DrawingObject::shape(ObjectId::new(u32::MAX), Rect::default()));
        assert_eq!(drawing.next_id(), None);
        assert_eq!(drawing.fresh_ids(0), Some(Vec::new()));
        assert_eq!(drawing.fresh_ids(1), None);
    }
}
