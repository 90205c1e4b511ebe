//! Selection navigation and parent queries.

use log::trace;

use plenum_core::{
    geometry::Point,
    identifier::ObjectId,
    object::{ConnectorArrayList, ContainerList},
};

use crate::repository::GraphRepository;

/// Object to select after `current` is removed or deselected.
///
/// Inside a container the previous entry wins over the next one; sparse
/// lists skip empty slots. Inside a connector array the previous live
/// member wins likewise, except for flow-chart connectors, which have no
/// next selection. Unhooked objects have none either.
pub fn next_selection<R>(repo: &R, current: ObjectId) -> Option<ObjectId>
where
    R: GraphRepository + ?Sized,
{
    let object = repo.resolve(current)?;
    let Some(hook) = object.primary_hook() else {
        let anchor = repo.child_array_anchor(current, None);
        trace!(current:?, anchor:?; "No parent to navigate within");
        return None;
    };
    let parent = repo.resolve(hook.parent_id())?;

    if let Some(connector) = parent.as_connector() {
        if connector.is_flow_chart() {
            return None;
        }
        return array_sibling(connector.array(), current);
    }
    parent
        .as_shape()
        .and_then(|shape| shape.container())
        .and_then(|list| container_sibling(list, current))
}

fn container_sibling(list: &ContainerList, current: ObjectId) -> Option<ObjectId> {
    let slots = list.slots();
    let index = list.position(current);

    if list.is_sparse() {
        let before = index.map_or(&[][..], |index| &slots[..index]);
        let after = index.map_or(slots, |index| &slots[index + 1..]);
        return before
            .iter()
            .rev()
            .chain(after)
            .find_map(|slot| *slot);
    }

    let index = index?;
    if index > 0 {
        slots[index - 1]
    } else if slots.len() > 1 {
        slots[index + 1]
    } else {
        None
    }
}

fn array_sibling(array: &ConnectorArrayList, current: ObjectId) -> Option<ObjectId> {
    let members = array.slots().get(1..)?;
    let index = members.iter().position(|slot| *slot == Some(current))?;
    members[..index]
        .iter()
        .rev()
        .chain(&members[index + 1..])
        .find_map(|slot| *slot)
}

/// The connector `id` hangs off, with the point it attaches at.
pub fn parent_connector<R>(repo: &R, id: ObjectId) -> Option<(ObjectId, Option<Point>)>
where
    R: GraphRepository + ?Sized,
{
    let hook = repo.resolve(id)?.primary_hook()?;
    repo.resolve(hook.parent_id())
        .filter(|parent| parent.is_connector())
        .map(|parent| (parent.id(), hook.connect_point()))
}

/// The container shape `id` is hooked into.
pub fn container_parent<R>(repo: &R, id: ObjectId) -> Option<ObjectId>
where
    R: GraphRepository + ?Sized,
{
    let hook = repo.resolve(id)?.primary_hook()?;
    repo.resolve(hook.parent_id())
        .filter(|parent| parent.is_container())
        .map(|parent| parent.id())
}

/// Object a click on `id` selects.
///
/// A container sitting in a cell of another container selects its parent;
/// everything else selects itself.
pub fn select_container_parent<R>(repo: &R, id: ObjectId) -> ObjectId
where
    R: GraphRepository + ?Sized,
{
    repo.resolve(id)
        .filter(|object| object.is_container())
        .and_then(|object| object.primary_hook())
        .filter(|hook| hook.cell_id().is_some())
        .map_or(id, |hook| hook.parent_id())
}

#[cfg(test)]
mod tests {
    use plenum_core::{
        geometry::Rect,
        object::{ConnectorData, DrawingObject, Hook, ShapeData},
    };

    use super::*;
    use crate::Drawing;

    fn id(raw: u32) -> ObjectId {
        ObjectId::new(raw)
    }

    fn container(raw: u32, list: ContainerList) -> DrawingObject {
        DrawingObject::shape_with(
            id(raw),
            Rect::new(0.0, 0.0, 300.0, 300.0),
            ShapeData::new().with_container(list),
        )
    }

    fn member(raw: u32, parent: u32) -> DrawingObject {
        DrawingObject::shape(id(raw), Rect::new(10.0, 10.0, 20.0, 20.0))
            .with_hook(Hook::new(id(parent)))
    }

    fn dense(members: &[u32]) -> Drawing {
        let list = ContainerList::dense(members.iter().copied().map(id));
        std::iter::once(container(100, list))
            .chain(members.iter().map(|&raw| member(raw, 100)))
            .collect()
    }

    #[test]
    fn test_dense_prefers_previous() {
        let drawing = dense(&[1, 2, 3]);
        assert_eq!(next_selection(&drawing, id(2)), Some(id(1)));
        assert_eq!(next_selection(&drawing, id(3)), Some(id(2)));
        assert_eq!(next_selection(&drawing, id(1)), Some(id(2)));
    }

    #[test]
    fn test_dense_single_item_has_none() {
        let drawing = dense(&[1]);
        assert_eq!(next_selection(&drawing, id(1)), None);
    }

    #[test]
    fn test_sparse_skips_empty_slots() {
        let list = ContainerList::sparse([None, Some(id(1)), None, Some(id(2)), None, Some(id(3))]);
        let drawing: Drawing = [
            container(100, list),
            member(1, 100),
            member(2, 100),
            member(3, 100),
        ]
        .into_iter()
        .collect();

        assert_eq!(next_selection(&drawing, id(2)), Some(id(1)));
        assert_eq!(next_selection(&drawing, id(1)), Some(id(2)));
        assert_eq!(next_selection(&drawing, id(3)), Some(id(2)));
    }

    #[test]
    fn test_sparse_missing_member_takes_first_live() {
        let list = ContainerList::sparse([None, Some(id(2))]);
        let drawing: Drawing = [container(100, list), member(1, 100), member(2, 100)]
            .into_iter()
            .collect();

        assert_eq!(next_selection(&drawing, id(1)), Some(id(2)));
    }

    #[test]
    fn test_connector_array_siblings() {
        let array = ConnectorArrayList::new(Some(id(100)), [Some(id(1)), None, Some(id(2))]);
        let drawing: Drawing = [
            DrawingObject::connector(id(50), Rect::default(), ConnectorData::new(array)),
            member(1, 50),
            member(2, 50),
        ]
        .into_iter()
        .collect();

        assert_eq!(next_selection(&drawing, id(2)), Some(id(1)));
        assert_eq!(next_selection(&drawing, id(1)), Some(id(2)));
    }

    #[test]
    fn test_flow_chart_connector_has_none() {
        let array = ConnectorArrayList::new(None, [Some(id(1)), Some(id(2))]);
        let drawing: Drawing = [
            DrawingObject::connector(
                id(50),
                Rect::default(),
                ConnectorData::new(array).flow_chart(),
            ),
            member(1, 50),
            member(2, 50),
        ]
        .into_iter()
        .collect();

        assert_eq!(next_selection(&drawing, id(2)), None);
    }

    #[test]
    fn test_unhooked_and_missing_have_none() {
        let drawing = dense(&[1, 2]);
        assert_eq!(next_selection(&drawing, id(100)), None);
        assert_eq!(next_selection(&drawing, id(42)), None);
    }

    #[test]
    fn test_parent_queries() {
        let point = Point::new(0.0, 5.0);
        let array = ConnectorArrayList::new(None, [Some(id(1))]);
        let drawing: Drawing = [
            DrawingObject::connector(id(50), Rect::default(), ConnectorData::new(array)),
            DrawingObject::shape(id(1), Rect::default())
                .with_hook(Hook::new(id(50)).with_connect_point(point)),
            container(100, ContainerList::dense([id(2)])),
            member(2, 100),
        ]
        .into_iter()
        .collect();

        assert_eq!(parent_connector(&drawing, id(1)), Some((id(50), Some(point))));
        assert_eq!(parent_connector(&drawing, id(2)), None);
        assert_eq!(container_parent(&drawing, id(2)), Some(id(100)));
        assert_eq!(container_parent(&drawing, id(1)), None);
    }

    #[test]
    fn test_select_container_parent() {
        let drawing: Drawing = [
            container(100, ContainerList::dense([id(101), id(102)])),
            container(101, ContainerList::dense(Vec::new()))
                .with_hook(Hook::new(id(100)).with_cell(0)),
            container(102, ContainerList::dense(Vec::new())).with_hook(Hook::new(id(100))),
            member(1, 101),
        ]
        .into_iter()
        .collect();

        assert_eq!(select_container_parent(&drawing, id(101)), id(100));
        assert_eq!(select_container_parent(&drawing, id(102)), id(102));
        assert_eq!(select_container_parent(&drawing, id(1)), id(1));
        assert_eq!(select_container_parent(&drawing, id(42)), id(42));
    }
}
