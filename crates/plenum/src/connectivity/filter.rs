//! Directional partitioning of a component.

use log::debug;

use plenum_core::{
    geometry::{Direction, Rect},
    identifier::ObjectId,
};

use crate::repository::GraphRepository;

/// Shapes split into those that move with an operation and those that stay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    moving: Vec<ObjectId>,
    remaining: Vec<ObjectId>,
    moving_bounds: Option<Rect>,
    remaining_bounds: Option<Rect>,
}

impl Partition {
    pub fn moving(&self) -> &[ObjectId] {
        &self.moving
    }

    pub fn remaining(&self) -> &[ObjectId] {
        &self.remaining
    }

    /// Union of the moving frames. Only computed outside inserts.
    pub fn moving_bounds(&self) -> Option<Rect> {
        self.moving_bounds
    }

    /// Union of the remaining frames. Only computed outside inserts.
    pub fn remaining_bounds(&self) -> Option<Rect> {
        self.remaining_bounds
    }
}

fn grow(bounds: &mut Option<Rect>, frame: Rect) {
    *bounds = Some(bounds.map_or(frame, |bounds| bounds.union(frame)));
}

/// Partitions the shapes among `candidates` around `reference`.
///
/// A shape moves when its frame lies strictly beyond the reference frame's
/// edge in `direction`; touching the edge keeps it in place. Without a
/// direction every shape moves. The reference itself and non-shapes are
/// left out of both sides. Bounds are accumulated unless `is_insert`.
pub fn filter_chart_shapes<R>(
    repo: &R,
    reference: ObjectId,
    direction: Option<Direction>,
    candidates: impl IntoIterator<Item = ObjectId>,
    is_insert: bool,
) -> Partition
where
    R: GraphRepository + ?Sized,
{
    let mut partition = Partition::default();
    let Some(reference_frame) = repo.resolve(reference).map(|object| object.frame()) else {
        return partition;
    };

    for id in candidates {
        if id == reference {
            continue;
        }
        let Some(object) = repo.resolve(id).filter(|object| object.is_shape()) else {
            continue;
        };
        let frame = object.frame();

        let moves = match direction {
            Some(Direction::Right) => frame.x() > reference_frame.right(),
            Some(Direction::Left) => frame.right() < reference_frame.x(),
            Some(Direction::Down) => frame.y() > reference_frame.bottom(),
            Some(Direction::Up) => frame.bottom() < reference_frame.y(),
            None => true,
        };

        if moves {
            partition.moving.push(id);
            if !is_insert {
                grow(&mut partition.moving_bounds, frame);
            }
        } else {
            partition.remaining.push(id);
            if !is_insert {
                grow(&mut partition.remaining_bounds, frame);
            }
        }
    }

    debug!(
        reference:?,
        direction:?,
        moving = partition.moving.len(),
        remaining = partition.remaining.len();
        "Partitioned chart shapes"
    );
    partition
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use plenum_core::{geometry::Point, object::DrawingObject};

    use super::*;
    use crate::Drawing;

    fn id(raw: u32) -> ObjectId {
        ObjectId::new(raw)
    }

    /// Reference at (100, 100) 50x50 with one shape on each side.
    fn compass() -> Drawing {
        [
            DrawingObject::shape(id(0), Rect::new(100.0, 100.0, 50.0, 50.0)),
            DrawingObject::shape(id(1), Rect::new(200.0, 100.0, 50.0, 50.0)),
            DrawingObject::shape(id(2), Rect::new(0.0, 100.0, 50.0, 50.0)),
            DrawingObject::shape(id(3), Rect::new(100.0, 200.0, 50.0, 50.0)),
            DrawingObject::shape(id(4), Rect::new(100.0, 0.0, 50.0, 50.0)),
        ]
        .into_iter()
        .collect()
    }

    fn all() -> Vec<ObjectId> {
        (0..5).map(id).collect()
    }

    #[test]
    fn test_each_direction_moves_one_side() {
        let drawing = compass();
        for (direction, expected) in [
            (Direction::Right, 1),
            (Direction::Left, 2),
            (Direction::Down, 3),
            (Direction::Up, 4),
        ] {
            let partition = filter_chart_shapes(&drawing, id(0), Some(direction), all(), true);
            assert_eq!(partition.moving(), &[id(expected)], "{direction:?}");
            assert_eq!(partition.remaining().len(), 3);
        }
    }

    #[test]
    fn test_touching_edge_remains() {
        let drawing: Drawing = [
            DrawingObject::shape(id(0), Rect::new(0.0, 0.0, 50.0, 50.0)),
            DrawingObject::shape(id(1), Rect::new(50.0, 0.0, 50.0, 50.0)),
        ]
        .into_iter()
        .collect();

        let partition =
            filter_chart_shapes(&drawing, id(0), Some(Direction::Right), [id(1)], false);
        assert!(partition.moving().is_empty());
        assert_eq!(partition.remaining(), &[id(1)]);
    }

    #[test]
    fn test_no_direction_moves_everything() {
        let drawing = compass();
        let partition = filter_chart_shapes(&drawing, id(0), None, all(), true);
        assert_eq!(partition.moving().len(), 4);
        assert!(partition.remaining().is_empty());
    }

    #[test]
    fn test_bounds_only_outside_insert() {
        let drawing = compass();

        let insert = filter_chart_shapes(&drawing, id(0), Some(Direction::Right), all(), true);
        assert_eq!(insert.moving_bounds(), None);
        assert_eq!(insert.remaining_bounds(), None);

        let moved = filter_chart_shapes(&drawing, id(0), Some(Direction::Right), all(), false);
        let moving = moved.moving_bounds().expect("one shape moves");
        assert!(moving.approx_eq(Rect::new(200.0, 100.0, 50.0, 50.0)));
        let remaining = moved.remaining_bounds().expect("three shapes stay");
        assert_approx_eq!(f64, remaining.x(), 0.0);
        assert_approx_eq!(f64, remaining.y(), 0.0);
        assert_approx_eq!(f64, remaining.right(), 150.0);
        assert_approx_eq!(f64, remaining.bottom(), 250.0);
    }

    #[test]
    fn test_non_shapes_and_missing_are_skipped() {
        let mut drawing = compass();
        drawing.insert(DrawingObject::line(
            id(9),
            Point::new(300.0, 0.0),
            Point::new(400.0, 0.0),
        ));

        let partition = filter_chart_shapes(
            &drawing,
            id(0),
            Some(Direction::Right),
            [id(1), id(9), id(42)],
            false,
        );
        assert_eq!(partition.moving(), &[id(1)]);
        assert!(partition.remaining().is_empty());
    }

    #[test]
    fn test_missing_reference_is_empty() {
        let drawing = compass();
        let partition = filter_chart_shapes(&drawing, id(42), Some(Direction::Up), all(), false);
        assert_eq!(partition, Partition::default());
    }
}
