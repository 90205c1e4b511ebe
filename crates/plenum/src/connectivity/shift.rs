//! Coordinated repositioning of connected shapes.
//!
//! A shift moves every shape of a component that lies beyond a source
//! shape in the direction of an insert or move. Moves are checked against
//! the shapes that stay behind and are either applied in full or rejected
//! without touching the drawing.

use log::{debug, info};

use plenum_core::{
    geometry::{Direction, Point, Rect, Size},
    identifier::ObjectId,
};

use super::{
    component::line_component,
    filter::{Partition, filter_chart_shapes},
};
use crate::{config::SpacingConfig, repository::GraphRepository};

/// Parameters of one shift.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRequest {
    source: ObjectId,
    target: ObjectId,
    line: ObjectId,
    direction: Direction,
    insert: bool,
    reference: Option<ObjectId>,
    custom_distance: Option<f64>,
}

impl ShiftRequest {
    /// Shift making room for a new shape between `source` and `target`.
    pub fn insert(
        source: ObjectId,
        target: ObjectId,
        line: ObjectId,
        direction: Direction,
    ) -> Self {
        Self {
            source,
            target,
            line,
            direction,
            insert: true,
            reference: None,
            custom_distance: None,
        }
    }

    /// Shift pulling `target` back towards `source` along `line`.
    pub fn shrink(
        source: ObjectId,
        target: ObjectId,
        line: ObjectId,
        direction: Direction,
    ) -> Self {
        Self {
            insert: false,
            ..Self::insert(source, target, line, direction)
        }
    }

    /// Sizes the shift from the shape about to be inserted.
    pub fn with_reference(mut self, reference: ObjectId) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Overrides the computed magnitude.
    pub fn with_custom_distance(mut self, distance: f64) -> Self {
        self.custom_distance = Some(distance);
        self
    }

    pub fn source(&self) -> ObjectId {
        self.source
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    pub fn line(&self) -> ObjectId {
        self.line
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_insert(&self) -> bool {
        self.insert
    }
}

/// Why a shift was not applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// The moved shapes would come within the collision gap of the shapes
    /// staying behind. `clearance` is the distance that would remain.
    Collision { clearance: f64 },
    /// The source shape does not exist.
    MissingSource,
    /// A move was requested along a line that does not exist.
    MissingLine,
}

/// Result of [`shift_connected_shapes`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftOutcome {
    /// Every listed shape was translated by `offset`.
    Applied { moved: Vec<ObjectId>, offset: Point },
    /// Nothing was translated.
    Rejected(Rejection),
}

impl ShiftOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Size driving the default magnitude: the inserted shape's, turned a
/// quarter when it would auto-rotate onto the line, or else the source's.
fn reference_size<R>(repo: &R, request: &ShiftRequest, source_size: Size) -> Size
where
    R: GraphRepository + ?Sized,
{
    if !request.insert {
        return source_size;
    }
    let Some(reference) = request.reference.and_then(|id| repo.resolve(id)) else {
        return source_size;
    };

    let vertical = request.direction.is_vertical();
    let rotates = reference
        .as_shape()
        .is_some_and(|shape| shape.uses_connect_points() && shape.auto_insert_rotates(vertical));
    if rotates {
        reference.size().transpose()
    } else {
        reference.size()
    }
}

/// Signed distance the shapes beyond the source travel.
fn shift_offset(
    config: &SpacingConfig,
    request: &ShiftRequest,
    size: Size,
    line_span: Option<f64>,
) -> Point {
    let direction = request.direction;
    let (extent, spacing) = if direction.is_vertical() {
        (size.height(), config.vertical_array_width())
    } else {
        (size.width(), config.horizontal_array_width())
    };
    // Left and Up keep the array width even with a custom distance.
    let min_gap = match (request.custom_distance, direction) {
        (Some(_), Direction::Right | Direction::Down) => config.custom_min_gap(),
        (None, Direction::Right) => config.gap_array_width(),
        _ => spacing,
    };

    let mut magnitude = request.custom_distance.unwrap_or(extent + spacing);
    if let Some(span) = line_span
        && !request.insert
        && span - magnitude < min_gap
    {
        magnitude = span - min_gap;
    }

    let signed = if direction.is_negative() {
        -magnitude
    } else {
        magnitude
    };
    if direction.is_vertical() {
        Point::new(0.0, signed)
    } else {
        Point::new(signed, 0.0)
    }
}

/// Distance left between the moved bounds and the remaining bounds along
/// the axis of motion.
fn clearance(direction: Direction, moved: Rect, remaining: Rect) -> f64 {
    match direction {
        Direction::Right => moved.x() - remaining.right(),
        Direction::Left => remaining.x() - moved.right(),
        Direction::Down => moved.y() - remaining.bottom(),
        Direction::Up => remaining.y() - moved.bottom(),
    }
}

/// Shifts the shapes connected to `target` that lie beyond `source`.
///
/// The component is discovered from the target without crossing the
/// request's line, then partitioned around the source. Inserts push the
/// moving shapes away by the reference extent plus the configured array
/// width. Moves pull them back by the same amount, clamped so the line
/// keeps its minimum length, and are rejected when the moved shapes would
/// come closer than the collision gap to the rest of the component.
///
/// Either every moving shape is translated or none is.
pub fn shift_connected_shapes<R>(
    repo: &mut R,
    config: &SpacingConfig,
    request: &ShiftRequest,
) -> ShiftOutcome
where
    R: GraphRepository + ?Sized,
{
    let Some(source_size) = repo.resolve(request.source).map(|object| object.size()) else {
        debug!(source:? = request.source; "Shift rejected, source missing");
        return ShiftOutcome::Rejected(Rejection::MissingSource);
    };
    let line_span = repo
        .resolve(request.line)
        .and_then(|object| object.as_line())
        .map(|line| {
            if request.direction.is_vertical() {
                line.vertical_span()
            } else {
                line.horizontal_span()
            }
        });
    if !request.insert && line_span.is_none() {
        debug!(line:? = request.line; "Shift rejected, line missing");
        return ShiftOutcome::Rejected(Rejection::MissingLine);
    }

    let connected = line_component(repo, request.target, Some(request.line));
    let partition = filter_chart_shapes(
        repo,
        request.source,
        Some(request.direction),
        connected,
        request.insert,
    );

    let size = reference_size(repo, request, source_size);
    let mut offset = shift_offset(config, request, size, line_span);

    if !request.insert {
        offset = offset.negate();
        if let Some(clearance) = collision_clearance(repo, config, request, &partition, offset) {
            debug!(clearance, offset:?; "Shift rejected, shapes would collide");
            return ShiftOutcome::Rejected(Rejection::Collision { clearance });
        }
    }

    let moved = partition.moving().to_vec();
    for &id in &moved {
        repo.translate(id, offset);
    }
    info!(
        target_id:? = request.target,
        direction:? = request.direction,
        insert = request.insert,
        moved = moved.len(),
        dx = offset.x(),
        dy = offset.y();
        "Shifted connected shapes"
    );
    ShiftOutcome::Applied { moved, offset }
}

/// Clearance after the move when it falls below the collision gap.
fn collision_clearance<R>(
    repo: &R,
    config: &SpacingConfig,
    request: &ShiftRequest,
    partition: &Partition,
    offset: Point,
) -> Option<f64>
where
    R: GraphRepository + ?Sized,
{
    let whole = line_component(repo, request.target, None);
    let sides = filter_chart_shapes(repo, request.source, Some(request.direction), whole, false);

    let remaining = sides.remaining_bounds()?;
    let moved = partition.moving_bounds()?.translate(offset);
    let clearance = clearance(request.direction, moved, remaining);
    (clearance < config.collision_gap()).then_some(clearance)
}
