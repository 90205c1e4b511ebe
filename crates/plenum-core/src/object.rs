//! The drawing object model.
//!
//! A drawing is made of [`DrawingObject`]s. Each object is one of three base
//! classes, expressed as the closed [`ObjectKind`] union:
//!
//! - **Shape** - a placed symbol, optionally a container owning a
//!   [`ContainerList`] of children
//! - **Connector** - a branching backbone (a duct or pipe trunk) owning a
//!   [`ConnectorArrayList`] of attached children
//! - **Line** - an edge between two objects, or a wall polyline
//!
//! Objects are linked to their parents through [`Hook`]s. `hooks[0]` is the
//! primary parent link; the primary hooks of a well-formed drawing form a
//! forest.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Rect, Size},
    identifier::ObjectId,
    polyline::PolyLine,
};

/// Discriminant of the three object base classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseClass {
    Shape,
    Connector,
    Line,
}

/// Domain object type used for special-case routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    #[default]
    None,
    /// Floor-plan wall; the target of corner and split gestures.
    Wall,
    /// Timeline node. Acts as a pass-through when discovering components.
    TimeLine,
    /// Event node. Lines of this type carry an associated object id.
    Event,
}

/// A directed edge from a child object to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    parent_id: ObjectId,
    connect_point: Option<Point>,
    cell_id: Option<u32>,
}

impl Hook {
    /// Creates a hook onto `parent_id` with no connect point.
    pub fn new(parent_id: ObjectId) -> Self {
        Self {
            parent_id,
            connect_point: None,
            cell_id: None,
        }
    }

    /// Sets the point on the parent the hook attaches to.
    pub fn with_connect_point(mut self, point: Point) -> Self {
        self.connect_point = Some(point);
        self
    }

    /// Sets the container cell the hook attaches to.
    pub fn with_cell(mut self, cell_id: u32) -> Self {
        self.cell_id = Some(cell_id);
        self
    }

    pub fn parent_id(&self) -> ObjectId {
        self.parent_id
    }

    pub fn connect_point(&self) -> Option<Point> {
        self.connect_point
    }

    pub fn cell_id(&self) -> Option<u32> {
        self.cell_id
    }
}

/// Ordered attachment list owned by a connector.
///
/// Slot 0 is the connector's own anchor; slots from 1 on hold the attached
/// children. `None` marks a dead slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorArrayList {
    slots: Vec<Option<ObjectId>>,
}

impl ConnectorArrayList {
    /// Creates an array list from its anchor and attached children.
    pub fn new(
        anchor: Option<ObjectId>,
        children: impl IntoIterator<Item = Option<ObjectId>>,
    ) -> Self {
        let mut slots = vec![anchor];
        slots.extend(children);
        Self { slots }
    }

    /// The connector's own anchor slot.
    pub fn anchor(&self) -> Option<ObjectId> {
        self.slots.first().copied().flatten()
    }

    /// All slots, including the anchor at index 0.
    pub fn slots(&self) -> &[Option<ObjectId>] {
        &self.slots
    }

    /// Live attached children, in slot order, skipping the anchor.
    pub fn children(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.slots.iter().skip(1).filter_map(|slot| *slot)
    }
}

/// Ordered child list owned by a container shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerList {
    slots: Vec<Option<ObjectId>>,
    sparse: bool,
}

impl ContainerList {
    /// Creates a dense list where every slot is live.
    pub fn dense(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            slots: ids.into_iter().map(Some).collect(),
            sparse: false,
        }
    }

    /// Creates a sparse list where `None` marks an empty slot.
    pub fn sparse(slots: impl IntoIterator<Item = Option<ObjectId>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            sparse: true,
        }
    }

    pub fn is_sparse(&self) -> bool {
        self.sparse
    }

    pub fn slots(&self) -> &[Option<ObjectId>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the slot holding `id`.
    pub fn position(&self, id: ObjectId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }
}

/// Shape-specific data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    container: Option<ContainerList>,
    connect_points: Vec<Point>,
    use_connect: bool,
    rotation: f64,
}

impl ShapeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the shape into a container owning `list`.
    pub fn with_container(mut self, list: ContainerList) -> Self {
        self.container = Some(list);
        self
    }

    /// Gives the shape explicit connect points and enables them.
    pub fn with_connect_points(mut self, points: Vec<Point>) -> Self {
        self.connect_points = points;
        self.use_connect = true;
        self
    }

    /// Sets the rotation angle in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn container(&self) -> Option<&ContainerList> {
        self.container.as_ref()
    }

    pub fn connect_points(&self) -> &[Point] {
        &self.connect_points
    }

    pub fn uses_connect_points(&self) -> bool {
        self.use_connect && !self.connect_points.is_empty()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Reports whether auto-inserting this shape onto a line of the given
    /// orientation would rotate it by a quarter turn.
    ///
    /// Only shapes with explicit connect points take part. The points are
    /// bucketed into the outer sixths of their bounding box (inflated to at
    /// least 1000 units on each axis); a shape whose connect points sit
    /// only on the two ends of its long axis is rotated. Multi-point shapes
    /// are additionally rotated whenever their current angle does not
    /// already match the requested orientation.
    ///
    /// The probe is read-only: nothing about the shape changes.
    pub fn auto_insert_rotates(&self, vertical: bool) -> bool {
        if !self.uses_connect_points() {
            return false;
        }

        let points = &self.connect_points;
        let single_point = points.len() < 2;
        let Some(mut bounds) = Rect::bounding(points) else {
            return false;
        };
        let origin = bounds.origin();
        if bounds.width() < 1000.0 {
            bounds = bounds.inflate(1000.0, 0.0);
        }
        if bounds.height() < 1000.0 {
            bounds = bounds.inflate(0.0, 1000.0);
        }
        let (width, height) = (bounds.width(), bounds.height());

        let (mut top, mut bottom, mut left, mut right) = (0usize, 0usize, 0usize, 0usize);
        let tall = height > width;
        for point in points {
            let local = point.sub_point(origin);
            let near_top = local.y() < height / 6.0;
            let near_bottom = local.y() >= 5.0 * height / 6.0;
            let near_left = local.x() < width / 6.0;
            let near_right = local.x() >= 5.0 * width / 6.0;
            if tall {
                if near_top {
                    top += 1;
                } else if near_bottom {
                    bottom += 1;
                } else if near_left {
                    left += 1;
                } else if near_right {
                    right += 1;
                }
            } else if near_left {
                left += 1;
            } else if near_right {
                right += 1;
            } else if near_top {
                top += 1;
            } else if near_bottom {
                bottom += 1;
            }
        }

        let rotates = if tall {
            left == 0
                && right == 0
                && ((top > 0 && bottom > 0) || (single_point && top + bottom > 0))
        } else {
            top == 0
                && bottom == 0
                && ((left > 0 && right > 0) || (single_point && left + right > 0))
        };

        if rotates || single_point {
            return rotates;
        }

        let angle = self.rotation;
        if vertical {
            angle != -90.0 && angle != 90.0
        } else {
            angle != 0.0 && angle != 180.0
        }
    }
}

/// Connector-specific data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorData {
    array: ConnectorArrayList,
    flow_chart: bool,
}

impl ConnectorData {
    pub fn new(array: ConnectorArrayList) -> Self {
        Self {
            array,
            flow_chart: false,
        }
    }

    /// Marks the connector as a flow-chart connector.
    pub fn flow_chart(mut self) -> Self {
        self.flow_chart = true;
        self
    }

    pub fn array(&self) -> &ConnectorArrayList {
        &self.array
    }

    pub fn is_flow_chart(&self) -> bool {
        self.flow_chart
    }
}

/// Line-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    start: Point,
    end: Point,
    polyline: Option<PolyLine>,
}

impl LineData {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            polyline: None,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn polyline(&self) -> Option<&PolyLine> {
        self.polyline.as_ref()
    }

    pub fn polyline_mut(&mut self) -> Option<&mut PolyLine> {
        self.polyline.as_mut()
    }

    /// Horizontal distance between the endpoints.
    pub fn horizontal_span(&self) -> f64 {
        (self.end.x() - self.start.x()).abs()
    }

    /// Vertical distance between the endpoints.
    pub fn vertical_span(&self) -> f64 {
        (self.end.y() - self.start.y()).abs()
    }
}

/// The closed set of object variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Shape(ShapeData),
    Connector(ConnectorData),
    Line(LineData),
}

impl ObjectKind {
    pub fn base_class(&self) -> BaseClass {
        match self {
            Self::Shape(_) => BaseClass::Shape,
            Self::Connector(_) => BaseClass::Connector,
            Self::Line(_) => BaseClass::Line,
        }
    }
}

/// A single object of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingObject {
    id: ObjectId,
    kind: ObjectKind,
    frame: Rect,
    hooks: Vec<Hook>,
    object_type: ObjectType,
    associated_id: Option<ObjectId>,
    locked: bool,
}

impl DrawingObject {
    fn new(id: ObjectId, kind: ObjectKind, frame: Rect) -> Self {
        Self {
            id,
            kind,
            frame,
            hooks: Vec::new(),
            object_type: ObjectType::None,
            associated_id: None,
            locked: false,
        }
    }

    /// Creates a plain shape occupying `frame`.
    pub fn shape(id: ObjectId, frame: Rect) -> Self {
        Self::new(id, ObjectKind::Shape(ShapeData::new()), frame)
    }

    /// Creates a shape with explicit shape data.
    pub fn shape_with(id: ObjectId, frame: Rect, data: ShapeData) -> Self {
        Self::new(id, ObjectKind::Shape(data), frame)
    }

    /// Creates a connector occupying `frame`.
    pub fn connector(id: ObjectId, frame: Rect, data: ConnectorData) -> Self {
        Self::new(id, ObjectKind::Connector(data), frame)
    }

    /// Creates a straight line; its frame spans both endpoints.
    pub fn line(id: ObjectId, start: Point, end: Point) -> Self {
        let frame = Rect::bounding(&[start, end]).unwrap_or_default();
        Self::new(id, ObjectKind::Line(LineData::new(start, end)), frame)
    }

    /// Creates a wall line following `polyline`.
    pub fn wall(id: ObjectId, polyline: PolyLine) -> Self {
        let (start, end) = polyline.endpoints();
        let frame = polyline.bounds();
        let data = LineData {
            start,
            end,
            polyline: Some(polyline),
        };
        let mut object = Self::new(id, ObjectKind::Line(data), frame);
        object.object_type = ObjectType::Wall;
        object
    }

    /// Appends a hook; the first hook added becomes the primary hook.
    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    pub fn with_associated(mut self, id: ObjectId) -> Self {
        self.associated_id = Some(id);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn base_class(&self) -> BaseClass {
        self.kind.base_class()
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// The primary parent link, `hooks[0]`.
    pub fn primary_hook(&self) -> Option<&Hook> {
        self.hooks.first()
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn associated_id(&self) -> Option<ObjectId> {
        self.associated_id
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_shape(&self) -> bool {
        matches!(self.kind, ObjectKind::Shape(_))
    }

    pub fn is_connector(&self) -> bool {
        matches!(self.kind, ObjectKind::Connector(_))
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, ObjectKind::Line(_))
    }

    /// True for shapes that own a container list.
    pub fn is_container(&self) -> bool {
        self.as_shape().is_some_and(|shape| shape.container().is_some())
    }

    /// True for wall-type objects.
    pub fn is_wall(&self) -> bool {
        self.object_type == ObjectType::Wall
    }

    pub fn as_shape(&self) -> Option<&ShapeData> {
        match &self.kind {
            ObjectKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_connector(&self) -> Option<&ConnectorData> {
        match &self.kind {
            ObjectKind::Connector(connector) => Some(connector),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineData> {
        match &self.kind {
            ObjectKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineData> {
        match &mut self.kind {
            ObjectKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Removes the primary hook, returning it.
    pub fn remove_primary_hook(&mut self) -> Option<Hook> {
        if self.hooks.is_empty() {
            None
        } else {
            Some(self.hooks.remove(0))
        }
    }

    /// Moves the object by `offset`, carrying line endpoints and polyline
    /// vertices along with the frame.
    pub fn translate(&mut self, offset: Point) {
        self.frame = self.frame.translate(offset);
        if let ObjectKind::Line(line) = &mut self.kind {
            line.start = line.start.add_point(offset);
            line.end = line.end.add_point(offset);
            if let Some(polyline) = &mut line.polyline {
                polyline.translate(offset);
            }
        }
    }

    /// Recomputes the frame and endpoints of a wall after its polyline changed.
    pub fn refresh_line_geometry(&mut self) {
        if let ObjectKind::Line(line) = &mut self.kind {
            if let Some(polyline) = &line.polyline {
                let (start, end) = polyline.endpoints();
                line.start = start;
                line.end = end;
                self.frame = polyline.bounds();
            }
        }
    }

    /// Frame dimensions of the object.
    pub fn size(&self) -> Size {
        self.frame.size()
    }
}
