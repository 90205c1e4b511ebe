//! Geometric primitives for schematic drawings.
//!
//! This module provides the geometric types used throughout Plenum for
//! describing object frames, hook points, and the offsets applied when
//! connected sub-trees are repositioned.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in document space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned frame defined by its top-left corner and size
//! - [`Direction`] - A cardinal direction used by directional operations
//!
//! # Coordinate System
//!
//! Plenum uses the same coordinate system as the SVG layer it feeds:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing frames for equality.
pub const FRAME_EPSILON: f64 = 0.0001;

/// A 2D point representing a position in document coordinate space.
///
/// # Examples
///
/// ```
/// # use plenum_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Negates both coordinates
    pub fn negate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle in degrees of the vector from this point to `other`.
    ///
    /// The angle is measured in document space (Y grows downward), so a
    /// vector pointing straight down yields `90.0`. The result is
    /// normalized into `[0, 360)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plenum_core::geometry::Point;
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(origin.angle_to(Point::new(10.0, 0.0)), 0.0);
    /// assert_eq!(origin.angle_to(Point::new(0.0, 10.0)), 90.0);
    /// assert_eq!(origin.angle_to(Point::new(-10.0, 0.0)), 180.0);
    /// ```
    pub fn angle_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return 0.0;
        }
        let mut degrees = dy.atan2(dx).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        // Tiny negative angles round up to exactly 360.
        if degrees >= 360.0 { 0.0 } else { degrees }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the size with width and height exchanged
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// Frames are value types: union and intersection are pure functions with
/// no object identity attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Creates a new rect from its top-left corner and dimensions
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rect from a top-left point and a size
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Smallest rect enclosing every point, or `None` for an empty slice
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the right edge (`x + width`)
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`)
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Returns the top-left corner as a point
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the dimensions of the rect
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns a rect with the same origin and the given size
    pub fn with_size(self, size: Size) -> Self {
        Self::from_origin(self.origin(), size)
    }

    /// Smallest rect containing both rects.
    ///
    /// # Examples
    ///
    /// ```
    /// # use plenum_core::geometry::Rect;
    /// let a = Rect::new(0.0, 0.0, 100.0, 30.0);
    /// let b = Rect::new(10.0, 40.0, 120.0, 80.0);
    ///
    /// let combined = a.union(b);
    /// assert_eq!(combined, Rect::new(0.0, 0.0, 130.0, 120.0));
    /// ```
    pub fn union(self, other: Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Overlapping region of both rects, or `None` when they are disjoint.
    ///
    /// Rects that only touch along an edge do not intersect.
    pub fn intersection(self, other: Rect) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Moves the rect by the specified offset
    pub fn translate(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Grows the rect by `dx` on the left and right and `dy` on the top and bottom
    pub fn inflate(self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    /// Returns true when both rects describe the same frame within [`FRAME_EPSILON`]
    pub fn approx_eq(self, other: Rect) -> bool {
        (self.x - other.x).abs() <= FRAME_EPSILON
            && (self.y - other.y).abs() <= FRAME_EPSILON
            && (self.width - other.width).abs() <= FRAME_EPSILON
            && (self.height - other.height).abs() <= FRAME_EPSILON
    }

    /// Returns true when `other` lies entirely inside this rect.
    ///
    /// Containment is decided the way wall outlines are compared: the
    /// intersection of both frames must equal `other` within [`FRAME_EPSILON`].
    pub fn contains_rect(self, other: Rect) -> bool {
        self.intersection(other)
            .is_some_and(|intersection| intersection.approx_eq(other))
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

/// A cardinal direction for insert and move operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// True for [`Direction::Up`] and [`Direction::Down`]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// True for directions that move toward smaller coordinates
    pub fn is_negative(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            1.0f64..500.0,
            1.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn check_union_contains_both(a: Rect, b: Rect) -> Result<(), TestCaseError> {
        let union = a.union(b);
        prop_assert!(union.x() <= a.x() && union.x() <= b.x());
        prop_assert!(union.y() <= a.y() && union.y() <= b.y());
        prop_assert!(union.right() >= a.right() - FRAME_EPSILON);
        prop_assert!(union.right() >= b.right() - FRAME_EPSILON);
        prop_assert!(union.bottom() >= a.bottom() - FRAME_EPSILON);
        prop_assert!(union.bottom() >= b.bottom() - FRAME_EPSILON);
        prop_assert!(union.area() + FRAME_EPSILON >= a.area().max(b.area()));
        Ok(())
    }

    fn check_union_is_commutative(a: Rect, b: Rect) -> Result<(), TestCaseError> {
        prop_assert!(a.union(b).approx_eq(b.union(a)));
        Ok(())
    }

    fn check_intersection_inside_both(a: Rect, b: Rect) -> Result<(), TestCaseError> {
        if let Some(overlap) = a.intersection(b) {
            prop_assert!(a.inflate(FRAME_EPSILON, FRAME_EPSILON).contains_rect(overlap));
            prop_assert!(b.inflate(FRAME_EPSILON, FRAME_EPSILON).contains_rect(overlap));
        }
        Ok(())
    }

    fn check_translate_roundtrip(rect: Rect, offset: Point) -> Result<(), TestCaseError> {
        let back = rect.translate(offset).translate(offset.negate());
        prop_assert!(approx_eq!(f64, back.x(), rect.x(), epsilon = 1e-9));
        prop_assert!(approx_eq!(f64, back.y(), rect.y(), epsilon = 1e-9));
        prop_assert_eq!(back.size(), rect.size());
        Ok(())
    }

    fn check_angle_in_range(a: Point, b: Point) -> Result<(), TestCaseError> {
        let angle = a.angle_to(b);
        prop_assert!((0.0..360.0).contains(&angle));
        Ok(())
    }

    proptest! {
        #[test]
        fn union_contains_both(a in rect_strategy(), b in rect_strategy()) {
            check_union_contains_both(a, b)?;
        }

        #[test]
        fn union_is_commutative(a in rect_strategy(), b in rect_strategy()) {
            check_union_is_commutative(a, b)?;
        }

        #[test]
        fn intersection_inside_both(a in rect_strategy(), b in rect_strategy()) {
            check_intersection_inside_both(a, b)?;
        }

        #[test]
        fn translate_roundtrip(rect in rect_strategy(), offset in point_strategy()) {
            check_translate_roundtrip(rect, offset)?;
        }

        #[test]
        fn angle_in_range(a in point_strategy(), b in point_strategy()) {
            check_angle_in_range(a, b)?;
        }
    }
}
