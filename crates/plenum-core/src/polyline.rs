//! Open and closed polylines used by floor-plan walls.
//!
//! Segments are numbered from 1: segment `i` joins vertex `i - 1` to vertex
//! `i`. A closed polyline has one extra segment, numbered `len`, joining the
//! last vertex back to the first.

use serde::{Deserialize, Serialize};

use crate::{
    error::ModelError,
    geometry::{Point, Rect},
};

/// Result of splitting a polyline at one of its segments.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// A closed polyline was opened at the segment.
    Opened(PolyLine),
    /// An open polyline was cut in two. Pieces with fewer than two vertices
    /// are dropped.
    Divided(Vec<PolyLine>),
}

/// A sequence of vertices, optionally closed into a loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    points: Vec<Point>,
    closed: bool,
}

impl PolyLine {
    /// Creates an open polyline.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooFewPoints`] with fewer than two vertices.
    pub fn open(points: Vec<Point>) -> Result<Self, ModelError> {
        if points.len() < 2 {
            return Err(ModelError::TooFewPoints {
                required: 2,
                actual: points.len(),
            });
        }
        Ok(Self {
            points,
            closed: false,
        })
    }

    /// Creates a closed polyline.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::TooFewPoints`] with fewer than three vertices.
    pub fn closed(points: Vec<Point>) -> Result<Self, ModelError> {
        if points.len() < 3 {
            return Err(ModelError::TooFewPoints {
                required: 3,
                actual: points.len(),
            });
        }
        Ok(Self {
            points,
            closed: true,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of segments, including the closing segment of a closed polyline.
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Endpoints of segment `index`, or `None` when out of range.
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        if index == 0 || index > self.segment_count() {
            return None;
        }
        let start = self.points[index - 1];
        let end = self.points[index % self.points.len()];
        Some((start, end))
    }

    /// First and last vertex. A closed polyline starts and ends on its first vertex.
    pub fn endpoints(&self) -> (Point, Point) {
        let first = self.points[0];
        if self.closed {
            (first, first)
        } else {
            (first, self.points[self.points.len() - 1])
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::bounding(&self.points).unwrap_or_default()
    }

    pub fn translate(&mut self, offset: Point) {
        for point in &mut self.points {
            *point = point.add_point(offset);
        }
    }

    /// Segment nearest to `point`, provided it lies within `tolerance`.
    ///
    /// Ties go to the lower-numbered segment.
    pub fn hit_segment(&self, point: Point, tolerance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for index in 1..=self.segment_count() {
            let Some((start, end)) = self.segment(index) else {
                continue;
            };
            let distance = point.distance(project_onto_segment(point, start, end));
            if distance <= tolerance && best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Inserts a new vertex on the segment under `point`.
    ///
    /// The point is snapped onto the hit segment first. Returns the index of
    /// the inserted vertex, or `None` when no segment is within `tolerance`.
    pub fn add_corner(&mut self, point: Point, tolerance: f64) -> Option<usize> {
        let segment = self.hit_segment(point, tolerance)?;
        let (start, end) = self.segment(segment)?;
        let snapped = project_onto_segment(point, start, end);
        self.points.insert(segment, snapped);
        Some(segment)
    }

    /// Splits the polyline at `segment`, removing that segment.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SegmentOutOfRange`] when the segment does not exist.
    pub fn split_at(&self, segment: usize) -> Result<Split, ModelError> {
        let count = self.segment_count();
        if segment == 0 || segment > count {
            return Err(ModelError::SegmentOutOfRange { segment, count });
        }

        if self.closed {
            let len = self.points.len();
            let points = (0..len)
                .map(|offset| self.points[(segment + offset) % len])
                .collect();
            return Ok(Split::Opened(Self {
                points,
                closed: false,
            }));
        }

        let pieces = [&self.points[..segment], &self.points[segment..]]
            .into_iter()
            .filter(|piece| piece.len() >= 2)
            .map(|piece| Self {
                points: piece.to_vec(),
                closed: false,
            })
            .collect();
        Ok(Split::Divided(pieces))
    }
}

/// Closest point to `point` on the segment `start..end`.
fn project_onto_segment(point: Point, start: Point, end: Point) -> Point {
    let delta = end.sub_point(start);
    let length_sq = delta.x() * delta.x() + delta.y() * delta.y();
    if length_sq == 0.0 {
        return start;
    }
    let rel = point.sub_point(start);
    let t = ((rel.x() * delta.x() + rel.y() * delta.y()) / length_sq).clamp(0.0, 1.0);
    Point::new(start.x() + t * delta.x(), start.y() + t * delta.y())
}
