//! Error types for constructing and editing drawing objects.

use thiserror::Error;

/// Errors raised by the object model when an edit would produce invalid geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("polyline needs at least {required} points, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    #[error("segment {segment} is out of range (polyline has {count} segments)")]
    SegmentOutOfRange { segment: usize, count: usize },
}
