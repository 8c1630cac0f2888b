//! Affine transforms and the drawable segments they act on

pub mod segment;
pub mod transform;

pub use segment::{ArcSegment, CircleSegment, PathSegment, Segment, SegmentGeometry};
pub use transform::Transform;
