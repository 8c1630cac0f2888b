//! Drawable primitives that make up an element
//!
//! Each segment type knows how to:
//! - Map itself through a `Transform`
//! - Report its own bounding box
//!
//! The geometry trait is dispatched over `Segment` with `enum_dispatch`, so
//! adding a primitive means adding a variant and one impl block.

use enum_dispatch::enum_dispatch;

use super::transform::Transform;
use crate::types::{Angle, BBox, Length, Offset, Point};

/// Common behavior for all segment kinds
#[enum_dispatch]
pub trait SegmentGeometry {
    /// This segment mapped through `t`
    fn transformed(&self, t: &Transform) -> Segment;

    /// Axis-aligned bounds of the drawn geometry
    fn bounds(&self) -> BBox;

    fn translated(&self, offset: Offset) -> Segment {
        self.transformed(&Transform::translate(offset))
    }
}

#[enum_dispatch(SegmentGeometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Path(PathSegment),
    Circle(CircleSegment),
    Arc(ArcSegment),
}

impl Segment {
    pub fn as_path(&self) -> Option<&PathSegment> {
        match self {
            Segment::Path(p) => Some(p),
            _ => None,
        }
    }

    pub(crate) fn as_path_mut(&mut self) -> Option<&mut PathSegment> {
        match self {
            Segment::Path(p) => Some(p),
            _ => None,
        }
    }
}

// ============================================================================
// Segment Types
// ============================================================================

/// A polyline through a sequence of points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSegment {
    pub points: Vec<Point>,
    /// Indices where the pen lifts before moving to that point
    pub breaks: Vec<usize>,
    /// Draw a closing edge from the last point back to the first
    pub closed: bool,
}

impl PathSegment {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points, breaks: Vec::new(), closed: false }
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Lift the pen before drawing to `points[index]`
    pub fn break_before(mut self, index: usize) -> Self {
        if !self.breaks.contains(&index) {
            self.breaks.push(index);
            self.breaks.sort_unstable();
        }
        self
    }

    /// The runs of points actually stroked, split at the breaks
    pub fn strokes(&self) -> Vec<&[Point]> {
        let mut runs = Vec::new();
        let mut from = 0;
        for &b in &self.breaks {
            if b > from && b <= self.points.len() {
                runs.push(&self.points[from..b]);
                from = b;
            }
        }
        if from < self.points.len() {
            runs.push(&self.points[from..]);
        }
        runs
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

impl SegmentGeometry for PathSegment {
    fn transformed(&self, t: &Transform) -> Segment {
        PathSegment {
            points: self.points.iter().map(|p| t.apply(*p)).collect(),
            breaks: self.breaks.clone(),
            closed: self.closed,
        }
        .into()
    }

    fn bounds(&self) -> BBox {
        BBox::from_points(self.points.iter().copied())
    }
}

/// A full circle
#[derive(Debug, Clone, PartialEq)]
pub struct CircleSegment {
    pub center: Point,
    pub radius: Length,
}

impl CircleSegment {
    pub fn new(center: Point, radius: Length) -> Self {
        Self { center, radius }
    }
}

impl SegmentGeometry for CircleSegment {
    fn transformed(&self, t: &Transform) -> Segment {
        CircleSegment {
            center: t.apply(self.center),
            radius: self.radius * t.scale_factor(),
        }
        .into()
    }

    fn bounds(&self) -> BBox {
        let r = Offset::new(self.radius, self.radius);
        BBox::from_points([self.center - r, self.center + r])
    }
}

/// A circular arc swept counter-clockwise from `start` to `end`
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: Length,
    pub start: Angle,
    pub end: Angle,
}

impl ArcSegment {
    pub fn new(center: Point, radius: Length, start: Angle, end: Angle) -> Self {
        Self { center, radius, start, end }
    }

    /// Counter-clockwise sweep in degrees, in `(0, 360]`
    pub fn sweep(&self) -> f64 {
        let span = (self.end.0 - self.start.0).rem_euclid(360.0);
        if span == 0.0 { 360.0 } else { span }
    }

    fn point_at(&self, a: Angle) -> Point {
        let u = a.unit_vec();
        self.center + u * self.radius
    }
}

impl SegmentGeometry for ArcSegment {
    fn transformed(&self, t: &Transform) -> Segment {
        let a1 = t.apply_angle(self.start);
        let a2 = t.apply_angle(self.end);
        // A mirror turns a counter-clockwise sweep into a clockwise one
        let (start, end) = if t.is_mirrored() { (a2, a1) } else { (a1, a2) };
        ArcSegment {
            center: t.apply(self.center),
            radius: self.radius * t.scale_factor(),
            start,
            end,
        }
        .into()
    }

    fn bounds(&self) -> BBox {
        let sweep = self.sweep();
        let mut bb = BBox::from_points([self.point_at(self.start), self.point_at(self.end)]);
        for quadrant in [0.0, 90.0, 180.0, 270.0] {
            let into = (quadrant - self.start.0).rem_euclid(360.0);
            if into <= sweep {
                bb.expand_point(self.point_at(Angle(quadrant)));
            }
        }
        bb
    }
}
