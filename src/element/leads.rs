//! Lead extension for two-terminal elements
//!
//! A two-terminal element's first path starts and ends with zero-length lead
//! segments. Stretching moves the body along the lead direction by half the
//! extra length and pulls the last point out to the requested distance, so the
//! interior drawing keeps its shape and sits centered between the terminals.

use super::ElementSpec;
use super::anchors::{AnchorTable, END, START};
use crate::errors::PlacementWarning;
use crate::geometry::segment::{Segment, SegmentGeometry};
use crate::geometry::transform::Transform;
use crate::layout::defaults::LENGTH_EPSILON;
use crate::log::trace;
use crate::types::{Angle, Length, Point, UnitVec};

/// What the leads are stretched to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeadTarget {
    /// Total start-to-end distance
    Length(Length),
    /// Local point the `end` anchor should land on, with `start` at the origin
    Point(Point),
}

/// Local-frame geometry after extension
#[derive(Debug, Clone, PartialEq)]
pub struct Stretched {
    pub segments: Vec<Segment>,
    pub anchors: AnchorTable,
    pub warning: Option<PlacementWarning>,
}

/// Start-to-end distance of the unstretched lead path
pub fn interior_length(spec: &ElementSpec) -> Length {
    spec.lead_path()
        .and_then(|p| Some(p.last()?.distance(p.first()?)))
        .unwrap_or(Length::ZERO)
}

pub fn extend(spec: &ElementSpec, target: LeadTarget) -> Stretched {
    let unchanged = || Stretched {
        segments: spec.segments().to_vec(),
        anchors: spec.anchors().clone(),
        warning: None,
    };

    if !spec.is_stretchable() {
        trace!(kind = spec.kind(), "leads fixed, geometry passed through");
        return unchanged();
    }
    let Some((lead_index, first, last)) = spec.segments().iter().enumerate().find_map(|(i, s)| {
        let path = s.as_path()?;
        Some((i, path.first()?, path.last()?))
    }) else {
        return unchanged();
    };

    let body = last - first;
    let interior = body.length();
    let heading = UnitVec::normalized(body.dx.0, body.dy.0).unwrap_or(UnitVec::EAST);

    let requested = match target {
        LeadTarget::Length(l) => l,
        LeadTarget::Point(p) => p.distance(Point::ORIGIN),
    };
    let (total, warning) = if requested.0 + LENGTH_EPSILON < interior.0 {
        (interior, Some(PlacementWarning::DegenerateLength { requested, interior }))
    } else {
        (requested.max(interior), None)
    };
    let lead = (total - interior) / 2.0;
    trace!(kind = spec.kind(), %interior, %requested, %lead, "extending leads");

    let moved = (Point::ORIGIN - first) + heading * lead;
    let new_end = Point::ORIGIN + heading * total;

    let mut segments: Vec<Segment> = spec.segments().iter().map(|s| s.translated(moved)).collect();
    if let Some(path) = segments[lead_index].as_path_mut() {
        path.points[0] = Point::ORIGIN;
        if path.points.len() == 1 {
            path.points.push(new_end);
        } else if let Some(p) = path.points.last_mut() {
            *p = new_end;
        }
    }

    let mut anchors = AnchorTable::new();
    for (name, p) in spec.anchors().iter() {
        let placed = match name {
            START if p.approx_eq(first, LENGTH_EPSILON) => Point::ORIGIN,
            END if p.approx_eq(last, LENGTH_EPSILON) => new_end,
            _ => p + moved,
        };
        anchors.insert(name, placed);
    }

    let mut stretched = Stretched { segments, anchors, warning };
    if let LeadTarget::Point(p) = target {
        if let Some(aim) = Angle::between(Point::ORIGIN, p) {
            let turn = Transform::rotate(aim - heading.angle());
            stretched.segments = stretched.segments.iter().map(|s| s.transformed(&turn)).collect();
            stretched.anchors = stretched.anchors.with_transform(&turn);
        }
    }
    stretched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::basic;
    use crate::element::anchors::CENTER;
    use crate::types::pt;

    const EPS: f64 = 1e-9;

    fn end_of(s: &Stretched) -> Point {
        s.anchors.lookup(END).unwrap()
    }

    #[test]
    fn line_stretches_from_nothing() {
        let out = extend(&basic::line(), LeadTarget::Length(Length(3.0)));
        assert!(out.warning.is_none());
        assert_eq!(out.anchors.lookup(START), Some(Point::ORIGIN));
        assert!(end_of(&out).approx_eq(pt(3.0, 0.0), EPS));
        assert!(out.anchors.lookup(CENTER).unwrap().approx_eq(pt(1.5, 0.0), EPS));
        let path = out.segments[0].as_path().unwrap();
        assert!(path.last().unwrap().approx_eq(pt(3.0, 0.0), EPS));
    }

    #[test]
    fn body_keeps_its_shape_and_centers() {
        let spec = basic::resistor();
        let before = spec.lead_path().unwrap().points.clone();
        let out = extend(&spec, LeadTarget::Length(Length(3.0)));
        let after = &out.segments[0].as_path().unwrap().points;

        assert_eq!(before.len(), after.len());
        // lead of 1.0 on each side for a body of length 1.0
        assert!(after[1].approx_eq(pt(1.0, 0.0), EPS));
        for i in 1..before.len() - 1 {
            let d0 = before[i] - before[1];
            let d1 = after[i] - after[1];
            assert!((d0.dx.0 - d1.dx.0).abs() < EPS && (d0.dy.0 - d1.dy.0).abs() < EPS);
        }
        assert!(end_of(&out).approx_eq(pt(3.0, 0.0), EPS));
        assert!(out.anchors.lookup(CENTER).unwrap().approx_eq(pt(1.5, 0.0), EPS));
    }

    #[test]
    fn short_request_clamps_and_warns() {
        let spec = basic::resistor();
        assert_eq!(interior_length(&spec), Length(1.0));
        let out = extend(&spec, LeadTarget::Length(Length(0.4)));
        assert_eq!(
            out.warning,
            Some(PlacementWarning::DegenerateLength {
                requested: Length(0.4),
                interior: Length(1.0),
            })
        );
        assert!(end_of(&out).approx_eq(pt(1.0, 0.0), EPS));
    }

    #[test]
    fn rigid_elements_pass_through() {
        let opamp = basic::opamp();
        let out = extend(&opamp, LeadTarget::Length(Length(10.0)));
        assert_eq!(out.segments, opamp.segments());
        assert_eq!(&out.anchors, opamp.anchors());

        let fixed = basic::resistor().extended("fixed").extend_leads(false).build();
        let out = extend(&fixed, LeadTarget::Length(Length(10.0)));
        assert!(end_of(&out).approx_eq(pt(1.0, 0.0), EPS));
    }

    #[test]
    fn point_target_lands_end_on_point() {
        let out = extend(&basic::capacitor(), LeadTarget::Point(pt(0.0, -2.0)));
        assert_eq!(out.anchors.lookup(START), Some(Point::ORIGIN));
        assert!(end_of(&out).approx_eq(pt(0.0, -2.0), EPS));
        assert!(out.anchors.lookup(CENTER).unwrap().approx_eq(pt(0.0, -1.0), EPS));
    }

    #[test]
    fn authored_offset_is_moved_to_origin() {
        let spec = ElementSpec::builder("offset")
            .path([pt(1.0, 1.0), pt(1.0, 1.0), pt(2.0, 1.0), pt(2.0, 1.0)])
            .two_terminal()
            .build();
        let out = extend(&spec, LeadTarget::Length(Length(2.0)));
        assert_eq!(out.anchors.lookup(START), Some(Point::ORIGIN));
        assert!(end_of(&out).approx_eq(pt(2.0, 0.0), EPS));
        let path = out.segments[0].as_path().unwrap();
        assert!(path.points[1].approx_eq(pt(0.5, 0.0), EPS));
        assert!(path.points[2].approx_eq(pt(1.5, 0.0), EPS));
    }
}
