//! Placement resolution
//!
//! Turns a `Directive` plus the current cursor into a start position, an
//! orientation and a length or end point, stretches the element's leads to
//! match and builds the local-to-drawing transform.
//!
//! Precedence, strongest first:
//! 1. `endpoints`
//! 2. `to` / `tox` / `toy`, measured from the start position
//! 3. `at` (point or anchor of an earlier element)
//! 4. explicit direction and length
//! 5. cursor position and direction
//!
//! Options that would each pick a different start or end are rejected rather
//! than silently ranked.

use super::config::DrawingConfig;
use super::defaults::{ANGLE_EPSILON_DEG, LENGTH_EPSILON, SCALE};
use super::directive::{At, Directive};
use super::state::DrawingState;
use super::types::Target;
use crate::element::anchors::{AnchorTable, CENTER, END, START};
use crate::element::leads::{self, LeadTarget};
use crate::element::ElementSpec;
use crate::errors::{PlacementError, PlacementWarning};
use crate::geometry::segment::{Segment, SegmentGeometry};
use crate::geometry::transform::Transform;
use crate::log::debug;
use crate::types::{Angle, Length, NumericError, Point};

/// Where anchors of already placed elements come from
pub(crate) trait AnchorSource {
    fn anchor_of(&self, target: &Target, name: &str) -> Result<Point, PlacementError>;
}

/// A fully determined placement, still in the element's local frame
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Resolved {
    pub transform: Transform,
    /// Local segments after lead extension (and reversal)
    pub segments: Vec<Segment>,
    pub anchors: AnchorTable,
    pub theta: Angle,
    pub warning: Option<PlacementWarning>,
}

pub(crate) fn resolve(
    spec: &ElementSpec,
    directive: &Directive,
    state: &DrawingState,
    config: &DrawingConfig,
    source: &impl AnchorSource,
) -> Result<Resolved, PlacementError> {
    validate(directive)?;
    check_conflicts(directive)?;

    let start = start_position(directive, state, source)?;
    let scale = directive.scale.unwrap_or(SCALE);
    let linear = |theta| Transform::placement(Point::ORIGIN, theta, scale, directive.flip, false);

    let (theta, target) = match end_target(directive, start) {
        Some(end) => {
            if let Some(anchor) = directive.anchor.as_deref().filter(|a| *a != START) {
                return Err(PlacementError::ambiguous(format!(
                    "placement anchor `{anchor}` conflicts with an explicit end point; the span always runs start to end"
                )));
            }
            let theta = spanned(spec, directive, start, end)?;
            // the end point seen from the element's own frame
            let inverse = linear(theta)
                .inverse()
                .ok_or(PlacementError::numeric("scale", NumericError::Zero))?;
            let local = Point::ORIGIN + inverse.apply_offset(end - start);
            let local = Point::try_new(local.x.0, local.y.0)
                .map_err(|e| PlacementError::numeric("scale", e))?;
            (theta, LeadTarget::Point(local))
        }
        None => {
            let theta = directive.theta.or(spec.theta()).unwrap_or(state.direction());
            let length = directive.length.or(spec.length()).unwrap_or(config.unit);
            if directive.length.is_some() && !spec.is_stretchable() {
                debug!(kind = spec.kind(), "length ignored for an element with fixed leads");
            }
            let local = Length::try_new((length / scale).0)
                .map_err(|e| PlacementError::numeric("scale", e))?;
            (theta, LeadTarget::Length(local))
        }
    };

    let stretched = leads::extend(spec, target);
    let (segments, anchors) = if directive.reverse {
        reversed(&stretched.segments, &stretched.anchors)
    } else {
        (stretched.segments, stretched.anchors)
    };

    let origin = match &directive.anchor {
        Some(name) => {
            let local = anchors.get_for(name, spec.kind())?;
            start - linear(theta).apply_offset(local - Point::ORIGIN)
        }
        None => start,
    };
    let transform = Transform::placement(origin, theta, scale, directive.flip, false);
    if !transform.is_finite() {
        return Err(PlacementError::numeric("placement transform", NumericError::Infinite));
    }
    debug!(kind = spec.kind(), %start, %theta, ?target, "resolved placement");

    Ok(Resolved { transform, segments, anchors, theta, warning: stretched.warning })
}

fn validate(d: &Directive) -> Result<(), PlacementError> {
    fn finite(what: &'static str, v: f64) -> Result<(), PlacementError> {
        Length::try_new(v).map(|_| ()).map_err(|e| PlacementError::numeric(what, e))
    }
    fn point(what: &'static str, p: Point) -> Result<(), PlacementError> {
        Point::try_new(p.x.0, p.y.0).map(|_| ()).map_err(|e| PlacementError::numeric(what, e))
    }

    if let Some(At::Point(p)) = &d.at {
        point("start point", *p)?;
    }
    if let Some(theta) = d.theta {
        finite("angle", theta.0)?;
    }
    if let Some(length) = d.length {
        finite("length", length.0)?;
        if length.0 < 0.0 {
            return Err(PlacementError::numeric("length", NumericError::Negative));
        }
    }
    if let Some(p) = d.to {
        point("end point", p)?;
    }
    if let Some(x) = d.tox {
        finite("end x", x.0)?;
    }
    if let Some(y) = d.toy {
        finite("end y", y.0)?;
    }
    if let Some((p1, p2)) = d.endpoints {
        point("endpoint", p1)?;
        point("endpoint", p2)?;
    }
    if let Some(s) = d.scale {
        Length::try_positive(s).map_err(|e| PlacementError::numeric("scale", e))?;
    }
    Ok(())
}

fn check_conflicts(d: &Directive) -> Result<(), PlacementError> {
    let has_to = d.to.is_some();
    let has_axis = d.tox.is_some() || d.toy.is_some();
    if d.endpoints.is_some() {
        if has_to || has_axis {
            return Err(PlacementError::ambiguous_with_hint(
                "`endpoints` given together with `to`/`tox`/`toy`",
                "`endpoints` already fixes the end point",
            ));
        }
        if d.at.is_some() {
            return Err(PlacementError::ambiguous_with_hint(
                "`endpoints` given together with `at`",
                "`endpoints` already fixes the start point",
            ));
        }
    }
    if has_to && has_axis {
        return Err(PlacementError::ambiguous_with_hint(
            "`to` given together with `tox`/`toy`",
            "use `tox` and `toy` together to give both coordinates",
        ));
    }
    Ok(())
}

fn start_position(
    d: &Directive,
    state: &DrawingState,
    source: &impl AnchorSource,
) -> Result<Point, PlacementError> {
    match (&d.endpoints, &d.at) {
        (Some((p1, _)), _) => Ok(*p1),
        (None, Some(At::Point(p))) => Ok(*p),
        (None, Some(At::Anchor { target, anchor })) => source.anchor_of(target, anchor),
        (None, None) => Ok(state.here()),
    }
}

fn end_target(d: &Directive, start: Point) -> Option<Point> {
    if let Some((_, p2)) = d.endpoints {
        return Some(p2);
    }
    if d.to.is_some() {
        return d.to;
    }
    match (d.tox, d.toy) {
        (None, None) => None,
        (x, y) => Some(Point::new(x.unwrap_or(start.x), y.unwrap_or(start.y))),
    }
}

/// Orientation implied by an explicit end point, checked against any
/// direction or length also given
fn spanned(spec: &ElementSpec, d: &Directive, start: Point, end: Point) -> Result<Angle, PlacementError> {
    if !spec.is_stretchable() {
        return Err(PlacementError::ambiguous_with_hint(
            format!("{} has fixed leads and cannot span two given points", spec.kind()),
            "place it with `at` and a direction instead",
        ));
    }
    let Some(theta) = Angle::between(start, end) else {
        return Err(PlacementError::ambiguous(format!(
            "start and end are both {start}; orientation is undefined"
        )));
    };
    if let Some(explicit) = d.theta {
        if explicit.separation(theta) > ANGLE_EPSILON_DEG {
            return Err(PlacementError::ambiguous_with_hint(
                format!("direction {explicit} contradicts the {theta} implied by the end point"),
                "give either a direction or an end point",
            ));
        }
    }
    let length = start.distance(end);
    if let Some(explicit) = d.length {
        if (explicit - length).abs().0 > LENGTH_EPSILON {
            return Err(PlacementError::ambiguous_with_hint(
                format!("length {explicit} contradicts the {length} implied by the end point"),
                "give either a length or an end point",
            ));
        }
    }
    Ok(theta)
}

/// Mirror the drawing end-for-end about the element's midpoint.
/// `start`, `end` and `center` stay where they are.
fn reversed(segments: &[Segment], anchors: &AnchorTable) -> (Vec<Segment>, AnchorTable) {
    let (Some(s), Some(e)) = (anchors.lookup(START), anchors.lookup(END)) else {
        return (segments.to_vec(), anchors.clone());
    };
    let to_mid = s.midpoint(e) - Point::ORIGIN;
    let heading = Angle::between(s, e).unwrap_or(Angle::ZERO);
    let mirror = Transform::translate(to_mid)
        .compose(&Transform::rotate(heading))
        .compose(&Transform::flip_horizontal())
        .compose(&Transform::rotate(Angle::ZERO - heading))
        .compose(&Transform::translate(-to_mid));

    let segments = segments.iter().map(|seg| seg.transformed(&mirror)).collect();
    let mut mirrored = anchors.with_transform(&mirror);
    for name in [START, END, CENTER] {
        if let Some(p) = anchors.lookup(name) {
            mirrored.insert(name, p);
        }
    }
    (segments, mirrored)
}
