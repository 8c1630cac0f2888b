//! Element descriptions in their local frame
//!
//! An `ElementSpec` is what a symbol catalog hands to the drawing: segments
//! authored pointing right from the local origin, named anchors, and the flags
//! that decide whether the leads may be stretched. Specs are immutable once
//! built; variants are made by composition with [`ElementSpec::extended`].

pub mod anchors;
pub mod basic;
pub mod leads;

use std::collections::BTreeMap;

use crate::geometry::segment::{ArcSegment, CircleSegment, PathSegment, Segment, SegmentGeometry};
use crate::types::{Angle, BBox, Length, Point};

pub use anchors::AnchorTable;

/// Opaque renderer annotations (color, fill, line width...), passed through untouched
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries of `over` win
    pub fn merged(&self, over: &Style) -> Style {
        let mut out = self.clone();
        for (k, v) in over.iter() {
            out.set(k, v);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    kind: String,
    segments: Vec<Segment>,
    anchors: AnchorTable,
    two_terminal: bool,
    extend_leads: bool,
    length: Option<Length>,
    theta: Option<Angle>,
    drop: Option<String>,
    style: Style,
}

impl ElementSpec {
    pub fn builder(kind: impl Into<String>) -> ElementSpecBuilder {
        ElementSpecBuilder {
            kind: kind.into(),
            segments: Vec::new(),
            anchors: AnchorTable::new(),
            two_terminal: false,
            extend_leads: true,
            length: None,
            theta: None,
            drop: None,
            style: Style::new(),
        }
    }

    /// Start a new spec from this one. Segments added to the builder are
    /// appended after the base drawing and anchors set on it override the
    /// base anchors of the same name.
    pub fn extended(&self, kind: impl Into<String>) -> ElementSpecBuilder {
        ElementSpecBuilder {
            kind: kind.into(),
            segments: self.segments.clone(),
            anchors: self.anchors.clone(),
            two_terminal: self.two_terminal,
            extend_leads: self.extend_leads,
            length: self.length,
            theta: self.theta,
            drop: self.drop.clone(),
            style: self.style.clone(),
        }
    }

    /// Catalog name, used in diagnostics
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Local anchors, always holding `start`, `end` and `center`
    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    pub fn is_two_terminal(&self) -> bool {
        self.two_terminal
    }

    pub fn extends_leads(&self) -> bool {
        self.extend_leads
    }

    /// Whether the leads may be stretched to a requested length or endpoint
    pub fn is_stretchable(&self) -> bool {
        self.two_terminal && self.extend_leads
    }

    /// Nominal length; the drawing unit applies when unset
    pub fn length(&self) -> Option<Length> {
        self.length
    }

    /// Fixed orientation that ignores the drawing direction
    pub fn theta(&self) -> Option<Angle> {
        self.theta
    }

    /// Anchor the cursor moves to after placement
    pub fn drop_anchor(&self) -> &str {
        self.drop.as_deref().unwrap_or(anchors::END)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The first path segment, whose ends are the leads
    pub fn lead_path(&self) -> Option<&PathSegment> {
        self.segments.iter().find_map(Segment::as_path)
    }

    pub fn local_bounds(&self) -> BBox {
        bounds_of(&self.segments)
    }
}

pub(crate) fn bounds_of(segments: &[Segment]) -> BBox {
    let mut bb = BBox::new();
    for seg in segments {
        bb.expand_bbox(&seg.bounds());
    }
    bb
}

/// Builder for [`ElementSpec`]
#[derive(Debug, Clone)]
pub struct ElementSpecBuilder {
    kind: String,
    segments: Vec<Segment>,
    anchors: AnchorTable,
    two_terminal: bool,
    extend_leads: bool,
    length: Option<Length>,
    theta: Option<Angle>,
    drop: Option<String>,
    style: Style,
}

impl ElementSpecBuilder {
    pub fn segment(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn path(self, points: impl IntoIterator<Item = Point>) -> Self {
        self.segment(PathSegment::new(points.into_iter().collect()))
    }

    pub fn polygon(self, points: impl IntoIterator<Item = Point>) -> Self {
        self.segment(PathSegment::new(points.into_iter().collect()).closed())
    }

    pub fn circle(self, center: Point, radius: f64) -> Self {
        self.segment(CircleSegment::new(center, Length(radius)))
    }

    pub fn arc(self, center: Point, radius: f64, start: f64, end: f64) -> Self {
        self.segment(ArcSegment::new(center, Length(radius), Angle(start), Angle(end)))
    }

    pub fn anchor(mut self, name: impl Into<String>, point: Point) -> Self {
        self.anchors.insert(name, point);
        self
    }

    pub fn two_terminal(mut self) -> Self {
        self.two_terminal = true;
        self
    }

    pub fn extend_leads(mut self, extend: bool) -> Self {
        self.extend_leads = extend;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(Length(length));
        self
    }

    pub fn theta(mut self, degrees: f64) -> Self {
        self.theta = Some(Angle(degrees));
        self
    }

    pub fn drop(mut self, anchor: impl Into<String>) -> Self {
        self.drop = Some(anchor.into());
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(key, value);
        self
    }

    pub fn build(self) -> ElementSpec {
        let lead = self.segments.iter().find_map(Segment::as_path);
        let anchors = self.anchors.clone().with_path_defaults(lead);
        ElementSpec {
            kind: self.kind,
            segments: self.segments,
            anchors,
            two_terminal: self.two_terminal,
            extend_leads: self.extend_leads,
            length: self.length,
            theta: self.theta,
            drop: self.drop,
            style: self.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pt;

    fn stub() -> ElementSpec {
        ElementSpec::builder("stub")
            .path([pt(0.0, 0.0), pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 0.0)])
            .two_terminal()
            .style("color", "black")
            .build()
    }

    #[test]
    fn builder_fills_standard_anchors() {
        let spec = stub();
        assert_eq!(spec.anchors().lookup(anchors::START), Some(pt(0.0, 0.0)));
        assert_eq!(spec.anchors().lookup(anchors::END), Some(pt(1.0, 0.0)));
        assert_eq!(spec.anchors().lookup(anchors::CENTER), Some(pt(0.5, 0.0)));
        assert!(spec.is_stretchable());
        assert_eq!(spec.drop_anchor(), "end");
    }

    #[test]
    fn extended_appends_and_overrides() {
        let base = stub();
        let derived = base
            .extended("tapped")
            .path([pt(0.5, 0.0), pt(0.5, 0.5)])
            .anchor("tap", pt(0.5, 0.5))
            .anchor(anchors::CENTER, pt(0.5, 0.25))
            .style("color", "red")
            .build();

        assert_eq!(derived.kind(), "tapped");
        assert_eq!(derived.segments().len(), 2);
        assert_eq!(derived.lead_path(), base.lead_path());
        assert_eq!(derived.anchors().lookup("tap"), Some(pt(0.5, 0.5)));
        assert_eq!(derived.anchors().lookup(anchors::CENTER), Some(pt(0.5, 0.25)));
        assert_eq!(derived.style().get("color"), Some("red"));
        // the base is untouched
        assert_eq!(base.anchors().lookup(anchors::CENTER), Some(pt(0.5, 0.0)));
        assert!(base.anchors().lookup("tap").is_none());
    }

    #[test]
    fn stretchable_needs_both_flags() {
        let rigid = stub().extended("rigid").extend_leads(false).build();
        assert!(rigid.is_two_terminal());
        assert!(!rigid.is_stretchable());
    }

    #[test]
    fn style_merge_prefers_override() {
        let mut base = Style::new();
        base.set("color", "black");
        base.set("lw", "1");
        let mut over = Style::new();
        over.set("color", "blue");
        let merged = base.merged(&over);
        assert_eq!(merged.get("color"), Some("blue"));
        assert_eq!(merged.get("lw"), Some("1"));
    }
}
