//! Placed-element and renderer-facing types

use std::fmt;

use crate::element::{AnchorTable, Style};
use crate::errors::PlacementWarning;
use crate::geometry::segment::Segment;
use crate::geometry::transform::Transform;
use crate::types::{Angle, BBox, Length, Point};

/// Opaque reference to an element already added to a `Drawing`.
///
/// A handle only resolves in the drawing that issued it (or a clone of it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle {
    drawing: u64,
    index: usize,
}

impl Handle {
    pub(crate) fn new(drawing: u64, index: usize) -> Self {
        Handle { drawing, index }
    }

    /// Position in placement order
    pub fn index(self) -> usize {
        self.index
    }

    pub(crate) fn drawing(self) -> u64 {
        self.drawing
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// An element reference: by handle or by the name given at placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Handle(Handle),
    Name(String),
}

impl From<Handle> for Target {
    fn from(h: Handle) -> Self {
        Target::Handle(h)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Handle(h) => write!(f, "element {h}"),
            Target::Name(n) => write!(f, "element `{n}`"),
        }
    }
}

// ============================================================================
// Labels
// ============================================================================

/// Where a label sits relative to the element, in the element's own frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelLoc {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    Center,
    /// At a named anchor
    Anchor(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub loc: LabelLoc,
    /// Overrides the drawing's label offset
    pub offset: Option<Length>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Label { text: text.into(), loc: LabelLoc::Top, offset: None }
    }

    pub fn at(mut self, loc: LabelLoc) -> Self {
        self.loc = loc;
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(Length(offset));
        self
    }
}

/// A label with its global anchor position; sizing is left to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub loc: LabelLoc,
    pub position: Point,
    /// Element orientation, for renderers that rotate text
    pub rotation: Angle,
}

// ============================================================================
// Placed Elements
// ============================================================================

/// An element in drawing coordinates. Never changes once added.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub handle: Handle,
    /// Catalog kind, e.g. `resistor`
    pub kind: String,
    pub name: Option<String>,
    pub segments: Vec<Segment>,
    pub anchors: AnchorTable,
    pub bounds: BBox,
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub theta: Angle,
    /// Local frame (after lead extension) to drawing frame
    pub transform: Transform,
    /// Anchors in the local frame the transform maps from
    pub local_anchors: AnchorTable,
    pub local_bounds: BBox,
    pub style: Style,
}

impl PlacedElement {
    pub fn anchor(&self, name: &str) -> Option<Point> {
        self.anchors.lookup(name)
    }

    /// Human-readable identity for diagnostics, e.g. `resistor #2` or `R1 (resistor)`
    pub fn describe(&self) -> String {
        match &self.name {
            Some(n) => format!("{n} ({})", self.kind),
            None => format!("{} {}", self.kind, self.handle),
        }
    }
}

/// Result of a successful `Drawing::add`
#[derive(Debug, Clone, PartialEq)]
pub struct Added {
    pub handle: Handle,
    pub warnings: Vec<PlacementWarning>,
}

// ============================================================================
// Renderer Output
// ============================================================================

/// Everything a backend needs to draw one element
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem<'a> {
    pub handle: Handle,
    pub segments: &'a [Segment],
    pub anchors: &'a AnchorTable,
    pub labels: &'a [PlacedLabel],
    pub style: &'a Style,
}

/// Items in placement order plus the overall bounds
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput<'a> {
    pub items: Vec<RenderItem<'a>>,
    /// `None` for an empty drawing
    pub bounds: Option<BBox>,
}
