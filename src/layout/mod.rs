//! The drawing: places elements one after another and keeps their geometry
//!
//! Each `add` resolves a directive against the cursor, stretches the leads,
//! maps the element into drawing coordinates and only then commits anything.
//! A failed `add` leaves the drawing untouched.

pub mod config;
pub mod defaults;
pub mod directive;
mod resolve;
pub mod state;
pub mod types;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::element::anchors::{AnchorTable, CENTER, END, START};
use crate::element::{ElementSpec, bounds_of};
use crate::errors::{PlacementError, PlacementWarning};
use crate::geometry::segment::SegmentGeometry;
use crate::geometry::transform::Transform;
use crate::log::{debug, warn};
use crate::types::{Angle, BBox, Length, Offset, Point};

pub use config::DrawingConfig;
pub use directive::{At, Direction, Directive};
use resolve::AnchorSource;
pub use state::{Cursor, DrawingState};
pub use types::*;

static NEXT_DRAWING: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct Drawing {
    /// Stamped into every handle this drawing hands out
    id: u64,
    config: DrawingConfig,
    state: DrawingState,
    elements: Vec<PlacedElement>,
    /// Labels per element, indexed like `elements`
    labels: Vec<Vec<PlacedLabel>>,
    names: HashMap<String, Handle>,
    bounds: BBox,
    warnings: Vec<(Handle, PlacementWarning)>,
}

impl Default for Drawing {
    fn default() -> Self {
        Drawing::from_valid_config(DrawingConfig::default())
    }
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DrawingConfig) -> Result<Self, PlacementError> {
        config
            .validate()
            .map_err(|e| PlacementError::numeric("drawing configuration", e))?;
        Ok(Drawing::from_valid_config(config))
    }

    fn from_valid_config(config: DrawingConfig) -> Self {
        Drawing {
            id: NEXT_DRAWING.fetch_add(1, Ordering::Relaxed),
            state: DrawingState::new(Cursor::new(config.origin, config.direction)),
            config,
            elements: Vec::new(),
            labels: Vec::new(),
            names: HashMap::new(),
            bounds: BBox::new(),
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Place `spec` according to `directive`
    pub fn add(&mut self, spec: &ElementSpec, directive: Directive) -> Result<Added, PlacementError> {
        let handle = Handle::new(self.id, self.elements.len());
        let resolved = resolve::resolve(spec, &directive, &self.state, &self.config, &*self)?;
        let t = resolved.transform;

        let owner = match &directive.name {
            Some(n) => format!("{n} ({})", spec.kind()),
            None => format!("{} {handle}", spec.kind()),
        };
        let segments: Vec<_> = resolved
            .segments
            .iter()
            .map(|s| s.transformed(&t))
            .collect();
        let anchors = resolved.anchors.with_transform(&t);
        for (_, p) in anchors.iter() {
            finite_point("placed anchor", p)?;
        }
        let start = anchors.get_for(START, &owner)?;
        let end = anchors.get_for(END, &owner)?;
        let center = anchors.get_for(CENTER, &owner)?;
        let drop_name = directive.drop.as_deref().unwrap_or(spec.drop_anchor());
        let drop_at = anchors.get_for(drop_name, &owner)?;

        let local_bounds = bounds_of(&resolved.segments);
        let labels = directive
            .labels
            .iter()
            .map(|l| place_label(l, &local_bounds, &resolved.anchors, &t, self.config.label_offset, &owner))
            .collect::<Result<Vec<_>, _>>()?;

        let mut bounds = bounds_of(&segments);
        if bounds.is_empty() {
            bounds = BBox::from_points(anchors.iter().map(|(_, p)| p));
        } else {
            finite_point("element bounds", bounds.min)?;
            finite_point("element bounds", bounds.max)?;
        }

        // Nothing below can fail
        debug!(%handle, kind = spec.kind(), %start, %end, theta = %resolved.theta, "placed element");
        let warnings: Vec<PlacementWarning> = resolved.warning.into_iter().collect();
        for w in &warnings {
            warn!(%handle, kind = spec.kind(), "{w}");
            self.warnings.push((handle, w.clone()));
        }
        self.bounds.expand_bbox(&bounds);
        if let Some(name) = &directive.name {
            self.names.insert(name.clone(), handle);
        }
        if !directive.hold {
            self.state.place(drop_at, resolved.theta);
        }
        self.elements.push(PlacedElement {
            handle,
            kind: spec.kind().to_string(),
            name: directive.name,
            segments,
            anchors,
            bounds,
            start,
            end,
            center,
            theta: resolved.theta,
            transform: t,
            local_anchors: resolved.anchors,
            local_bounds,
            style: spec.style().merged(&directive.style),
        });
        self.labels.push(labels);

        Ok(Added { handle, warnings })
    }

    /// Start a fluent placement: `drawing.place(&spec).down().length(2.0).add()`
    pub fn place<'d, 's>(&'d mut self, spec: &'s ElementSpec) -> PendingElement<'d, 's> {
        PendingElement { drawing: self, spec, directive: Directive::new() }
    }

    /// Global position of anchor `name` on an earlier element
    pub fn anchor(&self, target: impl Into<Target>, name: &str) -> Result<Point, PlacementError> {
        let el = self.element(&target.into())?;
        el.anchors.get_for(name, &el.describe())
    }

    pub fn push(&mut self) {
        self.state.push();
    }

    /// Restore the most recently pushed cursor and direction
    pub fn pop(&mut self) -> Result<Cursor, PlacementError> {
        self.state.pop()
    }

    /// Bounds of everything drawn so far; `None` before the first element
    pub fn bounding_box(&self) -> Option<BBox> {
        (!self.bounds.is_empty()).then_some(self.bounds)
    }

    pub fn here(&self) -> Point {
        self.state.here()
    }

    pub fn direction(&self) -> Angle {
        self.state.direction()
    }

    pub fn set_here(&mut self, point: Point) -> Result<(), PlacementError> {
        let p = Point::try_new(point.x.0, point.y.0)
            .map_err(|e| PlacementError::numeric("cursor position", e))?;
        self.state.set_position(p);
        Ok(())
    }

    pub fn set_direction(&mut self, degrees: f64) -> Result<(), PlacementError> {
        let a = Angle::try_new(degrees).map_err(|e| PlacementError::numeric("direction", e))?;
        self.state.set_direction(a);
        Ok(())
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) -> Result<(), PlacementError> {
        let offset = checked_offset(dx, dy)?;
        self.state.move_by(offset);
        Ok(())
    }

    /// Put the cursor at an anchor of an earlier element, shifted by `(dx, dy)`
    pub fn move_from(
        &mut self,
        target: impl Into<Target>,
        anchor: &str,
        dx: f64,
        dy: f64,
    ) -> Result<(), PlacementError> {
        let offset = checked_offset(dx, dy)?;
        let p = self.anchor(target, anchor)?;
        self.state.set_position(p + offset);
        Ok(())
    }

    pub fn get(&self, handle: Handle) -> Option<&PlacedElement> {
        if handle.drawing() != self.id {
            return None;
        }
        self.elements.get(handle.index())
    }

    /// Handle registered under `name`; a later element with the same name replaces it
    pub fn lookup(&self, name: &str) -> Option<Handle> {
        self.names.get(name).copied()
    }

    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn labels(&self, handle: Handle) -> &[PlacedLabel] {
        match self.get(handle) {
            Some(_) => &self.labels[handle.index()],
            None => &[],
        }
    }

    pub fn warnings(&self) -> &[(Handle, PlacementWarning)] {
        &self.warnings
    }

    /// Attach a label to an element already placed. Geometry is not touched.
    pub fn annotate(&mut self, target: impl Into<Target>, label: Label) -> Result<(), PlacementError> {
        let el = self.element(&target.into())?;
        let placed = place_label(
            &label,
            &el.local_bounds,
            &el.local_anchors,
            &el.transform,
            self.config.label_offset,
            &el.describe(),
        )?;
        let index = el.handle.index();
        self.labels[index].push(placed);
        Ok(())
    }

    /// Everything a renderer needs, in placement order
    pub fn output(&self) -> RenderOutput<'_> {
        let items = self
            .elements
            .iter()
            .zip(&self.labels)
            .map(|(el, labels)| RenderItem {
                handle: el.handle,
                segments: &el.segments,
                anchors: &el.anchors,
                labels,
                style: &el.style,
            })
            .collect();
        RenderOutput { items, bounds: self.bounding_box() }
    }

    fn element(&self, target: &Target) -> Result<&PlacedElement, PlacementError> {
        let found = match target {
            Target::Handle(h) => self.get(*h),
            Target::Name(n) => self.names.get(n).and_then(|h| self.get(*h)),
        };
        found.ok_or_else(|| PlacementError::ForwardReference { target: target.to_string() })
    }
}

impl AnchorSource for Drawing {
    fn anchor_of(&self, target: &Target, name: &str) -> Result<Point, PlacementError> {
        let el = self.element(target)?;
        el.anchors.get_for(name, &el.describe())
    }
}

/// One line per element: handle, kind, start, end and heading
impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for el in &self.elements {
            writeln!(
                f,
                "{} {}: {} -> {} at {:.1}°",
                el.handle,
                el.kind,
                Rounded(el.start),
                Rounded(el.end),
                el.theta.normalized().degrees(),
            )?;
        }
        match self.bounding_box() {
            Some(bb) => write!(f, "bounds: {} .. {}", Rounded(bb.min), Rounded(bb.max)),
            None => write!(f, "bounds: empty"),
        }
    }
}

/// Three decimals, with rounding noise around zero printed as `0.000`
struct Rounded(Point);

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clean = |v: f64| if v.abs() < 5e-4 { 0.0 } else { v };
        write!(f, "({:.3}, {:.3})", clean(self.0.x.0), clean(self.0.y.0))
    }
}

fn finite_point(what: &'static str, p: Point) -> Result<Point, PlacementError> {
    Point::try_new(p.x.0, p.y.0).map_err(|e| PlacementError::numeric(what, e))
}

fn checked_offset(dx: f64, dy: f64) -> Result<Offset, PlacementError> {
    let p = Point::try_new(dx, dy).map_err(|e| PlacementError::numeric("offset", e))?;
    Ok(Offset::new(p.x, p.y))
}

/// Position a label in the local frame, then map it into the drawing
fn place_label(
    label: &Label,
    local_bounds: &BBox,
    local_anchors: &AnchorTable,
    t: &Transform,
    default_offset: Length,
    owner: &str,
) -> Result<PlacedLabel, PlacementError> {
    let gap = Length::try_new(label.offset.unwrap_or(default_offset).0)
        .map_err(|e| PlacementError::numeric("label offset", e))?;
    let bb = if local_bounds.is_empty() {
        BBox::from_points([Point::ORIGIN])
    } else {
        *local_bounds
    };
    let c = bb.center();
    let local = match &label.loc {
        LabelLoc::Top => Point::new(c.x, bb.max.y + gap),
        LabelLoc::Bottom => Point::new(c.x, bb.min.y - gap),
        LabelLoc::Left => Point::new(bb.min.x - gap, c.y),
        LabelLoc::Right => Point::new(bb.max.x + gap, c.y),
        LabelLoc::Center => c,
        LabelLoc::Anchor(name) => local_anchors.get_for(name, owner)?,
    };
    Ok(PlacedLabel {
        text: label.text.clone(),
        loc: label.loc.clone(),
        position: t.apply(local),
        rotation: t.theta(),
    })
}

// ============================================================================
// Fluent placement
// ============================================================================

/// A placement being described; nothing happens until [`PendingElement::add`]
pub struct PendingElement<'d, 's> {
    drawing: &'d mut Drawing,
    spec: &'s ElementSpec,
    directive: Directive,
}

macro_rules! forward_directive {
    ($($name:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            pub fn $name(mut self, $($arg: $ty),*) -> Self {
                self.directive = self.directive.$name($($arg),*);
                self
            }
        )*
    };
}

impl PendingElement<'_, '_> {
    forward_directive! {
        at(point: Point);
        at_anchor(target: impl Into<Target>, anchor: impl Into<String>);
        anchor(name: impl Into<String>);
        theta(degrees: f64);
        direction(direction: Direction);
        right();
        left();
        up();
        down();
        length(length: f64);
        to(point: Point);
        tox(x: f64);
        toy(y: f64);
        endpoints(p1: Point, p2: Point);
        flip();
        reverse();
        scale(s: f64);
        hold();
        drop(anchor: impl Into<String>);
        name(name: impl Into<String>);
        label(text: impl Into<String>);
        label_at(text: impl Into<String>, loc: LabelLoc);
        with_label(label: Label);
        style(key: impl Into<String>, value: impl Into<String>);
    }

    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    pub fn add(self) -> Result<Added, PlacementError> {
        self.drawing.add(self.spec, self.directive)
    }
}
