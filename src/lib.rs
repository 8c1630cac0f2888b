//! Placement engine for schematic diagrams.
//!
//! Elements are described once in their own frame (pointing right, starting at
//! the origin) and placed into a [`Drawing`] one after another. Each placement
//! is driven by a [`Directive`]: continue from the cursor, start at a point or
//! at a named anchor of an earlier element, head in a direction, run to an end
//! point. The drawing works out the transform, stretches the leads of
//! two-terminal parts, and records global geometry and anchors.
//!
//! ```
//! use schemru::{Directive, Drawing, basic, pt};
//!
//! let mut d = Drawing::new();
//! let r1 = d.add(&basic::resistor(), Directive::new().down().length(2.0))?.handle;
//! let c1 = d.add(&basic::capacitor(), Directive::anchor_ref(r1, "end").right())?.handle;
//! assert_eq!(d.anchor(c1, "start")?, d.anchor(r1, "end")?);
//! assert!(d.anchor(r1, "end")?.approx_eq(pt(0.0, -2.0), 1e-9));
//! # Ok::<(), schemru::PlacementError>(())
//! ```

pub mod element;
pub mod errors;
pub mod geometry;
pub mod layout;
mod log;
pub mod types;

pub use element::{AnchorTable, ElementSpec, ElementSpecBuilder, Style, basic};
pub use errors::{PlacementError, PlacementWarning};
pub use geometry::{Segment, SegmentGeometry, Transform};
pub use layout::{
    Added, Direction, Directive, Drawing, DrawingConfig, Handle, Label, LabelLoc, PlacedElement,
    PlacedLabel, RenderItem, RenderOutput, Target,
};
pub use types::{Angle, BBox, Length, NumericError, Offset, Point, pt};
