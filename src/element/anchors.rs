//! Named anchor points of an element

use std::collections::BTreeMap;

use crate::errors::PlacementError;
use crate::geometry::segment::PathSegment;
use crate::geometry::transform::Transform;
use crate::types::Point;

pub const START: &str = "start";
pub const END: &str = "end";
pub const CENTER: &str = "center";

/// Anchor name → coordinate, in whatever frame the owning element is in
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnchorTable {
    anchors: BTreeMap<String, Point>,
}

impl AnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, point: Point) {
        self.anchors.insert(name.into(), point);
    }

    pub fn with(mut self, name: impl Into<String>, point: Point) -> Self {
        self.insert(name, point);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Point> {
        self.anchors.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Result<Point, PlacementError> {
        self.get_for(name, "element")
    }

    /// Like `get`, naming `owner` in the error
    pub(crate) fn get_for(&self, name: &str, owner: &str) -> Result<Point, PlacementError> {
        self.lookup(name).ok_or_else(|| PlacementError::UnknownAnchor {
            element: owner.to_string(),
            anchor: name.to_string(),
            available: Some(format!("available anchors: {}", self.names().collect::<Vec<_>>().join(", "))),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.anchors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.anchors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Every entry mapped through `t`; the key set is unchanged
    pub fn with_transform(&self, t: &Transform) -> AnchorTable {
        AnchorTable {
            anchors: self
                .anchors
                .iter()
                .map(|(k, v)| (k.clone(), t.apply(*v)))
                .collect(),
        }
    }

    /// Entries of `other` override entries here
    pub fn merged(mut self, other: &AnchorTable) -> AnchorTable {
        for (k, v) in other.iter() {
            self.insert(k, v);
        }
        self
    }

    /// Fill in `start`, `end` and `center` from the lead path when the
    /// catalog entry did not set them
    pub(crate) fn with_path_defaults(mut self, lead: Option<&PathSegment>) -> AnchorTable {
        let first = lead.and_then(PathSegment::first).unwrap_or(Point::ORIGIN);
        let last = lead.and_then(PathSegment::last).unwrap_or(first);
        self.anchors.entry(START.to_string()).or_insert(first);
        self.anchors.entry(END.to_string()).or_insert(last);
        self.anchors
            .entry(CENTER.to_string())
            .or_insert(first.midpoint(last));
        self
    }
}

impl<S: Into<String>> FromIterator<(S, Point)> for AnchorTable {
    fn from_iter<I: IntoIterator<Item = (S, Point)>>(iter: I) -> Self {
        let mut table = AnchorTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Angle, pt};

    #[test]
    fn defaults_come_from_lead_path() {
        let path = PathSegment::new(vec![pt(0.0, 0.0), pt(0.5, 0.2), pt(2.0, 0.0)]);
        let table = AnchorTable::new().with_path_defaults(Some(&path));
        assert_eq!(table.lookup(START), Some(pt(0.0, 0.0)));
        assert_eq!(table.lookup(END), Some(pt(2.0, 0.0)));
        assert_eq!(table.lookup(CENTER), Some(pt(1.0, 0.0)));
    }

    #[test]
    fn explicit_anchors_are_not_overridden() {
        let path = PathSegment::new(vec![pt(0.0, 0.0), pt(2.0, 0.0)]);
        let table = AnchorTable::new()
            .with(CENTER, pt(1.0, 0.5))
            .with_path_defaults(Some(&path));
        assert_eq!(table.lookup(CENTER), Some(pt(1.0, 0.5)));
    }

    #[test]
    fn no_path_defaults_to_origin() {
        let table = AnchorTable::new().with_path_defaults(None);
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup(END), Some(Point::ORIGIN));
    }

    #[test]
    fn transform_keeps_key_set() {
        let table: AnchorTable = [("start", pt(0.0, 0.0)), ("out", pt(1.0, 0.0))]
            .into_iter()
            .collect();
        let moved = table.with_transform(&Transform::rotate(Angle(90.0)));
        assert_eq!(moved.names().collect::<Vec<_>>(), table.names().collect::<Vec<_>>());
        assert!(moved.lookup("out").unwrap().approx_eq(pt(0.0, 1.0), 1e-12));
    }

    #[test]
    fn unknown_anchor_lists_alternatives() {
        let table = AnchorTable::new().with_path_defaults(None);
        let err = table.get_for("gate", "opamp #3").unwrap_err();
        assert_eq!(
            err,
            PlacementError::UnknownAnchor {
                element: "opamp #3".to_string(),
                anchor: "gate".to_string(),
                available: Some("available anchors: center, end, start".to_string()),
            }
        );
    }
}
