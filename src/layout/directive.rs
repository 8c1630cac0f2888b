//! How the caller says where the next element goes
//!
//! A `Directive` is built by chaining: every option is independent, and the
//! resolver sorts out which ones win. The default directive continues from
//! the cursor in the current direction.

use super::types::{Label, LabelLoc, Target};
use crate::element::Style;
use crate::types::{Angle, Length, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn angle(self) -> Angle {
        match self {
            Direction::Right => Angle(0.0),
            Direction::Up => Angle(90.0),
            Direction::Left => Angle(180.0),
            Direction::Down => Angle(270.0),
        }
    }
}

/// Fixed start position of the new element
#[derive(Debug, Clone, PartialEq)]
pub enum At {
    Point(Point),
    /// A named anchor of an element placed earlier
    Anchor { target: Target, anchor: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Directive {
    pub(crate) at: Option<At>,
    pub(crate) anchor: Option<String>,
    pub(crate) theta: Option<Angle>,
    pub(crate) length: Option<Length>,
    pub(crate) to: Option<Point>,
    pub(crate) tox: Option<Length>,
    pub(crate) toy: Option<Length>,
    pub(crate) endpoints: Option<(Point, Point)>,
    pub(crate) flip: bool,
    pub(crate) reverse: bool,
    pub(crate) scale: Option<f64>,
    pub(crate) hold: bool,
    pub(crate) drop: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) labels: Vec<Label>,
    pub(crate) style: Style,
}

impl Directive {
    /// Continue from the cursor in the current direction
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absolute(point: Point) -> Self {
        Self::new().at(point)
    }

    pub fn to_endpoint(point: Point) -> Self {
        Self::new().to(point)
    }

    pub fn anchor_ref(target: impl Into<Target>, anchor: impl Into<String>) -> Self {
        Self::new().at_anchor(target, anchor)
    }

    pub fn between(p1: Point, p2: Point) -> Self {
        Self::new().endpoints(p1, p2)
    }

    /// Start at a fixed point
    pub fn at(mut self, point: Point) -> Self {
        self.at = Some(At::Point(point));
        self
    }

    /// Start at an anchor of an earlier element
    pub fn at_anchor(mut self, target: impl Into<Target>, anchor: impl Into<String>) -> Self {
        self.at = Some(At::Anchor { target: target.into(), anchor: anchor.into() });
        self
    }

    /// Which anchor of the new element lands on the start position
    pub fn anchor(mut self, name: impl Into<String>) -> Self {
        self.anchor = Some(name.into());
        self
    }

    pub fn theta(mut self, degrees: f64) -> Self {
        self.theta = Some(Angle(degrees));
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.theta = Some(direction.angle());
        self
    }

    pub fn right(self) -> Self {
        self.direction(Direction::Right)
    }

    pub fn left(self) -> Self {
        self.direction(Direction::Left)
    }

    pub fn up(self) -> Self {
        self.direction(Direction::Up)
    }

    pub fn down(self) -> Self {
        self.direction(Direction::Down)
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = Some(Length(length));
        self
    }

    /// End exactly at `point`
    pub fn to(mut self, point: Point) -> Self {
        self.to = Some(point);
        self
    }

    /// End at this x, keeping the start's y unless `toy` is also given
    pub fn tox(mut self, x: f64) -> Self {
        self.tox = Some(Length(x));
        self
    }

    /// End at this y, keeping the start's x unless `tox` is also given
    pub fn toy(mut self, y: f64) -> Self {
        self.toy = Some(Length(y));
        self
    }

    /// Start exactly at `p1` and end exactly at `p2`
    pub fn endpoints(mut self, p1: Point, p2: Point) -> Self {
        self.endpoints = Some((p1, p2));
        self
    }

    /// Mirror across the element's own axis
    pub fn flip(mut self) -> Self {
        self.flip = true;
        self
    }

    /// Draw the body end-for-end; `start` and `end` stay put
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn scale(mut self, s: f64) -> Self {
        self.scale = Some(s);
        self
    }

    /// Leave cursor and direction where they were
    pub fn hold(mut self) -> Self {
        self.hold = true;
        self
    }

    /// Move the cursor to this anchor afterwards instead of the element's default
    pub fn drop(mut self, anchor: impl Into<String>) -> Self {
        self.drop = Some(anchor.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.labels.push(Label::new(text));
        self
    }

    pub fn label_at(mut self, text: impl Into<String>, loc: LabelLoc) -> Self {
        self.labels.push(Label::new(text).at(loc));
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Handle;
    use crate::types::pt;

    #[test]
    fn cardinal_directions() {
        assert_eq!(Directive::new().down().theta, Some(Angle(270.0)));
        assert_eq!(Directive::new().up().left().theta, Some(Angle(180.0)));
    }

    #[test]
    fn last_start_position_wins() {
        let d = Directive::new().at(pt(1.0, 1.0)).at_anchor(Handle::new(0, 0), "end");
        assert_eq!(
            d.at,
            Some(At::Anchor { target: Target::Handle(Handle::new(0, 0)), anchor: "end".to_string() })
        );
    }
}
