//! Default drawing values

use crate::types::{Angle, Length, Point};

/// Default element length when neither the directive nor the element sets one
pub const UNIT: Length = Length::units(3.0);
/// Gap between an element's bounding box and its labels
pub const LABEL_OFFSET: Length = Length::units(0.1);
pub const ORIGIN: Point = Point::ORIGIN;
pub const DIRECTION: Angle = Angle::ZERO;
pub const SCALE: f64 = 1.0;

/// Two lengths closer than this are the same length
pub const LENGTH_EPSILON: f64 = 1e-9;
/// Two headings closer than this (in degrees) are the same heading
pub const ANGLE_EPSILON_DEG: f64 = 1e-6;
