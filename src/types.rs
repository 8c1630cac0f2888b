//! Strongly-typed numeric primitives for schemru (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` in placement logic
//! - Positions and displacements are different types
//! - Non-finite values are rejected at the API boundary

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Length in drawing units (one "unit" is the default two-terminal length / 3)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length (const-friendly, unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub(crate) const fn units(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        check_finite(val).map(Length)
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let val = check_finite(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    #[inline]
    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Length {
    fn from(val: f64) -> Self {
        Length(val)
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Angle in degrees, counter-clockwise from +x (Y-up convention)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an Angle with validation (rejects NaN/infinite)
    pub fn try_new(degrees: f64) -> Result<Angle, NumericError> {
        check_finite(degrees).map(Angle)
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Fold into `[0, 360)`
    pub fn normalized(self) -> Angle {
        let a = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if a >= 360.0 { Angle(0.0) } else { Angle(a) }
    }

    /// Angle of the vector from `from` to `to`. `None` when the points coincide.
    pub fn between(from: Point, to: Point) -> Option<Angle> {
        let d = to - from;
        if d.dx.0 == 0.0 && d.dy.0 == 0.0 {
            return None;
        }
        Some(Angle(d.dy.0.atan2(d.dx.0).to_degrees()))
    }

    /// Smallest absolute difference between two headings, in degrees
    pub fn separation(self, other: Angle) -> f64 {
        let d = (self.0 - other.0).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    /// Unit vector pointing along this heading
    pub fn unit_vec(self) -> UnitVec {
        let r = self.radians();
        UnitVec { dx: r.cos(), dy: r.sin() }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle { Angle(self.0 + rhs.0) }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle { Angle(self.0 - rhs.0) }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// 2D point in drawing units
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const ORIGIN: Point = Point { x: Length::ZERO, y: Length::ZERO };

    pub fn new(x: Length, y: Length) -> Self {
        Point { x, y }
    }

    /// Create a point with validation (rejects NaN/infinite coordinates)
    pub fn try_new(x: f64, y: f64) -> Result<Point, NumericError> {
        Ok(Point { x: Length::try_new(x)?, y: Length::try_new(y)? })
    }

    /// Calculate the midpoint between two points
    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> Length {
        Length(self.to_dvec2().distance(other.to_dvec2()))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when both coordinates are within `eps` of the other point's
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x.0 - other.x.0).abs() <= eps && (self.y.0 - other.y.0).abs() <= eps
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    #[inline]
    pub fn from_dvec2(v: DVec2) -> Self {
        Point { x: Length(v.x), y: Length(v.y) }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Shorthand for building a point from raw coordinates
pub fn pt(x: f64, y: f64) -> Point {
    Point::new(Length(x), Length(y))
}

/// A displacement/offset vector (not an absolute position)
/// Use this for translations; Point + Offset = Point
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: Length,
    pub dy: Length,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: Length::ZERO, dy: Length::ZERO };

    pub fn new(dx: Length, dy: Length) -> Self {
        Offset { dx, dy }
    }

    pub fn length(self) -> Length {
        Length(self.dx.0.hypot(self.dy.0))
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.dx.0, self.dy.0)
    }

    #[inline]
    pub fn from_dvec2(v: DVec2) -> Self {
        Offset { dx: Length(v.x), dy: Length(v.y) }
    }
}

impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Offset) -> Offset {
        Offset { dx: self.dx + rhs.dx, dy: self.dy + rhs.dy }
    }
}

impl Neg for Offset {
    type Output = Offset;
    fn neg(self) -> Offset {
        Offset { dx: -self.dx, dy: -self.dy }
    }
}

/// A unit direction vector (dimensionless, normalized)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct UnitVec {
    dx: f64,
    dy: f64,
}

impl UnitVec {
    pub const EAST: UnitVec = UnitVec { dx: 1.0, dy: 0.0 };
    pub const NORTH: UnitVec = UnitVec { dx: 0.0, dy: 1.0 };
    pub const WEST: UnitVec = UnitVec { dx: -1.0, dy: 0.0 };
    pub const SOUTH: UnitVec = UnitVec { dx: 0.0, dy: -1.0 };

    /// Create a normalized unit vector from components.
    /// Returns None if the input has zero length.
    pub fn normalized(dx: f64, dy: f64) -> Option<Self> {
        let len = dx.hypot(dy);
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(UnitVec { dx: dx / len, dy: dy / len })
        }
    }

    pub fn dx(self) -> f64 { self.dx }

    pub fn dy(self) -> f64 { self.dy }

    /// Heading of this vector, in `(-180, 180]`
    pub fn angle(self) -> Angle {
        Angle(self.dy.atan2(self.dx).to_degrees())
    }
}

/// Multiply a unit vector by a length to get an offset (not a point!)
impl Mul<Length> for UnitVec {
    type Output = Offset;
    fn mul(self, len: Length) -> Offset {
        Offset {
            dx: Length(self.dx * len.0),
            dy: Length(self.dy * len.0),
        }
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset> for Point {
    type Output = Point;
    fn add(self, rhs: Offset) -> Point {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

/// Subtract an offset from a point
impl Sub<Offset> for Point {
    type Output = Point;
    fn sub(self, rhs: Offset) -> Point {
        Point {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
        }
    }
}

/// Subtract two points to get an offset
impl Sub<Point> for Point {
    type Output = Offset;
    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: Point { x: Length(f64::MAX), y: Length(f64::MAX) },
            max: Point { x: Length(f64::MIN), y: Length(f64::MIN) },
        }
    }

    /// Bounding box of a set of points
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut bb = BBox::new();
        for p in points {
            bb.expand_point(p);
        }
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x.0 > self.max.x.0 || self.min.y.0 > self.max.y.0
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box; empty boxes are ignored
    pub fn expand_bbox(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    pub fn width(&self) -> Length { self.max.x - self.min.x }

    pub fn height(&self) -> Length { self.max.y - self.min.y }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}
