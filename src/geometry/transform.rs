//! 2D similarity transforms: rotation, translation, uniform scale and axis flips.
//!
//! A `Transform` wraps a `glam::DAffine2`, so composition is plain matrix
//! multiplication and therefore associative. `a.compose(&b)` applies `b`
//! first and `a` second, matching `a.apply(b.apply(p))`.
//!
//! Elements are authored pointing right with their start at the local origin.
//! Flips negate a local axis *before* any rotation is applied, which is what
//! `Transform::placement` builds.

use glam::{DAffine2, DMat2, dvec2};

use crate::types::{Angle, Offset, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    affine: DAffine2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform { affine: DAffine2::IDENTITY }
    }

    /// Counter-clockwise rotation about the origin
    pub fn rotate(theta: Angle) -> Self {
        Transform { affine: DAffine2::from_angle(theta.radians()) }
    }

    pub fn translate(offset: Offset) -> Self {
        Transform { affine: DAffine2::from_translation(offset.to_dvec2()) }
    }

    /// Uniform scale about the origin
    pub fn scale(s: f64) -> Self {
        Transform { affine: DAffine2::from_scale(dvec2(s, s)) }
    }

    /// Mirror across the local x axis (negates y)
    pub fn flip_vertical() -> Self {
        Transform { affine: DAffine2::from_scale(dvec2(1.0, -1.0)) }
    }

    /// Mirror across the local y axis (negates x)
    pub fn flip_horizontal() -> Self {
        Transform { affine: DAffine2::from_scale(dvec2(-1.0, 1.0)) }
    }

    /// The transform that puts an element's local frame into the drawing:
    /// flips, then scale, then rotation, then translation to `origin`.
    pub fn placement(origin: Point, theta: Angle, scale: f64, flip_v: bool, flip_h: bool) -> Self {
        let mut local = Transform::scale(scale);
        if flip_v {
            local = local.compose(&Transform::flip_vertical());
        }
        if flip_h {
            local = local.compose(&Transform::flip_horizontal());
        }
        Transform::translate(Offset::from_dvec2(origin.to_dvec2()))
            .compose(&Transform::rotate(theta))
            .compose(&local)
    }

    /// Apply `other` first, then `self`
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform { affine: self.affine * other.affine }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::from_dvec2(self.affine.transform_point2(p.to_dvec2()))
    }

    /// Apply only the linear part (no translation) to a displacement
    pub fn apply_offset(&self, o: Offset) -> Offset {
        Offset::from_dvec2(self.affine.transform_vector2(o.to_dvec2()))
    }

    /// Heading a local heading ends up at after this transform
    pub fn apply_angle(&self, a: Angle) -> Angle {
        let u = a.unit_vec();
        let v = self.linear() * dvec2(u.dx(), u.dy());
        Angle(v.y.atan2(v.x).to_degrees())
    }

    /// Inverse transform; `None` when the linear part is singular or the
    /// inverse overflows
    pub fn inverse(&self) -> Option<Transform> {
        let det = self.linear().determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = Transform { affine: self.affine.inverse() };
        inv.is_finite().then_some(inv)
    }

    pub fn is_finite(&self) -> bool {
        self.affine.is_finite()
    }

    /// Rotation angle of the local +x axis, in degrees
    pub fn theta(&self) -> Angle {
        self.apply_angle(Angle::ZERO)
    }

    pub fn scale_factor(&self) -> f64 {
        self.linear().determinant().abs().sqrt()
    }

    /// True when the transform reverses orientation (an odd number of flips)
    pub fn is_mirrored(&self) -> bool {
        self.linear().determinant() < 0.0
    }

    pub fn translation(&self) -> Offset {
        Offset::from_dvec2(self.affine.translation)
    }

    pub fn approx_eq(&self, other: &Transform, eps: f64) -> bool {
        self.affine.abs_diff_eq(other.affine, eps)
    }

    fn linear(&self) -> DMat2 {
        self.affine.matrix2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Length, pt};

    const EPS: f64 = 1e-9;

    #[test]
    fn identity_is_noop() {
        let p = pt(1.5, -2.0);
        assert_eq!(Transform::identity().apply(p), p);
        let t = Transform::rotate(Angle(30.0));
        assert!(t.compose(&Transform::identity()).approx_eq(&t, EPS));
        assert!(Transform::identity().compose(&t).approx_eq(&t, EPS));
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Transform::rotate(Angle(90.0)).apply(pt(1.0, 0.0));
        assert!(p.approx_eq(pt(0.0, 1.0), EPS));
    }

    #[test]
    fn compose_applies_right_hand_side_first() {
        let rot = Transform::rotate(Angle(90.0));
        let shift = Transform::translate(Offset::new(Length(2.0), Length::ZERO));
        // shift then rotate: (1,0) -> (3,0) -> (0,3)
        let p = rot.compose(&shift).apply(pt(1.0, 0.0));
        assert!(p.approx_eq(pt(0.0, 3.0), EPS));
        // rotate then shift: (1,0) -> (0,1) -> (2,1)
        let q = shift.compose(&rot).apply(pt(1.0, 0.0));
        assert!(q.approx_eq(pt(2.0, 1.0), EPS));
    }

    #[test]
    fn flips_negate_one_axis() {
        assert_eq!(Transform::flip_vertical().apply(pt(1.0, 2.0)), pt(1.0, -2.0));
        assert_eq!(Transform::flip_horizontal().apply(pt(1.0, 2.0)), pt(-1.0, 2.0));
        assert!(Transform::flip_vertical().is_mirrored());
        assert!(!Transform::flip_vertical().compose(&Transform::flip_horizontal()).is_mirrored());
    }

    #[test]
    fn placement_flips_before_rotating() {
        // Local (0, 1) flipped to (0, -1), then rotated 90° to (1, 0), then moved to (5, 5)
        let t = Transform::placement(pt(5.0, 5.0), Angle(90.0), 1.0, true, false);
        assert!(t.apply(pt(0.0, 1.0)).approx_eq(pt(6.0, 5.0), EPS));
        assert!((t.theta().degrees() - 90.0).abs() < EPS);
    }

    #[test]
    fn decomposition_accessors() {
        let t = Transform::placement(pt(1.0, 2.0), Angle(-45.0), 2.0, false, false);
        assert!((t.scale_factor() - 2.0).abs() < EPS);
        assert!((t.theta().degrees() + 45.0).abs() < EPS);
        assert!(!t.is_mirrored());
        assert_eq!(t.translation(), Offset::new(Length(1.0), Length(2.0)));
    }

    #[test]
    fn apply_offset_ignores_translation() {
        let t = Transform::translate(Offset::new(Length(10.0), Length(10.0)))
            .compose(&Transform::rotate(Angle(180.0)));
        let o = t.apply_offset(Offset::new(Length(1.0), Length::ZERO));
        assert!((o.dx.0 + 1.0).abs() < EPS);
        assert!(o.dy.0.abs() < EPS);
    }

    #[test]
    fn inverse_round_trips() {
        let t = Transform::placement(pt(3.0, -1.0), Angle(33.0), 1.5, true, false);
        let inv = t.inverse().unwrap();
        assert!(inv.apply(t.apply(pt(0.7, 0.2))).approx_eq(pt(0.7, 0.2), 1e-12));
        assert!(Transform::scale(0.0).inverse().is_none());
        assert!(Transform::scale(1e-320).inverse().is_none());
        assert!(!Transform::scale(f64::INFINITY).is_finite());
    }
}
