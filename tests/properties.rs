//! Algebraic properties of transforms, cursor bookkeeping and lead extension

use proptest::prelude::*;
use schemru::element::leads::interior_length;
use schemru::{
    Added, Angle, Directive, Drawing, ElementSpec, Length, Offset, PlacementError, PlacementWarning, Point, Transform,
    basic, pt,
};

const EPS: f64 = 1e-6;

// ===================
// Strategies
// ===================

fn point_strategy() -> impl Strategy<Value = Point> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| pt(x, y))
}

fn transform_strategy() -> impl Strategy<Value = Transform> {
    (point_strategy(), -360.0f64..360.0, 0.1f64..5.0, any::<bool>(), any::<bool>())
        .prop_map(|(origin, theta, scale, fv, fh)| Transform::placement(origin, Angle(theta), scale, fv, fh))
}

/// Two-terminal part whose leads run diagonally in its own frame
fn slanted() -> ElementSpec {
    ElementSpec::builder("slanted")
        .path([pt(0.0, 0.0), pt(0.0, 0.0), pt(0.4, 0.3), pt(0.8, 0.6), pt(0.8, 0.6)])
        .two_terminal()
        .build()
}

fn spec_strategy() -> impl Strategy<Value = ElementSpec> {
    prop_oneof![
        Just(basic::line()),
        Just(basic::resistor()),
        Just(basic::capacitor()),
        Just(basic::inductor()),
        Just(slanted()),
    ]
}

/// A placement that does not reference other elements
#[derive(Debug, Clone)]
enum Step {
    Continue,
    Theta(f64),
    Down(f64),
    At(Point),
    To(Point),
}

impl Step {
    fn directive(&self) -> Directive {
        match *self {
            Step::Continue => Directive::new(),
            Step::Theta(t) => Directive::new().theta(t),
            Step::Down(l) => Directive::new().down().length(l),
            Step::At(p) => Directive::absolute(p),
            Step::To(p) => Directive::new().to(p),
        }
    }

    fn end_point(&self) -> Option<Point> {
        match *self {
            Step::To(p) => Some(p),
            _ => None,
        }
    }
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Continue),
        (0.0f64..360.0).prop_map(Step::Theta),
        (1.0f64..6.0).prop_map(Step::Down),
        point_strategy().prop_map(Step::At),
        point_strategy().prop_map(|p| Step::To(p + Offset::new(Length(0.5), Length(0.5)))),
    ]
}

/// Add one step; the only acceptable failure is a `to` aimed at the cursor itself
fn place(d: &mut Drawing, spec: &ElementSpec, step: &Step) -> Result<Option<Added>, TestCaseError> {
    let here = d.here();
    match d.add(spec, step.directive()) {
        Ok(added) => Ok(Some(added)),
        Err(PlacementError::AmbiguousPlacement { .. })
            if step.end_point().is_some_and(|p| p.approx_eq(here, 1e-9)) =>
        {
            Ok(None)
        }
        Err(e) => Err(TestCaseError::fail(format!("{step:?} with {} rejected: {e}", spec.kind()))),
    }
}

// ===================
// Property Test Functions
// ===================

fn check_compose_is_associative(a: Transform, b: Transform, c: Transform, p: Point) -> Result<(), TestCaseError> {
    let left = a.compose(&b).compose(&c).apply(p);
    let right = a.compose(&b.compose(&c)).apply(p);
    let scale = 1.0 + p.x.0.abs().max(p.y.0.abs());
    prop_assert!(left.approx_eq(right, EPS * scale * 1e3), "{left} vs {right}");
    Ok(())
}

fn check_compose_matches_sequential_apply(a: Transform, b: Transform, p: Point) -> Result<(), TestCaseError> {
    let composed = a.compose(&b).apply(p);
    let sequential = a.apply(b.apply(p));
    prop_assert!(composed.approx_eq(sequential, EPS * 1e3));
    Ok(())
}

fn check_push_pop_restores(steps: Vec<(ElementSpec, Step)>) -> Result<(), TestCaseError> {
    let mut d = Drawing::new();
    d.add(&basic::resistor(), Directive::new().theta(30.0)).unwrap();
    let (here, dir) = (d.here(), d.direction());
    d.push();
    for (spec, step) in &steps {
        place(&mut d, spec, step)?;
    }
    d.pop().unwrap();
    prop_assert_eq!(d.here(), here);
    prop_assert_eq!(d.direction(), dir);
    Ok(())
}

fn check_stretched_length(spec: ElementSpec, length: f64, theta: f64) -> Result<(), TestCaseError> {
    let mut d = Drawing::new();
    let added = d.add(&spec, Directive::new().theta(theta).length(length)).unwrap();
    let start = d.anchor(added.handle, "start").unwrap();
    let end = d.anchor(added.handle, "end").unwrap();
    let interior = interior_length(&spec).0;
    if length + 1e-9 >= interior {
        prop_assert!(added.warnings.is_empty());
        prop_assert!((start.distance(end).0 - length).abs() < EPS);
    } else {
        prop_assert_eq!(
            added.warnings,
            vec![PlacementWarning::DegenerateLength { requested: Length(length), interior: Length(interior) }]
        );
        prop_assert!((start.distance(end).0 - interior).abs() < EPS);
    }
    Ok(())
}

fn check_anchor_matches_transform(spec: ElementSpec, step: Step) -> Result<(), TestCaseError> {
    let mut d = Drawing::new();
    let Some(added) = place(&mut d, &spec, &step)? else {
        return Ok(());
    };
    let placed = d.get(added.handle).unwrap();
    for (name, local) in placed.local_anchors.iter() {
        let global = d.anchor(added.handle, name).unwrap();
        prop_assert!(global.approx_eq(placed.transform.apply(local), 1e-12));
    }
    Ok(())
}

fn check_endpoints_are_exact(spec: ElementSpec, p1: Point, dx: f64, dy: f64) -> Result<(), TestCaseError> {
    let p2 = p1 + Offset::new(Length(dx), Length(dy));
    prop_assume!(p1.distance(p2).0 >= interior_length(&spec).0 + 1e-6);
    let mut d = Drawing::new();
    let h = d.add(&spec, Directive::between(p1, p2)).unwrap().handle;
    prop_assert!(d.anchor(h, "start").unwrap().approx_eq(p1, EPS));
    prop_assert!(d.anchor(h, "end").unwrap().approx_eq(p2, EPS));
    Ok(())
}

// ===================
// Property Tests
// ===================

proptest! {
    #[test]
    fn compose_is_associative(
        a in transform_strategy(),
        b in transform_strategy(),
        c in transform_strategy(),
        p in point_strategy(),
    ) {
        check_compose_is_associative(a, b, c, p)?;
    }

    #[test]
    fn compose_matches_sequential_apply(a in transform_strategy(), b in transform_strategy(), p in point_strategy()) {
        check_compose_matches_sequential_apply(a, b, p)?;
    }

    #[test]
    fn push_pop_restores_cursor(
        steps in prop::collection::vec((spec_strategy(), step_strategy()), 0..8),
    ) {
        check_push_pop_restores(steps)?;
    }

    #[test]
    fn stretched_length_matches_request(spec in spec_strategy(), length in 0.0f64..10.0, theta in 0.0f64..360.0) {
        check_stretched_length(spec, length, theta)?;
    }

    #[test]
    fn anchors_match_transform(spec in spec_strategy(), step in step_strategy()) {
        check_anchor_matches_transform(spec, step)?;
    }

    #[test]
    fn endpoints_are_exact(
        spec in spec_strategy(),
        p1 in point_strategy(),
        dx in -20.0f64..20.0,
        dy in -20.0f64..20.0,
    ) {
        check_endpoints_are_exact(spec, p1, dx, dy)?;
    }
}
