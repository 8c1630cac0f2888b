//! A handful of common symbols
//!
//! Enough of a catalog to build small schematics. Two-terminal parts start
//! and end their first path with a repeated point: those are the zero-length
//! leads that get stretched on placement.

use super::ElementSpec;
use crate::geometry::segment::PathSegment;
use crate::types::pt;

const RES_WIDTH: f64 = 1.0 / 6.0;
const RES_HEIGHT: f64 = 0.25;
const CAP_GAP: f64 = 0.2;
const CAP_PLATE: f64 = 0.3;
const IND_LOOP: f64 = 0.125;
const OA_LEN: f64 = 2.0;
const OA_HALF: f64 = 1.25;

/// Plain wire
pub fn line() -> ElementSpec {
    ElementSpec::builder("line")
        .path([pt(0.0, 0.0), pt(0.0, 0.0)])
        .two_terminal()
        .build()
}

/// Zig-zag resistor with a body one unit long
pub fn resistor() -> ElementSpec {
    let (w, h) = (RES_WIDTH, RES_HEIGHT);
    ElementSpec::builder("resistor")
        .path([
            pt(0.0, 0.0),
            pt(0.0, 0.0),
            pt(0.5 * w, h),
            pt(1.5 * w, -h),
            pt(2.5 * w, h),
            pt(3.5 * w, -h),
            pt(4.5 * w, h),
            pt(5.5 * w, -h),
            pt(1.0, 0.0),
            pt(1.0, 0.0),
        ])
        .two_terminal()
        .build()
}

pub fn capacitor() -> ElementSpec {
    let leads = PathSegment::new(vec![pt(0.0, 0.0), pt(0.0, 0.0), pt(CAP_GAP, 0.0), pt(CAP_GAP, 0.0)])
        .break_before(2);
    ElementSpec::builder("capacitor")
        .segment(leads)
        .path([pt(0.0, CAP_PLATE), pt(0.0, -CAP_PLATE)])
        .path([pt(CAP_GAP, CAP_PLATE), pt(CAP_GAP, -CAP_PLATE)])
        .two_terminal()
        .build()
}

/// Four loops drawn as half circles
pub fn inductor() -> ElementSpec {
    let body = 8.0 * IND_LOOP;
    let leads =
        PathSegment::new(vec![pt(0.0, 0.0), pt(0.0, 0.0), pt(body, 0.0), pt(body, 0.0)]).break_before(2);
    let mut spec = ElementSpec::builder("inductor").segment(leads).two_terminal();
    for i in 0..4 {
        let cx = IND_LOOP * (2 * i + 1) as f64;
        spec = spec.arc(pt(cx, 0.0), IND_LOOP, 0.0, 180.0);
    }
    spec.build()
}

/// Filled junction dot
pub fn dot() -> ElementSpec {
    ElementSpec::builder("dot")
        .circle(pt(0.0, 0.0), 0.075)
        .style("fill", "true")
        .build()
}

/// Earth ground; always hangs downward and leaves the cursor where it attached
pub fn ground() -> ElementSpec {
    ElementSpec::builder("ground")
        .path([pt(0.0, 0.0), pt(0.0, -0.3)])
        .path([pt(-0.25, -0.3), pt(0.25, -0.3)])
        .path([pt(-0.17, -0.4), pt(0.17, -0.4)])
        .path([pt(-0.08, -0.5), pt(0.08, -0.5)])
        .theta(0.0)
        .drop("start")
        .build()
}

/// Operational amplifier, inverting input on top
pub fn opamp() -> ElementSpec {
    let vd = pt(0.4 * OA_LEN, OA_HALF * 0.6);
    let vs = pt(0.4 * OA_LEN, -OA_HALF * 0.6);
    ElementSpec::builder("opamp")
        .polygon([pt(0.0, OA_HALF), pt(OA_LEN, 0.0), pt(0.0, -OA_HALF)])
        .path([pt(0.2, 0.5), pt(0.4, 0.5)])
        .path([pt(0.2, -0.5), pt(0.4, -0.5)])
        .path([pt(0.3, -0.4), pt(0.3, -0.6)])
        .anchor("start", pt(0.0, 0.0))
        .anchor("end", pt(OA_LEN, 0.0))
        .anchor("center", pt(OA_LEN / 2.0, 0.0))
        .anchor("in1", pt(0.0, 0.5))
        .anchor("in2", pt(0.0, -0.5))
        .anchor("out", pt(OA_LEN, 0.0))
        .anchor("vd", vd)
        .anchor("vs", vs)
        .drop("out")
        .build()
}
