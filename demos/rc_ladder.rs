//! Three-stage RC ladder, each capacitor hanging from the node between resistors.

use schemru::{Directive, Drawing, DrawingConfig, basic};

fn main() -> miette::Result<()> {
    let config = DrawingConfig::try_new(2.0).map_err(|e| miette::miette!("bad config: {e}"))?;
    let mut d = Drawing::with_config(config)?;

    for stage in 1..=3 {
        let r = d.add(&basic::resistor(), Directive::new().right().label(format!("R{stage}")))?;
        d.push();
        d.add(&basic::capacitor(), Directive::anchor_ref(r.handle, "end").down().label(format!("C{stage}")))?;
        d.add(&basic::ground(), Directive::new())?;
        d.pop()?;
    }

    let out = d.output();
    for item in &out.items {
        let labels: Vec<_> = item.labels.iter().map(|l| l.text.as_str()).collect();
        println!("{} segments={} labels={labels:?}", item.handle, item.segments.len());
    }
    if let Some(bb) = out.bounds {
        println!("size {:.2} x {:.2}", bb.width().0, bb.height().0);
    }
    Ok(())
}
