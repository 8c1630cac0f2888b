//! Inverting amplifier: input resistor, feedback resistor across an opamp.
//!
//! Run with `RUST_LOG=schemru=debug cargo run --example opamp_circuit --features tracing`.

use schemru::{Drawing, LabelLoc, basic};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut d = Drawing::new();
    let op = d
        .place(&basic::opamp())
        .at(schemru::pt(0.0, 0.0))
        .anchor("in1")
        .name("U1")
        .add()?
        .handle;

    // input resistor runs left from the inverting input
    d.place(&basic::line()).at_anchor(op, "in1").left().length(1.0).add()?;
    let rin = d.place(&basic::resistor()).label("Rin").name("Rin").add()?.handle;
    d.place(&basic::dot()).add()?;

    // feedback: up from the junction, across the top, down to the output
    let out = d.anchor(op, "out")?;
    d.push();
    d.place(&basic::line()).at_anchor(op, "in1").up().length(1.5).add()?;
    d.place(&basic::resistor()).right().tox(out.x.0).label("Rf").add()?;
    d.place(&basic::line()).to(out).add()?;
    d.pop()?;

    d.place(&basic::ground()).at_anchor(op, "in2").add()?;
    d.place(&basic::line()).at_anchor(op, "out").right().length(1.0).label_at("Vout", LabelLoc::Right).add()?;

    println!("{d}");
    println!("input resistor starts at {}", d.anchor(rin, "start")?);
    for (handle, w) in d.warnings() {
        eprintln!("{handle}: {w}");
    }
    Ok(())
}
