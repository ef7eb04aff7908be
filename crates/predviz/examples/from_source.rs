//! Example: Rendering a formula from source text
//!
//! Parses a formula, prints the validator warnings and the layout, then
//! writes the SVG to stdout.

use predviz::{DiagramBuilder, config::AppConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = "∀x.(human(x) → mortal(x)) ∧ ∃y.p";

    let builder = DiagramBuilder::new(AppConfig::default());
    let formula = builder.parse(source)?;

    for warning in formula.warnings() {
        eprintln!("{warning}");
    }

    let tree = builder.layout(&formula)?;
    for node in tree.nodes() {
        eprintln!(
            "{:<12} depth {} at ({:.1}, {:.1})",
            node.label(),
            node.depth(),
            node.center().x(),
            node.center().y()
        );
    }

    println!("{}", builder.render_svg(&formula)?);
    Ok(())
}
