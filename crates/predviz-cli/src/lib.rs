//! CLI logic for the Predviz formula diagram tool.
//!
//! Reads one formula from an inline argument, a file or stdin, and writes
//! the rendered SVG to a file or stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read, Write},
};

use log::{info, warn};

use predviz::{DiagramBuilder, PredvizError};

use error_adapter::Report;

/// Output path that selects stdout.
const STDOUT: &str = "-";

/// Run the Predviz CLI application
///
/// Processes the formula through the Predviz pipeline and writes the
/// resulting SVG. Validator warnings are reported through the logger and do
/// not stop the run.
///
/// # Errors
///
/// Returns `PredvizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Lexical and syntax errors
/// - Layout and rendering errors
pub fn run(args: &Args) -> Result<(), PredvizError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Processing formula"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = read_source(args)?;

    let builder = DiagramBuilder::new(app_config);
    let formula = builder.parse(&source)?;
    for warning in formula.warnings() {
        warn!("{}", Report::from_diagnostic(warning, &source).render());
    }
    let svg = builder.render_svg(&formula)?;

    if args.output == STDOUT {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{svg}")?;
        stdout.flush()?;
    } else {
        fs::write(&args.output, svg)?;
        info!(output_file = args.output; "SVG exported successfully");
    }

    Ok(())
}

/// Formula text from `--formula`, the input file or stdin, in that order.
fn read_source(args: &Args) -> Result<String, PredvizError> {
    if let Some(formula) = &args.formula {
        return Ok(formula.clone());
    }

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Files usually end with a newline; offsets stay valid after trimming the end.
    Ok(source.trim_end().to_string())
}
