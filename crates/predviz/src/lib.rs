//! Predviz - draw predicate-logic formulas as syntax-tree diagrams.
//!
//! Parsing, layout and SVG rendering for propositional and first-order
//! formulas such as `∀x.(p(x) → ∃y.q(x, y))`. The ASCII spellings
//! `!x:(p(x) -> ?y:q(x, y))` are accepted as well.
//!
//! # Pipeline
//!
//! ```text
//! text ─ parse ─▶ AnnotatedFormula ─ layout ─▶ LayoutTree ─ diagram ─▶ Diagram ─▶ SVG
//! ```
//!
//! [`render`] runs the whole pipeline with default settings;
//! [`DiagramBuilder`] exposes each stage.
//!
//! # Example
//!
//! ```
//! let svg = predviz::render("p ∧ q").unwrap();
//! assert!(svg.starts_with("<svg"));
//!
//! let err = predviz::render("p $ q").unwrap_err();
//! assert_eq!(err.offset(), Some(2));
//! ```

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use predviz_core::{color, draw, geometry};
pub use predviz_parser::{AnnotatedFormula, Formula, ast};

pub use error::PredvizError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use draw::Diagram;
use export::{Exporter, svg::SvgBuilder};
use layout::{Engine, LayoutTree};

/// Builder for parsing, laying out and rendering formulas.
///
/// # Examples
///
/// ```
/// use predviz::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse text to an annotated formula
/// let formula = builder.parse("∀x.(p(x) → q(x))").expect("Failed to parse");
///
/// // Render it to SVG
/// let svg = builder.render_svg(&formula).expect("Failed to render");
/// assert!(svg.contains("</svg>"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse formula text into an annotated formula.
    ///
    /// Validator warnings (vacuous or shadowing quantifiers) are kept on the
    /// result for the caller to report; they never fail the call.
    ///
    /// # Errors
    ///
    /// Returns [`PredvizError::Parse`] for lexical, syntax or validation
    /// errors.
    pub fn parse(&self, source: &str) -> Result<AnnotatedFormula, PredvizError> {
        info!(length = source.len(); "Parsing formula");

        let annotated = predviz_parser::parse(source)
            .map_err(|err| PredvizError::new_parse_error(err, source))?;

        debug!(
            nodes = annotated.formula().node_count(),
            warnings = annotated.warnings().len();
            "Formula parsed successfully"
        );
        trace!(formula:% = annotated.formula(); "Parsed formula");

        Ok(annotated)
    }

    /// Compute the tree layout of a parsed formula.
    ///
    /// # Errors
    ///
    /// Returns [`PredvizError::Layout`] if the layout configuration holds
    /// unusable lengths.
    pub fn layout(&self, annotated: &AnnotatedFormula) -> Result<LayoutTree, PredvizError> {
        let config = self.config.layout();
        config.validate().map_err(PredvizError::Layout)?;

        let tree = Engine::new(config).calculate(annotated);
        info!(nodes = tree.len(); "Layout calculated");
        Ok(tree)
    }

    /// Convert a layout into drawing primitives.
    ///
    /// # Errors
    ///
    /// Returns [`PredvizError::Export`] if the exporter cannot be set up.
    pub fn diagram(&self, tree: &LayoutTree) -> Result<Diagram, PredvizError> {
        let svg = SvgBuilder::new(std::io::sink())
            .with_config(self.config.layout())
            .build()?;
        Ok(svg.diagram(tree))
    }

    /// Render a parsed formula to an SVG string.
    ///
    /// Identical input always yields byte-identical output.
    ///
    /// # Errors
    ///
    /// Returns [`PredvizError`] for layout or rendering errors.
    pub fn render_svg(&self, annotated: &AnnotatedFormula) -> Result<String, PredvizError> {
        let tree = self.layout(annotated)?;

        let mut svg_exporter = SvgBuilder::new(Vec::new())
            .with_config(self.config.layout())
            .build()?;
        svg_exporter.export_layout(&tree)?;

        let svg_string = String::from_utf8(svg_exporter.into_inner())
            .map_err(|err| PredvizError::Export(Box::new(err)))?;

        info!(bytes = svg_string.len(); "SVG rendered successfully");
        Ok(svg_string)
    }
}

/// Render formula text to a standalone SVG document with the default
/// configuration.
///
/// Validator warnings are logged at `warn` level.
///
/// # Errors
///
/// Returns [`PredvizError::Parse`] when the text is not a well-formed
/// formula; the wrapped error carries the byte offset and the expected and
/// found tokens.
pub fn render(source: &str) -> Result<String, PredvizError> {
    let builder = DiagramBuilder::default();
    let annotated = builder.parse(source)?;
    for warning in annotated.warnings() {
        warn!(warning:% = warning; "Formula warning");
    }
    builder.render_svg(&annotated)
}
