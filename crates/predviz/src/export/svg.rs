//! SVG backend.
//!
//! Maps each [`LayoutNode`](crate::layout::LayoutNode) to a drawing
//! primitive in the fixed visual grammar below, collects them into a
//! [`Diagram`] and serializes it as a standalone SVG document.
//!
//! | node | shape | fill | stroke |
//! |------|-------|------|--------|
//! | atom | rounded rectangle, `rx = 6` | `#e8f1fb` | `#1f4e79`, 1.5 |
//! | negation, connective | circle | `#fdf2d0` | `#8a6d0b`, 1.5 |
//! | quantifier | rectangle | `#e6f4e6` | `#2e6b2e`, 1.5 |
//! | vacuous quantifier | rectangle, dashed `4,3` | `#e6f4e6` | `#2e6b2e`, 1.5 |
//! | connector | line | | `#555555`, 1.2 |
//!
//! Labels are `#111111` monospace text; the background is white.

use std::io::Write;

use log::{debug, info};
use svg::Document;

use predviz_core::{
    color::Color,
    draw::{
        Connector, Diagram, NodeElement, NodeShape, NodeStyle, Primitive, StrokeDefinition,
    },
    geometry::Insets,
};

use crate::{
    config::LayoutConfig,
    export::{self, Exporter},
    layout::{LayoutTree, NodeKind},
};

const ATOM_FILL: &str = "#e8f1fb";
const ATOM_STROKE: &str = "#1f4e79";
const OPERATOR_FILL: &str = "#fdf2d0";
const OPERATOR_STROKE: &str = "#8a6d0b";
const QUANTIFIER_FILL: &str = "#e6f4e6";
const QUANTIFIER_STROKE: &str = "#2e6b2e";
const CONNECTOR_STROKE: &str = "#555555";
const LABEL_COLOR: &str = "#111111";
const BACKGROUND: &str = "white";

const NODE_STROKE_WIDTH: f32 = 1.5;
const CONNECTOR_STROKE_WIDTH: f32 = 1.2;
const ATOM_CORNER_RADIUS: u8 = 6;

/// Resolved colors of the visual grammar.
#[derive(Debug, Clone)]
struct Palette {
    atom: NodeStyle,
    operator: NodeStyle,
    quantifier: NodeStyle,
    vacuous_quantifier: NodeStyle,
    connector: StrokeDefinition,
    background: Color,
}

impl Palette {
    fn new() -> Result<Self, String> {
        let label = Color::new(LABEL_COLOR)?;
        let quantifier_stroke =
            StrokeDefinition::solid(Color::new(QUANTIFIER_STROKE)?, NODE_STROKE_WIDTH);

        Ok(Self {
            atom: NodeStyle::new(
                Color::new(ATOM_FILL)?,
                StrokeDefinition::solid(Color::new(ATOM_STROKE)?, NODE_STROKE_WIDTH),
                label,
            ),
            operator: NodeStyle::new(
                Color::new(OPERATOR_FILL)?,
                StrokeDefinition::solid(Color::new(OPERATOR_STROKE)?, NODE_STROKE_WIDTH),
                label,
            ),
            quantifier: NodeStyle::new(
                Color::new(QUANTIFIER_FILL)?,
                quantifier_stroke.clone(),
                label,
            ),
            vacuous_quantifier: NodeStyle::new(
                Color::new(QUANTIFIER_FILL)?,
                StrokeDefinition::dashed(quantifier_stroke.color(), NODE_STROKE_WIDTH),
                label,
            ),
            connector: StrokeDefinition::solid(
                Color::new(CONNECTOR_STROKE)?,
                CONNECTOR_STROKE_WIDTH,
            ),
            background: Color::new(BACKGROUND)?,
        })
    }

    fn shape(kind: NodeKind) -> NodeShape {
        match kind {
            NodeKind::Atom => NodeShape::RoundedRectangle(ATOM_CORNER_RADIUS),
            NodeKind::Negation | NodeKind::Connective(_) => NodeShape::Circle,
            NodeKind::Quantifier { .. } => NodeShape::Rectangle,
        }
    }

    fn style(&self, kind: NodeKind) -> &NodeStyle {
        match kind {
            NodeKind::Atom => &self.atom,
            NodeKind::Negation | NodeKind::Connective(_) => &self.operator,
            NodeKind::Quantifier { vacuous: false, .. } => &self.quantifier,
            NodeKind::Quantifier { vacuous: true, .. } => &self.vacuous_quantifier,
        }
    }
}

/// Builder for an [`Svg`] exporter.
///
/// # Examples
///
/// ```
/// # use predviz::export::svg::SvgBuilder;
/// let svg = SvgBuilder::new(Vec::new()).build().unwrap();
/// assert!(svg.into_inner().is_empty());
/// ```
#[derive(Debug)]
pub struct SvgBuilder<W> {
    writer: W,
    config: LayoutConfig,
}

impl<W: Write> SvgBuilder<W> {
    /// Starts a builder that will write documents to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            config: LayoutConfig::default(),
        }
    }

    /// Uses the font size and margin of `config`.
    pub fn with_config(mut self, config: &LayoutConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Finishes the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a palette color cannot be parsed.
    pub fn build(self) -> Result<Svg<W>, export::Error> {
        let palette = Palette::new().map_err(export::Error::Render)?;
        Ok(Svg {
            writer: self.writer,
            config: self.config,
            palette,
        })
    }
}

/// SVG exporter writing one document per exported layout.
#[derive(Debug)]
pub struct Svg<W> {
    writer: W,
    config: LayoutConfig,
    palette: Palette,
}

impl<W> Svg<W> {
    /// Converts a layout into drawing primitives.
    ///
    /// Nodes come first in layout order, followed by one connector per edge.
    pub fn diagram(&self, layout: &LayoutTree) -> Diagram {
        let nodes = layout.nodes().iter().map(|node| {
            Primitive::Node(NodeElement::new(
                Palette::shape(node.kind()),
                node.bounds(),
                node.label(),
                self.config.font_size(),
                self.palette.style(node.kind()).clone(),
            ))
        });

        let lines = layout.edges().filter_map(|edge| {
            let (start, end) = layout.connector(edge)?;
            Some(Primitive::Line(Connector::new(
                start,
                end,
                self.palette.connector.clone(),
            )))
        });

        let primitives: Vec<_> = nodes.chain(lines).collect();
        debug!(primitives = primitives.len(); "Diagram primitives built");

        Diagram::new(
            primitives,
            Insets::uniform(self.config.margin()),
            self.palette.background,
        )
    }

    /// Renders a diagram as an SVG document sized to its bounding box.
    pub fn render_diagram(&self, diagram: &Diagram) -> Document {
        let bounds = diagram.bounds();
        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height());

        for group in diagram.render_to_layers().render() {
            doc = doc.add(group);
        }
        doc
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for Svg<W> {
    fn export_layout(&mut self, layout: &LayoutTree) -> Result<(), export::Error> {
        let diagram = self.diagram(layout);
        let doc = self.render_diagram(&diagram);
        debug!("SVG document rendered");

        write!(self.writer, "{doc}")?;
        info!(
            width = diagram.bounds().width(),
            height = diagram.bounds().height();
            "SVG exported"
        );
        Ok(())
    }
}
