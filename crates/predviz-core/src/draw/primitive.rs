//! Drawing primitives and the [`Diagram`] that owns them.
//!
//! A diagram is a flat, ordered list of [`Primitive`]s plus the bounding box
//! that contains all of them. Every primitive knows its own extent and how to
//! turn itself into SVG nodes; the diagram only adds a background and keeps
//! the ordering.

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Insets, Point},
};

/// Something that occupies space in a diagram and can be rendered to SVG.
pub trait Drawable {
    /// Returns the area covered by this drawable, strokes excluded.
    fn bounds(&self) -> Bounds;

    /// Renders this drawable into layered SVG nodes.
    fn render_to_layers(&self) -> LayeredOutput;
}

/// Outline of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Circle inscribed in the node bounds (bounds are square)
    Circle,
    /// Rectangle with square corners
    Rectangle,
    /// Rectangle with corners rounded by the given radius in pixels
    RoundedRectangle(u8),
}

/// Paint of a node: fill, outline and label color.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    fill: Color,
    stroke: StrokeDefinition,
    text_color: Color,
}

impl NodeStyle {
    pub fn new(fill: Color, stroke: StrokeDefinition, text_color: Color) -> Self {
        Self {
            fill,
            stroke,
            text_color,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }
}

/// A shape with a centered text label.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeElement {
    shape: NodeShape,
    bounds: Bounds,
    label: String,
    font_size: f32,
    style: NodeStyle,
}

impl NodeElement {
    pub fn new(
        shape: NodeShape,
        bounds: Bounds,
        label: impl Into<String>,
        font_size: f32,
        style: NodeStyle,
    ) -> Self {
        Self {
            shape,
            bounds,
            label: label.into(),
            font_size,
            style,
        }
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn render_outline(&self) -> Box<dyn svg::Node> {
        let center = self.bounds.center();
        match self.shape {
            NodeShape::Circle => {
                let radius = self.bounds.width().min(self.bounds.height()) / 2.0;
                let circle = svg_element::Circle::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("r", radius)
                    .set("fill", self.style.fill())
                    .set("fill-opacity", self.style.fill().alpha());
                Box::new(apply_stroke!(circle, self.style.stroke()))
            }
            NodeShape::Rectangle | NodeShape::RoundedRectangle(_) => {
                let min = self.bounds.min_point();
                let mut rect = svg_element::Rectangle::new()
                    .set("x", min.x())
                    .set("y", min.y())
                    .set("width", self.bounds.width())
                    .set("height", self.bounds.height())
                    .set("fill", self.style.fill())
                    .set("fill-opacity", self.style.fill().alpha());
                if let NodeShape::RoundedRectangle(radius) = self.shape {
                    rect = rect.set("rx", f32::from(radius));
                }
                Box::new(apply_stroke!(rect, self.style.stroke()))
            }
        }
    }
}

impl Drawable for NodeElement {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, self.render_outline());

        let center = self.bounds.center();
        let text = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "monospace")
            .set("font-size", self.font_size)
            .set("fill", self.style.text_color())
            .add(SvgText::new(self.label.as_str()));
        output.add_to_layer(RenderLayer::Text, Box::new(text));

        output
    }
}

/// A straight connector between a parent and a child node.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    start: Point,
    end: Point,
    stroke: StrokeDefinition,
}

impl Connector {
    pub fn new(start: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self { start, end, stroke }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

impl Drawable for Connector {
    fn bounds(&self) -> Bounds {
        Bounds::new_from_points(self.start, self.end)
    }

    fn render_to_layers(&self) -> LayeredOutput {
        let line = svg_element::Line::new()
            .set("x1", self.start.x())
            .set("y1", self.start.y())
            .set("x2", self.end.x())
            .set("y2", self.end.y());

        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Connector,
            Box::new(apply_stroke!(line, &self.stroke)),
        );
        output
    }
}

/// One drawing primitive of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Node(NodeElement),
    Line(Connector),
}

impl Drawable for Primitive {
    fn bounds(&self) -> Bounds {
        match self {
            Primitive::Node(node) => node.bounds(),
            Primitive::Line(line) => line.bounds(),
        }
    }

    fn render_to_layers(&self) -> LayeredOutput {
        match self {
            Primitive::Node(node) => node.render_to_layers(),
            Primitive::Line(line) => line.render_to_layers(),
        }
    }
}

/// The finished drawing: primitives in emission order plus their bounding box.
///
/// # Examples
///
/// ```
/// # use predviz_core::color::Color;
/// # use predviz_core::draw::{Diagram, NodeElement, NodeShape, NodeStyle, Primitive, StrokeDefinition};
/// # use predviz_core::geometry::{Insets, Point, Size};
/// let style = NodeStyle::new(Color::default(), StrokeDefinition::default(), Color::default());
/// let node = NodeElement::new(
///     NodeShape::Rectangle,
///     Point::new(20.0, 16.0).to_bounds(Size::new(40.0, 32.0)),
///     "p",
///     16.0,
///     style,
/// );
///
/// let diagram = Diagram::new(vec![Primitive::Node(node)], Insets::uniform(10.0), Color::default());
/// assert_eq!(diagram.bounds().width(), 60.0);
/// assert_eq!(diagram.bounds().height(), 52.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    primitives: Vec<Primitive>,
    bounds: Bounds,
    background: Color,
}

impl Diagram {
    /// Creates a diagram whose bounds are the union of all primitive bounds
    /// grown by `margin`.
    pub fn new(primitives: Vec<Primitive>, margin: Insets, background: Color) -> Self {
        let content = primitives
            .iter()
            .map(Drawable::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();

        Self {
            primitives,
            bounds: content.add_padding(margin),
            background,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Iterates over node primitives in emission order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeElement> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Node(node) => Some(node),
            Primitive::Line(_) => None,
        })
    }

    /// Iterates over connector primitives in emission order.
    pub fn lines(&self) -> impl Iterator<Item = &Connector> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            Primitive::Node(_) => None,
        })
    }

    /// Renders the background and every primitive into layers.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let min = self.bounds.min_point();
        let background = svg_element::Rectangle::new()
            .set("x", min.x())
            .set("y", min.y())
            .set("width", self.bounds.width())
            .set("height", self.bounds.height())
            .set("fill", self.background);
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        for primitive in &self.primitives {
            output.merge(primitive.render_to_layers());
        }

        output
    }
}
