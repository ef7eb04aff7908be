//! Layer-based z-ordering for SVG output.
//!
//! Connectors must sit below node shapes and labels above them, independent
//! of the order in which primitives are emitted. Drawables push their SVG
//! nodes into a [`LayeredOutput`] tagged with a [`RenderLayer`]; rendering
//! groups them bottom to top.
//!
//! # Example
//!
//! ```
//! # use predviz_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Text};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("p")));
//! output.add_to_layer(RenderLayer::Connector, Box::new(Line::new()));
//!
//! // Connector group first, text group second
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background fill
    Background,
    /// Parent-to-child connector lines
    Connector,
    /// Node outlines and fills
    Node,
    /// Node labels
    Text,
}

impl RenderLayer {
    /// Returns the name written to the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Connector => "connector",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`, after any node already in that layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output, keeping insertion order.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the layers as one `<g data-layer="...">` per non-empty layer.
    ///
    /// The sort is stable, so nodes keep their emission order inside a layer
    /// and the output is identical for identical input.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
