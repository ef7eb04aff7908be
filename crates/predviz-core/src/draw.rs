//! Visual building blocks of a formula diagram.
//!
//! - [`Diagram`]: the ordered list of primitives plus its bounding box
//! - [`Primitive`]: either a labelled [`NodeElement`] or a [`Connector`]
//! - [`StrokeDefinition`]: outline and line styling
//! - [`LayeredOutput`]: z-ordered SVG output

mod layer;
mod primitive;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use primitive::{Connector, Diagram, Drawable, NodeElement, NodeShape, NodeStyle, Primitive};
pub use stroke::{StrokeDefinition, StrokeStyle};
