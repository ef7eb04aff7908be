//! Stroke definitions for node outlines and connectors.
//!
//! [`StrokeDefinition`] bundles color, width and dash pattern; the
//! [`apply_stroke!`](crate::apply_stroke!) macro writes all of them onto an
//! SVG element in one step.
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Dashes of 4px separated by 3px gaps
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or `None` for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("4,3"),
        }
    }
}

/// Color, width and pattern of a stroke.
///
/// # Examples
///
/// ```
/// use predviz_core::color::Color;
/// use predviz_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::dashed(Color::new("#2e6b2e").unwrap(), 1.5);
/// assert_eq!(*stroke.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// ```
/// use predviz_core::color::Color;
/// use predviz_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
/// let line = predviz_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
