//! Color handling for Predviz diagrams.
//!
//! [`Color`] wraps [`DynamicColor`] from the `color` crate so that palette
//! entries can be written as CSS strings and rendered back as SVG paint values.

use std::str::FromStr;

use color::DynamicColor;

/// A CSS color used for fills and strokes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parse a CSS color string such as `"#1f4e79"`, `"rgb(0, 0, 0)"` or `"white"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use predviz_core::color::Color;
    ///
    /// assert!(Color::new("#e8f1fb").is_ok());
    /// assert!(Color::new("not a color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the alpha component between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}
