//! Configuration types for Predviz diagram rendering.
//!
//! Configuration only covers geometry. The visual grammar (shapes, colors,
//! strokes) is fixed and lives in [`export::svg`](crate::export::svg).
//!
//! All types implement [`serde::Deserialize`]; every field is optional and
//! falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Spacing, node sizing and label font size.
//!
//! # Example
//!
//! ```
//! # use predviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().row_height(), 72.0);
//! assert_eq!(config.layout().font_size(), 16.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Geometry used by the layout engine and the SVG exporter.
///
/// All lengths are in SVG user units (pixels).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Minimum horizontal space reserved for one atom.
    unit_width: f32,
    /// Gap kept between the widest node and its neighbours.
    sibling_gap: f32,
    /// Vertical distance between the centres of two consecutive depths.
    row_height: f32,
    /// Height of every node, and the minimum circle diameter.
    node_height: f32,
    /// Horizontal padding on each side of a label.
    node_padding: f32,
    /// Label font size.
    font_size: f32,
    /// Blank space around the drawing.
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_width: 48.0,
            sibling_gap: 16.0,
            row_height: 72.0,
            node_height: 32.0,
            node_padding: 12.0,
            font_size: 16.0,
            margin: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn unit_width(&self) -> f32 {
        self.unit_width
    }

    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn with_unit_width(mut self, unit_width: f32) -> Self {
        self.unit_width = unit_width;
        self
    }

    pub fn with_sibling_gap(mut self, sibling_gap: f32) -> Self {
        self.sibling_gap = sibling_gap;
        self
    }

    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_node_height(mut self, node_height: f32) -> Self {
        self.node_height = node_height;
        self
    }

    pub fn with_node_padding(mut self, node_padding: f32) -> Self {
        self.node_padding = node_padding;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Checks that every length is usable for layout.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first field that is negative or not
    /// finite, or zero where a positive value is required.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("unit_width", self.unit_width),
            ("row_height", self.row_height),
            ("node_height", self.node_height),
            ("font_size", self.font_size),
        ];
        let non_negative = [
            ("sibling_gap", self.sibling_gap),
            ("node_padding", self.node_padding),
            ("margin", self.margin),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("`{name}` must be a positive number, got {value}"));
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("`{name}` must not be negative, got {value}"));
            }
        }
        Ok(())
    }
}
