//! Label measurement.
//!
//! Labels are drawn in a generic monospace family, so their width is
//! estimated from the character count alone. The estimate does not depend on
//! installed fonts, which keeps layouts identical on every machine.

use predviz_core::geometry::Size;

/// Advance width of one monospace character relative to the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Line height relative to the font size.
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// Estimated size of `text` rendered at `font_size`.
///
/// Width counts Unicode scalar values, so `¬` and `p` take the same space.
pub fn measure(text: &str, font_size: f32) -> Size {
    if text.is_empty() {
        return Size::default();
    }
    let chars = text.chars().count() as f32;
    Size::new(
        chars * CHAR_WIDTH_RATIO * font_size,
        LINE_HEIGHT_RATIO * font_size,
    )
}
