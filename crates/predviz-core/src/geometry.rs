//! Geometric primitives for diagram layout.
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Insets`] - Margin values for four sides
//!
//! # Coordinate System
//!
//! Coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Tree diagrams grow downward: the root sits on the first row and every
//! deeper level of the formula moves further along +Y.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use predviz_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// assert_eq!(a.x(), 10.0);
/// assert_eq!(a.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Treats the point as a center and spreads `size` evenly around it.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle described by its minimum and maximum corners
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds centered on `center` with the given size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates bounds whose top-left corner is `top_left`
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds containing both points
    pub fn new_from_points(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the top-left corner
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// Middle of the top edge, where incoming connectors attach
    pub fn top_center(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.min_y)
    }

    /// Middle of the bottom edge, where outgoing connectors attach
    pub fn bottom_center(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.max_y)
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use predviz_core::geometry::{Bounds, Point, Size};
    /// let root = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(40.0, 30.0));
    /// let leaf = Bounds::new_from_top_left(Point::new(50.0, 70.0), Size::new(20.0, 30.0));
    ///
    /// let all = root.merge(&leaf);
    /// assert_eq!(all.width(), 70.0);
    /// assert_eq!(all.height(), 100.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true if `other` lies entirely inside these bounds (edges included)
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// Grows the bounds outward by the given insets
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Spacing around an element, one value per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        prop_assert!(merged.contains(&b1));
        prop_assert!(merged.contains(&b2));
        Ok(())
    }

    fn check_merge_is_commutative(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let m1 = b1.merge(&b2);
        let m2 = b2.merge(&b1);
        prop_assert!(approx_eq!(f32, m1.min_x(), m2.min_x()));
        prop_assert!(approx_eq!(f32, m1.min_y(), m2.min_y()));
        prop_assert!(approx_eq!(f32, m1.max_x(), m2.max_x()));
        prop_assert!(approx_eq!(f32, m1.max_y(), m2.max_y()));
        Ok(())
    }

    fn check_padding_contains_original(b: Bounds, pad: f32) -> Result<(), TestCaseError> {
        prop_assert!(b.add_padding(Insets::uniform(pad)).contains(&b));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }

        #[test]
        fn merge_is_commutative(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_is_commutative(b1, b2)?;
        }

        #[test]
        fn padding_contains_original(b in bounds_strategy(), pad in 0.0f32..100.0) {
            check_padding_contains_original(b, pad)?;
        }
    }
}
