//! Predviz Core Types
//!
//! Foundational types shared by the Predviz crates:
//!
//! - **Geometry**: points, sizes, bounds and insets ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Draw**: drawing primitives and the finished [`draw::Diagram`]

pub mod color;
pub mod draw;
pub mod geometry;
