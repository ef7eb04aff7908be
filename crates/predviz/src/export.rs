//! Export of laid-out formulas.
//!
//! This module provides the [`Exporter`] trait, the interface for turning a
//! [`LayoutTree`] into an output format. It is the last stage of the
//! pipeline.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`PredvizError::Export`] at the crate boundary.
//!
//! [`PredvizError::Export`]: crate::PredvizError::Export

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::layout::LayoutTree;

/// Abstraction for export backends.
pub trait Exporter {
    /// Exports a layout tree to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_layout(&mut self, layout: &LayoutTree) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure.
    #[error("Render error: {0}")]
    Render(String),
    /// An I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
