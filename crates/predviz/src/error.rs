//! Error types for Predviz operations.
//!
//! This module provides the main error type [`PredvizError`] which wraps
//! the error conditions of every pipeline stage.

use std::io;

use thiserror::Error;

use predviz_parser::Error as ParseError;

/// The main error type for Predviz operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the formula text next to the structured front
/// end error, so callers can render a labelled report of the failing span.
#[derive(Debug, Error)]
pub enum PredvizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for PredvizError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl PredvizError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: impl Into<ParseError>, src: impl Into<String>) -> Self {
        Self::Parse {
            err: err.into(),
            src: src.into(),
        }
    }

    /// Byte offset of the failure in the formula, for lexical and syntax
    /// errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Parse { err, .. } => err.offset(),
            _ => None,
        }
    }
}
