//! Errors and diagnostics of the parsing pipeline.
//!
//! Each phase fails with its own structured error: [`LexError`],
//! [`ParseError`] or [`ValidationError`]. The umbrella [`enum@Error`] is what
//! [`parse`](crate::parse) returns. Every error converts into one or more
//! [`Diagnostic`]s carrying a code, labeled spans and help text.
//!
//! # Example
//!
//! ```
//! # use predviz_parser::error::{Diagnostic, ErrorCode};
//! # use predviz_parser::Span;
//!
//! let diag = Diagnostic::warning("quantifier `∀x` binds nothing")
//!     .with_code(ErrorCode::W200)
//!     .with_label(Span::new(0..3), "`x` never occurs in the body")
//!     .with_help("remove the quantifier or use `x` in its body");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod lex_error;
mod parse_error;
mod severity;
mod validation_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use lex_error::LexError;
pub use parse_error::{Expected, Found, ParseError};
pub use severity::Severity;
pub use validation_error::ValidationError;

use thiserror::Error;

/// Any failure of [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Byte offset of the failure, if the error points at a single place.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lex(err) => Some(err.offset),
            Error::Parse(err) => Some(err.offset),
            Error::Validation(err) => err
                .diagnostics()
                .iter()
                .find(|diag| diag.severity().is_error())
                .and_then(Diagnostic::primary_span)
                .map(|span| span.start()),
        }
    }

    /// Converts the error into diagnostics for reporting.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex(err) => vec![err.to_diagnostic()],
            Error::Parse(err) => vec![err.to_diagnostic()],
            Error::Validation(err) => err.diagnostics().to_vec(),
        }
    }
}
