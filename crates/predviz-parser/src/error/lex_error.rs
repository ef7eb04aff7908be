//! The error returned by the lexer.

use thiserror::Error;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// An illegal character in the formula.
///
/// `offset` is the byte offset of the first character the lexer could not
/// turn into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected character `{found}` at offset {offset}")]
pub struct LexError {
    pub offset: usize,
    pub found: char,
}

impl LexError {
    pub fn new(offset: usize, found: char) -> Self {
        Self { offset, found }
    }

    /// Span covering the offending character.
    pub fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.found.len_utf8())
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(format!("unexpected character `{}`", self.found))
            .with_code(ErrorCode::E001)
            .with_label(self.span(), ErrorCode::E001.description())
            .with_help("operators are ¬ ∧ ∨ → ↔ ∀ ∃ = ≠ or their ASCII forms ~ & | -> <-> ! ? = ~=")
    }
}
