//! The error returned by the parser.

use std::fmt;

use thiserror::Error;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
    tokens::TokenKind,
};

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific token, such as the `)` closing a group.
    Token(TokenKind),
    /// The start of a formula: an operand, `¬`, a quantifier or `(`.
    Formula,
    /// A predicate argument.
    Term,
    /// The variable following a quantifier.
    BoundVariable,
    /// Nothing more; the formula was already complete.
    EndOfInput,
    /// Nesting within the given number of levels.
    NestingLimit(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Formula => write!(f, "a formula"),
            Expected::Term => write!(f, "a term"),
            Expected::BoundVariable => write!(f, "a variable name"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::NestingLimit(limit) => write!(f, "at most {limit} levels of nesting"),
        }
    }
}

/// What the parser found instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token { kind: TokenKind, text: String },
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token { text, .. } => write!(f, "`{text}`"),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A syntax error.
///
/// `offset` is the byte offset of the offending token, or the source length
/// when the input ended too early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at offset {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub expected: Expected,
    pub found: Found,
    pub span: Span,
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match (&self.expected, &self.found) {
            (Expected::NestingLimit(_), _) => ErrorCode::E104,
            (Expected::Token(TokenKind::RightParen), _) => ErrorCode::E102,
            (Expected::BoundVariable | Expected::Token(TokenKind::Dot), _) => ErrorCode::E103,
            (_, Found::EndOfInput) => ErrorCode::E101,
            _ => ErrorCode::E100,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let message = match self.expected {
            Expected::NestingLimit(limit) => {
                format!("formula is nested more than {limit} levels deep")
            }
            _ => format!("expected {}, found {}", self.expected, self.found),
        };

        let diag = Diagnostic::error(message)
            .with_code(code)
            .with_label(self.span, code.description());

        match self.help() {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self.code() {
            ErrorCode::E102 => Some("add a closing `)`"),
            ErrorCode::E103 => Some("write a quantifier as `∀x.body` or `!x:body`"),
            ErrorCode::E104 => Some("split the formula into smaller parts"),
            ErrorCode::E101 => Some("every operator needs an operand after it"),
            _ => match self.expected {
                Expected::EndOfInput => Some("join separate formulas with a connective"),
                _ => None,
            },
        }
    }
}
