//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the formula.
///
/// A diagnostic normally has one primary label marking the offending text.
/// Secondary labels point at related places, such as the outer binding of a
/// shadowed variable:
///
/// ```text
/// warning[W201]: variable `x` shadows an outer binding
///   |
/// 1 | ∀x.∃x.p(x)
///   |  -  ^ rebinds `x`
///   |  |
///   |  outer binding
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
