//! Token definitions produced by the [`lexer`](super::lexer).

use std::fmt;

use crate::span::Span;

/// A lexical token of the formula language.
///
/// Operators are normalised: `&` and `∧` both lex to [`Token::And`], the
/// literal spelling stays available through [`PositionedToken::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    Identifier(&'src str),

    // Connectives
    Not,     // ¬ ~
    And,     // ∧ &
    Or,      // ∨ |
    Implies, // → ⇒ -> =>
    Iff,     // ↔ ⇔ <-> <=>

    // Quantifiers
    ForAll, // ∀ !
    Exists, // ∃ ?

    // Relations
    Equals,    // =
    NotEquals, // ≠ ~=

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    Dot,        // . :
    Comma,      // ,
}

impl Token<'_> {
    /// Returns the data-less kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Not => TokenKind::Not,
            Token::And => TokenKind::And,
            Token::Or => TokenKind::Or,
            Token::Implies => TokenKind::Implies,
            Token::Iff => TokenKind::Iff,
            Token::ForAll => TokenKind::ForAll,
            Token::Exists => TokenKind::Exists,
            Token::Equals => TokenKind::Equals,
            Token::NotEquals => TokenKind::NotEquals,
            Token::LeftParen => TokenKind::LeftParen,
            Token::RightParen => TokenKind::RightParen,
            Token::Dot => TokenKind::Dot,
            Token::Comma => TokenKind::Comma,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{name}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Broad category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Identifier,
    Operator,
    Quantifier,
    Punctuation,
}

/// The kind of a [`Token`] without its payload.
///
/// Used in error values, where the borrowed identifier text is not needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Not,
    And,
    Or,
    Implies,
    Iff,
    ForAll,
    Exists,
    Equals,
    NotEquals,
    LeftParen,
    RightParen,
    Dot,
    Comma,
}

impl TokenKind {
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Identifier => TokenClass::Identifier,
            TokenKind::Not
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Implies
            | TokenKind::Iff
            | TokenKind::Equals
            | TokenKind::NotEquals => TokenClass::Operator,
            TokenKind::ForAll | TokenKind::Exists => TokenClass::Quantifier,
            TokenKind::LeftParen | TokenKind::RightParen | TokenKind::Dot | TokenKind::Comma => {
                TokenClass::Punctuation
            }
        }
    }

    /// Canonical glyph of the token, `None` for identifiers.
    pub fn glyph(&self) -> Option<&'static str> {
        let glyph = match self {
            TokenKind::Identifier => return None,
            TokenKind::Not => "¬",
            TokenKind::And => "∧",
            TokenKind::Or => "∨",
            TokenKind::Implies => "→",
            TokenKind::Iff => "↔",
            TokenKind::ForAll => "∀",
            TokenKind::Exists => "∃",
            TokenKind::Equals => "=",
            TokenKind::NotEquals => "≠",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
        };
        Some(glyph)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.glyph() {
            Some(glyph) => write!(f, "`{glyph}`"),
            None => write!(f, "identifier"),
        }
    }
}

/// A token together with its literal text and byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, text: &'src str, span: Span) -> Self {
        Self { token, text, span }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_classes() {
        assert_eq!(TokenKind::Identifier.class(), TokenClass::Identifier);
        assert_eq!(TokenKind::Iff.class(), TokenClass::Operator);
        assert_eq!(TokenKind::Exists.class(), TokenClass::Quantifier);
        assert_eq!(TokenKind::Comma.class(), TokenClass::Punctuation);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Identifier("p").to_string(), "p");
        assert_eq!(Token::Implies.to_string(), "`→`");
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::RightParen.to_string(), "`)`");
    }
}
