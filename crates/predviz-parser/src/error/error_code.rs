//! Diagnostic codes.
//!
//! Codes are grouped by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Validation errors
//! - `W2xx` - Validation warnings

use std::fmt;

/// Code identifying the kind of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// The character is not an identifier character, an operator glyph or
    /// one of their ASCII spellings.
    E001,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    E100,

    /// Incomplete input.
    ///
    /// The formula ended where an operand or a closing token was required.
    E101,

    /// Unclosed parenthesis.
    E102,

    /// Malformed quantifier.
    ///
    /// A quantifier must be followed by a variable name and a `.`.
    E103,

    /// Formula nested too deeply.
    E104,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Semantic error.
    ///
    /// Reserved for hard semantic violations of an otherwise well-formed
    /// formula.
    E200,

    // =========================================================================
    // Validation Warnings (W2xx)
    // =========================================================================
    /// Vacuous quantifier.
    ///
    /// The bound variable never occurs in the quantifier's body.
    W200,

    /// Shadowed variable.
    ///
    /// A quantifier rebinds a variable that an enclosing quantifier already
    /// binds.
    W201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E200 => "E200",
            ErrorCode::W200 => "W200",
            ErrorCode::W201 => "W201",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "unclosed parenthesis",
            ErrorCode::E103 => "malformed quantifier",
            ErrorCode::E104 => "formula nested too deeply",
            ErrorCode::E200 => "invalid formula",
            ErrorCode::W200 => "vacuous quantifier",
            ErrorCode::W201 => "shadowed variable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
