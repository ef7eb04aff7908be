//! The error returned by the validator.

use std::fmt;

use crate::error::Diagnostic;

/// A hard semantic violation found while validating a formula.
///
/// Wraps every diagnostic of the failed validation, warnings included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<Diagnostic> for ValidationError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_single() {
        let err: ValidationError = Diagnostic::error("invalid formula").into();
        assert_eq!(err.to_string(), "error: invalid formula");
    }

    #[test]
    fn test_validation_error_display_multiple() {
        let err = ValidationError::new(vec![
            Diagnostic::error("first error"),
            Diagnostic::warning("a warning"),
        ]);
        assert_eq!(err.to_string(), "error: first error (+1 more)");
    }
}
