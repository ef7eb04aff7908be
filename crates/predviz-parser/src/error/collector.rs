//! Collector for accumulating diagnostics during a processing phase.

use crate::error::{Diagnostic, ValidationError};

/// Accumulates errors and warnings so a phase can report all of them at once.
///
/// # Example
///
/// ```text
/// let mut collector = DiagnosticCollector::new();
/// collector.emit(Diagnostic::warning("quantifier binds nothing").with_code(ErrorCode::W200));
///
/// // Warnings only: Ok with the warnings
/// let warnings = collector.finish()?;
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection.
    ///
    /// - If any error was emitted, returns `Err(ValidationError)` with all
    ///   diagnostics.
    /// - Otherwise returns `Ok` with the warnings in emission order.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ValidationError> {
        if self.has_errors {
            Err(ValidationError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, span::Span};

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert_eq!(collector.finish(), Ok(Vec::new()));
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(
            Diagnostic::error("error 1")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(0..1), "here"),
        );

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[1].message(), "error 1");
    }

    #[test]
    fn test_collector_finish_warnings_only() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::warning("warning 2"));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message(), "warning 1");
    }
}
