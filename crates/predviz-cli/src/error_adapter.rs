//! Terminal reports for formula diagnostics and library errors.
//!
//! A formula error or warning becomes a [`Report`] with labelled snippets of
//! the formula text. Every other [`PredvizError`] becomes a plain report with
//! a `predviz::*` code. Reports are drawn by miette's graphical handler.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity as MietteSeverity,
    SourceCode, SourceSpan,
};

use predviz::PredvizError;
use predviz_parser::{
    Span,
    error::{Diagnostic, Severity},
};

/// A single miette report.
#[derive(Debug)]
pub struct Report<'a> {
    message: String,
    code: Option<String>,
    severity: MietteSeverity,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
    /// Formula text the labels point into
    src: Option<&'a str>,
}

impl<'a> Report<'a> {
    /// Report `diag` against the formula text `src`.
    pub fn from_diagnostic(diag: &Diagnostic, src: &'a str) -> Self {
        let labels = diag
            .labels()
            .iter()
            .map(|label| {
                let span = span_to_miette(label.span());
                let message = Some(label.message().to_string());
                if label.is_primary() {
                    LabeledSpan::new_primary_with_span(message, span)
                } else {
                    LabeledSpan::new_with_span(message, span)
                }
            })
            .collect();

        Self {
            message: diag.message().to_string(),
            code: diag.code().map(|code| code.to_string()),
            severity: match diag.severity() {
                Severity::Error => MietteSeverity::Error,
                Severity::Warning => MietteSeverity::Warning,
            },
            help: diag.help().map(str::to_string),
            labels,
            src: Some(src),
        }
    }

    /// Report an error that has no location in the formula.
    fn from_error(err: &PredvizError) -> Self {
        let code = match err {
            PredvizError::Io(_) => "predviz::io",
            PredvizError::Parse { .. } => "predviz::parse",
            PredvizError::Layout(_) => "predviz::layout",
            PredvizError::Export(_) => "predviz::export",
        };

        Self {
            message: err.to_string(),
            code: Some(code.to_string()),
            severity: MietteSeverity::Error,
            help: None,
            labels: Vec::new(),
            src: None,
        }
    }

    /// Draw the report with snippets, falling back to the bare message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut out, self)
            .is_err()
        {
            out = self.message.clone();
        }
        out
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Report<'_> {}

impl MietteDiagnostic for Report<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.code
            .as_deref()
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'b>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(self.severity)
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.help
            .as_deref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'b>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.src.as_ref().map(|src| src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Box::new(self.labels.iter().cloned()))
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// One report per diagnostic of a formula error, otherwise a single report.
pub fn reports(err: &PredvizError) -> Vec<Report<'_>> {
    match err {
        PredvizError::Parse {
            err: formula_err,
            src,
        } => formula_err
            .diagnostics()
            .iter()
            .map(|diag| Report::from_diagnostic(diag, src))
            .collect(),
        _ => vec![Report::from_error(err)],
    }
}
