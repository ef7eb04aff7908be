//! Semantic checks and annotation of parsed formulas.
//!
//! Validation never rejects a well-formed formula today. It fills every
//! node's [`Annotation`](crate::ast::Annotation) and reports suspicious
//! quantifiers as warnings:
//!
//! - `W200`: the bound variable does not occur in the body
//! - `W201`: the bound variable is already bound by an enclosing quantifier

use log::debug;

use crate::{
    ast::{AnnotatedFormula, Formula, FormulaKind},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ValidationError},
    span::Span,
};

struct Validator {
    /// Variables bound by enclosing quantifiers, innermost last
    scope: Vec<(String, Span)>,
    diagnostics: DiagnosticCollector,
}

impl Validator {
    fn new() -> Self {
        Self {
            scope: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Annotate every node of `root` in pre-order.
    ///
    /// Each pending entry remembers how much of the scope belongs to its
    /// ancestors, so bindings made in a left subtree are dropped before its
    /// right sibling is visited.
    fn annotate(&mut self, root: &mut Formula) {
        let mut pending = vec![(root, 0, 0)];

        while let Some((formula, depth, scope_len)) = pending.pop() {
            self.scope.truncate(scope_len);
            formula.annotation.leaf_count = formula.leaves;
            formula.annotation.depth = depth;
            let start = formula.span().start();

            match &mut formula.kind {
                FormulaKind::Atom(_) => {}
                FormulaKind::Negation(operand) => {
                    pending.push((operand.as_mut(), depth + 1, scope_len));
                }
                FormulaKind::Binary { left, right, .. } => {
                    pending.push((right.as_mut(), depth + 1, scope_len));
                    pending.push((left.as_mut(), depth + 1, scope_len));
                }
                FormulaKind::Quantified {
                    quantifier,
                    variable,
                    body,
                } => {
                    let head = Span::new(start..variable.span.end());

                    if !body.mentions(&variable.name) {
                        formula.annotation.vacuous = true;
                        self.diagnostics.emit(
                            Diagnostic::warning(format!(
                                "quantifier `{quantifier}{}` binds nothing",
                                variable.name
                            ))
                            .with_code(ErrorCode::W200)
                            .with_label(
                                head,
                                format!("`{}` does not occur in the body", variable.name),
                            )
                            .with_help(format!(
                                "remove the quantifier or use `{}` in its body",
                                variable.name
                            )),
                        );
                    }

                    let outer = self
                        .scope
                        .iter()
                        .rev()
                        .find(|(name, _)| *name == variable.name)
                        .map(|(_, span)| *span);
                    if let Some(outer) = outer {
                        formula.annotation.shadows = true;
                        self.diagnostics.emit(
                            Diagnostic::warning(format!(
                                "variable `{}` shadows an outer binding",
                                variable.name
                            ))
                            .with_code(ErrorCode::W201)
                            .with_label(variable.span, format!("rebinds `{}`", variable.name))
                            .with_secondary_label(outer, "outer binding")
                            .with_help("rename one of the variables"),
                        );
                    }

                    self.scope.push((variable.name.clone(), variable.span));
                    pending.push((body.as_mut(), depth + 1, self.scope.len()));
                }
            }
        }
    }
}

/// Validate a parsed formula and annotate every node.
///
/// # Errors
///
/// Returns a [`ValidationError`] if a hard semantic violation is found.
/// Vacuous and shadowing quantifiers are only warnings, available through
/// [`AnnotatedFormula::warnings`].
pub fn validate(mut formula: Formula) -> Result<AnnotatedFormula, ValidationError> {
    let mut validator = Validator::new();
    validator.annotate(&mut formula);

    let warnings = validator.diagnostics.finish()?;
    debug!(
        leaf_count = formula.annotation.leaf_count,
        warnings = warnings.len();
        "Validated formula"
    );

    Ok(AnnotatedFormula::new(formula, warnings))
}
