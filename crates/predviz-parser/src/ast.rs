//! Abstract syntax tree of a formula.
//!
//! A [`Formula`] owns its children through `Box`, so the tree has no sharing
//! and no cycles. Every node keeps the byte [`Span`] it was parsed from and an
//! [`Annotation`] that the validator fills in.
//!
//! `Display` prints the canonical glyph form. Binary and quantified operands
//! are parenthesized, except that a left-nested chain of one `∧`, `∨` or `↔`
//! prints flat, so the printed text parses back to the same tree.
//!
//! Operator chains have no length limit, so walks over the tree (including
//! `Drop`) keep their own stack instead of recursing down the chain.

use std::fmt;

use crate::{error::Diagnostic, span::Span};

/// Binary connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub fn glyph(&self) -> &'static str {
        match self {
            Connective::And => "∧",
            Connective::Or => "∨",
            Connective::Implies => "→",
            Connective::Iff => "↔",
        }
    }

    /// `↔`, `∨` and `∧` group to the left; `→` groups to the right.
    pub fn is_left_associative(&self) -> bool {
        !matches!(self, Connective::Implies)
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    ForAll,
    Exists,
}

impl Quantifier {
    pub fn glyph(&self) -> &'static str {
        match self {
            Quantifier::ForAll => "∀",
            Quantifier::Exists => "∃",
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// An argument of a predicate or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Variable {
        name: String,
        span: Span,
    },
    Function {
        name: String,
        arguments: Vec<Term>,
        span: Span,
    },
}

impl Term {
    pub fn name(&self) -> &str {
        match self {
            Term::Variable { name, .. } | Term::Function { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Term::Variable { span, .. } | Term::Function { span, .. } => *span,
        }
    }

    /// Returns `true` if `variable` occurs anywhere in this term.
    pub fn mentions(&self, variable: &str) -> bool {
        match self {
            Term::Variable { name, .. } => name == variable,
            Term::Function { arguments, .. } => arguments.iter().any(|arg| arg.mentions(variable)),
        }
    }
}

/// Writes `name(a, b, ...)`.
fn write_application(f: &mut fmt::Formatter<'_>, name: &str, arguments: &[Term]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{argument}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable { name, .. } => f.write_str(name),
            Term::Function {
                name, arguments, ..
            } => write_application(f, name, arguments),
        }
    }
}

/// A leaf of the formula tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// A propositional variable such as `p`.
    Proposition { name: String },
    /// A predicate application such as `p(x, f(y))`.
    Predicate { name: String, arguments: Vec<Term> },
    /// `left = right`, or `left ≠ right` when negated.
    Equality {
        left: Term,
        right: Term,
        negated: bool,
    },
}

impl Atom {
    /// Returns `true` if `variable` occurs in this atom, either as a term
    /// variable or as a proposition of the same name.
    pub fn mentions(&self, variable: &str) -> bool {
        match self {
            Atom::Proposition { name } => name == variable,
            Atom::Predicate { arguments, .. } => arguments.iter().any(|arg| arg.mentions(variable)),
            Atom::Equality { left, right, .. } => {
                left.mentions(variable) || right.mentions(variable)
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Proposition { name } => f.write_str(name),
            Atom::Predicate { name, arguments } => write_application(f, name, arguments),
            Atom::Equality {
                left,
                right,
                negated,
            } => {
                let relation = if *negated { "≠" } else { "=" };
                write!(f, "{left} {relation} {right}")
            }
        }
    }
}

/// The variable bound by a quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundVariable {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaKind {
    Atom(Atom),
    Negation(Box<Formula>),
    Binary {
        connective: Connective,
        left: Box<Formula>,
        right: Box<Formula>,
    },
    Quantified {
        quantifier: Quantifier,
        variable: BoundVariable,
        body: Box<Formula>,
    },
}

/// Facts about a node computed by [`validate`](crate::validate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Number of atoms in the subtree, at least 1.
    pub leaf_count: usize,
    /// Distance from the root; the root has depth 0.
    pub depth: usize,
    /// Set on quantifiers whose variable does not occur in their body.
    pub vacuous: bool,
    /// Set on quantifiers that rebind a variable of an enclosing quantifier.
    pub shadows: bool,
}

/// A node of the formula tree.
///
/// Equality compares structure and spans but ignores the annotation.
#[derive(Debug, Clone)]
pub struct Formula {
    pub(crate) kind: FormulaKind,
    span: Span,
    height: usize,
    pub(crate) leaves: usize,
    pub(crate) annotation: Annotation,
}

impl Formula {
    pub fn new(kind: FormulaKind, span: Span) -> Self {
        let (height, leaves) = match &kind {
            FormulaKind::Atom(_) => (1, 1),
            FormulaKind::Negation(operand) => (operand.height + 1, operand.leaves),
            FormulaKind::Binary { left, right, .. } => (
                left.height.max(right.height) + 1,
                left.leaves + right.leaves,
            ),
            FormulaKind::Quantified { body, .. } => (body.height + 1, body.leaves),
        };

        Self {
            kind,
            span,
            height,
            leaves,
            annotation: Annotation::default(),
        }
    }

    pub fn atom(atom: Atom, span: Span) -> Self {
        Self::new(FormulaKind::Atom(atom), span)
    }

    pub fn negation(operand: Formula, span: Span) -> Self {
        Self::new(FormulaKind::Negation(Box::new(operand)), span)
    }

    /// Creates `left connective right`, spanning both operands.
    pub fn binary(connective: Connective, left: Formula, right: Formula) -> Self {
        let span = left.span.union(right.span);
        Self::new(
            FormulaKind::Binary {
                connective,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn quantified(
        quantifier: Quantifier,
        variable: BoundVariable,
        body: Formula,
        span: Span,
    ) -> Self {
        Self::new(
            FormulaKind::Quantified {
                quantifier,
                variable,
                body: Box::new(body),
            },
            span,
        )
    }

    pub fn kind(&self) -> &FormulaKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Number of nodes on the longest path from this node to an atom.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub(crate) fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Direct children in left-to-right order.
    pub fn children(&self) -> Vec<&Formula> {
        match &self.kind {
            FormulaKind::Atom(_) => Vec::new(),
            FormulaKind::Negation(operand) => vec![operand.as_ref()],
            FormulaKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            FormulaKind::Quantified { body, .. } => vec![body.as_ref()],
        }
    }

    /// Total number of nodes in the tree rooted here.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(formula) = pending.pop() {
            count += 1;
            pending.extend(formula.children());
        }
        count
    }

    /// Text drawn inside this node's shape.
    pub fn label(&self) -> String {
        match &self.kind {
            FormulaKind::Atom(atom) => atom.to_string(),
            FormulaKind::Negation(_) => "¬".to_string(),
            FormulaKind::Binary { connective, .. } => connective.glyph().to_string(),
            FormulaKind::Quantified {
                quantifier,
                variable,
                ..
            } => format!("{quantifier}{}", variable.name),
        }
    }

    /// Returns `true` if `variable` occurs in some atom of this tree.
    pub fn mentions(&self, variable: &str) -> bool {
        let mut pending = vec![self];
        while let Some(formula) = pending.pop() {
            match &formula.kind {
                FormulaKind::Atom(atom) if atom.mentions(variable) => return true,
                FormulaKind::Atom(_) => {}
                _ => pending.extend(formula.children()),
            }
        }
        false
    }

    /// Writes this formula as an operand, parenthesized unless it is atomic
    /// or a negation.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormulaKind::Binary { .. } | FormulaKind::Quantified { .. } => write!(f, "({self})"),
            FormulaKind::Atom(_) | FormulaKind::Negation(_) => write!(f, "{self}"),
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.span == other.span
    }
}

impl Eq for Formula {}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FormulaKind::Atom(atom) => write!(f, "{atom}"),
            FormulaKind::Negation(operand) => {
                f.write_str("¬")?;
                operand.fmt_operand(f)
            }
            FormulaKind::Binary {
                connective,
                left,
                right,
            } => {
                let mut first = left.as_ref();
                let mut rest = vec![right.as_ref()];
                if connective.is_left_associative() {
                    while let FormulaKind::Binary {
                        connective: inner,
                        left,
                        right,
                    } = &first.kind
                    {
                        if inner != connective {
                            break;
                        }
                        rest.push(right.as_ref());
                        first = left.as_ref();
                    }
                }

                first.fmt_operand(f)?;
                for operand in rest.into_iter().rev() {
                    write!(f, " {connective} ")?;
                    operand.fmt_operand(f)?;
                }
                Ok(())
            }
            FormulaKind::Quantified {
                quantifier,
                variable,
                body,
            } => write!(f, "{quantifier}{}.{body}", variable.name),
        }
    }
}

impl Drop for Formula {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(&mut self.kind, &mut pending);
        while let Some(mut formula) = pending.pop() {
            take_children(&mut formula.kind, &mut pending);
        }
    }
}

/// Moves the children of `kind` into `pending`, leaving an empty atom.
fn take_children(kind: &mut FormulaKind, pending: &mut Vec<Formula>) {
    if matches!(kind, FormulaKind::Atom(_)) {
        return;
    }

    let leaf = FormulaKind::Atom(Atom::Proposition {
        name: String::new(),
    });
    match std::mem::replace(kind, leaf) {
        FormulaKind::Atom(_) => {}
        FormulaKind::Negation(operand) => pending.push(*operand),
        FormulaKind::Binary { left, right, .. } => {
            pending.push(*left);
            pending.push(*right);
        }
        FormulaKind::Quantified { body, .. } => pending.push(*body),
    }
}

/// A validated formula together with the warnings found while validating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedFormula {
    formula: Formula,
    warnings: Vec<Diagnostic>,
}

impl AnnotatedFormula {
    pub(crate) fn new(formula: Formula, warnings: Vec<Diagnostic>) -> Self {
        Self { formula, warnings }
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}
