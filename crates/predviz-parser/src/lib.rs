//! # Predviz Parser
//!
//! Lexer, parser and validator for propositional and predicate-logic
//! formulas. This crate turns formula text into an annotated syntax tree that
//! the `predviz` crate lays out and draws.
//!
//! ## Accepted syntax
//!
//! | Operator | Glyph | ASCII |
//! |----------|-------|-------|
//! | negation | `¬` | `~` |
//! | conjunction | `∧` | `&` |
//! | disjunction | `∨` | `\|` |
//! | implication | `→` `⇒` | `->` `=>` |
//! | biconditional | `↔` `⇔` | `<->` `<=>` |
//! | universal | `∀x.` | `!x:` |
//! | existential | `∃x.` | `?x:` |
//! | equality | `=` `≠` | `=` `~=` |
//! | grouping | `(` `)` | `[` `]` `{` `}` |
//!
//! ## Usage
//!
//! ```
//! # use predviz_parser::{parse, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let annotated = parse("∀x.(p(x) → q(x))")?;
//!     assert_eq!(annotated.formula().node_count(), 4);
//!     assert!(annotated.warnings().is_empty());
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod error;
mod lexer;
mod parser;
mod span;
mod tokens;
mod validate;

pub use ast::{AnnotatedFormula, Formula};
pub use error::Error;
pub use lexer::{Lexer, tokenize};
pub use parser::{MAX_NESTING, build_formula};
pub use span::Span;
pub use tokens::{PositionedToken, Token, TokenClass, TokenKind};
pub use validate::validate;

/// Parse formula text into an annotated formula.
///
/// Runs the whole front end:
///
/// 1. **Tokenize** - Convert text to tokens
/// 2. **Parse** - Build the formula tree
/// 3. **Validate** - Annotate nodes and collect warnings
///
/// # Errors
///
/// Returns the first [`LexError`](error::LexError) or
/// [`ParseError`](error::ParseError), or a
/// [`ValidationError`](error::ValidationError), wrapped in [`enum@Error`].
///
/// # Example
///
/// ```
/// # use predviz_parser::{parse, Error};
/// let err = parse("p $ q").unwrap_err();
/// assert!(matches!(err, Error::Lex(_)));
/// assert_eq!(err.offset(), Some(2));
/// ```
pub fn parse(source: &str) -> Result<AnnotatedFormula, Error> {
    // Step 1: Tokenize
    let tokens = tokenize(source)?;

    // Step 2: Parse
    let formula = build_formula(&tokens, source.len())?;

    // Step 3: Validate
    Ok(validate(formula)?)
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating formula text in glyph or ASCII spelling.
    ///
    /// Returns `(glyph_text, ascii_text)` for the same formula.
    fn formula_strategy() -> impl Strategy<Value = (String, String)> {
        let leaf = prop_oneof![
            "[pqr]".prop_map(|name| (name.clone(), name)),
            "[xyz]".prop_map(|v| (format!("p({v})"), format!("p({v})"))),
            ("[xy]", "[xy]").prop_map(|(a, b)| (format!("{a} ≠ {b}"), format!("{a} ~= {b}"))),
        ];

        leaf.prop_recursive(6, 48, 2, |inner| {
            prop_oneof![
                inner
                    .clone()
                    .prop_map(|(g, a)| (format!("¬{g}"), format!("~{a}"))),
                (inner.clone(), inner.clone(), 0..4usize).prop_map(|((lg, la), (rg, ra), op)| {
                    let (glyph, ascii) = [("∧", "&"), ("∨", "|"), ("→", "->"), ("↔", "<->")][op];
                    (format!("({lg} {glyph} {rg})"), format!("({la} {ascii} {ra})"))
                }),
                ("[xyz]", inner, any::<bool>()).prop_map(|(v, (g, a), universal)| {
                    if universal {
                        (format!("(∀{v}.{g})"), format!("(!{v}:{a})"))
                    } else {
                        (format!("(∃{v}.{g})"), format!("(?{v}.{a})"))
                    }
                }),
            ]
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Printing a parsed formula and parsing it again gives the same text.
    fn check_display_reparses(source: &str) -> Result<(), TestCaseError> {
        let first = parse(source).map_err(|e| TestCaseError::fail(format!("{source}: {e}")))?;
        let printed = first.formula().to_string();
        let second =
            parse(&printed).map_err(|e| TestCaseError::fail(format!("{printed}: {e}")))?;

        prop_assert_eq!(second.formula().to_string(), printed);
        prop_assert_eq!(second.formula().node_count(), first.formula().node_count());
        Ok(())
    }

    /// ASCII spellings produce the same tree as the glyphs.
    fn check_ascii_matches_glyphs(glyph: &str, ascii: &str) -> Result<(), TestCaseError> {
        let from_glyphs = parse(glyph).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let from_ascii = parse(ascii).map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(
            from_glyphs.formula().to_string(),
            from_ascii.formula().to_string()
        );
        prop_assert_eq!(from_glyphs.warnings().len(), from_ascii.warnings().len());
        Ok(())
    }

    /// The root leaf count equals the number of atoms.
    fn check_leaf_count(source: &str) -> Result<(), TestCaseError> {
        fn atoms(formula: &Formula) -> usize {
            match formula.kind() {
                ast::FormulaKind::Atom(_) => 1,
                _ => formula.children().into_iter().map(atoms).sum(),
            }
        }

        let annotated = parse(source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let root = annotated.formula();
        prop_assert_eq!(root.annotation().leaf_count, atoms(root));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn display_reparses((glyph, _ascii) in formula_strategy()) {
            check_display_reparses(&glyph)?;
        }

        #[test]
        fn ascii_matches_glyphs((glyph, ascii) in formula_strategy()) {
            check_ascii_matches_glyphs(&glyph, &ascii)?;
        }

        #[test]
        fn leaf_count_matches_atoms((glyph, _ascii) in formula_strategy()) {
            check_leaf_count(&glyph)?;
        }
    }
}
