//! Integration tests for the DiagramBuilder API and the `render` entry point.

use predviz::{
    DiagramBuilder, PredvizError,
    ast::{Connective, FormulaKind},
    config::{AppConfig, LayoutConfig},
    render,
};
use predviz_parser::{
    Error as FormulaError, TokenKind,
    error::{Expected, Found},
};

fn diagram_counts(source: &str) -> (usize, usize) {
    let builder = DiagramBuilder::default();
    let formula = builder.parse(source).expect("Failed to parse formula");
    let tree = builder.layout(&formula).expect("Failed to lay out formula");
    let diagram = builder.diagram(&tree).expect("Failed to build diagram");
    (diagram.nodes().count(), diagram.lines().count())
}

#[test]
fn test_default_builder_uses_default_config() {
    let builder = DiagramBuilder::default();
    assert_eq!(builder.config(), &AppConfig::default());
    assert_eq!(builder.config().layout().row_height(), 72.0);
}

#[test]
fn test_long_flat_conjunction_renders() {
    let source = vec!["p"; 1000].join(" ∧ ");

    let svg = render(&source).expect("Failed to render long conjunction");
    assert!(svg.starts_with("<svg"));
    assert_eq!(diagram_counts(&source), (1999, 1998));
}

#[test]
fn test_single_atom() {
    assert_eq!(diagram_counts("p"), (1, 0));
}

#[test]
fn test_conjunction() {
    let builder = DiagramBuilder::default();
    let formula = builder.parse("p ∧ q").expect("Failed to parse");

    match formula.formula().kind() {
        FormulaKind::Binary {
            connective, left, right,
        } => {
            assert_eq!(*connective, Connective::And);
            assert_eq!(left.to_string(), "p");
            assert_eq!(right.to_string(), "q");
        }
        other => panic!("expected a conjunction, got {other:?}"),
    }

    assert_eq!(diagram_counts("p ∧ q"), (3, 2));
}

#[test]
fn test_quantifier_has_variable_and_body() {
    let builder = DiagramBuilder::default();
    let formula = builder
        .parse("∀x.(p(x) → q(x))")
        .expect("Failed to parse quantified formula");

    match formula.formula().kind() {
        FormulaKind::Quantified { variable, body, .. } => {
            assert_eq!(variable.name, "x");
            assert_eq!(body.to_string(), "p(x) → q(x)");
        }
        other => panic!("expected a quantifier, got {other:?}"),
    }
    assert_eq!(formula.formula().children().len(), 1);
    assert!(formula.warnings().is_empty());
}

#[test]
fn test_unclosed_parenthesis() {
    let source = "(p ∧ q";
    let err = render(source).unwrap_err();

    match err {
        PredvizError::Parse {
            err: FormulaError::Parse(parse_error),
            src,
        } => {
            assert_eq!(src, source);
            assert_eq!(parse_error.offset, source.len());
            assert_eq!(parse_error.expected, Expected::Token(TokenKind::RightParen));
            assert_eq!(parse_error.found, Found::EndOfInput);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_illegal_character() {
    let err = render("p $ q").unwrap_err();

    match &err {
        PredvizError::Parse {
            err: FormulaError::Lex(lex_error),
            ..
        } => {
            assert_eq!(lex_error.offset, 2);
            assert_eq!(lex_error.found, '$');
        }
        other => panic!("expected a lexical error, got {other:?}"),
    }
    assert_eq!(err.offset(), Some(2));
}

#[test]
fn test_syntax_errors_are_values() {
    for source in ["", "p ∧", "p q", "∀.p", "∀x p", "()", "p)", "¬", "p(x"] {
        let result = render(source);
        assert!(
            matches!(
                result,
                Err(PredvizError::Parse {
                    err: FormulaError::Parse(_),
                    ..
                })
            ),
            "{source:?} should be a syntax error, got {result:?}"
        );
    }
}

#[test]
fn test_vacuous_quantifier_still_renders() {
    let builder = DiagramBuilder::default();
    let formula = builder.parse("∀x.p").expect("Failed to parse");
    assert_eq!(formula.warnings().len(), 1);

    let svg = builder.render_svg(&formula).expect("Failed to render");
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_render_is_idempotent() {
    let source = "∀x.(p(x) → ∃y.(q(x, y) ∧ ¬(x = y)))";
    let first = render(source).expect("Failed to render");
    let second = render(source).expect("Failed to render");
    assert_eq!(first, second);
}

#[test]
fn test_ascii_and_glyphs_render_identically() {
    let glyphs = render("∀x.(p(x) → ¬q(x) ∨ r)").expect("Failed to render glyphs");
    let ascii = render("!x:(p(x) -> ~q(x) | r)").expect("Failed to render ASCII");
    assert_eq!(glyphs, ascii);
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(LayoutConfig::default().with_row_height(120.0));
    let builder = DiagramBuilder::new(config);

    let formula = builder.parse("¬p").expect("Failed to parse");
    let tree = builder.layout(&formula).expect("Failed to lay out");
    let ys: Vec<f32> = tree.nodes().iter().map(|n| n.center().y()).collect();
    assert_eq!(ys, vec![16.0, 136.0]);
}

#[test]
fn test_invalid_config_is_a_layout_error() {
    let config = AppConfig::new(LayoutConfig::default().with_node_height(-4.0));
    let builder = DiagramBuilder::new(config);

    let formula = builder.parse("p").expect("Failed to parse");
    let err = builder.render_svg(&formula).unwrap_err();
    assert!(matches!(err, PredvizError::Layout(_)), "{err:?}");
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder.parse("p ∨ q").expect("Failed to parse first");
    let second = builder.parse("p ↔ q ↔ r").expect("Failed to parse second");

    let svg1 = builder.render_svg(&first).expect("Failed to render first");
    let svg2 = builder.render_svg(&second).expect("Failed to render second");
    assert_ne!(svg1, svg2);
    assert_eq!(svg2.matches("<line").count(), 4);
}

mod proptest_tests {
    use proptest::prelude::*;

    use predviz::{DiagramBuilder, PredvizError, draw::Drawable, render};
    use predviz_parser::Error as FormulaError;

    // ===================
    // Strategies
    // ===================

    fn atom_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[pqr]".prop_map(String::from),
            ("[PQR]", "[xyz]").prop_map(|(p, x)| format!("{p}({x})")),
            ("[xyz]", "[xyz]").prop_map(|(a, b)| format!("{a} = {b}")),
        ]
    }

    /// Well-formed formulas over glyph operators.
    fn formula_strategy() -> impl Strategy<Value = String> {
        atom_strategy().prop_recursive(5, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|f| format!("¬({f})")),
                (inner.clone(), inner.clone(), "[∧∨→↔]")
                    .prop_map(|(l, r, op)| format!("({l}) {op} ({r})")),
                ("[∀∃]", "[xyz]", inner).prop_map(|(q, x, f)| format!("{q}{x}.({f})")),
            ]
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A tree of n nodes has n - 1 connectors, and every primitive lies
    /// inside a bounding box of positive size.
    fn check_diagram_shape(source: &str) -> Result<(), TestCaseError> {
        let builder = DiagramBuilder::default();
        let formula = builder
            .parse(source)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let tree = builder
            .layout(&formula)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let diagram = builder
            .diagram(&tree)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let node_count = formula.formula().node_count();
        prop_assert_eq!(diagram.nodes().count(), node_count);
        prop_assert_eq!(diagram.lines().count(), node_count - 1);

        let bounds = diagram.bounds();
        prop_assert!(bounds.width() > 0.0);
        prop_assert!(bounds.height() > 0.0);
        for primitive in diagram.primitives() {
            prop_assert!(bounds.contains(&primitive.bounds()));
        }
        Ok(())
    }

    /// The layout tree mirrors the formula: same pre-order sequence of
    /// arities, and sibling nodes never overlap.
    fn check_layout_mirrors_formula(source: &str) -> Result<(), TestCaseError> {
        let builder = DiagramBuilder::default();
        let formula = builder
            .parse(source)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let tree = builder
            .layout(&formula)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        fn arities(formula: &predviz::Formula, out: &mut Vec<usize>) {
            let children = formula.children();
            out.push(children.len());
            for child in children {
                arities(child, out);
            }
        }
        let mut expected = Vec::new();
        arities(formula.formula(), &mut expected);

        let actual: Vec<usize> = tree.nodes().iter().map(|n| n.children().len()).collect();
        prop_assert_eq!(actual, expected);

        for node in tree.nodes() {
            for pair in node.children().windows(2) {
                let left = tree.nodes()[pair[0]].bounds();
                let right = tree.nodes()[pair[1]].bounds();
                prop_assert!(left.max_x() <= right.min_x());
            }
        }
        Ok(())
    }

    /// An illegal character fails lexing at its own byte offset.
    fn check_illegal_character_is_located(
        source: &str,
        position: usize,
        illegal: char,
    ) -> Result<(), TestCaseError> {
        let boundaries: Vec<usize> = source
            .char_indices()
            .map(|(index, _)| index)
            .chain(std::iter::once(source.len()))
            .collect();
        let offset = boundaries[position % boundaries.len()];
        let mut broken = source.to_string();
        broken.insert(offset, illegal);

        match render(&broken) {
            Err(PredvizError::Parse {
                err: FormulaError::Lex(lex_error),
                ..
            }) => {
                prop_assert_eq!(lex_error.offset, offset);
                prop_assert_eq!(lex_error.found, illegal);
            }
            other => {
                return Err(TestCaseError::fail(format!(
                    "expected a lexical error for {broken:?}, got {other:?}"
                )));
            }
        }
        Ok(())
    }

    fn check_render_is_deterministic(source: &str) -> Result<(), TestCaseError> {
        let first = render(source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = render(source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(first, second);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn diagram_shape(source in formula_strategy()) {
            check_diagram_shape(&source)?;
        }

        #[test]
        fn layout_mirrors_formula(source in formula_strategy()) {
            check_layout_mirrors_formula(&source)?;
        }

        #[test]
        fn illegal_character_is_located(
            source in formula_strategy(),
            position in any::<usize>(),
            illegal in prop::sample::select(vec!['$', '#', '@', '%']),
        ) {
            check_illegal_character_is_located(&source, position, illegal)?;
        }

        #[test]
        fn render_is_deterministic(source in formula_strategy()) {
            check_render_is_deterministic(&source)?;
        }
    }
}
