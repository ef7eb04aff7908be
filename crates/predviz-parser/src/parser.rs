//! Recursive descent parser over lexed tokens.
//!
//! Precedence, loosest first: `↔`, `→`, `∨`, `∧`, then the prefix operators
//! `¬` and the quantifiers. `↔`, `∨` and `∧` associate to the left, `→` to
//! the right. A quantifier body extends as far right as possible.
//!
//! ```text
//! formula       := biconditional
//! biconditional := implication ('↔' implication)*
//! implication   := disjunction ('→' implication)?
//! disjunction   := conjunction ('∨' conjunction)*
//! conjunction   := unary ('∧' unary)*
//! unary         := '¬' unary | quantifier identifier '.' formula | atom
//! atom          := '(' formula ')' | term (('=' | '≠') term)?
//! term          := identifier ('(' (term (',' term)*)? ')')?
//! ```
//!
//! The public entry point is [`build_formula`].

use log::debug;
use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    ast::{Atom, BoundVariable, Connective, Formula, Quantifier, Term},
    error::{Expected, Found, ParseError},
    span::Span,
    tokens::{PositionedToken, TokenClass, TokenKind},
};

/// Deepest nesting of parentheses, prefix operators, `→` chains and
/// function arguments accepted by the parser.
///
/// Flat chains of `∧`, `∨` and `↔` do not nest and have no length limit.
pub const MAX_NESTING: usize = 128;

/// Context attached to parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// What the parser was looking for
    Expected(Expected),
    /// Remaining token count (`eof_offset()`) at the offending token
    ///
    /// The token index is `tokens.len() - remaining`.
    Remaining(usize),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = Result<O, ErrMode<ContextError<Context>>>;

/// Create a Cut error pointing at the next token of `input`
fn failure(input: &Input<'_>, expected: Expected) -> ErrMode<ContextError<Context>> {
    failure_at(input.eof_offset(), expected)
}

/// Create a Cut error pointing at the token with `remaining` tokens left
fn failure_at(remaining: usize, expected: Expected) -> ErrMode<ContextError<Context>> {
    let mut e = ContextError::new();
    e.push(Context::Expected(expected));
    e.push(Context::Remaining(remaining));
    ErrMode::Cut(e)
}

/// Consume the next token if `accept` holds for its kind
fn eat_where<'src>(
    input: &mut Input<'src>,
    accept: impl Fn(TokenKind) -> bool,
) -> Option<&'src PositionedToken<'src>> {
    let checkpoint = input.checkpoint();
    let result: IResult<&'src PositionedToken<'src>> = any
        .verify(|token: &PositionedToken<'_>| accept(token.kind()))
        .parse_next(input);

    match result {
        Ok(token) => Some(token),
        Err(_) => {
            input.reset(&checkpoint);
            None
        }
    }
}

/// Consume the next token if it is of `kind`
fn eat<'src>(input: &mut Input<'src>, kind: TokenKind) -> Option<&'src PositionedToken<'src>> {
    eat_where(input, |next| next == kind)
}

/// Consume a token of `kind` or fail
fn expect<'src>(input: &mut Input<'src>, kind: TokenKind) -> IResult<&'src PositionedToken<'src>> {
    eat(input, kind).ok_or_else(|| failure(input, Expected::Token(kind)))
}

/// Enter one more nesting level, failing past [`MAX_NESTING`]
fn nested(depth: usize, remaining: usize) -> IResult<usize> {
    if depth >= MAX_NESTING {
        return Err(failure_at(remaining, Expected::NestingLimit(MAX_NESTING)));
    }
    Ok(depth + 1)
}

fn formula<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    biconditional(input, depth)
}

/// Parse a left-associative chain of `operand (operator operand)*`
fn left_assoc<'src>(
    input: &mut Input<'src>,
    depth: usize,
    operator: TokenKind,
    connective: Connective,
    operand: fn(&mut Input<'src>, usize) -> IResult<Formula>,
) -> IResult<Formula> {
    let mut left = operand(input, depth)?;

    while eat(input, operator).is_some() {
        let right = operand(input, depth)?;
        left = Formula::binary(connective, left, right);
    }

    Ok(left)
}

fn biconditional<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    left_assoc(input, depth, TokenKind::Iff, Connective::Iff, implication)
}

fn implication<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    let left = disjunction(input, depth)?;

    let remaining = input.eof_offset();
    if eat(input, TokenKind::Implies).is_none() {
        return Ok(left);
    }

    let right = implication(input, nested(depth, remaining)?)?;
    Ok(Formula::binary(Connective::Implies, left, right))
}

fn disjunction<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    left_assoc(input, depth, TokenKind::Or, Connective::Or, conjunction)
}

fn conjunction<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    left_assoc(input, depth, TokenKind::And, Connective::And, unary)
}

fn unary<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    let remaining = input.eof_offset();

    if let Some(not) = eat(input, TokenKind::Not) {
        let operand = unary(input, nested(depth, remaining)?)?;
        let span = not.span.union(operand.span());
        return Ok(Formula::negation(operand, span));
    }

    if let Some(token) = eat_where(input, |kind| kind.class() == TokenClass::Quantifier) {
        let quantifier = match token.kind() {
            TokenKind::Exists => Quantifier::Exists,
            _ => Quantifier::ForAll,
        };
        let depth = nested(depth, remaining)?;
        return quantified(input, depth, quantifier, token.span);
    }

    atom(input, depth)
}

/// Parse the rest of a quantified formula after its quantifier token
fn quantified<'src>(
    input: &mut Input<'src>,
    depth: usize,
    quantifier: Quantifier,
    start: Span,
) -> IResult<Formula> {
    let variable = eat(input, TokenKind::Identifier)
        .map(|token| BoundVariable {
            name: token.text.to_string(),
            span: token.span,
        })
        .ok_or_else(|| failure(input, Expected::BoundVariable))?;

    expect(input, TokenKind::Dot)?;

    let body = formula(input, depth)?;
    let span = start.union(body.span());
    Ok(Formula::quantified(quantifier, variable, body, span))
}

fn atom<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Formula> {
    let remaining = input.eof_offset();

    if let Some(open) = eat(input, TokenKind::LeftParen) {
        let inner = formula(input, nested(depth, remaining)?)?;
        let close = expect(input, TokenKind::RightParen)?;
        return Ok(inner.with_span(open.span.union(close.span)));
    }

    let name = eat(input, TokenKind::Identifier).ok_or_else(|| failure(input, Expected::Formula))?;
    let left = application(input, name, depth)?;

    if let Some(relation) = eat_where(input, |kind| {
        matches!(kind, TokenKind::Equals | TokenKind::NotEquals)
    }) {
        let right = term(input, depth)?;
        let span = left.span().union(right.span());
        let atom = Atom::Equality {
            left,
            right,
            negated: relation.kind() == TokenKind::NotEquals,
        };
        return Ok(Formula::atom(atom, span));
    }

    let span = left.span();
    let atom = match left {
        Term::Variable { name, .. } => Atom::Proposition { name },
        Term::Function {
            name, arguments, ..
        } => Atom::Predicate { name, arguments },
    };
    Ok(Formula::atom(atom, span))
}

fn term<'src>(input: &mut Input<'src>, depth: usize) -> IResult<Term> {
    let name = eat(input, TokenKind::Identifier).ok_or_else(|| failure(input, Expected::Term))?;
    application(input, name, depth)
}

/// Parse an optional argument list after the identifier `name`
fn application<'src>(
    input: &mut Input<'src>,
    name: &PositionedToken<'src>,
    depth: usize,
) -> IResult<Term> {
    let remaining = input.eof_offset();

    if eat(input, TokenKind::LeftParen).is_none() {
        return Ok(Term::Variable {
            name: name.text.to_string(),
            span: name.span,
        });
    }

    let depth = nested(depth, remaining)?;
    let mut arguments = Vec::new();

    let close = match eat(input, TokenKind::RightParen) {
        Some(close) => close,
        None => {
            loop {
                arguments.push(term(input, depth)?);
                if eat(input, TokenKind::Comma).is_none() {
                    break;
                }
            }
            expect(input, TokenKind::RightParen)?
        }
    };

    Ok(Term::Function {
        name: name.text.to_string(),
        arguments,
        span: name.span.union(close.span),
    })
}

/// Convert a parser error into a [`ParseError`]
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken<'_>],
    current_remaining: usize,
    source_len: usize,
) -> ParseError {
    let context = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => Some(e),
        _ => None,
    };

    let expected = context
        .and_then(|e| {
            e.context().find_map(|ctx| match ctx {
                Context::Expected(expected) => Some(*expected),
                _ => None,
            })
        })
        .unwrap_or(Expected::Formula);

    let remaining = context
        .and_then(|e| {
            e.context().find_map(|ctx| match ctx {
                Context::Remaining(n) => Some(*n),
                _ => None,
            })
        })
        .unwrap_or(current_remaining);

    match tokens.get(tokens.len().saturating_sub(remaining)) {
        Some(token) => ParseError {
            offset: token.span.start(),
            expected,
            found: Found::Token {
                kind: token.kind(),
                text: token.text.to_string(),
            },
            span: token.span,
        },
        None => ParseError {
            offset: source_len,
            expected,
            found: Found::EndOfInput,
            span: Span::new(source_len..source_len),
        },
    }
}

/// Build a formula tree from tokens.
///
/// `source_len` is the byte length of the lexed text; errors at the end of
/// input report it as their offset.
///
/// # Errors
///
/// Returns a [`ParseError`] for the first syntax error, including tokens
/// left over after a complete formula.
pub fn build_formula<'src>(
    tokens: &'src [PositionedToken<'src>],
    source_len: usize,
) -> Result<Formula, ParseError> {
    let mut input = TokenSlice::new(tokens);

    let result = match formula(&mut input, 0) {
        Ok(formula) if input.eof_offset() == 0 => Ok(formula),
        Ok(_) => Err(failure(&input, Expected::EndOfInput)),
        Err(e) => Err(e),
    };

    match result {
        Ok(formula) => {
            debug!(nodes = formula.node_count(), height = formula.height(); "Parsed formula");
            Ok(formula)
        }
        Err(e) => {
            let current_remaining = input.eof_offset();
            Err(convert_error(e, tokens, current_remaining, source_len))
        }
    }
}
