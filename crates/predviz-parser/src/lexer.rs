//! Lexical analyzer for formula text.
//!
//! Converts source text into [`PositionedToken`]s. Every operator has a
//! Unicode glyph and one or more ASCII spellings; both lex to the same
//! [`Token`]. Whitespace separates tokens and is dropped.
//!
//! The lexer is a lazy [`Iterator`] that stops at the first character it
//! cannot tokenize. [`tokenize`] collects it into a vector.

use log::trace;
use winnow::{
    Parser as _,
    combinator::alt,
    error::{ContextError, ErrMode},
    token::{any, literal, take_while},
};

use crate::{
    error::LexError,
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'src> = &'src str;
type IResult<O> = Result<O, ErrMode<ContextError>>;

/// Parse multi-character ASCII operators (longest first)
fn multi_char_operator<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    alt((
        literal("<=>").value(Token::Iff),
        literal("<->").value(Token::Iff),
        literal("->").value(Token::Implies),
        literal("=>").value(Token::Implies),
        literal("~=").value(Token::NotEquals),
    ))
    .parse_next(input)
}

/// Parse single character operators, glyphs and punctuation
fn single_char_token<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    any.verify_map(|c: char| match c {
        '¬' | '~' => Some(Token::Not),
        '∧' | '&' => Some(Token::And),
        '∨' | '|' => Some(Token::Or),
        '→' | '⇒' => Some(Token::Implies),
        '↔' | '⇔' => Some(Token::Iff),
        '∀' | '!' => Some(Token::ForAll),
        '∃' | '?' => Some(Token::Exists),
        '=' => Some(Token::Equals),
        '≠' => Some(Token::NotEquals),
        '(' | '[' | '{' => Some(Token::LeftParen),
        ')' | ']' | '}' => Some(Token::RightParen),
        '.' | ':' => Some(Token::Dot),
        ',' => Some(Token::Comma),
        _ => None,
    })
    .parse_next(input)
}

/// Parse identifiers: one or more alphanumerics or `_`
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse a single token
fn token<'src>(input: &mut Input<'src>) -> IResult<Token<'src>> {
    alt((
        multi_char_operator, // Must come before single char `=` and `~`
        identifier,
        single_char_token,
    ))
    .parse_next(input)
}

/// Parse optional whitespace
fn whitespace<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., |c: char| c.is_whitespace()).parse_next(input)
}

/// Lazy, single-pass tokenizer over a formula.
///
/// Yields tokens left to right. After yielding an error it is exhausted.
///
/// # Example
///
/// ```
/// # use predviz_parser::{Lexer, Token};
/// let kinds: Vec<_> = Lexer::new("p -> q")
///     .map(|token| token.map(|t| t.token))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(kinds, vec![Token::Identifier("p"), Token::Implies, Token::Identifier("q")]);
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    input: Input<'src>,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            input: source,
            done: false,
        }
    }

    /// Byte offset of the next unread character.
    fn offset(&self) -> usize {
        self.source.len() - self.input.len()
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<PositionedToken<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if whitespace(&mut self.input).is_err() || self.input.is_empty() {
            self.done = true;
            return None;
        }

        let start = self.offset();
        let remaining = self.input;

        match token(&mut self.input) {
            Ok(token) => {
                let end = self.offset();
                let text = &self.source[start..end];
                trace!(token:% = token, start = start, end = end; "Lexed token");
                Some(Ok(PositionedToken::new(token, text, Span::new(start..end))))
            }
            Err(_) => {
                self.done = true;
                let found = remaining.chars().next()?;
                Some(Err(LexError::new(start, found)))
            }
        }
    }
}

/// Tokenize a whole formula.
///
/// # Errors
///
/// Returns a [`LexError`] for the first character that is not part of any
/// token.
pub fn tokenize(source: &str) -> Result<Vec<PositionedToken<'_>>, LexError> {
    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
    trace!(count = tokens.len(); "Tokenized formula");
    Ok(tokens)
}
