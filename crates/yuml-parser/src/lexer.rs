//! Tokenizer shared by all yUML dialects.
//!
//! A notation line is cut into bracketed regions and the connector text
//! between them. Which characters open a bracket depends on the dialect:
//! class diagrams only know `[`, activity diagrams use `(`, `<` and `|`.
//!
//! - `[`, `(`, `<` close on `]`, `)`, `>`; `|` closes on the next `|`.
//! - Brackets do not nest. Inside a bracket, only its own closer ends it.
//! - A backslash escapes the following character; both are kept verbatim.
//! - An unterminated bracket runs to the end of the line.
//! - Tokens are trimmed, and whitespace-only gaps yield no token.

use winnow::{
    Parser as _,
    combinator::{alt, opt, repeat},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location},
    token::{any, none_of, one_of},
};

use crate::span::Span;

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError>;

/// A trimmed slice of a notation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    text: &'a str,
    span: Span,
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Location of the token in the whole document.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the text between the delimiters when the token is a region
    /// opened by `open` and closed by `close`.
    pub fn enclosed(&self, open: char, close: char) -> Option<&'a str> {
        let inner = self.text.strip_prefix(open)?.strip_suffix(close)?;
        Some(inner)
    }
}

fn closer(opener: char) -> char {
    match opener {
        '[' => ']',
        '(' => ')',
        '<' => '>',
        other => other,
    }
}

/// Backslash followed by any character.
fn escape(input: &mut Input<'_>) -> IResult<()> {
    ('\\', any).void().parse_next(input)
}

fn bracketed(input: &mut Input<'_>, openers: &str) -> IResult<()> {
    let open = one_of(|c: char| openers.contains(c)).parse_next(input)?;
    let close = closer(open);
    repeat::<_, _, (), _, _>(0.., alt((escape, none_of(close).void()))).parse_next(input)?;
    opt(close).void().parse_next(input)
}

fn connector(input: &mut Input<'_>, openers: &str) -> IResult<()> {
    repeat(
        1..,
        alt((escape, none_of(|c: char| openers.contains(c)).void())),
    )
    .parse_next(input)
}

fn next_token(input: &mut Input<'_>, openers: &str) -> IResult<()> {
    alt((
        |i: &mut Input<'_>| bracketed(i, openers),
        |i: &mut Input<'_>| connector(i, openers),
    ))
    .parse_next(input)
}

fn push_trimmed<'a>(tokens: &mut Vec<Token<'a>>, line: &'a str, start: usize, end: usize, offset: usize) {
    let raw = &line[start..end];
    let text = raw.trim();
    if text.is_empty() {
        return;
    }
    let lead = raw.len() - raw.trim_start().len();
    let begin = start + lead;
    tokens.push(Token {
        text,
        span: Span::new(begin..begin + text.len()).offset(offset),
    });
}

/// Splits `line` into tokens, treating every character of `openers` as the
/// start of a bracketed region.
///
/// `offset` is the byte position of `line` in the document and is added to
/// every token span.
///
/// # Example
///
/// ```
/// # use yuml_parser::lexer::tokenize;
/// let tokens = tokenize("[Customer]<>-orders*>[Order]", "[", 0);
/// let texts: Vec<_> = tokens.iter().map(|t| t.text()).collect();
/// assert_eq!(texts, ["[Customer]", "<>-orders*>", "[Order]"]);
/// ```
pub fn tokenize<'a>(line: &'a str, openers: &str, offset: usize) -> Vec<Token<'a>> {
    let mut input = Input::new(line);
    let mut tokens = Vec::new();

    while !input.is_empty() {
        let start = input.current_token_start();
        match next_token(&mut input, openers) {
            Ok(()) => {
                let end = input.current_token_start();
                push_trimmed(&mut tokens, line, start, end, offset);
            }
            Err(_) => {
                push_trimmed(&mut tokens, line, start, line.len(), offset);
                break;
            }
        }
    }

    log::trace!(line, count = tokens.len(); "Tokenized line");
    tokens
}

/// Returns `true` when the character ending at byte `end` of `text` is
/// preceded by an odd run of backslashes.
fn is_escaped(text: &str, end: usize) -> bool {
    let run = text[..end].bytes().rev().take_while(|b| *b == b'\\').count();
    run % 2 == 1
}

/// Splits connector text at every `separator` that is not escaped with a
/// backslash. Escapes stay in the pieces verbatim.
///
/// ```
/// # use yuml_parser::lexer::split_unescaped;
/// assert_eq!(split_unescaped("1-orders*", "-"), ["1", "orders*"]);
/// assert_eq!(split_unescaped("pre\\-paid-*", "-"), ["pre\\-paid", "*"]);
/// ```
pub fn split_unescaped<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, _) in text.match_indices(separator) {
        if index < start || is_escaped(text, index) {
            continue;
        }
        parts.push(&text[start..index]);
        start = index + separator.len();
    }
    parts.push(&text[start..]);
    parts
}

/// Returns `true` when `text` contains `separator` outside of an escape.
pub fn contains_unescaped(text: &str, separator: &str) -> bool {
    split_unescaped(text, separator).len() > 1
}

/// Strips `suffix` from connector text unless its first character is
/// escaped.
pub fn strip_unescaped_suffix<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let rest = text.strip_suffix(suffix)?;
    (!is_escaped(text, rest.len())).then_some(rest)
}
