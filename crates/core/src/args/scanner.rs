use crate::diag::Span;
use std::collections::VecDeque;

/// A token that borrows its text directly from the scanned body.
///
/// `text` is always exactly `&body[start..end]` for tokens produced by
/// [`scan`]. Tokens built with [`TokenQueue::from_texts`] carry offsets as if
/// the texts had been joined by single spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Borrowed slice of the body for this token.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token<'_> {
    /// Byte span of this token.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Split a command body on single ASCII spaces.
///
/// Quotes are not interpreted here; the STRING coercer reassembles quoted
/// runs token by token. Consecutive spaces yield empty tokens, and an empty
/// body yields a single empty token.
pub fn scan(body: &str) -> Vec<Token<'_>> {
    let mut toks = Vec::new();
    let mut start = 0usize;
    for piece in body.split(' ') {
        let end = start + piece.len();
        toks.push(Token {
            text: piece,
            start,
            end,
        });
        start = end + 1;
    }
    toks
}

/// Tokens waiting to be consumed, front first.
#[derive(Debug, Clone, Default)]
pub struct TokenQueue<'a> {
    toks: VecDeque<Token<'a>>,
}

impl<'a> TokenQueue<'a> {
    /// Build a queue from bare strings, assigning offsets as if they were
    /// separated by single spaces.
    pub fn from_texts(texts: &[&'a str]) -> Self {
        let mut toks = VecDeque::with_capacity(texts.len());
        let mut start = 0usize;
        for &text in texts {
            let end = start + text.len();
            toks.push_back(Token { text, start, end });
            start = end + 1;
        }
        Self { toks }
    }

    /// Remove and return the front token.
    pub fn pop_front(&mut self) -> Option<Token<'a>> {
        self.toks.pop_front()
    }

    /// Peek at the front token.
    pub fn front(&self) -> Option<&Token<'a>> {
        self.toks.front()
    }

    /// Whether every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.toks.is_empty()
    }

    /// Number of tokens left.
    pub fn len(&self) -> usize {
        self.toks.len()
    }

    /// Unconsumed tokens joined by single spaces.
    pub fn remaining_text(&self) -> String {
        self.toks
            .iter()
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Span from the first to the last unconsumed token.
    pub fn remaining_span(&self) -> Option<Span> {
        let first = self.toks.front()?;
        let last = self.toks.back()?;
        Some(first.span().cover(last.span()))
    }
}

impl<'a> From<Vec<Token<'a>>> for TokenQueue<'a> {
    fn from(toks: Vec<Token<'a>>) -> Self {
        Self { toks: toks.into() }
    }
}

impl<'a> From<&[Token<'a>]> for TokenQueue<'a> {
    fn from(toks: &[Token<'a>]) -> Self {
        Self {
            toks: toks.iter().copied().collect(),
        }
    }
}
