//! Matchers used to navigate an [`LLLine`] from a selection.

use super::{LLLine, LLToken, TextTag};

/// Something that can match at a token index of a line.
pub trait XMatch<'l> {
    type Out;

    /// Matches starting at token `idx`; yields the inclusive end index of
    /// every match together with its value.
    fn go(&self, line: &'l LLLine, idx: usize) -> Vec<(usize, Self::Out)>;
}

/// Any single non-whitespace token, yielding its text.
pub struct TokenText;

pub fn token_text() -> TokenText {
    TokenText
}

impl<'l> XMatch<'l> for TokenText {
    type Out = &'l str;

    fn go(&self, line: &'l LLLine, idx: usize) -> Vec<(usize, Self::Out)> {
        match line.ll_tokens().get(idx) {
            Some(token) if token.tag != TextTag::SPACE => vec![(idx, token.text.as_str())],
            _ => Vec::new(),
        }
    }
}

/// A single whitespace token.
pub struct Whitespace;

pub fn whitespace() -> Whitespace {
    Whitespace
}

impl<'l> XMatch<'l> for Whitespace {
    type Out = ();

    fn go(&self, line: &'l LLLine, idx: usize) -> Vec<(usize, Self::Out)> {
        match line.ll_tokens().get(idx) {
            Some(token) if token.tag == TextTag::SPACE => vec![(idx, ())],
            _ => Vec::new(),
        }
    }
}

/// Any single token, whitespace included.
pub struct Token;

pub fn token() -> Token {
    Token
}

impl<'l> XMatch<'l> for Token {
    type Out = &'l LLToken;

    fn go(&self, line: &'l LLLine, idx: usize) -> Vec<(usize, Self::Out)> {
        line.ll_tokens()
            .get(idx)
            .map(|token| vec![(idx, token)])
            .unwrap_or_default()
    }
}
