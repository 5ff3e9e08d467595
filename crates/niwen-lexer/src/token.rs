//! Tokens produced by the lexer.
//!
//! A token owns its text so it can outlive the source buffer and be captured
//! into parser nodes without borrowing from the input.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Identity of a token kind.
///
/// Token types compare by name, so two `TokenType::new("NUMBER")` values
/// declared in different places are the same type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenType(&'static str);

impl TokenType {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A lexed span of source text tagged with its type.
///
/// `starts_at..ends_at` is a byte range into the tokenized input and
/// `text` is exactly that slice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub text: String,
    pub starts_at: usize,
    pub ends_at: usize,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        starts_at: usize,
        ends_at: usize,
        token_type: TokenType,
    ) -> Self {
        Self {
            text: text.into(),
            starts_at,
            ends_at,
            token_type,
        }
    }

    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.starts_at..self.ends_at
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ends_at - self.starts_at
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends_at == self.starts_at
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} @{}..{}",
            self.token_type, self.text, self.starts_at, self.ends_at
        )
    }
}
