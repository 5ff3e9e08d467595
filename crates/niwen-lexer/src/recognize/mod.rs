//! Pattern primitives that test a position in a string.
//!
//! A recognizer is a pure function of `(text, offset)`: it returns the byte
//! offset where its match ends, or `None`. Recognizers hold no mutable state,
//! so a built lexer can be shared between threads freely.

mod char_range;
mod literal;
mod regex;
mod repeated;
mod string_set;


use std::fmt;
use std::ops::RangeInclusive;

pub use char_range::CharRange;
pub use literal::Literal;
pub use regex::Regex;
pub use repeated::Repeated;
pub use string_set::StringSet;

use crate::LexerBuildError;

/// Tests whether a pattern matches at a given offset.
pub trait Recognizer: fmt::Debug + Send + Sync {
    /// Returns the end offset of the match starting at `offset`.
    ///
    /// `offset` is a byte offset on a char boundary, `offset <= text.len()`.
    fn recognize(&self, text: &str, offset: usize) -> Option<usize>;
}

pub type BoxedRecognizer = Box<dyn Recognizer>;

/// Conversion into a boxed recognizer, so builders accept plain strings,
/// chars and char ranges next to the recognizer types.
pub trait IntoRecognizer {
    fn into_recognizer(self) -> BoxedRecognizer;
}

impl<R: Recognizer + 'static> IntoRecognizer for R {
    fn into_recognizer(self) -> BoxedRecognizer {
        Box::new(self)
    }
}

impl IntoRecognizer for BoxedRecognizer {
    fn into_recognizer(self) -> BoxedRecognizer {
        self
    }
}

impl IntoRecognizer for &str {
    fn into_recognizer(self) -> BoxedRecognizer {
        Box::new(Literal::new(self))
    }
}

impl IntoRecognizer for String {
    fn into_recognizer(self) -> BoxedRecognizer {
        Box::new(Literal::new(self))
    }
}

impl IntoRecognizer for char {
    fn into_recognizer(self) -> BoxedRecognizer {
        Box::new(CharRange::single(self))
    }
}

impl IntoRecognizer for RangeInclusive<char> {
    fn into_recognizer(self) -> BoxedRecognizer {
        Box::new(CharRange::new(*self.start(), *self.end()))
    }
}

/// Anchored regex recognizer. See [`Regex`].
pub fn regex(pattern: &str) -> Result<Regex, LexerBuildError> {
    Regex::new(pattern)
}

/// Matches any of the given strings, longest candidate first.
pub fn any_of<I, S>(candidates: I) -> Result<StringSet, LexerBuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StringSet::new(candidates)
}

/// One or more greedy repetitions of `inner`.
pub fn repeated(inner: impl IntoRecognizer) -> Repeated {
    Repeated::one_or_more(inner)
}
