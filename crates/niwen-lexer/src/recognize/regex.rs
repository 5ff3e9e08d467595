use std::fmt;

use regex_automata::meta;
use regex_automata::{Anchored, Input};

use super::Recognizer;
use crate::LexerBuildError;

/// Regex anchored at the recognition offset.
///
/// The search span starts at the offset but the haystack stays the whole
/// input, so `^`, `$` and word boundaries see the real string edges rather
/// than the edges of the remaining window.
#[derive(Clone)]
pub struct Regex {
    pattern: String,
    regex: meta::Regex,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, LexerBuildError> {
        let regex = meta::Regex::new(pattern).map_err(|e| LexerBuildError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.pattern).finish()
    }
}

impl Recognizer for Regex {
    fn recognize(&self, text: &str, offset: usize) -> Option<usize> {
        if offset > text.len() {
            return None;
        }
        let input = Input::new(text).range(offset..).anchored(Anchored::Yes);
        self.regex.find(input).map(|m| m.end())
    }
}
