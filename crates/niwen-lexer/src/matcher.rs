//! Matchers bind a recognizer to an outcome and a state transition.

use std::fmt;

use crate::recognize::BoxedRecognizer;
use crate::state::StateLabel;
use crate::token::{Token, TokenType};

/// State transition applied after a matcher fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NextState {
    #[default]
    NoChange,
    /// Back to the lexer's default state.
    Default,
    Labeled(StateLabel),
}

/// Outcome of running a single matcher at a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatcherResult {
    NoMatch,
    /// Consume `index..ends_at` without emitting a token.
    Ignore { ends_at: usize, next: NextState },
    Matched { token: Token, next: NextState },
}

/// A matcher decides what happens at a scan position.
///
/// Custom implementations are allowed; the lexer validates every span they
/// report and fails on incoherent ones.
pub trait Matcher: fmt::Debug + Send + Sync {
    fn match_at(&self, text: &str, offset: usize) -> MatcherResult;
}

/// What a [`TokenMatcher`] does with the recognized span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Emit(TokenType),
    Ignore,
}

/// The standard matcher: recognizer + outcome + next state.
///
/// Zero-width recognitions count as no match, so every step of the lexer
/// makes progress.
#[derive(Debug)]
pub struct TokenMatcher {
    recognizer: BoxedRecognizer,
    outcome: MatchOutcome,
    next: NextState,
}

impl TokenMatcher {
    pub fn new(recognizer: BoxedRecognizer, outcome: MatchOutcome, next: NextState) -> Self {
        Self {
            recognizer,
            outcome,
            next,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    pub fn next(&self) -> NextState {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: NextState) {
        self.next = next;
    }
}

impl Matcher for TokenMatcher {
    fn match_at(&self, text: &str, offset: usize) -> MatcherResult {
        let Some(end) = self.recognizer.recognize(text, offset) else {
            return MatcherResult::NoMatch;
        };
        if end <= offset {
            return MatcherResult::NoMatch;
        }

        match self.outcome {
            MatchOutcome::Ignore => MatcherResult::Ignore {
                ends_at: end,
                next: self.next,
            },
            MatchOutcome::Emit(token_type) => {
                // An out-of-range end leaves the text empty; the lexer reports
                // the mismatch as an incoherent token.
                let slice = text.get(offset..end).unwrap_or_default();
                MatcherResult::Matched {
                    token: Token::new(slice, offset, end, token_type),
                    next: self.next,
                }
            }
        }
    }
}
