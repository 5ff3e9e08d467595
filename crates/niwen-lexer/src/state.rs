//! Lexer states and the builder used to fill them.

use std::fmt;

use serde::Serialize;

use crate::matcher::{MatchOutcome, Matcher, MatcherResult, NextState, TokenMatcher};
use crate::recognize::{BoxedRecognizer, IntoRecognizer};
use crate::token::TokenType;

/// Name of a lexer state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateLabel(&'static str);

impl StateLabel {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug)]
pub(crate) enum Rule {
    Standard(TokenMatcher),
    Custom(Box<dyn Matcher>),
}

impl Rule {
    fn match_at(&self, text: &str, offset: usize) -> MatcherResult {
        match self {
            Rule::Standard(m) => m.match_at(text, offset),
            Rule::Custom(m) => m.match_at(text, offset),
        }
    }
}

/// Ordered list of matchers. The first matcher that matches wins; there is
/// no longest-match preference.
#[derive(Debug, Default)]
pub struct LexerState {
    rules: Vec<Rule>,
}

impl LexerState {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn first_match(&self, text: &str, offset: usize) -> MatcherResult {
        self.rules
            .iter()
            .map(|rule| rule.match_at(text, offset))
            .find(|result| !matches!(result, MatcherResult::NoMatch))
            .unwrap_or(MatcherResult::NoMatch)
    }

    /// Labels targeted by the standard matchers of this state.
    pub(crate) fn transitions(&self) -> impl Iterator<Item = StateLabel> + '_ {
        self.rules.iter().filter_map(|rule| match rule {
            Rule::Standard(m) => match m.next() {
                NextState::Labeled(label) => Some(label),
                NextState::NoChange | NextState::Default => None,
            },
            Rule::Custom(_) => None,
        })
    }
}

/// Fills one [`LexerState`], in priority order.
#[derive(Debug, Default)]
pub struct StateBuilder {
    rules: Vec<Rule>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a matcher for `recognizer`; finish it with `is_token` or `ignore`.
    #[must_use = "a rule is only added by `is_token` or `ignore`"]
    pub fn on(&mut self, recognizer: impl IntoRecognizer) -> RuleBuilder<'_> {
        RuleBuilder {
            state: self,
            recognizer: recognizer.into_recognizer(),
        }
    }

    /// Add a custom matcher.
    pub fn matcher(&mut self, matcher: impl Matcher + 'static) -> &mut Self {
        self.rules.push(Rule::Custom(Box::new(matcher)));
        self
    }

    pub(crate) fn finish(self) -> LexerState {
        LexerState { rules: self.rules }
    }

    fn push_standard(&mut self, matcher: TokenMatcher) -> &mut TokenMatcher {
        self.rules.push(Rule::Standard(matcher));
        match self.rules.last_mut() {
            Some(Rule::Standard(m)) => m,
            _ => unreachable!("standard rule was just pushed"),
        }
    }
}

/// A recognizer waiting for its outcome.
pub struct RuleBuilder<'a> {
    state: &'a mut StateBuilder,
    recognizer: BoxedRecognizer,
}

impl<'a> RuleBuilder<'a> {
    pub fn is_token(self, token_type: TokenType) -> TransitionBuilder<'a> {
        self.finish(MatchOutcome::Emit(token_type))
    }

    pub fn ignore(self) -> TransitionBuilder<'a> {
        self.finish(MatchOutcome::Ignore)
    }

    fn finish(self, outcome: MatchOutcome) -> TransitionBuilder<'a> {
        let matcher = TokenMatcher::new(self.recognizer, outcome, NextState::NoChange);
        TransitionBuilder {
            matcher: self.state.push_standard(matcher),
        }
    }
}

/// Optional state transition for the rule just added.
pub struct TransitionBuilder<'a> {
    matcher: &'a mut TokenMatcher,
}

impl TransitionBuilder<'_> {
    pub fn then_state(self, label: StateLabel) {
        self.matcher.set_next(NextState::Labeled(label));
    }

    pub fn then_default_state(self) {
        self.matcher.set_next(NextState::Default);
    }
}
