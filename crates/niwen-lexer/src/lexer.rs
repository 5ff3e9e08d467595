//! Finite-state tokenizer.

use std::collections::HashMap;
use std::ops::Range;

use tracing::{debug, trace};

use crate::builder::LexerBuilder;
use crate::error::{Incoherence, LexError};
use crate::matcher::{MatcherResult, NextState};
use crate::state::{LexerState, StateLabel};
use crate::token::Token;

/// An immutable, reusable tokenizer.
///
/// States are keyed by label; `None` is the unlabeled default state. When
/// the default is redirected to a labeled state, `default_label` names it.
#[derive(Debug)]
pub struct Lexer {
    states: HashMap<Option<StateLabel>, LexerState>,
    default_label: Option<StateLabel>,
}

/// Tokens plus the spans consumed by ignoring matchers, both in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub ignored: Vec<Range<usize>>,
}

impl Lexer {
    pub fn builder() -> LexerBuilder {
        LexerBuilder::new()
    }

    pub(crate) fn new(
        states: HashMap<Option<StateLabel>, LexerState>,
        default_label: Option<StateLabel>,
    ) -> Self {
        Self {
            states,
            default_label,
        }
    }

    /// Label of the default state (`None` when it is unlabeled).
    pub fn default_label(&self) -> Option<StateLabel> {
        self.default_label
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        self.tokenize_with_spans(text).map(|t| t.tokens)
    }

    /// Tokenize, also reporting the ignored spans.
    ///
    /// Tokens and ignored spans together cover the input exactly.
    pub fn tokenize_with_spans(&self, text: &str) -> Result<Tokenized, LexError> {
        let mut out = Tokenized::default();
        let mut index = 0;
        let mut label = self.default_label;
        let mut state = self.state(label)?;

        debug!(len = text.len(), "tokenizing");

        while index < text.len() {
            let next = match state.first_match(text, index) {
                MatcherResult::NoMatch => {
                    let character = text
                        .get(index..)
                        .and_then(|rest| rest.chars().next())
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    return Err(LexError::NoMatch {
                        index,
                        character,
                        state: label,
                    });
                }
                MatcherResult::Ignore { ends_at, next } => {
                    check_ignore(index, ends_at, text.len())?;
                    trace!(start = index, end = ends_at, "ignored");
                    out.ignored.push(index..ends_at);
                    index = ends_at;
                    next
                }
                MatcherResult::Matched { token, next } => {
                    check_token(&token, index, text.len())?;
                    trace!(token = %token, "token");
                    index = token.ends_at;
                    out.tokens.push(token);
                    next
                }
            };

            let target = match next {
                NextState::NoChange => continue,
                NextState::Default => self.default_label,
                NextState::Labeled(l) => Some(l),
            };
            debug!(from = ?label, to = ?target, index, "state transition");
            label = target;
            state = self.state(label)?;
        }

        Ok(out)
    }

    fn state(&self, label: Option<StateLabel>) -> Result<&LexerState, LexError> {
        match (self.states.get(&label), label) {
            (Some(state), _) => Ok(state),
            (None, Some(l)) => Err(LexError::UnknownState(l)),
            (None, None) => unreachable!("built lexers always have a default state"),
        }
    }
}

fn check_token(token: &Token, index: usize, len: usize) -> Result<(), LexError> {
    let kind = if token.ends_at <= token.starts_at {
        Some(Incoherence::Empty)
    } else if token.text.len() != token.ends_at - token.starts_at {
        Some(Incoherence::TextLength)
    } else if token.starts_at != index {
        Some(Incoherence::StartMismatch)
    } else if token.ends_at > len {
        Some(Incoherence::PastEnd)
    } else {
        None
    };

    match kind {
        None => Ok(()),
        Some(kind) => Err(LexError::IncoherentToken {
            kind,
            token: token.clone(),
            index,
        }),
    }
}

fn check_ignore(index: usize, ends_at: usize, len: usize) -> Result<(), LexError> {
    let kind = if ends_at <= index {
        Incoherence::Empty
    } else if ends_at > len {
        Incoherence::PastEnd
    } else {
        return Ok(());
    };
    Err(LexError::IncoherentIgnore {
        kind,
        index,
        ends_at,
    })
}
