//! Errors raised while building or running a lexer.

use std::fmt;

use crate::state::StateLabel;
use crate::token::Token;

/// Authoring mistakes detected when a lexer (or one of its recognizers) is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerBuildError {
    #[error("lexer has no states")]
    NoStates,

    /// An unlabeled single state was combined with default or labeled states.
    #[error("an unlabeled state cannot be combined with default or labeled states")]
    MixedStateKinds,

    #[error("more than one default state declared")]
    MultipleDefaultStates,

    #[error("labeled lexer has no default state")]
    MissingDefaultState,

    #[error("state `{0}` is declared more than once")]
    DuplicateLabel(StateLabel),

    #[error("state `{0}` is referenced but never declared")]
    UnknownLabel(StateLabel),

    #[error("string set needs at least one non-empty candidate")]
    EmptyStringSet,

    #[error("invalid regex `{pattern}`: {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("invalid repetition bounds: min {min} exceeds max {max}")]
    InvalidRepetition { min: usize, max: usize },
}

/// What was wrong with a span reported by a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incoherence {
    /// `text.len()` differs from `ends_at - starts_at`.
    TextLength,
    /// The token does not start at the current scan position.
    StartMismatch,
    /// The span ends past the end of the input.
    PastEnd,
    /// The span is empty or runs backwards.
    Empty,
}

impl fmt::Display for Incoherence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::TextLength => "text length does not match span",
            Self::StartMismatch => "token does not start at the scan position",
            Self::PastEnd => "span ends past the end of input",
            Self::Empty => "span is empty",
        };
        f.write_str(msg)
    }
}

/// Fatal errors raised by [`crate::Lexer::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("no match at index {index} ({character:?}) in {}", state_name(.state))]
    NoMatch {
        index: usize,
        character: char,
        state: Option<StateLabel>,
    },

    #[error("incoherent token at index {index}: {kind} ({token})")]
    IncoherentToken {
        kind: Incoherence,
        token: Token,
        index: usize,
    },

    #[error("incoherent ignored span {index}..{ends_at}: {kind}")]
    IncoherentIgnore {
        kind: Incoherence,
        index: usize,
        ends_at: usize,
    },

    /// A custom matcher asked for a state the lexer does not have.
    #[error("transition to undeclared state `{0}`")]
    UnknownState(StateLabel),
}

fn state_name(state: &Option<StateLabel>) -> String {
    match state {
        Some(label) => format!("state `{label}`"),
        None => "the default state".to_string(),
    }
}
