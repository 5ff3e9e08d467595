use crate::description::ConstructError;

/// Errors escaping [`Parser::parse`](crate::Parser::parse).
///
/// `NoMatch` is the ordinary "input does not fit the grammar" outcome. The
/// other kinds point at the grammar, the node model, or the configured limits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no match at token {index}: {message}")]
    NoMatch { message: String, index: usize },

    #[error("grammar definition error: node `{0}` is expected but never described")]
    UndeclaredNode(&'static str),

    #[error(transparent)]
    Construct(#[from] ConstructError),

    #[error("execution limit exceeded after {0} evaluation steps")]
    ExecFuelExhausted(u32),

    #[error("recursion limit exceeded: more than {0} nested nodes")]
    RecursionLimitExceeded(u32),
}

impl ParseError {
    /// True for ordinary non-matching input, false for grammar or limit errors.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Token index where matching stopped, for `NoMatch`.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NoMatch { index, .. } => Some(*index),
            _ => None,
        }
    }
}
