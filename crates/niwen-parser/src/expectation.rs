//! The grammar tree: what a node expects to see, in order.

use std::fmt;

use niwen_lexer::TokenType;

use crate::callback::StateCallback;
use crate::declaration::DeclId;
use crate::description::ConstructError;
use crate::value::{BoxedValue, NodeValue, short_type_name};

/// Turns the items of a `Repeated` into one list value.
pub type CollectFn = fn(Vec<BoxedValue>) -> Result<BoxedValue, ConstructError>;

/// Collects items into a `Vec<R>`.
pub fn collect_items<R: NodeValue>(items: Vec<BoxedValue>) -> Result<BoxedValue, ConstructError> {
    let mut list: Vec<R> = Vec::with_capacity(items.len());
    for item in items {
        let found = item.type_name();
        let item = item.into_any().downcast::<R>().map_err(|_| {
            ConstructError::MistypedValue {
                expected: short_type_name(std::any::type_name::<R>()),
                found: short_type_name(found),
            }
        })?;
        list.push(*item);
    }
    Ok(Box::new(list))
}

#[derive(Debug)]
pub enum ExpectationKind {
    /// One token of the given type, optionally with exact text.
    Token {
        token_type: TokenType,
        value: Option<String>,
    },
    Node(DeclId),
    Either(Vec<Vec<Expectation>>),
    Optional(Vec<Expectation>),
    /// Without `collect` the items are evaluated but no list is produced.
    Repeated {
        expectations: Vec<Expectation>,
        min: usize,
        max: Option<usize>,
        collect: Option<CollectFn>,
    },
    Lookahead(Vec<Expectation>),
    Eof,
    Emit(BoxedValue),
}

#[derive(Debug)]
pub struct Expectation {
    kind: ExpectationKind,
    callback: Option<StateCallback>,
}

impl Expectation {
    pub fn new(kind: ExpectationKind) -> Self {
        Self {
            kind,
            callback: None,
        }
    }

    pub fn token(token_type: TokenType) -> Self {
        Self::new(ExpectationKind::Token {
            token_type,
            value: None,
        })
    }

    pub fn token_value(token_type: TokenType, value: impl Into<String>) -> Self {
        Self::new(ExpectationKind::Token {
            token_type,
            value: Some(value.into()),
        })
    }

    pub fn node(id: DeclId) -> Self {
        Self::new(ExpectationKind::Node(id))
    }

    pub fn either(branches: Vec<Vec<Expectation>>) -> Self {
        Self::new(ExpectationKind::Either(branches))
    }

    pub fn optional(expectations: Vec<Expectation>) -> Self {
        Self::new(ExpectationKind::Optional(expectations))
    }

    pub fn repeated(expectations: Vec<Expectation>) -> Self {
        Self::new(ExpectationKind::Repeated {
            expectations,
            min: 0,
            max: None,
            collect: None,
        })
    }

    pub fn lookahead(expectations: Vec<Expectation>) -> Self {
        Self::new(ExpectationKind::Lookahead(expectations))
    }

    pub fn eof() -> Self {
        Self::new(ExpectationKind::Eof)
    }

    pub fn emit<R: NodeValue>(value: R) -> Self {
        Self::new(ExpectationKind::Emit(Box::new(value)))
    }

    pub fn with_callback(mut self, callback: StateCallback) -> Self {
        self.push_callback(callback);
        self
    }

    /// Append `callback` after any already attached.
    pub(crate) fn push_callback(&mut self, callback: StateCallback) {
        self.callback = Some(match self.callback.take() {
            Some(existing) => existing.then(callback),
            None => callback,
        });
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ExpectationKind {
        &mut self.kind
    }

    pub fn kind(&self) -> &ExpectationKind {
        &self.kind
    }

    pub fn callback(&self) -> Option<&StateCallback> {
        self.callback.as_ref()
    }

    /// Whether this expectation is still evaluated past the last token.
    pub fn handles_token_drought(&self) -> bool {
        matches!(
            self.kind,
            ExpectationKind::Optional(_)
                | ExpectationKind::Repeated { .. }
                | ExpectationKind::Eof
                | ExpectationKind::Emit(_)
        )
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpectationKind::Token {
                token_type,
                value: None,
            } => write!(f, "Token {token_type}"),
            ExpectationKind::Token {
                token_type,
                value: Some(value),
            } => write!(f, "Token {token_type} {value:?}"),
            ExpectationKind::Node(id) => write!(f, "Node {id}"),
            ExpectationKind::Either(branches) if branches.len() == 1 => {
                f.write_str("Either (1 branch)")
            }
            ExpectationKind::Either(branches) => {
                write!(f, "Either ({} branches)", branches.len())
            }
            ExpectationKind::Optional(_) => f.write_str("Optional"),
            ExpectationKind::Repeated { min, max, .. } => match (min, max) {
                (0, None) => f.write_str("Repeated"),
                (min, None) => write!(f, "Repeated (at least {min})"),
                (min, Some(max)) => write!(f, "Repeated ({min} to {max})"),
            },
            ExpectationKind::Lookahead(_) => f.write_str("Lookahead"),
            ExpectationKind::Eof => f.write_str("Eof"),
            ExpectationKind::Emit(_) => f.write_str("Emit"),
        }
    }
}
