//! Evaluation of expectations against a token buffer.
//!
//! Every expectation is evaluated at a token index and yields either a
//! [`Success`] (values stored so far, the index after it, the tokens it
//! covered) or `DidNotMatch` with a message and the index where matching
//! failed. `DidNotMatch` is an ordinary value that `either`, `optional` and
//! `repeated` interpret locally. Errors (`Err`) abort the whole parse.
//!
//! Composite bodies run in isolated sub-contexts: each starts with an empty
//! store, and only a successful body's values reach the enclosing one.

use std::ops::Range;

use indexmap::IndexMap;
use niwen_lexer::Token;
use tracing::trace;

use crate::captures::Captures;
use crate::declaration::DeclId;
use crate::description::TypeDescription;
use crate::error::ParseError;
use crate::expectation::{CollectFn, Expectation, ExpectationKind};
use crate::grammar::DescribedType;
use crate::key::ITEM_NAME;
use crate::limits::ParseLimits;
use crate::stack::ensure_sufficient_stack;
use crate::trace::{Group, Tracer};
use crate::value::BoxedValue;

/// What the evaluator reads: the tokens and the described node types.
#[derive(Clone, Copy)]
pub struct ParsingContext<'p> {
    tokens: &'p [Token],
    described: &'p IndexMap<DeclId, DescribedType>,
}

impl<'p> ParsingContext<'p> {
    pub fn new(tokens: &'p [Token], described: &'p IndexMap<DeclId, DescribedType>) -> Self {
        Self { tokens, described }
    }

    pub fn tokens(&self) -> &'p [Token] {
        self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&'p Token> {
        self.tokens.get(index)
    }

    pub fn described_type(&self, id: DeclId) -> Option<&'p DescribedType> {
        self.described.get(&id)
    }
}

#[derive(Debug)]
pub struct Success {
    /// Values stored by callbacks, to be merged into the enclosing context.
    pub stored: Captures,
    pub next_index: usize,
    /// Token indices covered.
    pub matched: Range<usize>,
}

#[derive(Debug)]
pub enum ExpectationResult {
    Success(Success),
    DidNotMatch { message: String, index: usize },
}

impl ExpectationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Index after a success, or the failing index.
    pub fn index(&self) -> usize {
        match self {
            Self::Success(success) => success.next_index,
            Self::DidNotMatch { index, .. } => *index,
        }
    }
}

/// Result of evaluating one expectation's own kind, before its callback.
enum Step {
    Matched {
        value: Option<BoxedValue>,
        stored: Captures,
        next_index: usize,
    },
    Failed {
        message: String,
        index: usize,
    },
}

impl Step {
    fn empty(next_index: usize) -> Self {
        Step::Matched {
            value: None,
            stored: Captures::new(),
            next_index,
        }
    }

    fn value(value: BoxedValue, next_index: usize) -> Self {
        Step::Matched {
            value: Some(value),
            stored: Captures::new(),
            next_index,
        }
    }

    /// Lift a composite body's result: the body's item becomes the value and
    /// everything else it stored passes through.
    fn from_body(success: Success) -> Self {
        let mut stored = success.stored;
        let value = stored.remove_by_name(ITEM_NAME);
        Step::Matched {
            value,
            stored,
            next_index: success.next_index,
        }
    }
}

pub(crate) struct Evaluator<'p, 't, T: Tracer> {
    ctx: ParsingContext<'p>,
    tracer: &'t mut T,
    limits: ParseLimits,
    exec_fuel: u32,
    recursion_depth: u32,
}

impl<'p, 't, T: Tracer> Evaluator<'p, 't, T> {
    pub(crate) fn new(ctx: ParsingContext<'p>, limits: ParseLimits, tracer: &'t mut T) -> Self {
        Self {
            ctx,
            tracer,
            limits,
            exec_fuel: limits.exec_fuel,
            recursion_depth: 0,
        }
    }

    /// Evaluate `expectations` in order, threading the index and merging
    /// stored values. Stops at the first non-match.
    pub(crate) fn apply_expectations(
        &mut self,
        index: usize,
        expectations: &[Expectation],
    ) -> Result<ExpectationResult, ParseError> {
        let mut stored = Captures::new();
        let mut current = index;
        for expectation in expectations {
            match self.matches(expectation, current)? {
                ExpectationResult::Success(success) => {
                    stored.extend(success.stored);
                    current = success.next_index;
                }
                failed @ ExpectationResult::DidNotMatch { .. } => return Ok(failed),
            }
        }
        Ok(ExpectationResult::Success(Success {
            stored,
            next_index: current,
            matched: index..current,
        }))
    }

    pub(crate) fn matches(
        &mut self,
        expectation: &Expectation,
        index: usize,
    ) -> Result<ExpectationResult, ParseError> {
        if self.exec_fuel == 0 {
            return Err(ParseError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;

        self.tracer.trace_enter(expectation, index);

        let step = if index >= self.ctx.tokens.len() && !expectation.handles_token_drought() {
            Step::Failed {
                message: format!("expected {expectation}, reached end of input"),
                index,
            }
        } else {
            ensure_sufficient_stack(|| self.step(expectation, index))?
        };

        let result = match step {
            Step::Matched {
                value,
                mut stored,
                next_index,
            } => {
                if let (Some(callback), Some(value)) = (expectation.callback(), value) {
                    callback.apply(value, &mut stored)?;
                }
                ExpectationResult::Success(Success {
                    stored,
                    next_index,
                    matched: index..next_index,
                })
            }
            Step::Failed { message, index } => ExpectationResult::DidNotMatch { message, index },
        };

        self.tracer.trace_exit(expectation, &result);
        Ok(result)
    }

    fn step(&mut self, expectation: &Expectation, index: usize) -> Result<Step, ParseError> {
        match expectation.kind() {
            ExpectationKind::Token { token_type, value } => {
                let Some(token) = self.ctx.token(index) else {
                    return Ok(Step::Failed {
                        message: format!("expected {expectation}, reached end of input"),
                        index,
                    });
                };
                let text_matches = value.as_ref().is_none_or(|v| *v == token.text);
                if token.token_type == *token_type && text_matches {
                    Ok(Step::value(Box::new(token.text.clone()), index + 1))
                } else {
                    Ok(Step::Failed {
                        message: format!(
                            "expected {expectation}, found {} {:?}",
                            token.token_type, token.text
                        ),
                        index,
                    })
                }
            }
            ExpectationKind::Node(id) => self.node(*id, index),
            ExpectationKind::Either(branches) => self.either(branches, index),
            ExpectationKind::Optional(body) => {
                if index >= self.ctx.tokens.len() {
                    return Ok(Step::empty(index));
                }
                match self.apply_expectations(index, body)? {
                    ExpectationResult::Success(success) => Ok(Step::from_body(success)),
                    ExpectationResult::DidNotMatch { .. } => Ok(Step::empty(index)),
                }
            }
            ExpectationKind::Repeated {
                expectations,
                min,
                max,
                collect,
            } => self.repeated(expectations, *min, *max, *collect, index),
            ExpectationKind::Lookahead(body) => match self.apply_expectations(index, body)? {
                ExpectationResult::Success(_) => Ok(Step::empty(index)),
                ExpectationResult::DidNotMatch { message, index } => Ok(Step::Failed {
                    message: format!("{message} (while looking ahead)"),
                    index,
                }),
            },
            ExpectationKind::Eof => match self.ctx.token(index) {
                None => Ok(Step::value(Box::new(()), index)),
                Some(token) => Ok(Step::Failed {
                    message: format!(
                        "expected end of input, found {} {:?}",
                        token.token_type, token.text
                    ),
                    index,
                }),
            },
            ExpectationKind::Emit(value) => Ok(Step::value((**value).clone_boxed(), index)),
        }
    }

    fn node(&mut self, id: DeclId, index: usize) -> Result<Step, ParseError> {
        let Some(described) = self.ctx.described_type(id) else {
            return Err(ParseError::UndeclaredNode(id.name()));
        };
        if self.recursion_depth >= self.limits.recursion_limit {
            return Err(ParseError::RecursionLimitExceeded(self.limits.recursion_limit));
        }

        trace!(node = %id, index, "evaluating node");
        self.recursion_depth += 1;
        let result = self.apply_expectations(index, described.expectations());
        self.recursion_depth -= 1;

        match result? {
            ExpectationResult::Success(success) => {
                let description = TypeDescription::new(id.name(), success.stored);
                let value = described.make(description)?;
                Ok(Step::value(value, success.next_index))
            }
            ExpectationResult::DidNotMatch { message, index } => {
                Ok(Step::Failed { message, index })
            }
        }
    }

    fn either(&mut self, branches: &[Vec<Expectation>], index: usize) -> Result<Step, ParseError> {
        for (n, branch) in branches.iter().enumerate() {
            self.tracer.trace_enter_group(Group::Branch(n + 1), index);
            let result = self.apply_expectations(index, branch)?;
            self.tracer.trace_exit_group(&result);
            if let ExpectationResult::Success(success) = result {
                return Ok(Step::from_body(success));
            }
        }
        Ok(Step::Failed {
            message: format!("none of the {} branches matched", branches.len()),
            index,
        })
    }

    fn repeated(
        &mut self,
        body: &[Expectation],
        min: usize,
        max: Option<usize>,
        collect: Option<CollectFn>,
        index: usize,
    ) -> Result<Step, ParseError> {
        let mut items = Vec::new();
        let mut iterations = 0;
        let mut current = index;

        while current < self.ctx.tokens.len() && max.is_none_or(|max| iterations < max) {
            self.tracer
                .trace_enter_group(Group::Iteration(iterations + 1), current);
            let result = self.apply_expectations(current, body)?;
            self.tracer.trace_exit_group(&result);

            match result {
                ExpectationResult::Success(success) if success.next_index > current => {
                    let mut stored = success.stored;
                    if let Some(item) = stored.remove_by_name(ITEM_NAME) {
                        items.push(item);
                    }
                    iterations += 1;
                    current = success.next_index;
                }
                _ => break,
            }
        }

        if iterations < min {
            return Ok(Step::Failed {
                message: format!("expected at least {min} repetitions, found {iterations}"),
                index: current,
            });
        }

        let value = collect.map(|collect| collect(items)).transpose()?;
        Ok(Step::Matched {
            value,
            stored: Captures::new(),
            next_index: current,
        })
    }
}
