//! Typed builders for describing node expectations.
//!
//! ```ignore
//! g.describe(&ADDITION, |n| {
//!     n.expect_token(NUMBER).transform(parse_int).store_in(LEFT);
//!     n.expect_token(PLUS);
//!     n.expect_token(NUMBER).transform(parse_int).store_in(RIGHT);
//! })
//! ```
//!
//! Handles carry the value type an expectation produces, so `store_in` and
//! `transform` are checked at compile time. Composite bodies store their
//! result under [`item()`](crate::item).

use std::marker::PhantomData;

use niwen_lexer::TokenType;

use crate::callback::StateCallback;
use crate::declaration::NodeDeclaration;
use crate::expectation::{Expectation, ExpectationKind, collect_items};
use crate::key::NodeParameterKey;
use crate::value::NodeValue;

/// Collects the expectations of a node description or composite body.
#[derive(Debug, Default)]
pub struct ExpectationsBuilder {
    expectations: Vec<Expectation>,
}

impl ExpectationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pre-built expectation.
    pub fn push(&mut self, expectation: Expectation) -> &mut Expectation {
        self.expectations.push(expectation);
        let last = self.expectations.len() - 1;
        &mut self.expectations[last]
    }

    fn typed<R>(&mut self, expectation: Expectation) -> ExpectationHandle<'_, R> {
        ExpectationHandle {
            expectation: self.push(expectation),
            _marker: PhantomData,
        }
    }

    pub fn expect_token(&mut self, token_type: TokenType) -> ExpectationHandle<'_, String> {
        self.typed(Expectation::token(token_type))
    }

    /// A token of `token_type` whose text is exactly `value`.
    pub fn expect_token_value(
        &mut self,
        token_type: TokenType,
        value: impl Into<String>,
    ) -> ExpectationHandle<'_, String> {
        self.typed(Expectation::token_value(token_type, value))
    }

    pub fn expect_node<T: NodeValue>(
        &mut self,
        declaration: &NodeDeclaration<T>,
    ) -> ExpectationHandle<'_, T> {
        self.typed(Expectation::node(declaration.id()))
    }

    /// Ordered alternatives; the first branch to match wins.
    pub fn either(&mut self, fill: impl FnOnce(&mut EitherBuilder)) -> CompositeHandle<'_> {
        let mut branches = EitherBuilder::default();
        fill(&mut branches);
        CompositeHandle {
            expectation: self.push(Expectation::either(branches.branches)),
        }
    }

    pub fn optional(&mut self, fill: impl FnOnce(&mut ExpectationsBuilder)) -> CompositeHandle<'_> {
        let body = Self::build(fill);
        CompositeHandle {
            expectation: self.push(Expectation::optional(body)),
        }
    }

    /// Zero or more greedy repetitions of the body.
    pub fn repeated(&mut self, fill: impl FnOnce(&mut ExpectationsBuilder)) -> RepeatedHandle<'_> {
        let body = Self::build(fill);
        RepeatedHandle {
            expectation: self.push(Expectation::repeated(body)),
        }
    }

    /// Succeeds if the body would match here, without consuming or storing.
    pub fn lookahead(&mut self, fill: impl FnOnce(&mut ExpectationsBuilder)) {
        let body = Self::build(fill);
        self.push(Expectation::lookahead(body));
    }

    pub fn expect_eof(&mut self) -> ExpectationHandle<'_, ()> {
        self.typed(Expectation::eof())
    }

    /// Produce `value` without consuming input.
    pub fn emit<R: NodeValue>(&mut self, value: R) -> ExpectationHandle<'_, R> {
        self.typed(Expectation::emit(value))
    }

    pub fn finish(self) -> Vec<Expectation> {
        self.expectations
    }

    fn build(fill: impl FnOnce(&mut ExpectationsBuilder)) -> Vec<Expectation> {
        let mut body = ExpectationsBuilder::new();
        fill(&mut body);
        body.finish()
    }
}

/// Branches of an `either`, tried in declaration order.
#[derive(Debug, Default)]
pub struct EitherBuilder {
    branches: Vec<Vec<Expectation>>,
}

impl EitherBuilder {
    pub fn branch(&mut self, fill: impl FnOnce(&mut ExpectationsBuilder)) -> &mut Self {
        self.branches.push(ExpectationsBuilder::build(fill));
        self
    }
}

/// The last added expectation, producing values of `R`.
pub struct ExpectationHandle<'a, R> {
    expectation: &'a mut Expectation,
    _marker: PhantomData<fn() -> R>,
}

impl<'a, R: NodeValue> ExpectationHandle<'a, R> {
    pub fn store_in(self, key: NodeParameterKey<R>) -> Self {
        self.expectation.push_callback(StateCallback::store(key));
        self
    }

    pub fn transform<U, F>(self, f: F) -> ExpectationHandle<'a, U>
    where
        U: NodeValue,
        F: Fn(R) -> U + Send + Sync + 'static,
    {
        self.expectation.push_callback(StateCallback::transform(f));
        ExpectationHandle {
            expectation: self.expectation,
            _marker: PhantomData,
        }
    }
}

/// An `either` or `optional`. Its value is whatever the matching body
/// stored under `item()`, so the type is fixed by the first use.
pub struct CompositeHandle<'a> {
    expectation: &'a mut Expectation,
}

impl<'a> CompositeHandle<'a> {
    pub fn store_in<R: NodeValue>(self, key: NodeParameterKey<R>) -> ExpectationHandle<'a, R> {
        ExpectationHandle::<R> {
            expectation: self.expectation,
            _marker: PhantomData,
        }
        .store_in(key)
    }

    pub fn transform<R, U, F>(self, f: F) -> ExpectationHandle<'a, U>
    where
        R: NodeValue,
        U: NodeValue,
        F: Fn(R) -> U + Send + Sync + 'static,
    {
        ExpectationHandle::<R> {
            expectation: self.expectation,
            _marker: PhantomData,
        }
        .transform(f)
    }
}

/// A `repeated`, producing `Vec<R>` of the items stored by each iteration.
pub struct RepeatedHandle<'a> {
    expectation: &'a mut Expectation,
}

impl<'a> RepeatedHandle<'a> {
    /// Fail unless at least `min` iterations match.
    pub fn min(self, min: usize) -> Self {
        if let ExpectationKind::Repeated { min: current, .. } = self.expectation.kind_mut() {
            *current = min;
        }
        self
    }

    /// Stop after `max` iterations.
    pub fn max(self, max: usize) -> Self {
        if let ExpectationKind::Repeated { max: current, .. } = self.expectation.kind_mut() {
            *current = Some(max);
        }
        self
    }

    pub fn store_in<R: NodeValue>(
        self,
        key: NodeParameterKey<Vec<R>>,
    ) -> ExpectationHandle<'a, Vec<R>> {
        self.typed::<R>().store_in(key)
    }

    pub fn transform<R, U, F>(self, f: F) -> ExpectationHandle<'a, U>
    where
        R: NodeValue,
        U: NodeValue,
        F: Fn(Vec<R>) -> U + Send + Sync + 'static,
    {
        self.typed::<R>().transform(f)
    }

    fn typed<R: NodeValue>(self) -> ExpectationHandle<'a, Vec<R>> {
        if let ExpectationKind::Repeated { collect, .. } = self.expectation.kind_mut() {
            *collect = Some(collect_items::<R>);
        }
        ExpectationHandle {
            expectation: self.expectation,
            _marker: PhantomData,
        }
    }
}
