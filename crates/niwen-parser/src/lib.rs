#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Backtracking expectation-tree parser for the Niwen parsing engine.
//!
//! A grammar maps node declarations to sequences of [`Expectation`]s. Parsing
//! evaluates the root node's expectations against a token buffer; each node
//! stores values under typed [`NodeParameterKey`]s, and its factory turns
//! them into the node value once all of its expectations matched.
//!
//! `either` is ordered choice: the first branch that matches wins and is
//! never revisited. A failed expectation is an ordinary result until it
//! escapes the root, where it becomes [`ParseError::NoMatch`].

mod callback;
mod captures;
mod declaration;
mod description;
mod dsl;
mod error;
mod eval;
mod expectation;
mod grammar;
mod key;
mod limits;
mod stack;
mod trace;
mod value;

#[cfg(test)]
mod trace_tests;

pub use callback::{StateCallback, TransformFn};
pub use captures::Captures;
pub use declaration::{Constructor, DeclId, Factory, NodeDeclaration, select_constructor};
pub use description::{ConstructError, TypeDescription};
pub use dsl::{
    CompositeHandle, EitherBuilder, ExpectationHandle, ExpectationsBuilder, RepeatedHandle,
};
pub use error::ParseError;
pub use eval::{ExpectationResult, ParsingContext, Success};
pub use expectation::{CollectFn, Expectation, ExpectationKind, collect_items};
pub use grammar::{DescribedType, GrammarBuilder, GrammarError, Parser};
pub use key::{NodeParameterKey, ParamKey, item};
pub use limits::ParseLimits;
pub use trace::{Colors, DebugTracer, Group, NoopTracer, Tracer, Verbosity};
pub use value::{BoxedValue, CapturedValue, NodeValue, short_type_name};
