//! Grammar definition and the parser it builds.

use std::fmt;

use indexmap::IndexMap;
use niwen_lexer::Token;
use tracing::debug;

use crate::callback::StateCallback;
use crate::declaration::{DeclId, NodeDeclaration};
use crate::description::{ConstructError, TypeDescription};
use crate::dsl::ExpectationsBuilder;
use crate::error::ParseError;
use crate::eval::{Evaluator, ExpectationResult, ParsingContext};
use crate::expectation::{Expectation, ExpectationKind};
use crate::key::NodeParameterKey;
use crate::limits::ParseLimits;
use crate::trace::{DebugTracer, NoopTracer, Tracer};
use crate::value::{BoxedValue, NodeValue};

/// Errors detected while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("node `{0}` is described more than once")]
    DuplicateDescription(&'static str),

    #[error("grammar has no root node")]
    MissingRoot,

    #[error("grammar declares more than one root node")]
    MultipleRoots,

    #[error("root node `{0}` is never described")]
    RootNotDescribed(&'static str),

    #[error("node `{node}` repeats at least {min} but at most {max} times")]
    InvalidRepetition {
        node: &'static str,
        min: usize,
        max: usize,
    },
}

type MakeFn = Box<dyn Fn(TypeDescription) -> Result<BoxedValue, ConstructError> + Send + Sync>;

/// A node declaration together with the expectations describing it.
pub struct DescribedType {
    declaration: DeclId,
    expectations: Vec<Expectation>,
    make: MakeFn,
}

impl DescribedType {
    fn new<N: NodeValue>(declaration: NodeDeclaration<N>, expectations: Vec<Expectation>) -> Self {
        Self {
            declaration: declaration.id(),
            expectations,
            make: Box::new(move |description| {
                declaration
                    .make(description)
                    .map(|value| Box::new(value) as BoxedValue)
            }),
        }
    }

    pub fn declaration(&self) -> DeclId {
        self.declaration
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    pub(crate) fn make(&self, description: TypeDescription) -> Result<BoxedValue, ConstructError> {
        (self.make)(description)
    }
}

impl fmt::Debug for DescribedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribedType")
            .field("declaration", &self.declaration)
            .field("expectations", &self.expectations)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Parser`] producing values of the root type `T`.
pub struct GrammarBuilder<T: 'static> {
    described: IndexMap<DeclId, DescribedType>,
    root: Option<NodeDeclaration<T>>,
    limits: ParseLimits,
    /// First authoring mistake seen, reported by `build`.
    error: Option<GrammarError>,
}

impl<T: NodeValue> Default for GrammarBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeValue> GrammarBuilder<T> {
    pub fn new() -> Self {
        Self {
            described: IndexMap::new(),
            root: None,
            limits: ParseLimits::default(),
            error: None,
        }
    }

    /// Describe a node as a sequence of expectations.
    pub fn describe<N: NodeValue>(
        mut self,
        declaration: &NodeDeclaration<N>,
        fill: impl FnOnce(&mut ExpectationsBuilder),
    ) -> Self {
        let id = declaration.id();
        if self.described.contains_key(&id) {
            self.fail(GrammarError::DuplicateDescription(id.name()));
            return self;
        }

        let mut expectations = ExpectationsBuilder::new();
        fill(&mut expectations);
        self.described
            .insert(id, DescribedType::new(*declaration, expectations.finish()));
        self
    }

    pub fn root(mut self, declaration: &NodeDeclaration<T>) -> Self {
        if self.root.is_some() {
            self.fail(GrammarError::MultipleRoots);
        } else {
            self.root = Some(*declaration);
        }
        self
    }

    /// Describe the root node and mark it as the root.
    pub fn describe_root(
        self,
        declaration: &NodeDeclaration<T>,
        fill: impl FnOnce(&mut ExpectationsBuilder),
    ) -> Self {
        self.describe(declaration, fill).root(declaration)
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<Parser<T>, GrammarError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let Some(root) = self.root else {
            return Err(GrammarError::MissingRoot);
        };
        if !self.described.contains_key(&root.id()) {
            return Err(GrammarError::RootNotDescribed(root.name()));
        }
        for described in self.described.values() {
            check_repetitions(described.declaration.name(), &described.expectations)?;
        }

        debug!(
            root = root.name(),
            nodes = self.described.len(),
            "grammar built"
        );
        Ok(Parser {
            described: self.described,
            root,
            root_expectation: Expectation::node(root.id())
                .with_callback(StateCallback::store(root_key::<T>())),
            limits: self.limits,
        })
    }

    fn fail(&mut self, error: GrammarError) {
        self.error.get_or_insert(error);
    }
}

fn check_repetitions(node: &'static str, expectations: &[Expectation]) -> Result<(), GrammarError> {
    for expectation in expectations {
        match expectation.kind() {
            ExpectationKind::Repeated {
                expectations,
                min,
                max,
                ..
            } => {
                if let Some(max) = max.filter(|max| min > max) {
                    return Err(GrammarError::InvalidRepetition {
                        node,
                        min: *min,
                        max,
                    });
                }
                check_repetitions(node, expectations)?;
            }
            ExpectationKind::Either(branches) => {
                for branch in branches {
                    check_repetitions(node, branch)?;
                }
            }
            ExpectationKind::Optional(body) | ExpectationKind::Lookahead(body) => {
                check_repetitions(node, body)?;
            }
            ExpectationKind::Token { .. }
            | ExpectationKind::Node(_)
            | ExpectationKind::Eof
            | ExpectationKind::Emit(_) => {}
        }
    }
    Ok(())
}

const ROOT_NAME: &str = "<root>";

const fn root_key<T: 'static>() -> NodeParameterKey<T> {
    NodeParameterKey::new(ROOT_NAME)
}

/// A built grammar. Immutable, and safe to share across threads.
pub struct Parser<T: 'static> {
    described: IndexMap<DeclId, DescribedType>,
    root: NodeDeclaration<T>,
    root_expectation: Expectation,
    limits: ParseLimits,
}

impl<T: 'static> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("root", &self.root)
            .field("described", &self.described)
            .field("limits", &self.limits)
            .finish()
    }
}

impl<T: NodeValue> Parser<T> {
    pub fn builder() -> GrammarBuilder<T> {
        GrammarBuilder::new()
    }

    pub fn root(&self) -> &NodeDeclaration<T> {
        &self.root
    }

    pub fn limits(&self) -> ParseLimits {
        self.limits
    }

    pub fn described_type(&self, id: DeclId) -> Option<&DescribedType> {
        self.described.get(&id)
    }

    /// Parse `tokens` into the root node.
    ///
    /// The root is not implicitly anchored: trailing tokens are left
    /// unconsumed unless the grammar expects end of input.
    pub fn parse(&self, tokens: &[Token]) -> Result<T, ParseError> {
        self.run(tokens, self.limits, &mut NoopTracer)
    }

    pub fn parse_with_limits(
        &self,
        tokens: &[Token],
        limits: ParseLimits,
    ) -> Result<T, ParseError> {
        self.run(tokens, limits, &mut NoopTracer)
    }

    pub fn parse_with<Tr: Tracer>(
        &self,
        tokens: &[Token],
        tracer: &mut Tr,
    ) -> Result<T, ParseError> {
        self.run(tokens, self.limits, tracer)
    }

    /// Parse while recording the evaluation tree; returns the result and
    /// the rendered tree.
    pub fn parse_with_debugger(&self, tokens: &[Token]) -> (Result<T, ParseError>, String) {
        let mut tracer = DebugTracer::default();
        let result = self.run(tokens, self.limits, &mut tracer);
        (result, tracer.render())
    }

    fn run<Tr: Tracer>(
        &self,
        tokens: &[Token],
        limits: ParseLimits,
        tracer: &mut Tr,
    ) -> Result<T, ParseError> {
        debug!(root = self.root.name(), tokens = tokens.len(), "parsing");

        let ctx = ParsingContext::new(tokens, &self.described);
        let result = Evaluator::new(ctx, limits, &mut *tracer).matches(&self.root_expectation, 0);
        let result = match result {
            Ok(result) => result,
            Err(error) => {
                debug!(%error, "parse aborted");
                tracer.trace_abort(&error);
                return Err(error);
            }
        };

        match result {
            ExpectationResult::Success(success) => {
                debug!(consumed = success.next_index, "parse succeeded");
                let mut description = TypeDescription::new(self.root.name(), success.stored);
                Ok(description.take(root_key::<T>())?)
            }
            ExpectationResult::DidNotMatch { message, index } => {
                debug!(index, %message, "parse failed");
                Err(ParseError::NoMatch { message, index })
            }
        }
    }
}
