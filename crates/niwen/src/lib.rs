#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Niwen: a declarative lexer and parser engine.
//!
//! Tokenize with a [`Lexer`] built from labeled states of recognizers, then
//! parse the tokens with a [`Parser`] built from node declarations and their
//! expectations. [`Language`] bundles the two for string-in, node-out use.

use std::sync::Once;

use tracing::debug;

pub use niwen_lexer::{
    Incoherence, LexError, Lexer, LexerBuildError, LexerBuilder, LexerState, MatchOutcome,
    Matcher, MatcherResult, NextState, RuleBuilder, StateBuilder, StateLabel, Token,
    TokenMatcher, TokenType, Tokenized, TransitionBuilder, recognize,
};
pub use niwen_parser::{
    BoxedValue, CapturedValue, Captures, Colors, CompositeHandle, ConstructError, Constructor,
    DebugTracer, DeclId, DescribedType, EitherBuilder, Expectation, ExpectationHandle,
    ExpectationKind, ExpectationResult, ExpectationsBuilder, GrammarBuilder, GrammarError,
    NodeDeclaration, NodeParameterKey, NodeValue, NoopTracer, ParamKey, ParseError, ParseLimits,
    Parser, RepeatedHandle, StateCallback, Tracer, TypeDescription, Verbosity, item,
};


/// Errors from [`Language::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A lexer and a parser used together.
#[derive(Debug)]
pub struct Language<T: 'static> {
    lexer: Lexer,
    parser: Parser<T>,
}

impl<T: NodeValue> Language<T> {
    pub fn new(lexer: Lexer, parser: Parser<T>) -> Self {
        Self { lexer, parser }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn parser(&self) -> &Parser<T> {
        &self.parser
    }

    pub fn parse(&self, input: &str) -> Result<T, Error> {
        let tokens = self.tokenize(input)?;
        self.parser.parse(&tokens).map_err(|err| {
            debug!(error = %err, "parsing failed");
            Error::from(err)
        })
    }

    /// Like [`parse`](Self::parse), also returning the rendered parse
    /// trace. The trace is empty when tokenizing fails.
    pub fn parse_with_debugger(&self, input: &str) -> (Result<T, Error>, String) {
        match self.tokenize(input) {
            Ok(tokens) => {
                let (result, trace) = self.parser.parse_with_debugger(&tokens);
                debug!(ok = result.is_ok(), trace_len = trace.len(), "debug parse finished");
                (result.map_err(Error::from), trace)
            }
            Err(err) => (Err(err), String::new()),
        }
    }

    fn tokenize(&self, input: &str) -> Result<Vec<Token>, Error> {
        debug!(len = input.len(), root = self.parser.root().name(), "lexing");
        let tokens = self.lexer.tokenize(input).map_err(|err| {
            debug!(error = %err, "lexing failed");
            Error::from(err)
        })?;
        debug!(tokens = tokens.len(), "handing tokens to the parser");
        Ok(tokens)
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=niwen_lexer=trace,niwen_parser=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
