#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Finite-state lexer for the Niwen parsing engine.
//!
//! Three layers:
//! - **Recognizers** (`recognize`): pure pattern tests over `(text, offset)`
//! - **Matchers** (`matcher`): a recognizer bound to "emit token" or "ignore"
//!   plus a state transition
//! - **Lexer** (`lexer`): labeled states of ordered matchers, driven over the
//!   input until it is fully consumed
//!
//! A built [`Lexer`] is immutable and can be shared across threads.

mod builder;
mod error;
mod lexer;
mod matcher;
pub mod recognize;
mod state;
mod token;

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod lexer_tests;

pub use builder::LexerBuilder;
pub use error::{Incoherence, LexError, LexerBuildError};
pub use lexer::{Lexer, Tokenized};
pub use matcher::{MatchOutcome, Matcher, MatcherResult, NextState, TokenMatcher};
pub use state::{LexerState, RuleBuilder, StateBuilder, StateLabel, TransitionBuilder};
pub use token::{Token, TokenType};
