//! Lexer construction.
//!
//! A lexer is one of two kinds, resolved when it is built:
//! - **Single**: one unlabeled state, declared with [`LexerBuilder::state`]
//! - **Labeled**: a default state ([`LexerBuilder::default_state`] or a
//!   redirection with [`LexerBuilder::default_to`]) plus labeled states
//!
//! Every authoring mistake is reported by [`LexerBuilder::build`].

use std::collections::{HashMap, HashSet};

use crate::LexerBuildError;
use crate::lexer::Lexer;
use crate::state::{LexerState, StateBuilder, StateLabel};

#[derive(Debug)]
enum StateKind {
    Unlabeled,
    Default,
    Labeled(StateLabel),
}

#[derive(Debug, Default)]
pub struct LexerBuilder {
    states: Vec<(StateKind, LexerState)>,
    redirects: Vec<StateLabel>,
}

impl LexerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single state of a single-state lexer.
    pub fn state(self, fill: impl FnOnce(&mut StateBuilder)) -> Self {
        self.push(StateKind::Unlabeled, fill)
    }

    /// The unlabeled default state of a labeled lexer.
    pub fn default_state(self, fill: impl FnOnce(&mut StateBuilder)) -> Self {
        self.push(StateKind::Default, fill)
    }

    pub fn labeled_state(self, label: StateLabel, fill: impl FnOnce(&mut StateBuilder)) -> Self {
        self.push(StateKind::Labeled(label), fill)
    }

    /// Make a labeled state the default one.
    pub fn default_to(mut self, label: StateLabel) -> Self {
        self.redirects.push(label);
        self
    }

    fn push(mut self, kind: StateKind, fill: impl FnOnce(&mut StateBuilder)) -> Self {
        let mut builder = StateBuilder::new();
        fill(&mut builder);
        self.states.push((kind, builder.finish()));
        self
    }

    pub fn build(self) -> Result<Lexer, LexerBuildError> {
        if self.states.is_empty() {
            return Err(LexerBuildError::NoStates);
        }

        let unlabeled = self
            .states
            .iter()
            .filter(|(kind, _)| matches!(kind, StateKind::Unlabeled))
            .count();
        let defaults = self
            .states
            .iter()
            .filter(|(kind, _)| matches!(kind, StateKind::Default))
            .count()
            + self.redirects.len();
        let labeled = self.states.len() - unlabeled;

        if unlabeled > 0 && (labeled > 0 || !self.redirects.is_empty()) {
            return Err(LexerBuildError::MixedStateKinds);
        }
        if unlabeled > 1 || defaults > 1 {
            return Err(LexerBuildError::MultipleDefaultStates);
        }
        if unlabeled == 0 && defaults == 0 {
            return Err(LexerBuildError::MissingDefaultState);
        }

        let mut states = HashMap::with_capacity(self.states.len());
        let mut seen = HashSet::new();
        for (kind, state) in self.states {
            let key = match kind {
                StateKind::Unlabeled | StateKind::Default => None,
                StateKind::Labeled(label) => {
                    if !seen.insert(label) {
                        return Err(LexerBuildError::DuplicateLabel(label));
                    }
                    Some(label)
                }
            };
            states.insert(key, state);
        }

        let default_label = self.redirects.first().copied();
        if let Some(label) = default_label
            && !seen.contains(&label)
        {
            return Err(LexerBuildError::UnknownLabel(label));
        }
        for state in states.values() {
            if let Some(label) = state.transitions().find(|label| !seen.contains(label)) {
                return Err(LexerBuildError::UnknownLabel(label));
            }
        }

        Ok(Lexer::new(states, default_label))
    }
}
