//! Captured values handed to a node factory.

use crate::captures::Captures;
use crate::key::{NodeParameterKey, ParamKey};
use crate::value::{BoxedValue, NodeValue, short_type_name};

/// Failures while turning captured values into a node.
///
/// These point at a mismatch between the grammar and the node model, so they
/// abort the parse instead of being treated as a non-match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    #[error("cannot build `{node}`: missing parameter `{name}: {type_name}`")]
    MissingParameter {
        node: &'static str,
        name: &'static str,
        type_name: String,
    },

    #[error("cannot build `{node}`: parameter `{name}` holds `{found}`, expected `{expected}`")]
    MistypedParameter {
        node: &'static str,
        name: &'static str,
        expected: String,
        found: String,
    },

    #[error("cannot build `{node}`: no constructor can be satisfied ({reason})")]
    NoViableConstructor { node: &'static str, reason: String },

    #[error("cannot build `{node}`: {reason}")]
    Invalid { node: &'static str, reason: String },

    /// A transform received a value of another type than it was written for.
    #[error("transform expected `{expected}`, got `{found}`")]
    MistypedValue { expected: String, found: String },
}

/// The stored values of one node evaluation, consumed by its factory.
#[derive(Debug)]
pub struct TypeDescription {
    node: &'static str,
    values: Captures,
}

impl TypeDescription {
    pub fn new(node: &'static str, values: Captures) -> Self {
        Self { node, values }
    }

    pub fn node(&self) -> &'static str {
        self.node
    }

    pub fn captures(&self) -> &Captures {
        &self.values
    }

    pub fn contains<R: 'static>(&self, key: NodeParameterKey<R>) -> bool {
        self.values.contains(&key.param())
    }

    pub(crate) fn contains_param(&self, key: &ParamKey) -> bool {
        self.values.contains(key)
    }

    /// Move the value out. Absent or mistyped keys are errors.
    pub fn take<R: NodeValue>(&mut self, key: NodeParameterKey<R>) -> Result<R, ConstructError> {
        let param = key.param();
        match self.values.remove(&param) {
            Some(value) => self.downcast(&param, value),
            None => Err(self.absent(&param)),
        }
    }

    /// Clone the value out, leaving it in place.
    pub fn get<R: NodeValue>(&self, key: NodeParameterKey<R>) -> Result<R, ConstructError> {
        let param = key.param();
        match self.values.get(&param) {
            Some(value) => value
                .as_any()
                .downcast_ref::<R>()
                .cloned()
                .ok_or_else(|| self.mistyped(&param, value.type_name())),
            None => Err(self.absent(&param)),
        }
    }

    /// Like [`take`](Self::take), but an absent key yields `None`.
    /// A key stored with another type is still an error.
    pub fn take_optional<R: NodeValue>(
        &mut self,
        key: NodeParameterKey<R>,
    ) -> Result<Option<R>, ConstructError> {
        let param = key.param();
        match self.values.remove(&param) {
            Some(value) => self.downcast(&param, value).map(Some),
            None => match self.absent(&param) {
                err @ ConstructError::MistypedParameter { .. } => Err(err),
                _ => Ok(None),
            },
        }
    }

    pub fn take_or<R: NodeValue>(
        &mut self,
        key: NodeParameterKey<R>,
        default: R,
    ) -> Result<R, ConstructError> {
        Ok(self.take_optional(key)?.unwrap_or(default))
    }

    /// Error for factories rejecting otherwise well-typed values.
    pub fn invalid(&self, reason: impl Into<String>) -> ConstructError {
        ConstructError::Invalid {
            node: self.node,
            reason: reason.into(),
        }
    }

    fn downcast<R: NodeValue>(
        &self,
        param: &ParamKey,
        value: BoxedValue,
    ) -> Result<R, ConstructError> {
        let found = value.type_name();
        value
            .into_any()
            .downcast::<R>()
            .map(|boxed| *boxed)
            .map_err(|_| self.mistyped(param, found))
    }

    fn absent(&self, param: &ParamKey) -> ConstructError {
        match self.values.find_by_name(param.name()) {
            Some((_, found)) => self.mistyped(param, found.type_name()),
            None => ConstructError::MissingParameter {
                node: self.node,
                name: param.name(),
                type_name: short_type_name(param.type_name()),
            },
        }
    }

    fn mistyped(&self, param: &ParamKey, found: &str) -> ConstructError {
        ConstructError::MistypedParameter {
            node: self.node,
            name: param.name(),
            expected: short_type_name(param.type_name()),
            found: short_type_name(found),
        }
    }
}
