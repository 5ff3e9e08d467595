//! What happens to the value an expectation produced.

use std::fmt;

use crate::captures::Captures;
use crate::description::ConstructError;
use crate::key::{NodeParameterKey, ParamKey};
use crate::value::{BoxedValue, NodeValue, short_type_name};

pub type TransformFn = Box<dyn Fn(BoxedValue) -> Result<BoxedValue, ConstructError> + Send + Sync>;

/// A step applied to an expectation's value on success.
///
/// `Store` keeps a copy and passes the value on unchanged, so
/// `store_in(a).transform(f).store_in(b)` stores the raw value under `a`
/// and the transformed one under `b`.
pub enum StateCallback {
    Store(ParamKey),
    Transform(TransformFn),
    Compose(Box<StateCallback>, Box<StateCallback>),
}

impl StateCallback {
    pub fn store<R: 'static>(key: NodeParameterKey<R>) -> Self {
        Self::Store(key.param())
    }

    pub fn transform<R, U, F>(f: F) -> Self
    where
        R: NodeValue,
        U: NodeValue,
        F: Fn(R) -> U + Send + Sync + 'static,
    {
        Self::Transform(Box::new(move |value: BoxedValue| {
            let found = value.type_name();
            let input = value.into_any().downcast::<R>().map_err(|_| {
                ConstructError::MistypedValue {
                    expected: short_type_name(std::any::type_name::<R>()),
                    found: short_type_name(found),
                }
            })?;
            Ok(Box::new(f(*input)) as BoxedValue)
        }))
    }

    /// Run `self`, then `next` on its output.
    pub fn then(self, next: StateCallback) -> Self {
        Self::Compose(Box::new(self), Box::new(next))
    }

    pub fn apply(
        &self,
        value: BoxedValue,
        stored: &mut Captures,
    ) -> Result<BoxedValue, ConstructError> {
        match self {
            Self::Store(key) => {
                stored.insert(*key, value.clone_boxed());
                Ok(value)
            }
            Self::Transform(f) => f(value),
            Self::Compose(first, second) => {
                let value = first.apply(value, stored)?;
                second.apply(value, stored)
            }
        }
    }
}

impl fmt::Debug for StateCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(key) => write!(f, "Store({key})"),
            Self::Transform(_) => f.write_str("Transform"),
            Self::Compose(first, second) => write!(f, "{first:?} -> {second:?}"),
        }
    }
}
