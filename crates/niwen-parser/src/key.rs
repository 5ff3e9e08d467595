//! Typed keys into a node's captured-value storage.
//!
//! A key is a name plus the type of the value stored under it, so
//! `items: Vec<String>` and `items: Vec<i64>` are different slots.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::value::short_type_name;

/// Typed parameter key, usable in `const` items.
pub struct NodeParameterKey<R> {
    name: &'static str,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for NodeParameterKey<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for NodeParameterKey<R> {}

impl<R: 'static> NodeParameterKey<R> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The type-erased form of this key.
    pub const fn param(&self) -> ParamKey {
        ParamKey {
            name: self.name,
            type_id: TypeId::of::<R>,
            type_name: std::any::type_name::<R>,
        }
    }
}

impl<R: 'static> fmt::Debug for NodeParameterKey<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.param().fmt(f)
    }
}

/// Type-erased parameter key.
///
/// The type is carried as function pointers so the key can still be built
/// in `const` context.
#[derive(Clone, Copy)]
pub struct ParamKey {
    name: &'static str,
    type_id: fn() -> TypeId,
    type_name: fn() -> &'static str,
}

impl ParamKey {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }
}

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_id() == other.type_id()
    }
}

impl Eq for ParamKey {}

impl Hash for ParamKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.type_id().hash(state);
    }
}

impl fmt::Debug for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, short_type_name(self.type_name()))
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Name of the slot a composite's body stores its result under.
pub(crate) const ITEM_NAME: &str = "<item>";

/// Slot for the value produced by an `either` branch, an `optional` body or
/// one `repeated` iteration.
pub const fn item<R: 'static>() -> NodeParameterKey<R> {
    NodeParameterKey::new(ITEM_NAME)
}
