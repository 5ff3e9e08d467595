//! Node declarations and how they are constructed.
//!
//! The recommended form is one factory per node ([`NodeDeclaration::new`]).
//! Nodes with several constructors use [`NodeDeclaration::with_constructors`]:
//! among the constructors whose required parameters are all present, the one
//! leaving the fewest defaulted parameters unsupplied wins, and ties go to
//! the constructor declared first.

use std::fmt;

use crate::description::{ConstructError, TypeDescription};
use crate::key::ParamKey;
use crate::value::NodeValue;

/// Identity of a node declaration (its name).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(&'static str);

impl DeclId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub type Factory<T> = fn(&mut TypeDescription) -> Result<T, ConstructError>;

/// One way of building a node.
///
/// `make` may rely on every `required` key being present; `defaulted` keys
/// are read with [`TypeDescription::take_or`] or similar.
pub struct Constructor<T> {
    pub required: &'static [ParamKey],
    pub defaulted: &'static [ParamKey],
    pub make: Factory<T>,
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Constructor<T> {}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("required", &self.required)
            .field("defaulted", &self.defaulted)
            .finish_non_exhaustive()
    }
}

enum Construction<T: 'static> {
    Single(Factory<T>),
    Overloaded(&'static [Constructor<T>]),
}

impl<T: 'static> Clone for Construction<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Construction<T> {}

/// A grammar node type producing values of `T`.
pub struct NodeDeclaration<T: 'static> {
    name: &'static str,
    construction: Construction<T>,
}

impl<T: 'static> Clone for NodeDeclaration<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for NodeDeclaration<T> {}

impl<T: 'static> fmt::Debug for NodeDeclaration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeDeclaration({})", self.name)
    }
}

impl<T: 'static> NodeDeclaration<T> {
    pub const fn new(name: &'static str, make: Factory<T>) -> Self {
        Self {
            name,
            construction: Construction::Single(make),
        }
    }

    pub const fn with_constructors(
        name: &'static str,
        constructors: &'static [Constructor<T>],
    ) -> Self {
        Self {
            name,
            construction: Construction::Overloaded(constructors),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn id(&self) -> DeclId {
        DeclId(self.name)
    }
}

impl<T: NodeValue> NodeDeclaration<T> {
    pub fn make(&self, mut description: TypeDescription) -> Result<T, ConstructError> {
        match self.construction {
            Construction::Single(make) => make(&mut description),
            Construction::Overloaded(constructors) => {
                let constructor = select_constructor(self.name, constructors, &description)?;
                (constructor.make)(&mut description)
            }
        }
    }
}

/// Pick the constructor to use for `description`.
pub fn select_constructor<'c, T>(
    node: &'static str,
    constructors: &'c [Constructor<T>],
    description: &TypeDescription,
) -> Result<&'c Constructor<T>, ConstructError> {
    let unsupplied = |keys: &[ParamKey]| {
        keys.iter()
            .filter(|k| !description.contains_param(k))
            .count()
    };

    let viable = constructors
        .iter()
        .filter(|c| unsupplied(c.required) == 0)
        .min_by_key(|c| unsupplied(c.defaulted));
    if let Some(constructor) = viable {
        return Ok(constructor);
    }

    let reason = constructors
        .iter()
        .min_by_key(|c| unsupplied(c.required))
        .and_then(|c| c.required.iter().find(|k| !description.contains_param(k)))
        .map_or_else(
            || "no constructors declared".to_string(),
            |key| format!("missing `{key}`"),
        );
    Err(ConstructError::NoViableConstructor { node, reason })
}
