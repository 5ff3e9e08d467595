//! Per-evaluation storage of captured values.

use indexmap::IndexMap;

use crate::key::ParamKey;
use crate::value::{BoxedValue, CapturedValue};

/// Values stored by expectations, in insertion order. Storing under an
/// existing key overwrites it in place.
#[derive(Debug, Default)]
pub struct Captures {
    values: IndexMap<ParamKey, BoxedValue>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ParamKey, value: BoxedValue) {
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &ParamKey) -> Option<&dyn CapturedValue> {
        self.values.get(key).map(|v| &**v)
    }

    pub fn contains(&self, key: &ParamKey) -> bool {
        self.values.contains_key(key)
    }

    /// Any key stored under `name`, whatever its type.
    pub fn find_by_name(&self, name: &str) -> Option<(&ParamKey, &dyn CapturedValue)> {
        self.values
            .iter()
            .find(|(k, _)| k.name() == name)
            .map(|(k, v)| (k, &**v))
    }

    pub fn remove(&mut self, key: &ParamKey) -> Option<BoxedValue> {
        self.values.shift_remove(key)
    }

    pub(crate) fn remove_by_name(&mut self, name: &str) -> Option<BoxedValue> {
        let index = self.values.keys().position(|k| k.name() == name)?;
        self.values.shift_remove_index(index).map(|(_, v)| v)
    }

    /// Merge `other` into `self`; entries of `other` win.
    pub fn extend(&mut self, other: Captures) {
        self.values.extend(other.values);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &dyn CapturedValue)> {
        self.values.iter().map(|(k, v)| (k, &**v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
