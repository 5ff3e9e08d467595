//! Type-erased values captured while parsing.

use std::any::Any;
use std::fmt;

/// Anything that can be produced by an expectation and stored in a node.
pub trait NodeValue: Any + Clone + fmt::Debug + Send + Sync {}

impl<T: Any + Clone + fmt::Debug + Send + Sync> NodeValue for T {}

/// Object-safe view of a [`NodeValue`].
pub trait CapturedValue: Any + fmt::Debug + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn CapturedValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_name(&self) -> &'static str;
}

impl<T: NodeValue> CapturedValue for T {
    fn clone_boxed(&self) -> Box<dyn CapturedValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

pub type BoxedValue = Box<dyn CapturedValue>;

/// Strips module paths from a type name: `alloc::vec::Vec<alloc::string::String>`
/// becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }

    let mut out = String::with_capacity(full.len());
    let mut path = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            out.push_str(last_segment(&path));
            path.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&path));
    out
}
