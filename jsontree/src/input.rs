//! What can be fed to a [`JsonBuilder`].

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{BuildError, JsonBuilder};

/// A block run against the builder, with the builder as its target.
pub type BlockFn<'a> = Box<dyn FnOnce(&mut JsonBuilder) -> Result<(), BuildError> + 'a>;

/// A value handed to the builder.
///
/// Blocks, maps and lists (JSON objects and arrays included) are containers:
/// the builder walks them and turns them into JSON objects and arrays.
/// Text and the remaining values are scalars.
pub enum Input<'a> {
    /// A block that populates a fresh object through the builder
    Block(BlockFn<'a>),
    /// Key/value entries, turned into an object in insertion order
    Map(IndexMap<String, Input<'a>>),
    /// Ordered values, turned into an array
    List(Vec<Input<'a>>),
    /// A string that `set` may read as JSON text
    Text(String),
    /// A JSON value. Objects and arrays are walked like maps and lists;
    /// anything else is used as is.
    Value(Value),
}

impl<'a> Input<'a> {
    /// Wrap a closure as a block.
    pub fn block<F>(f: F) -> Self
    where
        F: FnOnce(&mut JsonBuilder) -> Result<(), BuildError> + 'a,
    {
        Input::Block(Box::new(f))
    }

    /// Build a map input. Keys are stringified with their `Display` impl.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: fmt::Display,
        V: Into<Input<'a>>,
        I: IntoIterator<Item = (K, V)>,
    {
        Input::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }

    /// Build a list input.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Input<'a>>,
        I: IntoIterator<Item = V>,
    {
        Input::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether this input is a block, map or list.
    ///
    /// JSON objects and arrays count as maps and lists.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Input::Block(_)
                | Input::Map(_)
                | Input::List(_)
                | Input::Value(Value::Object(_) | Value::Array(_))
        )
    }

    /// A short description used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Input::Block(_) => "a block",
            Input::Map(_) => "a map",
            Input::List(_) => "a list",
            Input::Text(_) => "text",
            Input::Value(Value::Null) => "null",
            Input::Value(Value::Bool(_)) => "a boolean",
            Input::Value(Value::Number(_)) => "a number",
            Input::Value(Value::String(_)) => "a string",
            Input::Value(Value::Array(_)) => "a JSON array",
            Input::Value(Value::Object(_)) => "a JSON object",
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Block(_) => f.write_str("Block(..)"),
            Input::Map(map) => f.debug_map().entries(map.iter()).finish(),
            Input::List(items) => f.debug_list().entries(items.iter()).finish(),
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<Value> for Input<'_> {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl From<&str> for Input<'_> {
    fn from(text: &str) -> Self {
        Input::Text(text.into())
    }
}

impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<Vec<Input<'a>>> for Input<'a> {
    fn from(items: Vec<Input<'a>>) -> Self {
        Input::List(items)
    }
}

impl<'a> From<IndexMap<String, Input<'a>>> for Input<'a> {
    fn from(map: IndexMap<String, Input<'a>>) -> Self {
        Input::Map(map)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input<'_> {
                fn from(value: $ty) -> Self {
                    Input::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'a, T: Into<Input<'a>>> From<Option<T>> for Input<'a> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Input::Value(Value::Null),
        }
    }
}
