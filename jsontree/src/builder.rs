//! The stack-based tree builder.

use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::accumulate::ObjectExt;
use crate::text::parse_json_text;
use crate::{BuildError, BuildErrorKind, BuilderOptions, DuplicateKeys, Input, PathSegment};

/// An in-progress container on the builder's stack.
#[derive(Debug)]
enum Frame {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl Frame {
    fn into_value(self) -> Value {
        match self {
            Frame::Object(map) => Value::Object(map),
            Frame::Array(items) => Value::Array(items),
        }
    }
}

/// Turns nested blocks, maps and lists into a JSON tree.
///
/// The builder keeps a stack of open containers. Every value handed to it is
/// appended to the container on top of that stack; when nothing is open the
/// value goes to a table of named properties instead.
///
/// ```
/// use jsontree::{Input, JsonBuilder};
/// use serde_json::json;
///
/// let mut builder = JsonBuilder::new();
/// let value = builder
///     .json([Input::block(|b| {
///         b.set("title", "Dune")?;
///         b.set("tags", Input::list(["scifi", "classic"]))?;
///         Ok(())
///     })])
///     .unwrap();
///
/// assert_eq!(value, json!({"title": "Dune", "tags": ["scifi", "classic"]}));
/// ```
#[derive(Debug, Default)]
pub struct JsonBuilder {
    options: BuilderOptions,
    stack: Vec<Frame>,
    properties: IndexMap<String, Value>,
    current: Option<Value>,
}

impl JsonBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options this builder was created with.
    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The most recently completed node.
    pub fn current(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    /// Values that were set while no container was open.
    pub fn properties(&self) -> &IndexMap<String, Value> {
        &self.properties
    }

    /// Consume the builder, returning its named properties.
    pub fn into_properties(self) -> IndexMap<String, Value> {
        self.properties
    }

    /// Forget the named properties and the current node.
    ///
    /// Open containers are left alone, so this is safe to call from a block.
    pub fn reset(&mut self) {
        self.properties.clear();
        self.current = None;
    }

    /// Build a top-level value under the configured root name.
    pub fn json<'a, I>(&mut self, args: I) -> Result<Value, BuildError>
    where
        I: IntoIterator<Item = Input<'a>>,
    {
        let name = self.options.root_name.clone();
        self.named_block(&name, args)
    }

    /// Build a top-level value from `args`.
    ///
    /// A single block, map or list is converted and returned. Several of
    /// them are each converted and collected into an array. Anything else
    /// is rejected.
    pub fn named_block<'a, I>(&mut self, name: &str, args: I) -> Result<Value, BuildError>
    where
        I: IntoIterator<Item = Input<'a>>,
    {
        let mut args: Vec<Input<'a>> = args.into_iter().collect();
        trace!(name, args = args.len(), "named block");

        let value = match args.len() {
            0 => return Err(BuildError::invalid_usage(name)),
            1 => {
                let arg = args.remove(0);
                if !arg.is_container() {
                    return Err(BuildError::invalid_argument(name, arg.describe()));
                }
                self.convert(arg)?
            }
            _ => self.in_frame(Frame::Array(Vec::new()), |b| {
                for (i, arg) in args.into_iter().enumerate() {
                    if !arg.is_container() {
                        return Err(BuildError::invalid_argument(name, arg.describe())
                            .with_path(PathSegment::Index(i)));
                    }
                    let value = b
                        .convert(arg)
                        .map_err(|e| e.with_path(PathSegment::Index(i)))?;
                    b.append(name, value);
                }
                Ok(())
            })?,
        };

        self.current = Some(value.clone());
        Ok(value)
    }

    /// Invoke `name` with `args`, the way a nested key is declared inside a block.
    ///
    /// If `name` is the root name and nothing is open, this is
    /// [`named_block`](Self::named_block). Otherwise, with a single argument
    /// the converted block, map or list is appended under `name` to the open
    /// container. With several arguments they are collected into a
    /// temporary array instead, which is not attached anywhere.
    ///
    /// Either way the result is a fresh object `{name: value}`, which also
    /// becomes the current node. Scalar arguments are ignored: use
    /// [`set`](Self::set) for those.
    pub fn call<'a, I>(&mut self, name: &str, args: I) -> Result<Value, BuildError>
    where
        I: IntoIterator<Item = Input<'a>>,
    {
        if self.stack.is_empty() && name == self.options.root_name {
            return self.named_block(name, args);
        }

        let args: Vec<Input<'a>> = args.into_iter().collect();
        if args.is_empty() {
            return Err(BuildError::invalid_usage(name));
        }
        trace!(name, args = args.len(), depth = self.depth(), "call");

        let value = if args.len() > 1 {
            self.in_frame(Frame::Array(Vec::new()), |b| {
                for (i, arg) in args.into_iter().enumerate() {
                    b.call_arg(name, arg)
                        .map_err(|e| e.with_path(PathSegment::Index(i)))?;
                }
                Ok(())
            })
            .map_err(|e| e.with_path(PathSegment::Key(name.into())))?
        } else {
            let arg = args.into_iter().next().unwrap_or(Input::Value(Value::Null));
            self.call_arg(name, arg)
                .map_err(|e| e.with_path(PathSegment::Key(name.into())))?
                .unwrap_or(Value::Null)
        };

        let mut node = Map::new();
        node.element(name.into(), value);
        let node = Value::Object(node);
        self.current = Some(node.clone());
        Ok(node)
    }

    /// Shorthand for calling `name` with a single block.
    pub fn object<F>(&mut self, name: &str, f: F) -> Result<Value, BuildError>
    where
        F: FnOnce(&mut JsonBuilder) -> Result<(), BuildError>,
    {
        self.call(name, [Input::block(f)])
    }

    /// Convert one argument of a call and append it under `name`.
    ///
    /// Returns the appended value, or `None` for a skipped scalar.
    fn call_arg(&mut self, name: &str, arg: Input<'_>) -> Result<Option<Value>, BuildError> {
        if !arg.is_container() {
            debug!(name, found = arg.describe(), "skipping non-container argument");
            return Ok(None);
        }
        let value = self.convert(arg)?;
        self.append(name, value.clone());
        Ok(Some(value))
    }

    /// Assign `value` under `name` in the open container, or in the property
    /// table when nothing is open.
    ///
    /// Text is read as JSON when it holds an object, an array or `null`, and
    /// kept as a literal string otherwise.
    pub fn set<'a>(&mut self, name: &str, value: impl Into<Input<'a>>) -> Result<(), BuildError> {
        let value = match value.into() {
            Input::Text(text) if self.options.parse_text => {
                parse_json_text(&text).unwrap_or(Value::String(text))
            }
            other => self
                .convert(other)
                .map_err(|e| e.with_path(PathSegment::Key(name.into())))?,
        };
        self.append(name, value);
        Ok(())
    }

    /// Look up `name` in the open object, then in the property table.
    pub fn get(&self, name: &str) -> Result<&Value, BuildError> {
        let open = match self.stack.last() {
            Some(Frame::Object(map)) => map.get(name),
            _ => None,
        };
        open.or_else(|| self.properties.get(name)).ok_or_else(|| {
            BuildError::new(BuildErrorKind::MissingProperty { name: name.into() })
        })
    }

    fn append(&mut self, key: &str, value: Value) {
        let policy = self.options.duplicate_keys;
        match self.stack.last_mut() {
            Some(Frame::Object(map)) => match policy {
                DuplicateKeys::Accumulate => map.accumulate(key.into(), value),
                DuplicateKeys::Overwrite => map.element(key.into(), value),
            },
            Some(Frame::Array(items)) => items.push(value),
            None => {
                self.properties.insert(key.into(), value);
            }
        }
    }

    /// Turn any input into a JSON value. Scalars pass through; text stays literal.
    fn convert(&mut self, input: Input<'_>) -> Result<Value, BuildError> {
        match input {
            Input::Block(f) => self.convert_block(f),
            Input::Map(map) => self.convert_map(map),
            Input::List(items) => self.convert_list(items),
            Input::Value(Value::Object(obj)) => self.convert_map(
                obj.into_iter()
                    .map(|(key, value)| (key, Input::Value(value)))
                    .collect(),
            ),
            Input::Value(Value::Array(items)) => {
                self.convert_list(items.into_iter().map(Input::Value).collect())
            }
            Input::Text(text) => Ok(Value::String(text)),
            Input::Value(value) => Ok(value),
        }
    }

    fn convert_block(&mut self, f: crate::BlockFn<'_>) -> Result<Value, BuildError> {
        self.in_frame(Frame::Object(Map::new()), f)
    }

    fn convert_map(&mut self, map: IndexMap<String, Input<'_>>) -> Result<Value, BuildError> {
        self.in_frame(Frame::Object(Map::new()), |b| {
            for (key, input) in map {
                let value = b
                    .convert(input)
                    .map_err(|e| e.with_path(PathSegment::Key(key.clone())))?;
                b.top_object().element(key, value);
            }
            Ok(())
        })
    }

    fn convert_list(&mut self, items: Vec<Input<'_>>) -> Result<Value, BuildError> {
        self.in_frame(Frame::Array(Vec::with_capacity(items.len())), |b| {
            for (i, input) in items.into_iter().enumerate() {
                let value = b
                    .convert(input)
                    .map_err(|e| e.with_path(PathSegment::Index(i)))?;
                b.top_array().push(value);
            }
            Ok(())
        })
    }

    // Only called from inside `in_frame`, which guarantees the frame shape.
    fn top_object(&mut self) -> &mut Map<String, Value> {
        match self.stack.last_mut() {
            Some(Frame::Object(obj)) => obj,
            other => unreachable!("expected an open object, found {other:?}"),
        }
    }

    fn top_array(&mut self) -> &mut Vec<Value> {
        match self.stack.last_mut() {
            Some(Frame::Array(items)) => items,
            other => unreachable!("expected an open array, found {other:?}"),
        }
    }

    /// Push `frame`, run `f`, and pop the frame again whether `f` succeeded or not.
    fn in_frame<F>(&mut self, frame: Frame, f: F) -> Result<Value, BuildError>
    where
        F: FnOnce(&mut JsonBuilder) -> Result<(), BuildError>,
    {
        self.stack.push(frame);
        let result = f(self);
        let value = self.stack.pop().map(Frame::into_value).unwrap_or(Value::Null);
        result?;
        self.current = Some(value.clone());
        Ok(value)
    }
}
