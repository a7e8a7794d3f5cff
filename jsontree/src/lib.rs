#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod error;
pub use error::{BuildError, BuildErrorKind, PathSegment};

mod options;
pub use options::{BuilderOptions, DuplicateKeys};

mod input;
pub use input::{BlockFn, Input};

mod builder;
pub use builder::JsonBuilder;

pub mod accumulate;
pub use accumulate::ObjectExt;

mod text;
pub use text::parse_json_text;

pub mod convert;

pub use serde_json::{Map, Value};
