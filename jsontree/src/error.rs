//! Error types for tree building.

use alloc::string::String;
use alloc::vec::Vec;

/// A single step from the root of the tree being built to the place
/// where an error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in an object
    Key(String),
    /// An index in an array (or in an argument list)
    Index(usize),
}

impl core::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{key}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error returned by [`JsonBuilder`](crate::JsonBuilder) operations.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildError {
    /// The specific kind of error
    pub kind: BuildErrorKind,
    /// Where in the tree the error was raised, outermost segment first
    pub path: Vec<PathSegment>,
}

/// The different ways building a tree can fail.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuildErrorKind {
    /// A named invocation was made without any argument.
    InvalidUsage {
        /// The name that was invoked.
        name: String,
    },

    /// An argument was not a block, map or list where one is required.
    InvalidArgument {
        /// The name that was invoked.
        name: String,
        /// What was supplied instead.
        found: &'static str,
    },

    /// A property lookup found nothing in the open object or the property table.
    MissingProperty {
        /// The property that was looked up.
        name: String,
    },

    /// An error raised from inside a user block.
    Custom(String),
}

impl core::fmt::Display for BuildErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuildErrorKind::InvalidUsage { name } => {
                write!(f, "`{name}` invoked without arguments")
            }
            BuildErrorKind::InvalidArgument { name, found } => {
                write!(
                    f,
                    "invalid argument for `{name}`: expected a block, map or list, found {found}"
                )
            }
            BuildErrorKind::MissingProperty { name } => {
                write!(f, "no such property: `{name}`")
            }
            BuildErrorKind::Custom(msg) => f.write_str(msg),
        }
    }
}

impl BuildError {
    /// Create a new error with an empty path.
    pub fn new(kind: BuildErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// Create an error carrying a free-form message, for use inside blocks.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::new(BuildErrorKind::Custom(msg.into()))
    }

    pub(crate) fn invalid_usage(name: &str) -> Self {
        Self::new(BuildErrorKind::InvalidUsage { name: name.into() })
    }

    pub(crate) fn invalid_argument(name: &str, found: &'static str) -> Self {
        Self::new(BuildErrorKind::InvalidArgument {
            name: name.into(),
            found,
        })
    }

    /// Prepend a path segment (we add segments while unwinding, innermost first).
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Render the path as a string like `.books[1].title`.
    pub fn path_string(&self) -> String {
        use core::fmt::Write;

        let mut out = String::new();
        for segment in &self.path {
            let _ = write!(out, "{segment}");
        }
        out
    }
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_prepended_while_unwinding() {
        let err = BuildError::invalid_argument("json", "a number")
            .with_path(PathSegment::Key("title".into()))
            .with_path(PathSegment::Index(1))
            .with_path(PathSegment::Key("books".into()));

        assert_eq!(err.path_string(), ".books[1].title");
        assert_eq!(
            err.to_string(),
            "at .books[1].title: invalid argument for `json`: expected a block, map or list, found a number"
        );
    }

    #[test]
    fn display_without_path() {
        let err = BuildError::invalid_usage("json");
        assert_eq!(err.to_string(), "`json` invoked without arguments");
    }
}
