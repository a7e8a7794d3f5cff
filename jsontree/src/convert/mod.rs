//! Conversions from JSON values into primitive Rust arrays.

mod char_array;
pub use char_array::{CharArray, CharArrayConverter};

use alloc::vec::Vec;

/// Error returned when a JSON value can't be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    /// The specific kind of error
    pub kind: ConvertErrorKind,
    /// Indices from the outermost array down to the offending element
    pub indices: Vec<usize>,
}

/// The different ways a conversion can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertErrorKind {
    /// The value (or a nested element) isn't an array where one is required.
    NotAnArray {
        /// A short description of what was found.
        found: &'static str,
    },
    /// One level of a nested array mixes arrays with scalars.
    Ragged,
    /// An element has no character to take (empty string or null) and no
    /// default was configured.
    NoCharacter,
}

impl core::fmt::Display for ConvertErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConvertErrorKind::NotAnArray { found } => write!(f, "expected an array, found {found}"),
            ConvertErrorKind::Ragged => f.write_str("arrays and scalars mixed at the same depth"),
            ConvertErrorKind::NoCharacter => {
                f.write_str("element has no character and no default is set")
            }
        }
    }
}

impl ConvertError {
    pub(crate) fn new(kind: ConvertErrorKind) -> Self {
        Self {
            kind,
            indices: Vec::new(),
        }
    }

    pub(crate) fn at(mut self, index: usize) -> Self {
        self.indices.insert(0, index);
        self
    }
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for i in &self.indices {
            write!(f, "[{i}]")?;
        }
        if !self.indices.is_empty() {
            f.write_str(": ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl core::error::Error for ConvertError {}
