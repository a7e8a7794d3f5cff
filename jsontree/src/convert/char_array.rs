use alloc::string::String;
use alloc::vec::Vec;

use serde_json::Value;
use tracing::trace;

use super::{ConvertError, ConvertErrorKind};

/// A (possibly multi-dimensional) array of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharArray {
    /// The innermost dimension
    Chars(Vec<char>),
    /// An outer dimension
    Nested(Vec<CharArray>),
}

impl CharArray {
    /// Number of dimensions. An empty array counts as one.
    pub fn dimensions(&self) -> usize {
        match self {
            CharArray::Chars(_) => 1,
            CharArray::Nested(items) => 1 + items.first().map_or(0, CharArray::dimensions),
        }
    }

    /// Render back to JSON, each character as a one-character string.
    pub fn to_value(&self) -> Value {
        match self {
            CharArray::Chars(chars) => chars
                .iter()
                .map(|c| Value::String(String::from(*c)))
                .collect(),
            CharArray::Nested(items) => items.iter().map(CharArray::to_value).collect(),
        }
    }
}

/// Converts JSON arrays into [`CharArray`]s.
///
/// Every scalar element contributes the first character of its string form,
/// so `"3.3"` becomes `'3'` and `true` becomes `'t'`.
#[derive(Debug, Clone, Default)]
pub struct CharArrayConverter {
    default: Option<char>,
}

impl CharArrayConverter {
    /// A converter that fails on elements without a character.
    pub fn new() -> Self {
        Self::default()
    }

    /// A converter that uses `default` for empty strings and nulls.
    pub fn with_default(default: char) -> Self {
        Self {
            default: Some(default),
        }
    }

    /// Convert `value`. A top-level `null` converts to `None`.
    pub fn convert(&self, value: &Value) -> Result<Option<CharArray>, ConvertError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => self.convert_array(items).map(Some),
            other => Err(ConvertError::new(ConvertErrorKind::NotAnArray {
                found: describe(other),
            })),
        }
    }

    fn convert_array(&self, items: &[Value]) -> Result<CharArray, ConvertError> {
        let nested = items.first().is_some_and(Value::is_array);
        trace!(len = items.len(), nested, "converting char array");

        if nested {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Value::Array(inner) = item else {
                    return Err(ConvertError::new(ConvertErrorKind::Ragged).at(i));
                };
                out.push(self.convert_array(inner).map_err(|e| e.at(i))?);
            }
            Ok(CharArray::Nested(out))
        } else {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(self.convert_char(item).map_err(|e| e.at(i))?);
            }
            Ok(CharArray::Chars(out))
        }
    }

    fn convert_char(&self, value: &Value) -> Result<char, ConvertError> {
        let first = match value {
            Value::Array(_) => return Err(ConvertError::new(ConvertErrorKind::Ragged)),
            Value::Object(_) => {
                return Err(ConvertError::new(ConvertErrorKind::NotAnArray {
                    found: "an object",
                }));
            }
            Value::Null => None,
            Value::String(s) => s.chars().next(),
            Value::Bool(b) => Some(if *b { 't' } else { 'f' }),
            Value::Number(n) => n.to_string().chars().next(),
        };
        first
            .or(self.default)
            .ok_or_else(|| ConvertError::new(ConvertErrorKind::NoCharacter))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dimensions_follow_nesting() {
        let conv = CharArrayConverter::new();
        let three = conv
            .convert(&json!([[["1"], ["2"]], [["3"], ["4"]]]))
            .unwrap()
            .unwrap();
        assert_eq!(three.dimensions(), 3);
        assert_eq!(CharArray::Chars(Vec::new()).dimensions(), 1);
    }

    #[test]
    fn numbers_and_booleans_use_their_first_character() {
        let conv = CharArrayConverter::new();
        assert_eq!(
            conv.convert(&json!([12, 3.5, true, false])).unwrap(),
            Some(CharArray::Chars(vec!['1', '3', 't', 'f']))
        );
    }
}
