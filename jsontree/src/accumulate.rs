//! Accumulating inserts on JSON objects.
//!
//! `serde_json::Map` only knows how to overwrite. The builder needs the other
//! behavior too: a key written twice turns into an array holding every value.

use alloc::string::String;
use alloc::vec;

use serde_json::{Map, Value};

/// Extra insertion operations on a JSON object.
pub trait ObjectExt {
    /// Insert `value` under `key`, collecting repeated keys into an array.
    ///
    /// - absent key: `value` is stored as is
    /// - existing array: `value` is pushed onto it
    /// - any other existing value: replaced by `[existing, value]`
    fn accumulate(&mut self, key: String, value: Value);

    /// Insert `value` under `key`, replacing whatever was there.
    fn element(&mut self, key: String, value: Value);
}

impl ObjectExt for Map<String, Value> {
    fn accumulate(&mut self, key: String, value: Value) {
        match self.get_mut(&key) {
            None => {
                self.insert(key, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let previous = existing.take();
                *existing = Value::Array(vec![previous, value]);
            }
        }
    }

    fn element(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }
}
