//! Ordered property bag of a content node.
//!
//! Values are stored as JSON primitives exactly as they were authored. The
//! typed getters coerce between representations the way content authors
//! expect (`"5"` reads as `5`, `"false"` as `false`). Multi-valued properties
//! read as their first element when a single value is requested.
//!
//! The `*_or` getters implement the fail-soft policy used by component
//! models: a missing property yields the default silently, a malformed one
//! yields the default and a `warn!` event.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::CoercionError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(IndexMap<String, Value>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reads a property as text. Numbers and booleans are rendered; objects
    /// and `null` are treated as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.scalar(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Reads a property as a boolean.
    ///
    /// Accepts JSON booleans and the strings `true`/`false` in any case.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, CoercionError> {
        let Some(value) = self.scalar(key) else {
            return Ok(None);
        };
        match value {
            Value::Bool(flag) => Ok(Some(*flag)),
            Value::String(text) if text.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
            Value::String(text) if text.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
            other => Err(mismatch(key, "a boolean", other)),
        }
    }

    /// Reads a property as a 32-bit integer.
    ///
    /// Accepts integral JSON numbers in range (including `5.0`) and strings
    /// that parse as integers once surrounding whitespace is trimmed.
    pub fn get_i32(&self, key: &str) -> Result<Option<i32>, CoercionError> {
        let Some(value) = self.scalar(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(number) => number_as_i32(number),
            Value::String(text) => text.trim().parse::<i32>().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or_else(|| mismatch(key, "an integer", value))
    }

    pub fn get_str_or(&self, key: &str, default: &str) -> String {
        self.get_str(key).unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        match self.get_bool(key) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                warn!(property = key, error = %error, default, "malformed property; using default");
                default
            }
        }
    }

    pub fn get_i32_or(&self, key: &str, default: i32) -> i32 {
        match self.get_i32(key) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                warn!(property = key, error = %error, default, "malformed property; using default");
                default
            }
        }
    }

    fn scalar(&self, key: &str) -> Option<&Value> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::Array(items) => items.first().filter(|item| !item.is_null()),
            other => Some(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

fn number_as_i32(number: &serde_json::Number) -> Option<i32> {
    if let Some(wide) = number.as_i64() {
        return i32::try_from(wide).ok();
    }
    let float = number.as_f64()?;
    let in_range = float >= f64::from(i32::MIN) && float <= f64::from(i32::MAX);
    (float.fract() == 0.0 && in_range).then_some(float as i32)
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> CoercionError {
    CoercionError {
        key: key.to_string(),
        expected,
        found: describe(found),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => format!("boolean {flag}"),
        Value::Number(number) => format!("number {number}"),
        Value::String(text) => format!("string {text:?}"),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}
