//! Engine values and rows.
//!
//! The graph engine speaks scalars, lists and string-keyed maps, both as
//! query parameters and in results. `Value` is that whole universe; a
//! [`Row`] is the ordered tuple the engine returns for one matched (or
//! aggregated) traversal path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One engine value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// One tuple returned by the engine.
pub type Row = Vec<Value>;

const NULL: Value = Value::Null;
const EMPTY: &[Value] = &[];

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Optional text column: an engine null reads as the empty string.
    pub fn text_or_empty(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Optional nested collection: an engine null reads as no elements.
    pub fn list_or_empty(&self) -> Option<&[Value]> {
        match self {
            Value::Null => Some(EMPTY),
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Map field lookup; absent keys and non-maps read as null.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Map(entries) => entries.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
