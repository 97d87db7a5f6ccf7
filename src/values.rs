//! Parsed values — the result container handed back to the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ValueError;

/// A single cast value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
    Integer(i64),
    Float(f64),
    Yaml(serde_yaml::Value),
}

impl Value {
    /// Human-readable type name used in accessor errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Yaml(_) => "yaml",
        }
    }
}

/// Conversion from a [`Value`] into a concrete Rust type.
pub trait FromValue: Sized {
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for serde_yaml::Value {
    const TYPE_NAME: &'static str = "yaml";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Yaml(doc) => Some(doc.clone()),
            _ => None,
        }
    }
}

/// Fields accumulated by a parse, keyed by declaration name.
///
/// `help` and `stdin` are reserved and kept apart from declared fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Values {
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdin: Option<Value>,
}

impl Values {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn help_only(usage: String) -> Self {
        Self {
            help: Some(usage),
            ..Self::default()
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub(crate) fn set_stdin(&mut self, value: Value) {
        self.stdin = Some(value);
    }

    /// Raw access to a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether a field was set (by input or by default).
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Typed access to a field.
    pub fn value<T: FromValue>(&self, name: &str) -> Result<T, ValueError> {
        let value = self.get(name).ok_or_else(|| ValueError::Missing {
            name: name.to_string(),
        })?;
        T::from_value(value).ok_or_else(|| ValueError::TypeMismatch {
            name: name.to_string(),
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    /// Typed access to a field that may legitimately be absent.
    pub fn optional<T: FromValue>(&self, name: &str) -> Result<Option<T>, ValueError> {
        match self.value(name) {
            Ok(v) => Ok(Some(v)),
            Err(ValueError::Missing { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// State of a switch; absent switches are off.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Bool(true)))
    }

    /// Rendered usage, present only when help was requested.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Cast stdin content, present only when a stdin binding is declared.
    pub fn stdin(&self) -> Option<&Value> {
        self.stdin.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
