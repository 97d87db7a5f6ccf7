//! Casts — raw token text → typed [`Value`].

use std::fmt;
use std::sync::Arc;

use crate::error::{CastError, CastFailure};
use crate::values::Value;

type CastFn = dyn Fn(&str) -> Result<Value, CastFailure> + Send + Sync;

/// Conversion applied to every option, argument and stdin value.
#[derive(Clone, Default)]
pub enum Cast {
    /// Keep the token as text.
    #[default]
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Structured YAML document.
    Yaml,
    /// Caller-supplied conversion with a display name.
    Custom { name: String, func: Arc<CastFn> },
}

impl Cast {
    /// Build a named custom cast.
    ///
    /// ```
    /// use argdecl::{Cast, Value};
    ///
    /// let port = Cast::custom("port", |raw| {
    ///     raw.parse::<u16>()
    ///         .map(|p| Value::Integer(p.into()))
    ///         .map_err(Into::into)
    /// });
    /// assert_eq!(port.name(), "port");
    /// ```
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastFailure> + Send + Sync + 'static,
    {
        Cast::Custom {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Look up a built-in cast by its name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Cast::String),
            "integer" => Some(Cast::Integer),
            "float" => Some(Cast::Float),
            "yaml" => Some(Cast::Yaml),
            _ => None,
        }
    }

    /// Name used in cast error messages.
    pub fn name(&self) -> &str {
        match self {
            Cast::String => "string",
            Cast::Integer => "integer",
            Cast::Float => "float",
            Cast::Yaml => "yaml",
            Cast::Custom { name, .. } => name,
        }
    }

    /// Convert `raw`, wrapping any failure with the raw text and cast name.
    pub fn apply(&self, raw: &str) -> Result<Value, CastError> {
        let converted = match self {
            Cast::String => Ok(Value::Text(raw.to_string())),
            Cast::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(CastFailure::from),
            Cast::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(CastFailure::from),
            Cast::Yaml => serde_yaml::from_str::<serde_yaml::Value>(raw)
                .map(Value::Yaml)
                .map_err(CastFailure::from),
            Cast::Custom { func, .. } => func(raw),
        };

        converted.map_err(|source| CastError {
            raw: raw.to_string(),
            cast: self.name().to_string(),
            source,
        })
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Custom { name, .. } => f.debug_tuple("Custom").field(name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_cast_is_identity() {
        assert_eq!(
            Cast::String.apply(" a b ").unwrap(),
            Value::Text(" a b ".to_string())
        );
    }

    #[test]
    fn integer_cast_parses_signed() {
        assert_eq!(Cast::Integer.apply("-12").unwrap(), Value::Integer(-12));
    }

    #[test]
    fn integer_cast_failure_carries_context() {
        let err = Cast::Integer.apply("abc").unwrap_err();
        assert_eq!(err.raw, "abc");
        assert_eq!(err.cast, "integer");
        assert!(err
            .to_string()
            .starts_with("failed to cast: abc to type: integer: "));
    }

    #[test]
    fn float_cast() {
        assert_eq!(Cast::Float.apply("2.5").unwrap(), Value::Float(2.5));
    }

    #[test]
    fn yaml_cast_parses_mapping() {
        let value = Cast::Yaml.apply("a: 1\nb: [x, y]\n").unwrap();
        let Value::Yaml(doc) = value else {
            panic!("expected yaml value");
        };
        assert_eq!(doc["a"], serde_yaml::Value::from(1));
        assert_eq!(doc["b"][1], serde_yaml::Value::from("y"));
    }

    #[test]
    fn custom_cast_reports_its_name() {
        let even = Cast::custom("even", |raw| {
            let n: i64 = raw.parse()?;
            if n % 2 == 0 {
                Ok(Value::Integer(n))
            } else {
                Err(format!("{} is odd", n).into())
            }
        });
        assert_eq!(even.apply("4").unwrap(), Value::Integer(4));

        let err = even.apply("3").unwrap_err();
        assert_eq!(err.to_string(), "failed to cast: 3 to type: even: 3 is odd");
    }

    #[test]
    fn builtin_lookup() {
        assert_eq!(Cast::builtin("float").map(|c| c.name().to_string()), Some("float".into()));
        assert!(Cast::builtin("decimal").is_none());
    }
}
