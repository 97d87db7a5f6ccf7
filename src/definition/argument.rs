//! Positional argument descriptor.

use std::fmt;

use crate::definition::{dash_case, validate_name, Cast, DeclKind};
use crate::error::ParserError;

/// Options bag accepted by `argument`.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSpec {
    pub optional: bool,
    pub default: Option<String>,
    pub cast: Cast,
    pub description: Option<String>,
}

impl ArgumentSpec {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn default(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared positional argument.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    pub name: String,
    pub optional: bool,
    pub default: Option<String>,
    pub cast: Cast,
    pub description: Option<String>,
}

impl ArgumentDef {
    pub fn new(name: &str, spec: ArgumentSpec) -> Result<Self, ParserError> {
        validate_name(DeclKind::Argument, name)?;
        Ok(Self {
            name: name.to_string(),
            optional: spec.optional,
            default: spec.default,
            cast: spec.cast,
            description: spec.description,
        })
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }
}

/// Placeholder used in usage text and errors: `log-file`, or `[log-file]` when optional.
impl fmt::Display for ArgumentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "[{}]", dash_case(&self.name))
        } else {
            f.write_str(&dash_case(&self.name))
        }
    }
}
