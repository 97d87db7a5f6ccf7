//! Stdin binding descriptor.

use std::fmt;

use crate::definition::{dash_case, validate_name, Cast, DeclKind};
use crate::error::ParserError;

/// Options bag accepted by `stdin`.
#[derive(Debug, Clone, Default)]
pub struct StdinSpec {
    pub description: Option<String>,
    pub cast: Cast,
}

impl StdinSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }
}

/// The single stdin binding of a parser definition.
#[derive(Debug, Clone)]
pub struct StdinDef {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cast: Cast,
}

impl StdinDef {
    pub fn new(name: Option<&str>, spec: StdinSpec) -> Result<Self, ParserError> {
        if let Some(name) = name {
            validate_name(DeclKind::Stdin, name)?;
        }
        Ok(Self {
            name: name.map(str::to_string),
            description: spec.description,
            cast: spec.cast,
        })
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }
}

impl fmt::Display for StdinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(&dash_case(name)),
            None => f.write_str("stdin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_binding_displays_as_stdin() {
        let def = StdinDef::new(None, StdinSpec::new()).unwrap();
        assert_eq!(def.to_string(), "stdin");
    }

    #[test]
    fn named_binding_is_dash_cased() {
        let def = StdinDef::new(Some("log_data"), StdinSpec::new().cast(Cast::Yaml)).unwrap();
        assert_eq!(def.to_string(), "log-data");
        assert_eq!(def.cast.name(), "yaml");
    }
}
