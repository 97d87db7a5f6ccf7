//! Option descriptor — a flag carrying exactly one value token.

use crate::definition::{long_token, validate_name, validate_short, Cast, DeclKind};
use crate::error::ParserError;

/// Options bag accepted by `option`.
#[derive(Debug, Clone, Default)]
pub struct OptionSpec {
    pub short: Option<char>,
    pub mandatory: bool,
    pub default: Option<String>,
    pub cast: Cast,
    pub description: Option<String>,
}

impl OptionSpec {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Raw default, cast at parse time like any supplied value.
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

/// A declared option.
#[derive(Debug, Clone)]
pub struct OptionDef {
    pub name: String,
    pub switch: String,
    pub switch_short: Option<String>,
    pub description: Option<String>,
    /// Must appear on the command line; a default does not satisfy it.
    pub mandatory: bool,
    pub default: Option<String>,
    pub cast: Cast,
}

impl OptionDef {
    pub fn new(name: &str, spec: OptionSpec) -> Result<Self, ParserError> {
        validate_name(DeclKind::Option, name)?;
        Ok(Self {
            name: name.to_string(),
            switch: long_token(name),
            switch_short: validate_short(DeclKind::Option, name, spec.short)?,
            description: spec.description,
            mandatory: spec.mandatory,
            default: spec.default,
            cast: spec.cast,
        })
    }

    pub fn has_short(&self) -> bool {
        self.switch_short.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
