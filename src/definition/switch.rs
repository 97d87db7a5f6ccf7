//! Switch descriptor — a boolean presence flag.

use crate::definition::{long_token, validate_name, validate_short, DeclKind};
use crate::error::ParserError;

/// Options bag accepted by `switch`.
#[derive(Debug, Clone, Default)]
pub struct SwitchSpec {
    pub short: Option<char>,
    pub description: Option<String>,
}

impl SwitchSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A declared switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchDef {
    /// Field name in the parsed values.
    pub name: String,
    /// Canonical long token (e.g., "--verbose").
    pub switch: String,
    /// Optional short token (e.g., "-v").
    pub switch_short: Option<String>,
    pub description: Option<String>,
}

impl SwitchDef {
    pub fn new(name: &str, spec: SwitchSpec) -> Result<Self, ParserError> {
        validate_name(DeclKind::Switch, name)?;
        Ok(Self {
            name: name.to_string(),
            switch: long_token(name),
            switch_short: validate_short(DeclKind::Switch, name, spec.short)?,
            description: spec.description,
        })
    }

    pub fn has_short(&self) -> bool {
        self.switch_short.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }
}
