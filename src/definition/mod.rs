//! Definition model — immutable descriptors built at configuration time.
//!
//! ```text
//! name ─▶ validate ─▶ derive tokens ─▶ SwitchDef / OptionDef / ArgumentDef / StdinDef
//! ```
//!
//! Descriptors never change after construction; the parser only reads them.

mod argument;
mod cast;
mod option;
mod stdin;
mod switch;

use std::fmt;

pub use argument::{ArgumentDef, ArgumentSpec};
pub use cast::Cast;
pub use option::{OptionDef, OptionSpec};
pub use stdin::{StdinDef, StdinSpec};
pub use switch::{SwitchDef, SwitchSpec};

use crate::error::ParserError;
use crate::parser::HELP_TOKENS;

/// Which DSL call produced a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Switch,
    Option,
    Argument,
    Stdin,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclKind::Switch => "switch",
            DeclKind::Option => "option",
            DeclKind::Argument => "argument",
            DeclKind::Stdin => "stdin",
        })
    }
}

/// Field names kept apart in the parsed values.
pub const RESERVED_NAMES: [&str; 2] = ["help", "stdin"];

/// Reject names that are not identifier-shaped (`[A-Za-z_][A-Za-z0-9_]*`),
/// and field names that collide with the reserved `help` / `stdin` fields.
pub(crate) fn validate_name(kind: DeclKind, name: &str) -> Result<(), ParserError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid {
        return Err(ParserError::NameArgumentNotSymbol {
            kind,
            name: name.to_string(),
        });
    }

    // The stdin binding's name is only a label, never a field.
    if kind != DeclKind::Stdin && RESERVED_NAMES.contains(&name) {
        return Err(ParserError::Reserved {
            kind,
            name: name.to_string(),
            token: name.to_string(),
        });
    }

    Ok(())
}

/// `output_file` → `output-file`
pub(crate) fn dash_case(name: &str) -> String {
    name.replace('_', "-")
}

/// `output_file` → `--output-file`
pub(crate) fn long_token(name: &str) -> String {
    format!("--{}", dash_case(name))
}

/// `'o'` → `-o`
pub(crate) fn short_token(short: char) -> String {
    format!("-{}", short)
}

/// Derive the short token, refusing ones the help check always claims.
pub(crate) fn validate_short(
    kind: DeclKind,
    name: &str,
    short: Option<char>,
) -> Result<Option<String>, ParserError> {
    let Some(token) = short.map(short_token) else {
        return Ok(None);
    };
    if HELP_TOKENS.contains(&token.as_str()) {
        return Err(ParserError::Reserved {
            kind,
            name: name.to_string(),
            token,
        });
    }
    Ok(Some(token))
}
