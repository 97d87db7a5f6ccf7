//! Error taxonomy.
//!
//! Two families, matching when they can happen:
//! - [`ParserError`]: definition time, caller misuse of the DSL. Fail fast.
//! - [`ParsingError`]: parse time, malformed end-user input. Recoverable.

use thiserror::Error;

use crate::definition::DeclKind;

/// Underlying failure produced by a cast.
pub type CastFailure = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while declaring switches, options, arguments or stdin.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Declaration name is not identifier-shaped
    #[error("{kind} name has to be an identifier, got {name:?}")]
    NameArgumentNotSymbol { kind: DeclKind, name: String },

    /// Name or short token collides with a reserved field or the help tokens
    #[error("{kind} {name}: '{token}' is reserved")]
    Reserved {
        kind: DeclKind,
        name: String,
        token: String,
    },

    /// Options bag is not a key-value table
    #[error("{kind} options has to be a table, got {found}")]
    OptionsArgumentNotHash { kind: DeclKind, found: &'static str },

    /// Options bag entry has the wrong type
    #[error("{kind} {name}: option '{key}' has to be {expected}, got {found}")]
    InvalidOptionValue {
        kind: DeclKind,
        name: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Options bag entry is not recognised for this kind of declaration
    #[error("{kind} {name}: unknown option '{key}'")]
    UnknownOptionKey {
        kind: DeclKind,
        name: String,
        key: String,
    },

    /// Named cast does not exist
    #[error("{kind} {name}: unknown cast '{cast}'")]
    UnknownCast {
        kind: DeclKind,
        name: String,
        cast: String,
    },
}

impl ParserError {
    /// Stable identifier for the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            ParserError::NameArgumentNotSymbol { .. } => "name_argument_not_symbol",
            ParserError::Reserved { .. } => "reserved",
            ParserError::OptionsArgumentNotHash { .. } => "options_argument_not_hash",
            ParserError::InvalidOptionValue { .. } => "invalid_option_value",
            ParserError::UnknownOptionKey { .. } => "unknown_option_key",
            ParserError::UnknownCast { .. } => "unknown_cast",
        }
    }
}

/// A value could not be converted by its descriptor's cast.
#[derive(Debug, Error)]
#[error("failed to cast: {raw} to type: {cast}: {source}")]
pub struct CastError {
    /// Raw token text that was rejected.
    pub raw: String,
    /// Name of the cast (e.g., "integer").
    pub cast: String,
    #[source]
    pub source: CastFailure,
}

/// Errors raised while parsing a token list. First failure wins.
#[derive(Debug, Error)]
pub enum ParsingError {
    /// Option was the last token, no value followed
    #[error("missing value for option {switch}")]
    MissingOptionValue { option: String, switch: String },

    /// Switch-shaped token matching no declared switch or option
    #[error("unknown switch {token}")]
    UnknownSwitch { token: String },

    /// Mandatory options absent from the input, sorted by long token
    #[error("mandatory options not specified: {}", .switches.join(", "))]
    MandatoryOptionsNotSpecified { switches: Vec<String> },

    /// No token left for a mandatory positional argument
    #[error("mandatory argument {argument} not given")]
    MandatoryArgumentNotSpecified { name: String, argument: String },

    /// Cast rejected a value
    #[error(transparent)]
    Cast(#[from] CastError),

    /// Stdin source could not be read
    #[error("failed to read stdin: {0}")]
    StdinUnreadable(#[source] std::io::Error),
}

impl ParsingError {
    /// Stable identifier for the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            ParsingError::MissingOptionValue { .. } => "missing_option_value",
            ParsingError::UnknownSwitch { .. } => "unknown_switch",
            ParsingError::MandatoryOptionsNotSpecified { .. } => "mandatory_options_not_specified",
            ParsingError::MandatoryArgumentNotSpecified { .. } => {
                "mandatory_argument_not_specified"
            }
            ParsingError::Cast(_) => "cast_error",
            ParsingError::StdinUnreadable(_) => "stdin_unreadable",
        }
    }
}

/// Misuse of the typed accessors on parsed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("no value for '{name}'")]
    Missing { name: String },

    #[error("value '{name}' is {found}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
