//! Declarative command-line parsing.
//!
//! ```text
//! CliBuilder (DSL) → Cli → parse(tokens, stdin) → Values | ParsingError
//!                      └──→ usage() → text
//! ```
//!
//! Describe switches, options, positional arguments and an optional stdin
//! binding once; parse any number of token lists against it.

pub mod builder;
pub mod cli;
pub mod collections;
pub mod definition;
pub mod error;
pub mod exit;
pub mod logging;
pub mod parser;
pub mod schema;
pub mod usage;
pub mod values;

pub use builder::CliBuilder;
pub use cli::Cli;
pub use collections::{is_switch, Flag, FlagSet, Options, Switches};
pub use definition::{
    ArgumentDef, ArgumentSpec, Cast, DeclKind, OptionDef, OptionSpec, StdinDef, StdinSpec,
    SwitchDef, SwitchSpec,
};
pub use error::{CastError, CastFailure, ParserError, ParsingError, ValueError};
pub use exit::{Exit, EXIT_HELP, EXIT_PARSE_ERROR};
pub use parser::HELP_TOKENS;
pub use schema::{Schema, SchemaError};
pub use usage::Usage;
pub use values::{FromValue, Value, Values};
