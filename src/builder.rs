//! Declaration DSL — an explicit builder handed to a configuration closure.
//!
//! ```
//! use argdecl::{ArgumentSpec, Cast, Cli, OptionSpec, SwitchSpec};
//!
//! let cli = Cli::new(|cli| {
//!     cli.program("tail").description("Print the end of a file");
//!     cli.switch("follow", SwitchSpec::new().short('f'))?;
//!     cli.option("lines", OptionSpec::new().short('n').default("10").cast(Cast::Integer))?;
//!     cli.argument("file", ArgumentSpec::new())?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let values = cli.parse(["-n", "5", "log.txt"], std::io::empty()).unwrap();
//! assert_eq!(values.value::<i64>("lines").unwrap(), 5);
//! ```

use tracing::debug;

use crate::cli::Cli;
use crate::collections::{Options, Switches};
use crate::definition::{
    ArgumentDef, ArgumentSpec, Cast, DeclKind, OptionDef, OptionSpec, StdinDef, StdinSpec,
    SwitchDef, SwitchSpec,
};
use crate::error::ParserError;

/// Accumulates declarations in order. Consumed by [`CliBuilder::build`].
#[derive(Debug, Default)]
pub struct CliBuilder {
    program: Option<String>,
    description: Option<String>,
    switches: Switches,
    options: Options,
    arguments: Vec<ArgumentDef>,
    stdin: Option<StdinDef>,
}

impl CliBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program name shown in the usage line. Defaults to the executable name.
    pub fn program(&mut self, name: impl Into<String>) -> &mut Self {
        self.program = Some(name.into());
        self
    }

    pub fn description(&mut self, text: impl Into<String>) -> &mut Self {
        self.description = Some(text.into());
        self
    }

    /// Bind stdin. A second call replaces the first binding.
    pub fn stdin(&mut self, name: Option<&str>, spec: StdinSpec) -> Result<&mut Self, ParserError> {
        let def = StdinDef::new(name, spec)?;
        debug!(binding = %def, cast = def.cast.name(), "declared stdin");
        self.stdin = Some(def);
        Ok(self)
    }

    pub fn argument(&mut self, name: &str, spec: ArgumentSpec) -> Result<&mut Self, ParserError> {
        let def = ArgumentDef::new(name, spec)?;
        debug!(argument = %def, optional = def.optional, "declared argument");
        self.arguments.push(def);
        Ok(self)
    }

    pub fn switch(&mut self, name: &str, spec: SwitchSpec) -> Result<&mut Self, ParserError> {
        let def = SwitchDef::new(name, spec)?;
        debug!(switch = %def.switch, "declared switch");
        self.switches.push(def);
        Ok(self)
    }

    pub fn option(&mut self, name: &str, spec: OptionSpec) -> Result<&mut Self, ParserError> {
        let def = OptionDef::new(name, spec)?;
        debug!(
            option = %def.switch,
            mandatory = def.mandatory,
            has_default = def.has_default(),
            "declared option"
        );
        self.options.push(def);
        Ok(self)
    }

    /// Declare from loosely-typed values (e.g., a parsed TOML document).
    ///
    /// `name` must be an identifier string (optional only for stdin) and
    /// `options` must be a table; its keys are the options bag of the
    /// matching typed call.
    pub fn declare(
        &mut self,
        kind: DeclKind,
        name: Option<&toml::Value>,
        options: &toml::Value,
    ) -> Result<&mut Self, ParserError> {
        let name = match name {
            Some(toml::Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                return Err(ParserError::NameArgumentNotSymbol {
                    kind,
                    name: other.to_string(),
                })
            }
            None if kind == DeclKind::Stdin => None,
            None => {
                return Err(ParserError::NameArgumentNotSymbol {
                    kind,
                    name: String::new(),
                })
            }
        };

        let table = options
            .as_table()
            .ok_or(ParserError::OptionsArgumentNotHash {
                kind,
                found: options.type_str(),
            })?;
        let bag = Bag {
            kind,
            name: name.unwrap_or("stdin"),
            table,
        };

        match kind {
            DeclKind::Switch => {
                bag.allow(&["short", "description"])?;
                let spec = SwitchSpec {
                    short: bag.short()?,
                    description: bag.string("description")?,
                };
                self.switch(bag.name, spec)
            }
            DeclKind::Option => {
                bag.allow(&["short", "mandatory", "default", "cast", "description"])?;
                let spec = OptionSpec {
                    short: bag.short()?,
                    mandatory: bag.boolean("mandatory")?.unwrap_or(false),
                    default: bag.raw("default")?,
                    cast: bag.cast()?,
                    description: bag.string("description")?,
                };
                self.option(bag.name, spec)
            }
            DeclKind::Argument => {
                bag.allow(&["optional", "default", "cast", "description"])?;
                let spec = ArgumentSpec {
                    optional: bag.boolean("optional")?.unwrap_or(false),
                    default: bag.raw("default")?,
                    cast: bag.cast()?,
                    description: bag.string("description")?,
                };
                self.argument(bag.name, spec)
            }
            DeclKind::Stdin => {
                bag.allow(&["description", "cast"])?;
                let spec = StdinSpec {
                    description: bag.string("description")?,
                    cast: bag.cast()?,
                };
                self.stdin(name, spec)
            }
        }
    }

    pub fn build(self) -> Cli {
        let program = self.program.unwrap_or_else(default_program_name);
        Cli::from_parts(
            program,
            self.description,
            self.switches,
            self.options,
            self.arguments,
            self.stdin,
        )
    }
}

fn default_program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(std::path::Path::new)
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "cli".to_string())
}

/// Typed reads from a loosely-typed options bag.
struct Bag<'a> {
    kind: DeclKind,
    name: &'a str,
    table: &'a toml::Table,
}

impl Bag<'_> {
    fn allow(&self, keys: &[&str]) -> Result<(), ParserError> {
        match self.table.keys().find(|k| !keys.contains(&k.as_str())) {
            Some(key) => Err(ParserError::UnknownOptionKey {
                kind: self.kind,
                name: self.name.to_string(),
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }

    fn invalid(&self, key: &str, expected: &'static str, found: &toml::Value) -> ParserError {
        ParserError::InvalidOptionValue {
            kind: self.kind,
            name: self.name.to_string(),
            key: key.to_string(),
            expected,
            found: found.type_str(),
        }
    }

    fn string(&self, key: &str) -> Result<Option<String>, ParserError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.invalid(key, "a string", other)),
        }
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, ParserError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.invalid(key, "a boolean", other)),
        }
    }

    /// Scalar default rendered as the raw token it stands for.
    fn raw(&self, key: &str) -> Result<Option<String>, ParserError> {
        match self.table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(toml::Value::Integer(n)) => Ok(Some(n.to_string())),
            // Debug keeps the fraction: 1.0 stays "1.0", not "1".
            Some(toml::Value::Float(n)) => Ok(Some(format!("{:?}", n))),
            Some(toml::Value::Boolean(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(self.invalid(key, "a scalar", other)),
        }
    }

    fn short(&self) -> Result<Option<char>, ParserError> {
        let Some(value) = self.table.get("short") else {
            return Ok(None);
        };
        let single = value.as_str().and_then(|s| {
            let mut chars = s.trim_start_matches('-').chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });
        single
            .map(Some)
            .ok_or_else(|| self.invalid("short", "a single character", value))
    }

    fn cast(&self) -> Result<Cast, ParserError> {
        match self.string("cast")? {
            None => Ok(Cast::default()),
            Some(name) => Cast::builtin(&name).ok_or_else(|| ParserError::UnknownCast {
                kind: self.kind,
                name: self.name.to_string(),
                cast: name,
            }),
        }
    }
}
