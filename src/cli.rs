//! Compiled parser definition.

use crate::builder::CliBuilder;
use crate::collections::{Options, Switches};
use crate::definition::{ArgumentDef, StdinDef};
use crate::error::ParserError;

/// A complete, read-only parser definition.
///
/// Built once through [`Cli::new`] (or a schema file) and reusable across
/// any number of parses.
#[derive(Debug, Clone)]
pub struct Cli {
    program: String,
    description: Option<String>,
    switches: Switches,
    options: Options,
    arguments: Vec<ArgumentDef>,
    stdin: Option<StdinDef>,
}

impl Cli {
    /// Run `configure` against a fresh builder and compile the result.
    pub fn new<F>(configure: F) -> Result<Self, ParserError>
    where
        F: FnOnce(&mut CliBuilder) -> Result<(), ParserError>,
    {
        let mut builder = CliBuilder::new();
        configure(&mut builder)?;
        Ok(builder.build())
    }

    pub(crate) fn from_parts(
        program: String,
        description: Option<String>,
        switches: Switches,
        options: Options,
        arguments: Vec<ArgumentDef>,
        stdin: Option<StdinDef>,
    ) -> Self {
        Self {
            program,
            description,
            switches,
            options,
            arguments,
            stdin,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn switches(&self) -> &Switches {
        &self.switches
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn arguments(&self) -> &[ArgumentDef] {
        &self.arguments
    }

    pub fn stdin_binding(&self) -> Option<&StdinDef> {
        self.stdin.as_ref()
    }
}
