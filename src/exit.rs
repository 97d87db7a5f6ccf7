//! Parse-or-exit wrapper — turns help requests and parse errors into
//! written output plus a process exit status.

use std::io::{Read, Write};

use tracing::debug;

use crate::cli::Cli;
use crate::parser::env_tokens;
use crate::values::Values;

/// Exit status after printing help.
pub const EXIT_HELP: i32 = 0;
/// Exit status after a parse error.
pub const EXIT_PARSE_ERROR: i32 = 42;

/// The process should terminate with `status`; output was already written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    pub status: i32,
}

impl Cli {
    /// Parse, writing help to `stdout` or `Error: ...` plus usage to `stderr`.
    ///
    /// Never lets a parse error escape: it becomes `Err(Exit)`.
    pub fn run<I, R, E, O>(
        &self,
        tokens: I,
        stdin: R,
        stderr: &mut E,
        stdout: &mut O,
    ) -> Result<Values, Exit>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        R: Read,
        E: Write,
        O: Write,
    {
        match self.parse(tokens, stdin) {
            Ok(values) => match values.help() {
                Some(help) => {
                    emit(stdout, help, "stdout");
                    Err(Exit { status: EXIT_HELP })
                }
                None => Ok(values),
            },
            Err(err) => {
                debug!(error_type = err.error_type(), error = %err, "parse failed");
                let message = format!("Error: {}", err);
                emit(stderr, &self.usage(Some(&message)), "stderr");
                Err(Exit {
                    status: EXIT_PARSE_ERROR,
                })
            }
        }
    }

    /// [`Cli::run`], terminating the process on help or error.
    pub fn parse_or_exit<I, R, E, O>(
        &self,
        tokens: I,
        stdin: R,
        stderr: &mut E,
        stdout: &mut O,
    ) -> Values
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        R: Read,
        E: Write,
        O: Write,
    {
        match self.run(tokens, stdin, stderr, stdout) {
            Ok(values) => values,
            Err(exit) => std::process::exit(exit.status),
        }
    }

    /// [`Cli::parse_or_exit`] over the process arguments, stdin, stderr and stdout.
    pub fn parse_or_exit_env(&self) -> Values {
        self.parse_or_exit(
            env_tokens(),
            std::io::stdin().lock(),
            &mut std::io::stderr(),
            &mut std::io::stdout(),
        )
    }
}

/// Write `text` and flush. The exit status is decided already, so a broken
/// stream is only logged.
fn emit<W: Write>(stream: &mut W, text: &str, name: &'static str) {
    if let Err(e) = stream.write_all(text.as_bytes()).and_then(|_| stream.flush()) {
        debug!(stream = name, error = %e, "failed to write output");
    }
}
