//! Parsing engine — token list → [`Values`].
//!
//! ```text
//! help? ─▶ defaults ─▶ switches/options ─▶ mandatory check ─▶ arguments ─▶ stdin
//! ```
//!
//! Switch/option consumption stops at the first token that is not
//! switch-shaped; everything after it is positional.

use std::collections::VecDeque;
use std::io::Read;

use tracing::{debug, trace};

use crate::cli::Cli;
use crate::collections::is_switch;
use crate::error::ParsingError;
use crate::values::{Value, Values};

/// Tokens that short-circuit parsing with the usage text.
pub const HELP_TOKENS: [&str; 2] = ["-h", "--help"];

impl Cli {
    /// Parse `tokens` (program name excluded), reading `stdin` only if a
    /// stdin binding is declared.
    pub fn parse<I, R>(&self, tokens: I, mut stdin: R) -> Result<Values, ParsingError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        R: Read,
    {
        let mut tokens: VecDeque<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect();
        debug!(program = %self.program(), tokens = tokens.len(), "parsing");

        if tokens.iter().any(|t| HELP_TOKENS.contains(&t.as_str())) {
            debug!("help requested");
            return Ok(Values::help_only(self.usage(None)));
        }

        let mut values = Values::new();

        for option in self.options().defaults() {
            if let Some(raw) = option.default.as_deref() {
                values.set(&option.name, option.cast.apply(raw)?);
            }
        }

        let mut pending = self.options().mandatory();

        while let Some(token) = next_switch(&mut tokens) {
            if let Some(switch) = self.switches().find(&token) {
                trace!(token = %token, field = %switch.name, "switch");
                values.set(&switch.name, Value::Bool(true));
            } else if let Some(option) = self.options().find(&token) {
                let raw = tokens
                    .pop_front()
                    .ok_or_else(|| ParsingError::MissingOptionValue {
                        option: option.name.clone(),
                        switch: option.switch.clone(),
                    })?;
                trace!(token = %token, field = %option.name, raw = %raw, "option");
                values.set(&option.name, option.cast.apply(&raw)?);
                pending.retain(|o| o.name != option.name);
            } else {
                return Err(ParsingError::UnknownSwitch { token });
            }
        }

        if !pending.is_empty() {
            let mut switches: Vec<String> = pending.iter().map(|o| o.switch.clone()).collect();
            switches.sort();
            switches.dedup();
            return Err(ParsingError::MandatoryOptionsNotSpecified { switches });
        }

        let arguments = self.arguments();
        for (index, argument) in arguments.iter().enumerate() {
            let still_to_fill = arguments.len() - index;

            // Too few tokens for everything left: skip optional arguments first.
            let raw = if tokens.len() < still_to_fill && argument.optional {
                trace!(argument = %argument, "skipped, using default");
                argument.default.clone()
            } else {
                let token = tokens.pop_front().ok_or_else(|| {
                    ParsingError::MandatoryArgumentNotSpecified {
                        name: argument.name.clone(),
                        argument: argument.to_string(),
                    }
                })?;
                trace!(argument = %argument, raw = %token, "argument");
                Some(token)
            };

            if let Some(raw) = raw {
                values.set(&argument.name, argument.cast.apply(&raw)?);
            }
        }

        if !tokens.is_empty() {
            debug!(unconsumed = tokens.len(), "ignoring surplus tokens");
        }

        if let Some(binding) = self.stdin_binding() {
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .map_err(ParsingError::StdinUnreadable)?;
            trace!(binding = %binding, bytes = content.len(), "stdin");
            values.set_stdin(binding.cast.apply(&content)?);
        }

        debug!(fields = values.len(), "parsed");
        Ok(values)
    }

    /// Parse the process arguments and stdin.
    pub fn parse_env(&self) -> Result<Values, ParsingError> {
        self.parse(env_tokens(), std::io::stdin().lock())
    }
}

/// Process arguments without the program name. Non-UTF-8 bytes become
/// U+FFFD so they surface as parse errors instead of a panic.
pub(crate) fn env_tokens() -> impl Iterator<Item = String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
}

/// Pop the front token if it is switch-shaped.
fn next_switch(tokens: &mut VecDeque<String>) -> Option<String> {
    if tokens.front().is_some_and(|t| is_switch(t)) {
        tokens.pop_front()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ArgumentSpec, Cast, OptionSpec, StdinSpec, SwitchSpec};

    fn positional_cli() -> Cli {
        Cli::new(|cli| {
            cli.program("prog");
            cli.argument("a", ArgumentSpec::new().cast(Cast::Integer))?;
            cli.argument("b", ArgumentSpec::new().optional().default("5").cast(Cast::Integer))?;
            Ok(())
        })
        .unwrap()
    }

    fn flags_cli() -> Cli {
        Cli::new(|cli| {
            cli.program("prog");
            cli.switch("verbose", SwitchSpec::new().short('v'))?;
            cli.option("output", OptionSpec::new().short('o'))?;
            cli.option("level", OptionSpec::new().default("3").cast(Cast::Integer))?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn optional_argument_skipped_when_short_of_tokens() {
        let values = positional_cli().parse(["7"], std::io::empty()).unwrap();
        assert_eq!(values.value::<i64>("a").unwrap(), 7);
        assert_eq!(values.value::<i64>("b").unwrap(), 5);
    }

    #[test]
    fn optional_argument_filled_when_tokens_suffice() {
        let values = positional_cli().parse(["7", "9"], std::io::empty()).unwrap();
        assert_eq!(values.value::<i64>("a").unwrap(), 7);
        assert_eq!(values.value::<i64>("b").unwrap(), 9);
    }

    #[test]
    fn optional_front_argument_is_skipped_before_mandatory_back() {
        let cli = Cli::new(|cli| {
            cli.argument("first", ArgumentSpec::new().optional().default("x"))?;
            cli.argument("second", ArgumentSpec::new())?;
            Ok(())
        })
        .unwrap();

        let values = cli.parse(["only"], std::io::empty()).unwrap();
        assert_eq!(values.value::<String>("first").unwrap(), "x");
        assert_eq!(values.value::<String>("second").unwrap(), "only");
    }

    #[test]
    fn optional_argument_without_default_stays_absent() {
        let cli = Cli::new(|cli| {
            cli.argument("maybe", ArgumentSpec::new().optional())?;
            Ok(())
        })
        .unwrap();
        let values = cli.parse(Vec::<String>::new(), std::io::empty()).unwrap();
        assert!(!values.contains("maybe"));
    }

    #[test]
    fn missing_mandatory_argument() {
        let err = positional_cli()
            .parse(Vec::<&str>::new(), std::io::empty())
            .unwrap_err();
        assert!(matches!(
            &err,
            ParsingError::MandatoryArgumentNotSpecified { name, .. } if name == "a"
        ));
        assert_eq!(err.to_string(), "mandatory argument a not given");
    }

    #[test]
    fn switches_and_options_in_any_order() {
        let cli = flags_cli();
        for tokens in [["--verbose", "--output", "x"], ["--output", "x", "--verbose"]] {
            let values = cli.parse(tokens, std::io::empty()).unwrap();
            assert!(values.flag("verbose"));
            assert_eq!(values.value::<String>("output").unwrap(), "x");
            assert_eq!(values.value::<i64>("level").unwrap(), 3);
        }
    }

    #[test]
    fn short_tokens_are_recognised() {
        let values = flags_cli()
            .parse(["-v", "-o", "out.txt"], std::io::empty())
            .unwrap();
        assert!(values.flag("verbose"));
        assert_eq!(values.value::<String>("output").unwrap(), "out.txt");
    }

    #[test]
    fn supplied_value_overrides_default() {
        let values = flags_cli()
            .parse(["--level", "9"], std::io::empty())
            .unwrap();
        assert_eq!(values.value::<i64>("level").unwrap(), 9);
        assert!(!values.flag("verbose"));
        assert!(!values.contains("output"));
    }

    #[test]
    fn unknown_switch_carries_token() {
        let err = flags_cli()
            .parse(["--bogus"], std::io::empty())
            .unwrap_err();
        assert!(matches!(&err, ParsingError::UnknownSwitch { token } if token == "--bogus"));
        assert_eq!(err.to_string(), "unknown switch --bogus");
    }

    #[test]
    fn option_as_last_token_is_missing_value() {
        let err = flags_cli()
            .parse(["--verbose", "--output"], std::io::empty())
            .unwrap_err();
        assert_eq!(err.to_string(), "missing value for option --output");
    }

    #[test]
    fn option_value_may_look_like_a_switch() {
        let values = flags_cli()
            .parse(["--output", "--verbose"], std::io::empty())
            .unwrap();
        assert_eq!(values.value::<String>("output").unwrap(), "--verbose");
        assert!(!values.flag("verbose"));
    }

    #[test]
    fn first_positional_ends_switch_parsing() {
        let cli = Cli::new(|cli| {
            cli.switch("verbose", SwitchSpec::new())?;
            cli.argument("file", ArgumentSpec::new())?;
            cli.argument("extra", ArgumentSpec::new())?;
            Ok(())
        })
        .unwrap();

        let values = cli
            .parse(["file.txt", "--verbose"], std::io::empty())
            .unwrap();
        assert!(!values.flag("verbose"));
        assert_eq!(values.value::<String>("extra").unwrap(), "--verbose");
    }

    #[test]
    fn help_short_circuits_even_with_bad_input() {
        let cli = flags_cli();
        for tokens in [
            vec!["--bogus", "-h"],
            vec!["--output", "--help"],
            vec!["--level", "high", "x", "--help"],
        ] {
            let values = cli.parse(&tokens, std::io::empty()).unwrap();
            assert_eq!(values.help(), Some(cli.usage(None).as_str()));
            assert!(values.is_empty());
        }
    }

    #[test]
    fn mandatory_options_listed_sorted() {
        let cli = Cli::new(|cli| {
            cli.option("zone", OptionSpec::new().mandatory())?;
            cli.option("account", OptionSpec::new().mandatory())?;
            cli.option("mode", OptionSpec::new().mandatory().default("fast"))?;
            Ok(())
        })
        .unwrap();

        let err = cli.parse(["--mode", "slow"], std::io::empty()).unwrap_err();
        match err {
            ParsingError::MandatoryOptionsNotSpecified { switches } => {
                assert_eq!(switches, vec!["--account", "--zone"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_does_not_satisfy_mandatory() {
        let cli = Cli::new(|cli| {
            cli.option("mode", OptionSpec::new().mandatory().default("fast"))?;
            Ok(())
        })
        .unwrap();
        let err = cli.parse(Vec::<&str>::new(), std::io::empty()).unwrap_err();
        assert_eq!(err.to_string(), "mandatory options not specified: --mode");
    }

    #[test]
    fn cast_failure_references_raw_value_and_cast() {
        let err = flags_cli()
            .parse(["--level", "high"], std::io::empty())
            .unwrap_err();
        match &err {
            ParsingError::Cast(cast) => {
                assert_eq!(cast.raw, "high");
                assert_eq!(cast.cast, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.error_type(), "cast_error");
    }

    #[test]
    fn bad_default_fails_at_parse_time() {
        let cli = Cli::new(|cli| {
            cli.option("count", OptionSpec::new().default("many").cast(Cast::Integer))?;
            Ok(())
        })
        .unwrap();
        let err = cli.parse(Vec::<&str>::new(), std::io::empty()).unwrap_err();
        assert!(err.to_string().starts_with("failed to cast: many to type: integer"));
    }

    #[test]
    fn stdin_is_cast_and_stored() {
        let cli = Cli::new(|cli| {
            cli.stdin(Some("config"), StdinSpec::new().cast(Cast::Yaml))?;
            Ok(())
        })
        .unwrap();

        let values = cli
            .parse(Vec::<&str>::new(), "retries: 3\n".as_bytes())
            .unwrap();
        let Some(Value::Yaml(doc)) = values.stdin() else {
            panic!("expected yaml stdin");
        };
        assert_eq!(doc["retries"], serde_yaml::Value::from(3));
    }

    #[test]
    fn unreadable_stdin_is_a_parsing_error() {
        let cli = Cli::new(|cli| {
            cli.stdin(None, StdinSpec::new())?;
            Ok(())
        })
        .unwrap();

        let err = cli
            .parse(Vec::<&str>::new(), &[0xff, 0xfe][..])
            .unwrap_err();
        assert!(matches!(err, ParsingError::StdinUnreadable(_)));
        assert_eq!(err.error_type(), "stdin_unreadable");
        assert!(err.to_string().starts_with("failed to read stdin: "));
    }

    #[test]
    fn stdin_untouched_without_binding() {
        let values = flags_cli()
            .parse(Vec::<&str>::new(), "ignored".as_bytes())
            .unwrap();
        assert!(values.stdin().is_none());
    }

    #[test]
    fn definition_is_reusable() {
        let cli = flags_cli();
        let first = cli.parse(["-v"], std::io::empty()).unwrap();
        let second = cli.parse(["-o", "y"], std::io::empty()).unwrap();
        assert!(first.flag("verbose"));
        assert!(!second.flag("verbose"));
        assert_eq!(second.value::<String>("output").unwrap(), "y");
    }
}
