//! Usage renderer — presentation only, never validates.

use std::fmt;

use crate::cli::Cli;

/// Usage text for a definition, optionally preceded by a message line.
pub struct Usage<'a> {
    cli: &'a Cli,
    message: Option<&'a str>,
}

impl<'a> Usage<'a> {
    pub fn new(cli: &'a Cli, message: Option<&'a str>) -> Self {
        Self { cli, message }
    }
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cli = self.cli;
        let switches = cli.switches();
        let options = cli.options();

        if let Some(message) = self.message {
            writeln!(f, "{}", message)?;
        }

        write!(f, "Usage: {}", cli.program())?;
        match (switches.is_empty(), options.is_empty()) {
            (false, false) => f.write_str(" [switches|options]")?,
            (false, true) => f.write_str(" [switches]")?,
            (true, false) => f.write_str(" [options]")?,
            (true, true) => {}
        }
        for argument in cli.arguments() {
            write!(f, " {}", argument)?;
        }
        if let Some(stdin) = cli.stdin_binding() {
            write!(f, " < {}", stdin)?;
        }
        writeln!(f)?;

        if let Some(description) = cli.description() {
            writeln!(f, "{}", description)?;
        }

        if let Some(stdin) = cli.stdin_binding() {
            if stdin.has_description() {
                writeln!(f, "Input:")?;
                writeln!(f, "   {} - {}", stdin, text(&stdin.description))?;
            }
        }

        if !switches.is_empty() {
            writeln!(f, "Switches:")?;
            for switch in switches {
                write!(f, "   {}", switch.switch)?;
                if switch.has_short() {
                    write!(f, " ({})", text(&switch.switch_short))?;
                }
                if switch.has_description() {
                    write!(f, " - {}", text(&switch.description))?;
                }
                writeln!(f)?;
            }
        }

        if !options.is_empty() {
            writeln!(f, "Options:")?;
            for option in options {
                write!(f, "   {}", option.switch)?;
                if option.has_short() {
                    write!(f, " ({})", text(&option.switch_short))?;
                }
                if option.has_default() {
                    write!(f, " [{}]", text(&option.default))?;
                }
                if option.has_description() {
                    write!(f, " - {}", text(&option.description))?;
                }
                writeln!(f)?;
            }
        }

        let mut described = cli.arguments().iter().filter(|a| a.has_description()).peekable();
        if described.peek().is_some() {
            writeln!(f, "Arguments:")?;
            for argument in described {
                writeln!(f, "   {} - {}", argument, text(&argument.description))?;
            }
        }

        Ok(())
    }
}

/// Text of an optional field already checked by its `has_*` predicate.
fn text(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default()
}

impl Cli {
    /// Render usage text, with `message` on the first line when given.
    pub fn usage(&self, message: Option<&str>) -> String {
        Usage::new(self, message).to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::definition::{ArgumentSpec, OptionSpec, StdinSpec, SwitchSpec};

    #[test]
    fn empty_definition_renders_program_line() {
        let cli = Cli::new(|cli| {
            cli.program("bare");
            Ok(())
        })
        .unwrap();
        assert_eq!(cli.usage(None), "Usage: bare\n");
    }

    #[test]
    fn full_definition() {
        let cli = Cli::new(|cli| {
            cli.program("ingest").description("Load records");
            cli.stdin(Some("records"), StdinSpec::new().description("YAML records"))?;
            cli.switch("verbose", SwitchSpec::new().short('v').description("Chatty"))?;
            cli.switch("dry_run", SwitchSpec::new())?;
            cli.option("batch", OptionSpec::new().short('b').default("100").description("Batch size"))?;
            cli.argument("target", ArgumentSpec::new().description("Destination table"))?;
            cli.argument("region", ArgumentSpec::new().optional())?;
            Ok(())
        })
        .unwrap();

        let expected = "\
Usage: ingest [switches|options] target [region] < records
Load records
Input:
   records - YAML records
Switches:
   --verbose (-v) - Chatty
   --dry-run
Options:
   --batch (-b) [100] - Batch size
Arguments:
   target - Destination table
";
        assert_eq!(cli.usage(None), expected);
    }

    #[test]
    fn partial_entries_render_only_present_parts() {
        let cli = Cli::new(|cli| {
            cli.program("p");
            cli.switch("quiet", SwitchSpec::new().short('q'))?;
            cli.option("level", OptionSpec::new().description("Log level"))?;
            cli.option("retries", OptionSpec::new().default("3"))?;
            Ok(())
        })
        .unwrap();

        let expected = "\
Usage: p [switches|options]
Switches:
   --quiet (-q)
Options:
   --level - Log level
   --retries [3]
";
        assert_eq!(cli.usage(None), expected);
    }

    #[test]
    fn collection_marker_reflects_contents() {
        let switches_only = Cli::new(|cli| {
            cli.program("p");
            cli.switch("x", SwitchSpec::new())?;
            Ok(())
        })
        .unwrap();
        assert!(switches_only.usage(None).starts_with("Usage: p [switches]\n"));

        let options_only = Cli::new(|cli| {
            cli.program("p");
            cli.option("x", OptionSpec::new())?;
            Ok(())
        })
        .unwrap();
        assert!(options_only.usage(None).starts_with("Usage: p [options]\n"));
    }

    #[test]
    fn message_precedes_usage() {
        let cli = Cli::new(|cli| {
            cli.program("p");
            Ok(())
        })
        .unwrap();
        assert_eq!(cli.usage(Some("Error: boom")), "Error: boom\nUsage: p\n");
    }

    #[test]
    fn undescribed_stdin_has_no_input_section() {
        let cli = Cli::new(|cli| {
            cli.program("p");
            cli.stdin(None, StdinSpec::new())?;
            Ok(())
        })
        .unwrap();
        assert_eq!(cli.usage(None), "Usage: p < stdin\n");
    }
}
