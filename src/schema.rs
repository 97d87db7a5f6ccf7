//! TOML schema files — a parser definition declared in configuration.
//!
//! ```toml
//! program = "ingest"
//! description = "Load records"
//!
//! [stdin]
//! name = "records"
//! cast = "yaml"
//!
//! [switches]
//! verbose = { short = "v", description = "Chatty" }
//!
//! [options]
//! batch = { short = "b", default = 100, cast = "integer" }
//!
//! [arguments]
//! target = {}
//! region = { optional = true, default = "eu" }
//! ```
//!
//! Declarations keep file order, so `[arguments]` order is consumption order.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::builder::CliBuilder;
use crate::cli::Cli;
use crate::definition::DeclKind;
use crate::error::ParserError;

/// Errors that can occur when loading a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Schema key '{key}' has to be {expected}, got {found}")]
    InvalidKey {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Schema declaration failed: {0}")]
    Declaration(#[from] ParserError),
}

const SECTIONS: [(&str, DeclKind); 3] = [
    ("switches", DeclKind::Switch),
    ("options", DeclKind::Option),
    ("arguments", DeclKind::Argument),
];

/// Loader for TOML schema files.
pub struct Schema;

impl Schema {
    /// Load a schema from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Cli, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SchemaError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "loading schema");
        Self::from_str(&content)
    }

    /// Build a definition from schema text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Cli, SchemaError> {
        let document: toml::Table = toml::from_str(content)?;
        let mut builder = CliBuilder::new();

        for (key, value) in &document {
            match key.as_str() {
                "program" => {
                    builder.program(expect_str(key, value)?);
                }
                "description" => {
                    builder.description(expect_str(key, value)?);
                }
                "stdin" => {
                    let mut bag = value.as_table().cloned().ok_or_else(|| {
                        ParserError::OptionsArgumentNotHash {
                            kind: DeclKind::Stdin,
                            found: value.type_str(),
                        }
                    })?;
                    let name = bag.remove("name");
                    builder.declare(DeclKind::Stdin, name.as_ref(), &toml::Value::Table(bag))?;
                }
                section => {
                    let Some((_, kind)) = SECTIONS.iter().find(|(s, _)| *s == section) else {
                        return Err(SchemaError::InvalidKey {
                            key: key.clone(),
                            expected: "one of program, description, stdin, switches, options, arguments",
                            found: value.type_str(),
                        });
                    };
                    let table = value.as_table().ok_or_else(|| SchemaError::InvalidKey {
                        key: key.clone(),
                        expected: "a table",
                        found: value.type_str(),
                    })?;
                    for (name, options) in table {
                        let name = toml::Value::String(name.clone());
                        builder.declare(*kind, Some(&name), options)?;
                    }
                }
            }
        }

        Ok(builder.build())
    }
}

fn expect_str<'a>(key: &str, value: &'a toml::Value) -> Result<&'a str, SchemaError> {
    value.as_str().ok_or_else(|| SchemaError::InvalidKey {
        key: key.to_string(),
        expected: "a string",
        found: value.type_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCHEMA: &str = r#"
program = "ingest"
description = "Load records"

[stdin]
name = "records"
description = "YAML records"
cast = "yaml"

[switches]
verbose = { short = "v", description = "Chatty" }

[options]
batch = { short = "b", default = 100, cast = "integer" }
table = { mandatory = true }

[arguments]
target = { description = "Destination" }
region = { optional = true, default = "eu" }
"#;

    #[test]
    fn schema_builds_full_definition() {
        let cli = Schema::from_str(SCHEMA).unwrap();
        assert_eq!(cli.program(), "ingest");
        assert_eq!(cli.description(), Some("Load records"));
        assert_eq!(cli.switches().len(), 1);
        assert_eq!(cli.options().len(), 2);

        let names: Vec<_> = cli.arguments().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["target", "region"]);
        assert_eq!(
            cli.stdin_binding().map(|s| s.to_string()).as_deref(),
            Some("records")
        );
    }

    #[test]
    fn schema_definition_parses_tokens() {
        let cli = Schema::from_str(SCHEMA).unwrap();
        let values = cli
            .parse(["-v", "--table", "t1", "db"], "- a\n- b\n".as_bytes())
            .unwrap();
        assert!(values.flag("verbose"));
        assert_eq!(values.value::<i64>("batch").unwrap(), 100);
        assert_eq!(values.value::<String>("region").unwrap(), "eu");
        assert_eq!(values.value::<String>("target").unwrap(), "db");
        assert!(values.stdin().is_some());
    }

    #[test]
    fn non_table_declaration_is_rejected() {
        let err = Schema::from_str("[switches]\nverbose = true\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Declaration(ParserError::OptionsArgumentNotHash {
                kind: DeclKind::Switch,
                ..
            })
        ));
    }

    #[test]
    fn non_identifier_name_is_rejected() {
        let err = Schema::from_str("[options]\n\"dry-run\" = {}\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Declaration(ParserError::NameArgumentNotSymbol { .. })
        ));
    }

    #[test]
    fn unknown_top_level_key() {
        let err = Schema::from_str("flags = {}\n").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidKey { ref key, .. } if key == "flags"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(
            Schema::from_str("program = ").unwrap_err(),
            SchemaError::ParseError(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCHEMA.as_bytes()).unwrap();
        let cli = Schema::load(file.path()).unwrap();
        assert_eq!(cli.program(), "ingest");
    }

    #[test]
    fn load_missing_file() {
        let err = Schema::load("/nonexistent/schema.toml").unwrap_err();
        assert!(matches!(err, SchemaError::ReadError { .. }));
    }
}
