use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use argdecl::logging::init_tracing;
use argdecl::Schema;

fn main() -> Result<()> {
    init_tracing();

    let Some((schema_path, tokens)) = split_schema(std::env::args_os().skip(1).collect()) else {
        bail!("usage: argdecl <schema.toml> [arguments...]");
    };

    let cli = Schema::load(&schema_path)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;

    let values = cli.parse_or_exit(
        &tokens,
        std::io::stdin().lock(),
        &mut std::io::stderr(),
        &mut std::io::stdout(),
    );

    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

/// First argument is the schema path, the rest are parsed against it.
///
/// Tokens are converted lossily, so non-UTF-8 input reaches the parser
/// (and its error reporting) rather than aborting the process.
fn split_schema(args: Vec<OsString>) -> Option<(PathBuf, Vec<String>)> {
    let mut args = args.into_iter();
    let schema = PathBuf::from(args.next()?);
    let tokens = args
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    Some((schema, tokens))
}
