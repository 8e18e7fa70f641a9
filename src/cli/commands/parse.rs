//! `parse` command
//!
//! Prints the raw variables of an env file as the parser sees them.

use crate::cli::args::{OutputFormat, ParseArgs};
use crate::env_file;
use crate::error::EnvSchemaError;

/// Parse an env file and print its variables.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or JSON output fails.
pub fn run(args: &ParseArgs) -> Result<(), EnvSchemaError> {
    let env = env_file::load(&args.file)?;
    tracing::info!(file = %args.file.display(), variables = env.len(), "env file parsed");

    match args.format {
        OutputFormat::Human => {
            for (key, value) in &env {
                println!("{key}={value}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&env)?);
        }
    }

    Ok(())
}
