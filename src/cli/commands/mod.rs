//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check;
pub mod completions;
pub mod parse;

use crate::cli::args::{Cli, Commands};
use crate::error::EnvSchemaError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), EnvSchemaError> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Parse(args) => parse::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
    }
}
