//! `envschema` - validate .env files against a declarative schema

use clap::Parser;

use envschema::cli::args::Cli;
use envschema::cli::commands;
use envschema::error::{EnvSchemaError, ExitCode};
use envschema::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            match e.exit_code() {
                ExitCode::VALIDATION_FAILED => eprintln!("Validation error: {e}"),
                _ => eprintln!("error: {e}"),
            }
            if let EnvSchemaError::Schema(schema_err) = &e {
                if let Some(source) = std::error::Error::source(schema_err) {
                    eprintln!("  caused by: {source}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}
