//! `check` command
//!
//! Builds a schema from `--rule` arguments, validates the env file against
//! it and prints the typed result.

use crate::cli::args::{CheckArgs, OutputFormat};
use crate::env_file::{self, RawEnv};
use crate::error::{EnvSchemaError, ValidationError};
use crate::schema::parse_schema;
use crate::value::ValidatedEnv;

/// Maximum edit distance for "did you mean" suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Validate an env file against the rules given on the command line.
///
/// # Errors
///
/// Returns a schema error for malformed rules, a validation error for file
/// access failures and schema violations, or a JSON error if output fails.
pub fn run(args: &CheckArgs) -> Result<(), EnvSchemaError> {
    let schema = parse_schema(&args.rules)?;
    tracing::info!(file = %args.file.display(), rules = schema.len(), "validating env file");

    let env = env_file::load(&args.file)?;

    let validated = match schema.validate(&env) {
        Ok(validated) => validated,
        Err(err) => {
            if let ValidationError::MissingRequiredVariable { key } = &err {
                if let Some(suggestion) = suggest_key(key, &env) {
                    eprintln!("hint: the file defines '{suggestion}', did you mean '{key}'?");
                }
            }
            return Err(err.into());
        }
    };

    tracing::info!(file = %args.file.display(), "env file valid");
    render(&validated, args)
}

fn render(validated: &ValidatedEnv, args: &CheckArgs) -> Result<(), EnvSchemaError> {
    match args.format {
        OutputFormat::Human => {
            println!("{} file is valid.", args.file.display());
            for (key, value) in validated.iter() {
                println!("{key} = {value}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(validated)?);
        }
    }
    Ok(())
}

/// Finds a key in `env` that looks like a misspelling of `missing`.
///
/// Returns the closest key within Damerau-Levenshtein distance 2.
#[must_use]
pub fn suggest_key(missing: &str, env: &RawEnv) -> Option<String> {
    env.keys()
        .map(|candidate| (candidate, strsim::damerau_levenshtein(missing, candidate)))
        .filter(|(_, dist)| (1..=MAX_SUGGESTION_DISTANCE).contains(dist))
        .min_by_key(|(_, dist)| *dist)
        .map(|(candidate, _)| candidate.clone())
}
