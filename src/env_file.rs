//! Env file parser
//!
//! Turns a text file of `KEY=value` lines into a flat map of raw strings:
//! 1. Strip a leading UTF-8 BOM
//! 2. Trim each line; skip blank lines, `#` comments and lines without `=`
//! 3. Split on the first `=`, trim key and value independently
//! 4. Later assignments of a key overwrite earlier ones
//!
//! Keys are not validated here and the process environment is never touched.

use crate::error::ValidationError;

use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::Path;

/// Raw variables of an env file, keyed by name in first-seen order.
pub type RawEnv = IndexMap<String, String>;

/// Reads and parses the env file at `path`.
///
/// # Errors
///
/// Returns [`ValidationError::FileNotFound`] if `path` does not exist and
/// [`ValidationError::ReadError`] if it exists but cannot be read as UTF-8
/// text (permissions, directories, invalid encoding).
pub fn load(path: impl AsRef<Path>) -> Result<RawEnv, ValidationError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ValidationError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            // removed between the existence check and the read
            ValidationError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ValidationError::ReadError {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let env = parse_str(&content);
    tracing::debug!(path = %path.display(), variables = env.len(), "parsed env file");
    Ok(env)
}

/// Parses env file content.
///
/// Never fails: lines that are not assignments are skipped.
#[must_use]
pub fn parse_str(content: &str) -> RawEnv {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut env = RawEnv::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::trace!(line = index + 1, "skipping line without '='");
            continue;
        };

        env.insert(key.trim().to_string(), value.trim().to_string());
    }

    env
}
