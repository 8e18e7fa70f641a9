//! Shared integration-test helpers for running the `envschema` binary and
//! writing throwaway env files.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

/// Env file satisfying the reference application schema.
pub const VALID_ENV: &str =
    "APP_ENV=production\nPORT=8080\nDEBUG=true\nAPP_SECRET=abcd1234efgh5678ijkl9012mnop3456";

/// Pattern for a 32 character alphanumeric secret.
pub const SECRET_PATTERN: &str = "^[A-Za-z0-9]{32}$";

/// Helpers for invoking the `envschema` binary.
pub struct EnvSchemaProcess;

impl EnvSchemaProcess {
    /// Runs the binary with `args` and waits for it to exit.
    ///
    /// Logging is forced off through the environment so stderr only holds
    /// command output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_envschema"))
            .args(args)
            .env_remove("ENVSCHEMA_FILE")
            .env("ENVSCHEMA_LOG_LEVEL", "off")
            .output()
            .expect("failed to run envschema")
    }

    /// Path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Writes `content` to a temporary env file that lives as long as the handle.
#[allow(clippy::missing_panics_doc)]
pub fn write_env(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp env file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp env file");
    file
}
