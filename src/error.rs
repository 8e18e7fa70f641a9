//! Error types for `envschema`
//!
//! The validation engine reports exactly one [`ValidationError`] per failed
//! call. Schema construction has its own [`SchemaError`], and the command-line
//! program aggregates both into [`EnvSchemaError`] for exit code mapping.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for the `envschema` command-line program.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// The env file violates the schema
    pub const VALIDATION_FAILED: i32 = 1;

    /// General error (file not found, unreadable file, output failure)
    pub const ERROR: i32 = 2;

    /// Usage error (malformed rule arguments)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for the `envschema` program.
#[derive(Debug, Error)]
pub enum EnvSchemaError {
    /// Env file loading or schema validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The schema could not be constructed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnvSchemaError {
    /// Returns the appropriate exit code for this error.
    ///
    /// File access failures are general errors; every other validation
    /// failure is a schema violation.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(err) => match err {
                ValidationError::FileNotFound { .. } | ValidationError::ReadError { .. } => {
                    ExitCode::ERROR
                }
                _ => ExitCode::VALIDATION_FAILED,
            },
            Self::Schema(_) => ExitCode::USAGE_ERROR,
            Self::Io(_) | Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// Discriminant of a [`ValidationError`], for callers that branch on the
/// kind of failure without inspecting its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The env file path does not exist
    FileNotFound,
    /// The env file exists but could not be read
    ReadError,
    /// A required variable is absent or empty
    MissingRequiredVariable,
    /// A value is not in the allowed set
    InvalidValue,
    /// A value does not match the declared pattern
    PatternMismatch,
    /// A value could not be cast to the declared type
    InvalidType,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FileNotFound => "FileNotFound",
            Self::ReadError => "ReadError",
            Self::MissingRequiredVariable => "MissingRequiredVariable",
            Self::InvalidValue => "InvalidValue",
            Self::PatternMismatch => "PatternMismatch",
            Self::InvalidType => "InvalidType",
        };
        f.write_str(name)
    }
}

/// Failure of a single validation call.
///
/// The first violation found aborts the call: keys are visited in schema
/// order and, within a key, the checks run required, allowed, pattern, cast.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Env file path does not exist
    #[error("env file not found: {}", path.display())]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Env file exists but could not be read
    #[error("unable to read env file {}: {source}", path.display())]
    ReadError {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A required variable resolved to absent or empty
    #[error("Missing required variable: {key}")]
    MissingRequiredVariable {
        /// Variable name
        key: String,
    },

    /// The raw value is not a member of the allowed set
    #[error("Invalid value for '{key}': {actual}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// The rejected raw value
        actual: String,
    },

    /// The raw value does not fully match the declared pattern
    #[error("Value for '{key}' does not match pattern: {pattern}")]
    PatternMismatch {
        /// Variable name
        key: String,
        /// The pattern as declared in the rule
        pattern: String,
    },

    /// The raw value could not be cast to the declared type
    #[error("Invalid type for '{key}': expected {expected}")]
    InvalidType {
        /// Variable name
        key: String,
        /// Declared type name
        expected: String,
    },
}

impl ValidationError {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::ReadError { .. } => ErrorKind::ReadError,
            Self::MissingRequiredVariable { .. } => ErrorKind::MissingRequiredVariable,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::PatternMismatch { .. } => ErrorKind::PatternMismatch,
            Self::InvalidType { .. } => ErrorKind::InvalidType,
        }
    }

    /// Returns the offending variable name, if the error concerns one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::FileNotFound { .. } | Self::ReadError { .. } => None,
            Self::MissingRequiredVariable { key }
            | Self::InvalidValue { key, .. }
            | Self::PatternMismatch { key, .. }
            | Self::InvalidType { key, .. } => Some(key),
        }
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// Errors raised while constructing a [`Schema`](crate::schema::Schema).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The pattern of a rule is not a valid regular expression
    #[error("invalid pattern for '{key}': {pattern}")]
    InvalidPattern {
        /// Variable name
        key: String,
        /// The pattern as declared in the rule
        pattern: String,
        /// Compilation failure from the regex engine
        #[source]
        source: regex::Error,
    },

    /// A rule names a type that is not one of `string`, `int`, `float`, `bool`
    ///
    /// This is the construction-time form of [`ValidationError::InvalidType`]:
    /// a [`Schema`](crate::schema::Schema) can only hold known types, so an
    /// unrecognized name is rejected while the schema is built and never
    /// reaches validation as [`ErrorKind::InvalidType`]. The message uses the
    /// same `Invalid type for 'KEY': expected TYPE` wording.
    #[error("Invalid type for '{key}': expected {type_name} (unknown type name)")]
    UnknownType {
        /// Variable name
        key: String,
        /// The unrecognized type name
        type_name: String,
    },

    /// The same variable was declared twice
    #[error("duplicate rule for '{key}'")]
    DuplicateKey {
        /// Variable name
        key: String,
    },

    /// A textual rule could not be parsed
    #[error("malformed rule '{spec}': {reason}")]
    MalformedRule {
        /// The rule text as given
        spec: String,
        /// What was wrong with it
        reason: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `envschema` program operations.
pub type Result<T> = std::result::Result<T, EnvSchemaError>;

// ============================================================================
// Tests
// ============================================================================
