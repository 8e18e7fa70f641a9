//! Validation engine
//!
//! Resolves every schema variable against the raw env map and validates it.
//! For each key, in schema order, the pipeline is:
//! 1. Resolve: file value, else the rule's default, else absent
//! 2. Required: absent or empty fails
//! 3. Allowed: the raw string must be a member of the allowed set
//! 4. Pattern: the raw string must fully match the pattern
//! 5. Cast: convert to the declared type, if any
//!
//! The first failure aborts the whole call. The order of the checks decides
//! which error is reported when a value violates several rules.

pub mod cast;

use crate::env_file::{self, RawEnv};
use crate::error::ValidationError;
use crate::schema::{Schema, ValueType};
use crate::schema::rule::CompiledRule;
use crate::value::{ValidatedEnv, Value};

use std::borrow::Cow;
use std::path::Path;

/// Validates `env` against `schema`.
///
/// The result holds exactly the schema's variables, in schema order; raw
/// variables without a rule are dropped.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(schema: &Schema, env: &RawEnv) -> Result<ValidatedEnv, ValidationError> {
    let mut validated = ValidatedEnv::with_capacity(schema.len());

    for (key, compiled) in &schema.rules {
        let value = validate_variable(key, compiled, env)?;
        validated.insert(key.clone(), value);
    }

    tracing::debug!(variables = validated.len(), "env validated");
    Ok(validated)
}

/// Reads the env file at `path` and validates it against `schema`.
///
/// # Errors
///
/// Returns [`ValidationError::FileNotFound`] or
/// [`ValidationError::ReadError`] if the file cannot be loaded, otherwise the
/// first violation found by [`validate`].
pub fn validate_file(
    schema: &Schema,
    path: impl AsRef<Path>,
) -> Result<ValidatedEnv, ValidationError> {
    let env = env_file::load(path)?;
    validate(schema, &env)
}

impl Schema {
    /// Validates `env` against this schema. See [`validate`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, env: &RawEnv) -> Result<ValidatedEnv, ValidationError> {
        validate(self, env)
    }

    /// Reads and validates the env file at `path`. See [`validate_file`].
    ///
    /// # Errors
    ///
    /// Returns a file error or the first violation found.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidatedEnv, ValidationError> {
        validate_file(self, path)
    }
}

/// Where a variable's value came from.
#[derive(Debug, Clone, Copy)]
enum Resolved<'a> {
    File(&'a str),
    Default(&'a Value),
    Absent,
}

impl<'a> Resolved<'a> {
    fn resolve(key: &str, compiled: &'a CompiledRule, env: &'a RawEnv) -> Self {
        env.get(key).map_or_else(
            || compiled.rule.default.as_ref().map_or(Self::Absent, Self::Default),
            |value| Self::File(value),
        )
    }

    /// String form seen by the allowed and pattern checks and by casting.
    fn raw(self) -> Cow<'a, str> {
        match self {
            Self::File(value) => Cow::Borrowed(value),
            Self::Default(Value::String(value)) => Cow::Borrowed(value),
            Self::Default(value) => Cow::Owned(value.to_raw_string()),
            Self::Absent => Cow::Borrowed(""),
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Default(_) => "default",
            Self::Absent => "absent",
        }
    }
}

fn validate_variable(
    key: &str,
    compiled: &CompiledRule,
    env: &RawEnv,
) -> Result<Value, ValidationError> {
    let rule = &compiled.rule;
    let resolved = Resolved::resolve(key, compiled, env);
    let raw = resolved.raw();

    tracing::trace!(key, source = resolved.source(), "resolved variable");

    if rule.required && raw.is_empty() {
        return Err(ValidationError::MissingRequiredVariable {
            key: key.to_string(),
        });
    }

    if let Some(allowed) = &rule.allowed {
        if !allowed.iter().any(|candidate| *candidate == raw) {
            return Err(ValidationError::InvalidValue {
                key: key.to_string(),
                actual: raw.into_owned(),
            });
        }
    }

    if let (Some(matcher), Some(pattern)) = (&compiled.matcher, &rule.pattern) {
        if !matcher.is_match(&raw) {
            return Err(ValidationError::PatternMismatch {
                key: key.to_string(),
                pattern: pattern.clone(),
            });
        }
    }

    let Some(value_type) = rule.value_type else {
        return Ok(match resolved {
            Resolved::File(value) => Value::String(value.to_string()),
            Resolved::Default(value) => value.clone(),
            Resolved::Absent => Value::Null,
        });
    };

    if let Resolved::Default(value) = resolved {
        let already_typed = matches!(
            (value_type, value),
            (ValueType::String, Value::String(_))
                | (ValueType::Int, Value::Int(_))
                | (ValueType::Float, Value::Float(_))
                | (ValueType::Bool, Value::Bool(_))
        );
        if already_typed {
            return Ok(value.clone());
        }
    }

    cast::cast(key, value_type, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env_file::parse_str;
    use crate::error::ErrorKind;
    use crate::schema::Rule;

    fn schema(rules: Vec<(&str, Rule)>) -> Schema {
        rules
            .into_iter()
            .fold(Schema::builder(), |builder, (key, rule)| builder.var(key, rule))
            .build()
            .unwrap()
    }

    #[test]
    fn casts_declared_types() {
        let schema = schema(vec![
            ("APP_ENV", Rule::new().of_type(ValueType::String)),
            ("PORT", Rule::new().of_type(ValueType::Int)),
            ("RATIO", Rule::new().of_type(ValueType::Float)),
            ("DEBUG", Rule::new().of_type(ValueType::Bool)),
        ]);
        let env = parse_str("APP_ENV=production\nPORT=8080\nRATIO=0.75\nDEBUG=on");

        let result = validate(&schema, &env).unwrap();
        assert_eq!(result.get_str("APP_ENV"), Some("production"));
        assert_eq!(result.get_int("PORT"), Some(8080));
        assert_eq!(result.get_float("RATIO"), Some(0.75));
        assert_eq!(result.get_bool("DEBUG"), Some(true));
    }

    #[test]
    fn untyped_value_passes_through() {
        let schema = schema(vec![
            ("NAME", Rule::new()),
            ("LEVEL", Rule::new().default_value(3_i64)),
            ("MISSING", Rule::new()),
        ]);
        let env = parse_str("NAME=  spaced value ");

        let result = validate(&schema, &env).unwrap();
        assert_eq!(result.get("NAME"), Some(&Value::from("spaced value")));
        assert_eq!(result.get("LEVEL"), Some(&Value::Int(3)));
        assert_eq!(result.get("MISSING"), Some(&Value::Null));
    }

    #[test]
    fn result_has_exactly_schema_keys_in_order() {
        let schema = schema(vec![
            ("B", Rule::new()),
            ("A", Rule::new().default_value("x")),
        ]);
        let env = parse_str("A=1\nEXTRA=2\nB=3");

        let result = validate(&schema, &env).unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        assert!(!result.contains_key("EXTRA"));
    }

    #[test]
    fn file_value_wins_over_default() {
        let schema = schema(vec![(
            "DEBUG",
            Rule::new().of_type(ValueType::Bool).default_value(false),
        )]);

        let result = validate(&schema, &parse_str("DEBUG=yes")).unwrap();
        assert_eq!(result.get_bool("DEBUG"), Some(true));

        let result = validate(&schema, &parse_str("")).unwrap();
        assert_eq!(result.get_bool("DEBUG"), Some(false));
    }

    #[test]
    fn string_default_is_cast() {
        let schema = schema(vec![
            ("PORT", Rule::new().of_type(ValueType::Int).default_value("3000")),
            ("DEBUG", Rule::new().of_type(ValueType::Bool).default_value("off")),
        ]);

        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get_int("PORT"), Some(3000));
        assert_eq!(result.get_bool("DEBUG"), Some(false));
    }

    #[test]
    fn typed_default_is_recast_through_its_string_form() {
        let schema = schema(vec![
            ("RATIO", Rule::new().of_type(ValueType::Float).default_value(2_i64)),
            ("LABEL", Rule::new().of_type(ValueType::String).default_value(true)),
            ("COUNT", Rule::new().of_type(ValueType::Int).default_value(1.5)),
        ]);

        let err = validate(&schema, &RawEnv::new()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidType { ref key, .. } if key == "COUNT"
        ));

        let schema = Schema::builder()
            .var("RATIO", Rule::new().of_type(ValueType::Float).default_value(2_i64))
            .var("LABEL", Rule::new().of_type(ValueType::String).default_value(true))
            .build()
            .unwrap();
        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get_float("RATIO"), Some(2.0));
        assert_eq!(result.get_str("LABEL"), Some("true"));
    }

    #[test]
    fn required_absent_fails() {
        let schema = schema(vec![(
            "APP_SECRET",
            Rule::new().of_type(ValueType::String).required(),
        )]);

        let err = validate(&schema, &parse_str("APP_ENV=production\nPORT=8080")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredVariable);
        assert_eq!(err.key(), Some("APP_SECRET"));
    }

    #[test]
    fn required_empty_value_counts_as_missing() {
        let schema = schema(vec![("APP_SECRET", Rule::new().required())]);

        let err = validate(&schema, &parse_str("APP_SECRET=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredVariable);
    }

    #[test]
    fn required_satisfied_by_default() {
        let schema = schema(vec![("APP_ENV", Rule::new().required().default_value("dev"))]);

        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get_str("APP_ENV"), Some("dev"));
    }

    #[test]
    fn required_empty_default_fails() {
        let schema = schema(vec![("APP_ENV", Rule::new().required().default_value(""))]);

        let err = validate(&schema, &RawEnv::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredVariable);
    }

    #[test]
    fn empty_file_value_overrides_default() {
        let schema = schema(vec![("NAME", Rule::new().default_value("fallback"))]);

        let result = validate(&schema, &parse_str("NAME=")).unwrap();
        assert_eq!(result.get_str("NAME"), Some(""));
    }

    #[test]
    fn value_outside_allowed_set_fails() {
        let schema = schema(vec![(
            "MODE",
            Rule::new().of_type(ValueType::String).allowed(["dev", "prod"]),
        )]);

        let err = validate(&schema, &parse_str("MODE=invalid")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref key, ref actual } if key == "MODE" && actual == "invalid"
        ));
    }

    #[test]
    fn allowed_match_is_exact() {
        let schema = schema(vec![("MODE", Rule::new().allowed(["dev", "prod"]))]);

        let err = validate(&schema, &parse_str("MODE=DEV")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn allowed_checks_raw_value_before_cast() {
        let schema = schema(vec![(
            "DEBUG",
            Rule::new().of_type(ValueType::Bool).allowed(["true", "false"]),
        )]);

        // "1" is a valid bool but not in the allowed set
        let err = validate(&schema, &parse_str("DEBUG=1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let result = validate(&schema, &parse_str("DEBUG=false")).unwrap();
        assert_eq!(result.get_bool("DEBUG"), Some(false));
    }

    #[test]
    fn allowed_checks_typed_default_by_string_form() {
        let schema = schema(vec![(
            "WORKERS",
            Rule::new()
                .of_type(ValueType::Int)
                .default_value(4_i64)
                .allowed(["2", "4", "8"]),
        )]);

        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get_int("WORKERS"), Some(4));
    }

    #[test]
    fn absent_optional_with_allowed_set_fails() {
        let schema = schema(vec![("MODE", Rule::new().allowed(["dev", "prod"]))]);

        let err = validate(&schema, &RawEnv::new()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidValue { ref actual, .. } if actual.is_empty()
        ));
    }

    #[test]
    fn pattern_mismatch_fails() {
        let schema = schema(vec![(
            "APP_SECRET",
            Rule::new()
                .of_type(ValueType::String)
                .pattern("^[A-Za-z0-9]{32}$"),
        )]);

        let err = validate(&schema, &parse_str("APP_SECRET=invalidsecret")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::PatternMismatch { ref key, ref pattern }
                if key == "APP_SECRET" && pattern == "^[A-Za-z0-9]{32}$"
        ));
    }

    #[test]
    fn pattern_must_match_whole_value() {
        let schema = schema(vec![("CODE", Rule::new().pattern("[0-9]+"))]);

        assert!(validate(&schema, &parse_str("CODE=123")).is_ok());
        let err = validate(&schema, &parse_str("CODE=abc123")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
    }

    #[test]
    fn allowed_reported_before_pattern() {
        let schema = schema(vec![(
            "MODE",
            Rule::new().allowed(["dev", "prod"]).pattern("[a-z]+"),
        )]);

        let err = validate(&schema, &parse_str("MODE=INVALID-1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn required_reported_before_allowed() {
        let schema = schema(vec![(
            "MODE",
            Rule::new().required().allowed(["dev"]).pattern("dev"),
        )]);

        let err = validate(&schema, &parse_str("MODE=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredVariable);
    }

    #[test]
    fn pattern_reported_before_type() {
        let schema = schema(vec![(
            "PORT",
            Rule::new().of_type(ValueType::Int).pattern("[0-9]{4}"),
        )]);

        let err = validate(&schema, &parse_str("PORT=abc")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PatternMismatch);
    }

    #[test]
    fn invalid_int_fails_with_type() {
        let schema = schema(vec![("PORT", Rule::new().of_type(ValueType::Int))]);

        let err = validate(&schema, &parse_str("PORT=notanumber")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidType { ref key, ref expected } if key == "PORT" && expected == "int"
        ));
    }

    #[test]
    fn empty_optional_int_fails_cast() {
        let schema = schema(vec![("PORT", Rule::new().of_type(ValueType::Int))]);

        let err = validate(&schema, &parse_str("PORT=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);

        let err = validate(&schema, &RawEnv::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn absent_optional_bool_is_false() {
        let schema = schema(vec![("DEBUG", Rule::new().of_type(ValueType::Bool))]);

        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get("DEBUG"), Some(&Value::Bool(false)));
    }

    #[test]
    fn empty_optional_bool_is_false() {
        let schema = schema(vec![("DEBUG", Rule::new().of_type(ValueType::Bool))]);

        let result = validate(&schema, &parse_str("DEBUG=")).unwrap();
        assert_eq!(result.get_bool("DEBUG"), Some(false));
    }

    #[test]
    fn empty_required_bool_is_missing() {
        let schema = schema(vec![("DEBUG", Rule::new().of_type(ValueType::Bool).required())]);

        let err = validate(&schema, &parse_str("DEBUG=")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredVariable);
    }

    #[test]
    fn absent_optional_string_is_empty() {
        let schema = schema(vec![("NAME", Rule::new().of_type(ValueType::String))]);

        let result = validate(&schema, &RawEnv::new()).unwrap();
        assert_eq!(result.get_str("NAME"), Some(""));
    }

    #[test]
    fn first_failing_key_in_schema_order_is_reported() {
        let schema = schema(vec![
            ("OK", Rule::new().of_type(ValueType::Int)),
            ("FIRST", Rule::new().of_type(ValueType::Bool)),
            ("SECOND", Rule::new().required()),
        ]);

        let err = validate(&schema, &parse_str("OK=1\nFIRST=maybe")).unwrap_err();
        assert_eq!(err.key(), Some("FIRST"));
        assert_eq!(err.kind(), ErrorKind::InvalidType);
    }

    #[test]
    fn empty_schema_yields_empty_result() {
        let result = validate(&Schema::default(), &parse_str("A=1\nB=2")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn validate_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema(vec![("PORT", Rule::new())]);

        let err = validate_file(&schema, dir.path().join(".env")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }
}
