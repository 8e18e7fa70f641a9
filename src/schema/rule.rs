//! Rule and schema types.

use crate::error::SchemaError;
use crate::value::Value;

use indexmap::IndexMap;
use regex::Regex;
use std::fmt;

/// Target type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Keep the raw string.
    String,
    /// Signed decimal integer.
    Int,
    /// Decimal or scientific floating-point number.
    Float,
    /// Boolean literal.
    Bool,
}

impl ValueType {
    /// Name used in rules and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    /// Looks up a type by name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constraints for one variable.
///
/// ```
/// use envschema::schema::{Rule, ValueType};
///
/// let port = Rule::new().of_type(ValueType::Int).required();
/// let env = Rule::new()
///     .of_type(ValueType::String)
///     .default_value("dev")
///     .allowed(["dev", "test", "production"]);
/// # let _ = (port, env);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rule {
    pub(crate) value_type: Option<ValueType>,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
    pub(crate) allowed: Option<Vec<String>>,
    pub(crate) pattern: Option<String>,
}

impl Rule {
    /// Creates an untyped, optional rule with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Casts the value to `value_type`.
    #[must_use]
    pub const fn of_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Uses `value` when the variable is absent from the file.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Rejects an absent or empty value.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether the variable is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Restricts the raw value to one of `values` (exact match).
    #[must_use]
    pub fn allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Requires the raw value to fully match the regular expression `pattern`.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Declared type, `None` when the value is not cast.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    /// Default value, if any.
    #[must_use]
    pub const fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the variable is required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Allowed raw values, if restricted.
    #[must_use]
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }

    /// Declared pattern, if any.
    #[must_use]
    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

/// A rule whose pattern has been compiled.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) rule: Rule,
    pub(crate) matcher: Option<Regex>,
}

impl CompiledRule {
    fn compile(key: &str, rule: Rule) -> Result<Self, SchemaError> {
        let matcher = rule
            .pattern
            .as_deref()
            .map(|pattern| {
                let invalid = |source| SchemaError::InvalidPattern {
                    key: key.to_string(),
                    pattern: pattern.to_string(),
                    source,
                };
                // errors should quote the pattern as written, not the anchored form
                Regex::new(pattern).map_err(invalid)?;
                Regex::new(&anchored(pattern)).map_err(invalid)
            })
            .transpose()?;

        Ok(Self { rule, matcher })
    }
}

/// Wraps `pattern` so a match must cover the whole value.
///
/// The `(?x)` and newline before the closing group end a trailing
/// verbose-mode `# comment`; outside verbose mode they match nothing.
fn anchored(pattern: &str) -> String {
    format!("^(?:{pattern}(?x)\n)$")
}

/// Ordered set of variable rules.
///
/// Built once through [`SchemaBuilder`]; patterns are compiled at build time
/// so validation never re-inspects rule definitions.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub(crate) rules: IndexMap<String, CompiledRule>,
}

impl Schema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Returns the rule for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.get(key).map(|compiled| &compiled.rule)
    }

    /// Iterates over `(name, rule)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(k, c)| (k.as_str(), &c.rule))
    }

    /// Iterates over variable names in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no variables are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    rules: Vec<(String, Rule)>,
}

impl SchemaBuilder {
    /// Declares variable `key` with `rule`.
    #[must_use]
    pub fn var(mut self, key: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((key.into(), rule));
        self
    }

    /// Compiles all rules into a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateKey`] if a variable is declared twice
    /// and [`SchemaError::InvalidPattern`] if a pattern does not compile.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut rules = IndexMap::with_capacity(self.rules.len());

        for (key, rule) in self.rules {
            if rules.contains_key(&key) {
                return Err(SchemaError::DuplicateKey { key });
            }
            let compiled = CompiledRule::compile(&key, rule)?;
            rules.insert(key, compiled);
        }

        Ok(Schema { rules })
    }
}
