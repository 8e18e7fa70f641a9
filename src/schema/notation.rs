//! One-line rule notation.
//!
//! ```text
//! KEY[:TYPE][,required][,default=VALUE][,allowed=a|b|c][,pattern=REGEX]
//! ```
//!
//! `allowed` also accepts a bracketed list, `allowed=[a,b,c]`. `pattern=`
//! must be the last attribute and takes the rest of the text verbatim, so a
//! pattern may contain commas. Defaults are string values.

use crate::error::SchemaError;
use crate::schema::rule::{Rule, Schema, ValueType};

/// Parses one rule in the notation above into its variable name and rule.
///
/// # Errors
///
/// Returns [`SchemaError::UnknownType`] for an unrecognized type name and
/// [`SchemaError::MalformedRule`] for an empty key, an unknown or repeated
/// attribute, or an unterminated bracket list.
pub fn parse_rule(spec: &str) -> Result<(String, Rule), SchemaError> {
    let malformed = |reason: &str| SchemaError::MalformedRule {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let (head, mut rest) = match spec.split_once(',') {
        Some((head, rest)) => (head, Some(rest)),
        None => (spec, None),
    };

    let (key, type_name) = match head.split_once(':') {
        Some((key, type_name)) => (key.trim(), type_name.trim()),
        None => (head.trim(), ""),
    };

    if key.is_empty() {
        return Err(malformed("empty variable name"));
    }

    let mut rule = Rule::new();
    if !type_name.is_empty() {
        let value_type =
            ValueType::from_name(type_name).ok_or_else(|| SchemaError::UnknownType {
                key: key.to_string(),
                type_name: type_name.to_string(),
            })?;
        rule = rule.of_type(value_type);
    }

    let mut seen_required = false;

    while let Some(attrs) = rest {
        let attrs = attrs.trim_start();

        if let Some(pattern) = attrs.strip_prefix("pattern=") {
            rule = rule.pattern(pattern);
            break;
        }

        if let Some(list) = attrs.strip_prefix("allowed=[") {
            let (items, after) = list
                .split_once(']')
                .ok_or_else(|| malformed("unterminated allowed list"))?;
            if rule.allowed.is_some() {
                return Err(malformed("'allowed' given twice"));
            }
            rule = rule.allowed(split_items(items, ','));
            rest = match after.trim_start() {
                "" => None,
                after => Some(
                    after
                        .strip_prefix(',')
                        .ok_or_else(|| malformed("expected ',' after allowed list"))?,
                ),
            };
            continue;
        }

        let (token, next) = match attrs.split_once(',') {
            Some((token, next)) => (token.trim(), Some(next)),
            None => (attrs.trim(), None),
        };
        rest = next;

        match token.split_once('=') {
            None if token == "required" => {
                if seen_required {
                    return Err(malformed("'required' given twice"));
                }
                seen_required = true;
                rule = rule.required();
            }
            Some(("required", flag)) => {
                if seen_required {
                    return Err(malformed("'required' given twice"));
                }
                let flag = match flag.trim() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(malformed("'required' must be true or false")),
                };
                seen_required = true;
                rule = rule.with_required(flag);
            }
            Some(("default", value)) => {
                if rule.default.is_some() {
                    return Err(malformed("'default' given twice"));
                }
                rule = rule.default_value(value.trim());
            }
            Some(("allowed", values)) => {
                if rule.allowed.is_some() {
                    return Err(malformed("'allowed' given twice"));
                }
                rule = rule.allowed(split_items(values, '|'));
            }
            _ => return Err(malformed(&format!("unknown attribute '{token}'"))),
        }
    }

    Ok((key.to_string(), rule))
}

/// Parses a list of rules, in order, into a schema.
///
/// # Errors
///
/// Returns the first [`SchemaError`] from [`parse_rule`] or from building the
/// schema (duplicate variable, invalid pattern).
pub fn parse_schema<I, S>(specs: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = Schema::builder();
    for spec in specs {
        let (key, rule) = parse_rule(spec.as_ref())?;
        builder = builder.var(key, rule);
    }
    builder.build()
}

fn split_items(items: &str, separator: char) -> Vec<String> {
    if items.trim().is_empty() {
        return Vec::new();
    }
    items
        .split(separator)
        .map(|item| item.trim().to_string())
        .collect()
}
