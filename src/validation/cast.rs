//! Explicit casting rules.
//!
//! Each target type has a closed grammar; nothing is coerced beyond it and
//! the result never depends on locale.

use crate::error::ValidationError;
use crate::schema::ValueType;
use crate::value::Value;

const TRUE_LITERALS: [&str; 4] = ["true", "1", "yes", "on"];
const FALSE_LITERALS: [&str; 4] = ["false", "0", "no", "off"];

/// Casts `raw` to `value_type`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidType`] naming `key` and the type when
/// `raw` is not a literal of that type.
pub fn cast(key: &str, value_type: ValueType, raw: &str) -> Result<Value, ValidationError> {
    let value = match value_type {
        ValueType::String => Some(Value::String(raw.to_string())),
        ValueType::Int => parse_int(raw).map(Value::Int),
        ValueType::Float => parse_float(raw).map(Value::Float),
        ValueType::Bool => parse_bool(raw).map(Value::Bool),
    };

    value.ok_or_else(|| ValidationError::InvalidType {
        key: key.to_string(),
        expected: value_type.name().to_string(),
    })
}

/// Parses `[+-]?(0|[1-9][0-9]*)` into an `i64`.
///
/// Leading zeros are rejected; out-of-range values return `None`.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);

    let well_formed = match digits.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };

    if !well_formed {
        return None;
    }
    raw.parse().ok()
}

/// Parses a decimal or scientific literal into a finite `f64`.
///
/// Accepted: optional sign, digits with an optional fraction (`1`, `1.`,
/// `1.5`, `.5`), then an optional exponent (`e10`, `E-3`). Rejects `inf`,
/// `nan`, hex and digit separators.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    if !is_float_literal(raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Parses a boolean literal, ASCII case-insensitively.
///
/// `true`, `1`, `yes`, `on` are true; `false`, `0`, `no`, `off` and the empty
/// string are false.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.is_empty() {
        Some(false)
    } else if TRUE_LITERALS.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(true)
    } else if FALSE_LITERALS.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(false)
    } else {
        None
    }
}

fn is_float_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut pos = 0;

    let skip_digits = |pos: &mut usize| {
        let start = *pos;
        while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
            *pos += 1;
        }
        *pos - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let mut mantissa_digits = skip_digits(&mut pos);
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        mantissa_digits += skip_digits(&mut pos);
    }
    if mantissa_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        if skip_digits(&mut pos) == 0 {
            return false;
        }
    }

    pos == bytes.len()
}
