//! Deterministic, order-insensitive JSON re-serialization.
//!
//! Structurally identical JSON documents diff as identical regardless of key
//! order or formatting: object keys are sorted by ordinal string comparison at
//! every nesting level, array order is preserved, and scalars are untouched.

use serde_json::Value;

use crate::errors::DiffError;

/// Canonicalize `text` as JSON, falling back to the input unchanged when it
/// does not parse. Never fails.
///
/// With `pretty` the output uses 2-space indentation, otherwise it is compact.
pub fn canonicalize(text: &str, pretty: bool) -> String {
    match try_canonicalize(text, pretty) {
        Ok(normalized) => normalized,
        Err(err) => {
            tracing::debug!("canonicalization fell back to raw text: {}", err);
            text.to_string()
        }
    }
}

/// Strict form of [`canonicalize`]: errors instead of falling back, for
/// callers that need to know whether the input parsed as JSON.
pub fn try_canonicalize(text: &str, pretty: bool) -> Result<String, DiffError> {
    let value: Value = serde_json::from_str(text)?;
    let normalized = sort_keys(value);
    let rendered = if pretty {
        serde_json::to_string_pretty(&normalized)?
    } else {
        serde_json::to_string(&normalized)?
    };
    Ok(rendered)
}

/// Rebuild the value bottom-up; object maps order their keys by ordinal
/// (byte-wise) comparison, arrays keep their element order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(key, val)| (key, sort_keys(val))).collect()),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_top_level_keys() {
        assert_eq!(canonicalize(r#"{"b":2,"a":1}"#, false), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn sorts_keys_at_every_nesting_level() {
        let input = r#"{"z":{"d":4,"c":3},"a":[{"y":2,"x":1}]}"#;
        assert_eq!(
            canonicalize(input, false),
            r#"{"a":[{"x":1,"y":2}],"z":{"c":3,"d":4}}"#
        );
    }

    #[test]
    fn preserves_array_order() {
        assert_eq!(canonicalize("[3,1,2]", false), "[3,1,2]");
    }

    #[test]
    fn key_order_insensitive_outputs_match() {
        let a = canonicalize(r#"{"a":1,"b":2}"#, true);
        let b = canonicalize(r#"{"b":2,"a":1}"#, true);
        assert_eq!(a, b);
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let out = canonicalize(r#"{"a":1}"#, true);
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn invalid_json_passes_through_unchanged() {
        let input = "not json at all {";
        assert_eq!(canonicalize(input, true), input);
        assert!(try_canonicalize(input, true).is_err());
    }

    #[test]
    fn scalars_untouched() {
        assert_eq!(canonicalize("42", false), "42");
        assert_eq!(canonicalize(r#""hi""#, false), r#""hi""#);
        assert_eq!(canonicalize("null", false), "null");
    }
}
