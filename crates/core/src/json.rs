//! JSON validation, canonical formatting and top-level diffing

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Outcome of [`validate_json`]. Exactly one of `formatted` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValidation {
    pub valid: bool,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedValue {
    pub old: Value,
    pub new: Value,
}

/// Keys added, removed or changed between two JSON objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDiff {
    pub added: Map<String, Value>,
    pub removed: Map<String, Value>,
    pub modified: BTreeMap<String, ModifiedValue>,
}

impl JsonDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Parse `text` and, if it is valid, render it with 2-space indentation and
/// keys sorted at every depth.
pub fn validate_json(text: &str) -> JsonValidation {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => match serde_json::to_string_pretty(&sort_keys(value)) {
            Ok(formatted) => JsonValidation {
                valid: true,
                formatted: Some(formatted),
                error: None,
            },
            Err(e) => JsonValidation {
                valid: false,
                formatted: None,
                error: Some(e.to_string()),
            },
        },
        Err(e) => JsonValidation {
            valid: false,
            formatted: None,
            error: Some(e.to_string()),
        },
    }
}

/// Parse both texts and diff them with [`diff`].
pub fn diff_json(json1: &str, json2: &str) -> Result<JsonDiff> {
    let left = parse(json1)?;
    let right = parse(json2)?;
    Ok(diff(&left, &right))
}

/// Compare the top-level keys of two objects.
///
/// Nested values are compared structurally but never descended into for
/// reporting. If either side is not an object the diff is empty.
pub fn diff(left: &Value, right: &Value) -> JsonDiff {
    let (Value::Object(left), Value::Object(right)) = (left, right) else {
        return JsonDiff::default();
    };

    let mut result = JsonDiff::default();

    for (key, value) in right {
        if !left.contains_key(key) {
            result.added.insert(key.clone(), value.clone());
        }
    }

    for (key, old) in left {
        match right.get(key) {
            None => {
                result.removed.insert(key.clone(), old.clone());
            }
            Some(new) if !values_equal(old, new) => {
                result.modified.insert(
                    key.clone(),
                    ModifiedValue {
                        old: old.clone(),
                        new: new.clone(),
                    },
                );
            }
            Some(_) => {}
        }
    }

    result
}

/// Recursive structural equality where numbers compare by value, so `1` and
/// `1.0` are equal. Two integers compare exactly, whatever their magnitude.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, value)| {
                    y.get(key).is_some_and(|other| values_equal(value, other))
                })
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    match (integer_text(x), integer_text(y)) {
        (Some(x), Some(y)) => x == y,
        _ => x.as_f64() == y.as_f64(),
    }
}

/// Decimal text of an integer literal, with `-0` folded into `0`. Numbers are
/// kept as written (`arbitrary_precision`), so this is exact past 64 bits.
fn integer_text(number: &Number) -> Option<String> {
    let text = number.to_string();

    if text.contains(['.', 'e', 'E']) {
        return None;
    }

    Some(if text == "-0" { "0".to_string() } else { text })
}

fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::InvalidJson(e.to_string()))
}

/// Rebuild every object with its keys in lexicographic order. This holds
/// whether or not `serde_json` was built with `preserve_order`.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
