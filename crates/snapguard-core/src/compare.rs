//! Loose structural comparison between a freshly produced value and its
//! stored baseline.
//!
//! ## Coercion rules
//!
//! | a \ b                    | equal when                                     |
//! |--------------------------|------------------------------------------------|
//! | null, null               | always                                         |
//! | bool, any                | `a == truthy(b)`                               |
//! | null, string             | string is empty                                |
//! | null, number             | number is zero                                 |
//! | null, container          | container is empty                             |
//! | number, number           | same numeric value                             |
//! | number, numeric string   | same numeric value                             |
//! | number, other string     | number's JSON text equals the string           |
//! | string, string           | identical, or both numeric with equal value    |
//! | container, container     | same key set, every value loosely equal        |
//! | container, scalar        | never                                          |
//!
//! Arrays are maps keyed `"0".."n-1"`, so two arrays compare positionally and
//! `[1, 2]` equals `{"0": 1, "1": 2}`. Falsy values are `null`, `false`, `0`,
//! `""`, `"0"` and empty containers. A numeric string is an optional sign,
//! digits with an optional fraction and exponent, and optional surrounding
//! ASCII whitespace.

use serde_json::{Number, Value};

/// Key used for the single entry reported when the expected value is not an
/// object and so cannot be decomposed per field.
pub const WHOLE_VALUE_KEY: &str = "$";

/// One differing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchEntry {
    pub key: String,
    /// Representation of the expected (freshly produced) value.
    pub expected: String,
    /// Representation of the stored value; `None` when the baseline has no
    /// such field.
    pub stored: Option<String>,
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    /// An empty list still counts as success: every expected field checked
    /// out even though the values as a whole were not loosely equal.
    Mismatch(Vec<MismatchEntry>),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        match self {
            MatchResult::Match => true,
            MatchResult::Mismatch(entries) => entries.is_empty(),
        }
    }

    pub fn mismatches(&self) -> &[MismatchEntry] {
        match self {
            MatchResult::Match => &[],
            MatchResult::Mismatch(entries) => entries,
        }
    }
}

/// Compare `expected` against the stored baseline.
///
/// Object values are checked key by key in `expected`'s order; keys present
/// only in `stored` are ignored. Anything else is reported as one entry
/// under [`WHOLE_VALUE_KEY`].
pub fn compare(expected: &Value, stored: &Value) -> MatchResult {
    if loose_eq(expected, stored) {
        return MatchResult::Match;
    }

    match expected {
        Value::Object(fields) => {
            let entries = fields
                .iter()
                .filter_map(|(key, exp)| match lookup(stored, key) {
                    Some(st) if loose_eq(exp, st) => None,
                    found => Some(MismatchEntry {
                        key: key.clone(),
                        expected: repr(exp),
                        stored: found.map(repr),
                    }),
                })
                .collect();
            MatchResult::Mismatch(entries)
        }
        _ => MatchResult::Mismatch(vec![MismatchEntry {
            key: WHOLE_VALUE_KEY.to_string(),
            expected: repr(expected),
            stored: Some(repr(stored)),
        }]),
    }
}

/// Loose value equality; see the module docs for the coercion table.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == truthy(other),
        (Value::Null, other) | (other, Value::Null) => is_zero_like(other),
        (Value::Number(x), Value::Number(y)) => {
            Num::from_json(x).same_value(Num::from_json(y))
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match Num::from_text(s) {
                Some(parsed) => Num::from_json(n).same_value(parsed),
                None => n.to_string() == *s,
            }
        }
        (Value::String(x), Value::String(y)) => {
            x == y
                || matches!(
                    (Num::from_text(x), Num::from_text(y)),
                    (Some(p), Some(q)) if p.same_value(q)
                )
        }
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
            containers_eq(a, b)
        }
        _ => false,
    }
}

/// Textual form handed to the diff renderer.
///
/// Strings are verbatim, null is empty, containers are pretty JSON so a
/// line diff shows which element moved.
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}

/// Truthiness used when one side is a bool.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !Num::from_json(n).is_zero(),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn is_zero_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => Num::from_json(n).is_zero(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn container_len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(fields) => fields.len(),
        _ => 0,
    }
}

fn containers_eq(a: &Value, b: &Value) -> bool {
    if container_len(a) != container_len(b) {
        return false;
    }
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.iter().zip(ys).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(fields), other) => fields
            .iter()
            .all(|(key, x)| lookup(other, key).is_some_and(|y| loose_eq(x, y))),
        (Value::Array(items), other) => items.iter().enumerate().all(|(i, x)| {
            lookup(other, &i.to_string()).is_some_and(|y| loose_eq(x, y))
        }),
        _ => false,
    }
}

/// Field of a container by key. Arrays answer to canonical decimal indices
/// only (`"1"`, not `"01"`).
fn lookup<'a>(container: &'a Value, key: &str) -> Option<&'a Value> {
    match container {
        Value::Object(fields) => fields.get(key),
        Value::Array(items) => key
            .parse::<usize>()
            .ok()
            .filter(|index| index.to_string() == key)
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Numeric view of a JSON number or numeric string. Integers compare
/// exactly; anything involving a fraction or exponent compares as `f64`.
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i128),
    Float(f64),
}

impl Num {
    fn from_json(n: &Number) -> Num {
        if let Some(i) = n.as_i64() {
            Num::Int(i128::from(i))
        } else if let Some(u) = n.as_u64() {
            Num::Int(i128::from(u))
        } else {
            Num::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn from_text(s: &str) -> Option<Num> {
        let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
        if !is_numeric_literal(trimmed) {
            return None;
        }
        match trimmed.parse::<i128>() {
            Ok(i) => Some(Num::Int(i)),
            Err(_) => trimmed.parse::<f64>().ok().map(Num::Float),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Num::Int(i) => i == 0,
            Num::Float(f) => f == 0.0,
        }
    }

    fn same_value(self, other: Num) -> bool {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
