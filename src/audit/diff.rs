//! Readable summaries of what changed between two JSON states

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

const MAX_STRING_CHARS: usize = 50;

/// Describe how `before` became `after`, or `None` when they are equal
///
/// Objects are compared one level deep, keys in sorted order:
/// `balance: 100.0 -> 150.0, note: (added) -> "rent"`.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(b), Value::Object(a)) => field_changes(b, a),
        _ if before != after => vec![Change::new(None, Some(before), Some(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        return None;
    }
    let parts: Vec<String> = changes.iter().map(ToString::to_string).collect();
    Some(parts.join(", "))
}

fn field_changes<'a>(
    before: &'a Map<String, Value>,
    after: &'a Map<String, Value>,
) -> Vec<Change<'a>> {
    let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    keys.into_iter()
        .filter_map(|key| {
            let (old, new) = (before.get(key), after.get(key));
            (old != new).then(|| Change::new(Some(key), old, new))
        })
        .collect()
}

struct Change<'a> {
    key: Option<&'a str>,
    old: Option<&'a Value>,
    new: Option<&'a Value>,
}

impl<'a> Change<'a> {
    fn new(key: Option<&'a String>, old: Option<&'a Value>, new: Option<&'a Value>) -> Self {
        Self {
            key: key.map(String::as_str),
            old,
            new,
        }
    }
}

impl fmt::Display for Change<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = self.key {
            write!(f, "{}: ", key)?;
        }
        match self.old {
            Some(v) => write!(f, "{}", Brief(v))?,
            None => f.write_str("(added)")?,
        }
        f.write_str(" -> ")?;
        match self.new {
            Some(v) => write!(f, "{}", Brief(v)),
            None => f.write_str("(removed)"),
        }
    }
}

/// Short rendering of a value: long strings are cut, containers are counted
struct Brief<'a>(&'a Value);

impl fmt::Display for Brief<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
                let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
                write!(f, "\"{}...\"", head)
            }
            Value::Array(items) => write!(f, "[{} items]", items.len()),
            Value::Object(fields) => write!(f, "{{{} fields}}", fields.len()),
            other => write!(f, "{}", other),
        }
    }
}
