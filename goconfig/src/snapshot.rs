//! Snapshot and declaration text for registries.
//!
//! A snapshot is a flat YAML mapping of entry names to values, written in
//! traversal order. Entries still at a false or empty default are omitted.

use std::fmt::Write as _;

use serde_yaml::Value;

use crate::entry::Cascade;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::value::{parse_bool, Kind, TriState};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

const FIELD_INDENT: &str = "\n    ";
const VALUE_INDENT: &str = "\n        ";

/// Restores stored values into `registry`.
///
/// Only current values change; cascades are not run. Unknown names and
/// values that do not fit an entry are logged and skipped.
///
/// # Errors
///
/// Returns an error if the text is not YAML or not a mapping.
///
/// # Examples
///
/// ```
/// use goconfig::{snapshot, Entry, Registry, TriState};
///
/// let mut registry = Registry::new();
/// registry.declare("t1", Entry::new(TriState::False));
/// snapshot::overlay(&mut registry, "t1: true\nghost: 1\n").unwrap();
/// assert_eq!(registry.get("t1").unwrap().value(), &TriState::True);
/// ```
pub fn overlay(registry: &mut Registry, text: &str) -> Result<()> {
    let map = match serde_yaml::from_str::<Value>(text)? {
        Value::Null => return Ok(()),
        Value::Mapping(map) => map,
        _ => {
            return Err(Error::Malformed {
                source_name: "snapshot".to_string(),
                message: "expected a mapping of entry names".to_string(),
            })
        }
    };

    for (key, value) in &map {
        let Some(name) = key_text(key) else {
            log::warn!("ignoring snapshot key {key:?}");
            continue;
        };
        let Some(entry) = registry.get(&name) else {
            log::warn!("{name} not found");
            continue;
        };
        match stored_value(entry.kind(), value) {
            Some(value) => {
                registry.set_value(&name, value);
            }
            None => log::warn!("{name}: ignoring stored value {value:?}"),
        }
    }
    Ok(())
}

fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn stored_value(kind: Kind, value: &Value) -> Option<TriState> {
    match (kind, value) {
        (Kind::Tag, Value::Null) => Some(TriState::False),
        (Kind::String, Value::Null) => Some(TriState::from("")),
        (Kind::Tag, Value::Bool(b)) => Some(TriState::from(*b)),
        (Kind::String, Value::Bool(b)) => Some(TriState::from(b.to_string())),
        (Kind::String, Value::Number(n)) => Some(TriState::from(n.to_string())),
        (Kind::String, Value::String(s)) => Some(TriState::from(s.as_str())),
        (Kind::Tag, Value::String(s)) => parse_bool(s).map(TriState::from),
        (_, Value::Tagged(tagged)) => stored_value(kind, &tagged.value),
        _ => None,
    }
}

/// Snapshot text for every entry worth keeping, in traversal order.
///
/// An entry is written when its value is true, when it is a string and
/// either the value or the default is non-empty, or when it is false but
/// defaults to true.
///
/// # Examples
///
/// ```
/// use goconfig::{snapshot, Entry, Registry, TriState};
///
/// let mut registry = Registry::new();
/// registry.declare("t1", Entry::new(TriState::True));
/// registry.declare("t2", Entry::new(TriState::False));
/// registry.declare("main.s", Entry::new(TriState::from("The quick brown fox")));
/// assert_eq!(
///     snapshot::serialize_snapshot(&registry),
///     "t1: true\nmain.s: The quick brown fox\n"
/// );
/// ```
#[must_use]
pub fn serialize_snapshot(registry: &Registry) -> String {
    let mut out = String::new();
    for entry in registry.walk() {
        let value = entry.value();
        let keep = match value {
            TriState::True => true,
            TriState::False => entry.init().is_true(),
            TriState::String(s) => !s.is_empty() || entry.init().is_set(),
        };
        if keep {
            let _ = writeln!(out, "{}: {}", entry.name(), value.external_text());
        }
    }
    out
}

/// Verbose declaration text for one entry, or `None` if it does not exist.
///
/// # Examples
///
/// ```
/// use goconfig::{snapshot, Entry, Registry, TriState};
///
/// let mut registry = Registry::new();
/// registry.declare("t", Entry::new(TriState::False).with_help("Enable t"));
/// assert_eq!(
///     snapshot::serialize_entry(&registry, "t").unwrap(),
///     "t:\n    help: Enable t\n    init: false\n"
/// );
/// ```
#[must_use]
pub fn serialize_entry(registry: &Registry, name: &str) -> Option<String> {
    let entry = registry.get(name)?;
    let mut out = format!("{name}:");
    if !entry.help().is_empty() {
        out.push_str(FIELD_INDENT);
        out.push_str("help: ");
        out.push_str(&expand_text(entry.help()));
    }
    out.push_str(FIELD_INDENT);
    out.push_str("init: ");
    out.push_str(&expand_value(entry.init()));
    if !entry.choices().is_empty() {
        out.push_str(FIELD_INDENT);
        out.push_str("choices:");
        for choice in entry.choices() {
            out.push_str(VALUE_INDENT);
            out.push_str("- ");
            out.push_str(&expand_text(choice));
        }
    }
    expand_cascade(&mut out, "set", entry.set_cascade());
    expand_cascade(&mut out, "reset", entry.reset_cascade());
    out.push('\n');
    Some(out)
}

fn expand_cascade(out: &mut String, field: &str, cascade: &Cascade) {
    if cascade.is_empty() {
        return;
    }
    out.push_str(FIELD_INDENT);
    out.push_str(field);
    out.push(':');
    for (target, value) in cascade {
        out.push_str(VALUE_INDENT);
        out.push_str(target);
        out.push_str(": ");
        out.push_str(&expand_value(value));
    }
}

fn expand_value(value: &TriState) -> String {
    match value {
        TriState::String(s) => expand_text(s),
        tag => tag.external_text(),
    }
}

/// Multi-line text becomes a literal block; anything else its external form.
fn expand_text(text: &str) -> String {
    if !text.contains('\n') {
        return TriState::from(text).external_text();
    }
    let mut block = text.replace('\n', VALUE_INDENT);
    if block.ends_with(VALUE_INDENT) {
        block.truncate(block.len() - VALUE_INDENT.len());
    }
    format!("!!str |{VALUE_INDENT}{block}")
}
