//! Interpretation of one declaration document.
//!
//! A document is parsed once into a generic YAML tree. Each pass is a
//! pattern match over the top-level mapping:
//!
//! 1. verbose records (`name: {init, help, choices, set, reset}`)
//! 2. typed scalars, including executable tags, and a scalar `import`
//! 3. null shorthand (`name:`), registered as an empty string
//! 4. an `import` sequence
//!
//! A name registered earlier, by this file or a more specific one, is never
//! replaced.

use std::borrow::Cow;

use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Value};

use crate::entry::{Cascade, Entry};
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::shell::ExecTag;
use crate::value::{parse_bool, TriState};

/// Reserved key naming other packages to import.
pub const IMPORT: &str = "import";

/// Tags the parser resolves itself.
const CORE_TAGS: [&str; 6] = ["str", "bool", "int", "float", "seq", "map"];

/// Registers the entries declared by `text` and returns its import targets.
///
/// # Errors
///
/// Returns [`Error::Malformed`] if the text is not YAML, is not a mapping,
/// or holds an invalid record or unknown tag.
pub fn apply(registry: &mut Registry, source_name: &str, text: &str) -> Result<Vec<String>> {
    let document = parse(source_name, text)?;
    let mut doc = Document {
        registry,
        source_name,
        imports: Vec::new(),
    };

    let fields = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(map) => doc.keyed(map)?,
        _ => return Err(doc.malformed("expected a mapping of entry names")),
    };

    let before = doc.registry.len();
    doc.verbose_pass(&fields)?;
    doc.scalar_pass(&fields)?;
    doc.null_pass(&fields);
    doc.import_pass(&fields);
    log::debug!(
        "{source_name}: {} entries, {} imports",
        doc.registry.len() - before,
        doc.imports.len()
    );
    Ok(doc.imports)
}

fn parse(source_name: &str, text: &str) -> Result<Value> {
    serde_yaml::from_str(&localize_tags(text)).map_err(|e| Error::Malformed {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// Rewrites every `!!name` tag outside the YAML core schema to `!name`.
///
/// The parser expands `!!x` into the core schema namespace, where custom
/// names are dropped and `!!null` rejects an empty scalar; local tags
/// survive untouched. Only tags in node position are rewritten: quoted
/// scalars, block scalars, comments and text inside plain scalars are
/// copied verbatim.
fn localize_tags(text: &str) -> Cow<'_, str> {
    if !text.contains("!!") {
        return Cow::Borrowed(text);
    }
    let mut scanner = TagScanner::default();
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        scanner.line(line, &mut out);
    }
    Cow::Owned(out)
}

fn is_core_tag(name: &str) -> bool {
    CORE_TAGS.contains(&name)
}

/// Lexical state carried from one line to the next.
#[derive(Debug, Default)]
struct TagScanner {
    /// Open quote of a scalar spanning lines.
    quote: Option<char>,
    /// Nesting of `[` and `{`.
    flow_depth: usize,
    /// Indentation of the line that opened a block scalar.
    block_indent: Option<usize>,
}

impl TagScanner {
    fn line(&mut self, line: &str, out: &mut String) {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if let Some(parent) = self.block_indent {
            if line.trim().is_empty() || indent > parent {
                out.push_str(line);
                return;
            }
            self.block_indent = None;
        }

        let mut node_start = self.quote.is_none();
        let mut prev_blank = true;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if let Some(quote) = self.quote {
                out.push(c);
                if c == '\\' && quote == '"' {
                    if let Some((_, escaped)) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote {
                    if quote == '\'' && chars.peek().is_some_and(|&(_, n)| n == '\'') {
                        chars.next();
                        out.push('\'');
                    } else {
                        self.quote = None;
                    }
                }
                prev_blank = false;
                continue;
            }

            let next_blank = chars.peek().map_or(true, |&(_, n)| n.is_whitespace());
            match c {
                '#' if prev_blank => {
                    out.push_str(&line[i..]);
                    return;
                }
                '!' | '&' | '*' if node_start => {
                    let token = &line[i..];
                    let len = token
                        .find(|t: char| t.is_whitespace() || matches!(t, ',' | ']' | '}'))
                        .unwrap_or(token.len());
                    match token[..len].strip_prefix("!!") {
                        Some(name) if !name.is_empty() && !is_core_tag(name) => {
                            out.push('!');
                            out.push_str(name);
                        }
                        _ => out.push_str(&token[..len]),
                    }
                    while chars.peek().is_some_and(|&(j, _)| j < i + len) {
                        chars.next();
                    }
                    node_start = c != '*';
                    prev_blank = false;
                    continue;
                }
                '\'' | '"' if node_start => {
                    self.quote = Some(c);
                    node_start = false;
                }
                '|' | '>' if node_start && self.flow_depth == 0 => {
                    self.block_indent = Some(indent);
                    out.push_str(&line[i..]);
                    return;
                }
                '[' | '{' if node_start => self.flow_depth += 1,
                ']' | '}' if self.flow_depth > 0 => {
                    self.flow_depth -= 1;
                    node_start = false;
                }
                ',' if self.flow_depth > 0 => node_start = true,
                ':' if next_blank => node_start = true,
                '-' | '?' if node_start && next_blank => {}
                c if c.is_whitespace() => {}
                _ => node_start = false,
            }
            out.push(c);
            prev_blank = c.is_whitespace();
        }
    }
}

struct Document<'r, 's> {
    registry: &'r mut Registry,
    source_name: &'s str,
    imports: Vec<String>,
}

impl Document<'_, '_> {
    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::Malformed {
            source_name: self.source_name.to_string(),
            message: message.into(),
        }
    }

    fn keyed(&self, map: Mapping) -> Result<Vec<(String, Value)>> {
        map.into_iter()
            .map(|(key, value)| match scalar_text(&key) {
                Some(name) => Ok((name, value)),
                None => Err(self.malformed(format!("{key:?} is not a valid entry name"))),
            })
            .collect()
    }

    fn is_new(&self, name: &str) -> bool {
        name != IMPORT && !self.registry.contains(name)
    }

    fn declare(&mut self, name: &str, entry: Entry) {
        self.registry.declare(name, entry);
    }

    fn verbose_pass(&mut self, fields: &[(String, Value)]) -> Result<()> {
        for (name, value) in fields {
            if let Value::Mapping(record) = value {
                if self.is_new(name) {
                    let entry = self.record(name, record)?;
                    self.declare(name, entry);
                }
            }
        }
        Ok(())
    }

    fn scalar_pass(&mut self, fields: &[(String, Value)]) -> Result<()> {
        for (name, value) in fields {
            match value {
                Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Tagged(_) => {
                    if name == IMPORT {
                        let target = self.scalar(name, value)?;
                        self.imports.push(target.plain_text().to_string());
                    } else if self.is_new(name) {
                        let init = self.scalar(name, value)?;
                        self.declare(name, Entry::new(init));
                    }
                }
                Value::Sequence(_) if name != IMPORT => {
                    log::warn!("{}: ignoring list value of {name}", self.source_name);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn null_pass(&mut self, fields: &[(String, Value)]) {
        for (name, value) in fields {
            if value.is_null() && self.is_new(name) {
                self.declare(name, Entry::new(TriState::from("")));
            }
        }
    }

    fn import_pass(&mut self, fields: &[(String, Value)]) {
        for (name, value) in fields {
            if let (IMPORT, Value::Sequence(targets)) = (name.as_str(), value) {
                for target in targets {
                    match scalar_text(target) {
                        Some(target) => self.imports.push(target),
                        None => log::warn!(
                            "{}: ignoring import of {target:?}",
                            self.source_name
                        ),
                    }
                }
            }
        }
    }

    fn record(&self, name: &str, record: &Mapping) -> Result<Entry> {
        let mut init = TriState::default();
        let mut help = String::new();
        let mut choices = Vec::new();
        let mut set = Cascade::new();
        let mut reset = Cascade::new();

        for (field, value) in record {
            let Some(field) = scalar_text(field) else {
                return Err(self.malformed(format!("{name}: invalid field {field:?}")));
            };
            match field.as_str() {
                "init" => init = self.scalar(name, value)?,
                "help" => help = self.text(name, &field, value)?,
                "choices" => choices = self.choices(name, value)?,
                "set" => set = self.cascade(name, &field, value)?,
                "reset" => reset = self.cascade(name, &field, value)?,
                other => log::debug!("{}: {name}: ignoring field {other}", self.source_name),
            }
        }

        Ok(Entry::new(init)
            .with_help(help)
            .with_choices(choices)
            .with_set(set)
            .with_reset(reset))
    }

    fn text(&self, name: &str, field: &str, value: &Value) -> Result<String> {
        if value.is_null() {
            return Ok(String::new());
        }
        scalar_text(value).ok_or_else(|| self.malformed(format!("{name}: {field} must be text")))
    }

    fn choices(&self, name: &str, value: &Value) -> Result<Vec<String>> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Sequence(items) => items
                .iter()
                .map(|item| {
                    scalar_text(item)
                        .ok_or_else(|| self.malformed(format!("{name}: choices must be scalars")))
                })
                .collect(),
            _ => Err(self.malformed(format!("{name}: choices must be a list"))),
        }
    }

    fn cascade(&self, name: &str, field: &str, value: &Value) -> Result<Cascade> {
        match value {
            Value::Null => Ok(Cascade::new()),
            Value::Mapping(map) => map
                .iter()
                .map(|(target, value)| {
                    let target = scalar_text(target).ok_or_else(|| {
                        self.malformed(format!("{name}: invalid {field} target {target:?}"))
                    })?;
                    Ok((target, self.scalar(name, value)?))
                })
                .collect(),
            _ => Err(self.malformed(format!("{name}: {field} must be a mapping"))),
        }
    }

    fn scalar(&self, name: &str, value: &Value) -> Result<TriState> {
        match value {
            Value::Null => Ok(TriState::from("")),
            Value::Bool(b) => Ok(TriState::from(*b)),
            Value::Number(n) => Ok(TriState::from(n.to_string())),
            Value::String(s) => Ok(TriState::from(s.as_str())),
            Value::Tagged(tagged) => self.tagged(name, tagged),
            Value::Sequence(_) | Value::Mapping(_) => {
                Err(self.malformed(format!("{name}: expected a scalar value")))
            }
        }
    }

    fn tagged(&self, name: &str, tagged: &TaggedValue) -> Result<TriState> {
        let tag = tag_name(&tagged.tag);
        if let Some(exec) = ExecTag::from_tag(&tag) {
            let Some(command) = scalar_text(&tagged.value) else {
                return Err(self.malformed(format!("{name}: !!{tag} needs a command line")));
            };
            return Ok(exec.evaluate(&command));
        }
        match tag.as_str() {
            "str" => Ok(TriState::from(scalar_text(&tagged.value).unwrap_or_default())),
            "null" => Ok(TriState::from("")),
            "bool" => match &tagged.value {
                Value::Bool(b) => Ok(TriState::from(*b)),
                Value::String(s) => parse_bool(s)
                    .map(TriState::from)
                    .ok_or_else(|| self.malformed(format!("{name}: {s:?} is not a boolean"))),
                _ => Err(self.malformed(format!("{name}: !!bool needs a boolean"))),
            },
            _ => Err(self.malformed(format!("unknown tag !!{tag} on {name}"))),
        }
    }
}

fn tag_name(tag: &Tag) -> String {
    let text = tag.to_string();
    let text = text.trim_start_matches('!');
    text.strip_prefix("tag:yaml.org,2002:")
        .unwrap_or(text)
        .to_string()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
