//! Tri-state values for configurable parameters.
//!
//! Every parameter value is exactly one of `true`, `false` or a string. The
//! boolean states are called *tags*; they drive build constraints and boolean
//! build flags. Everything else, including the empty string, is a *string
//! value* and drives linker defines or string build flags.

use serde::{Serialize, Serializer};
use std::fmt;

/// Words that would be read back as booleans unless quoted.
const BOOLEAN_WORDS: [&str; 4] = ["false", "f", "true", "t"];

/// The permanent kind of an entry, implied by its declared initial value.
///
/// # Examples
///
/// ```
/// use goconfig::{Kind, TriState};
///
/// assert_eq!(TriState::True.kind(), Kind::Tag);
/// assert_eq!(TriState::from("").kind(), Kind::String);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Boolean flag or build constraint.
    Tag,
    /// Textual value.
    String,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A value that is exactly one of `true`, `false` or a string.
///
/// Cross-state comparisons are always unequal, so `TriState::False` never
/// equals the empty string.
///
/// # Examples
///
/// ```
/// use goconfig::TriState;
///
/// let mut value = TriState::from("hello");
/// assert!(value.is_string());
///
/// value.set_true();
/// assert!(value.is_tag());
/// assert_ne!(TriState::False, TriState::from(""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TriState {
    /// The `true` tag.
    True,
    /// The `false` tag.
    False,
    /// A string value, possibly empty.
    String(String),
}

impl Default for TriState {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl TriState {
    /// Sets the receiver to the `true` tag.
    pub fn set_true(&mut self) {
        *self = Self::True;
    }

    /// Sets the receiver to the `false` tag.
    pub fn set_false(&mut self) {
        *self = Self::False;
    }

    /// Sets the receiver to a string value.
    pub fn set_string(&mut self, s: impl Into<String>) {
        *self = Self::String(s.into());
    }

    /// Adopts the full state of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }

    /// Returns true for the `true` tag.
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns true for the `false` tag.
    #[must_use]
    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    /// Returns true for any string value, including the empty string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns true for either boolean state.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        !self.is_string()
    }

    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        if self.is_tag() {
            Kind::Tag
        } else {
            Kind::String
        }
    }

    /// Returns true for the `true` tag or a non-empty string.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Raw text form: `true`/`false` for tags, the literal string otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::TriState;
    ///
    /// assert_eq!(TriState::False.plain_text(), "false");
    /// assert_eq!(TriState::from("true").plain_text(), "true");
    /// ```
    #[must_use]
    pub fn plain_text(&self) -> &str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::String(s) => s,
        }
    }

    /// Display form that reads back to the same value.
    ///
    /// The empty string is written as `""` and strings spelling a boolean are
    /// quoted. Any other string that a YAML reader would not return verbatim
    /// as a plain scalar is double-quoted with escapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::TriState;
    ///
    /// assert_eq!(TriState::True.external_text(), "true");
    /// assert_eq!(TriState::from("").external_text(), r#""""#);
    /// assert_eq!(TriState::from("True").external_text(), r#""True""#);
    /// assert_eq!(TriState::from("hello world").external_text(), "hello world");
    /// ```
    #[must_use]
    pub fn external_text(&self) -> String {
        match self {
            Self::True => "true".to_string(),
            Self::False => "false".to_string(),
            Self::String(s) if s.is_empty() => r#""""#.to_string(),
            Self::String(s) if is_boolean_word(s) => format!("\"{s}\""),
            Self::String(s) if reads_back_plain(s) => s.clone(),
            Self::String(s) => quote(s),
        }
    }

    /// Converts this value to `kind`.
    ///
    /// A tag assigned to a string entry becomes `"true"` or `""`; a string
    /// assigned to a tag entry is true only if it spells true.
    #[must_use]
    pub fn conform(self, kind: Kind) -> Self {
        match (kind, self) {
            (Kind::Tag, Self::String(s)) => Self::from(parse_bool(&s) == Some(true)),
            (Kind::String, Self::True) => Self::String("true".to_string()),
            (Kind::String, Self::False) => Self::String(String::new()),
            (_, value) => value,
        }
    }
}

impl From<bool> for TriState {
    fn from(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<&str> for TriState {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for TriState {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_text())
    }
}

impl Serialize for TriState {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::True => serializer.serialize_bool(true),
            Self::False => serializer.serialize_bool(false),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

/// Parses the boolean spellings accepted from operators.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
///
/// # Examples
///
/// ```
/// use goconfig::value::parse_bool;
///
/// assert_eq!(parse_bool("T"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("yes"), None);
/// ```
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn is_boolean_word(s: &str) -> bool {
    BOOLEAN_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w))
}

fn reads_back_plain(s: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(s),
        Ok(serde_yaml::Value::String(ref back)) if back == s
    )
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_across_states() {
        assert_eq!(TriState::True, TriState::True);
        assert_eq!(TriState::False, TriState::False);
        assert_eq!(TriState::from("a"), TriState::from("a"));
        assert_ne!(TriState::from("a"), TriState::from("b"));
        assert_ne!(TriState::False, TriState::from(""));
        assert_ne!(TriState::True, TriState::from("true"));
    }

    #[test]
    fn test_setters_replace_state() {
        let mut value = TriState::False;
        value.set_string("x");
        assert!(value.is_string());
        value.set_true();
        assert!(value.is_true());
        value.set_false();
        assert!(value.is_false());

        let mut copy = TriState::True;
        copy.copy_from(&TriState::from("y"));
        assert_eq!(copy, TriState::from("y"));
    }

    #[test]
    fn test_empty_string_is_not_a_tag() {
        let value = TriState::default();
        assert!(value.is_string());
        assert!(!value.is_tag());
        assert_eq!(value.kind(), Kind::String);
    }

    #[test]
    fn test_external_text_quotes_boolean_words() {
        for word in ["false", "False", "FALSE", "f", "F", "true", "True", "t", "T"] {
            assert_eq!(TriState::from(word).external_text(), format!("\"{word}\""));
        }
        assert_eq!(TriState::from("truth").external_text(), "truth");
    }

    #[test]
    fn test_external_text_quotes_unsafe_scalars() {
        assert_eq!(TriState::from("42").external_text(), r#""42""#);
        assert_eq!(TriState::from("a: b").external_text(), r#""a: b""#);
        assert_eq!(TriState::from("two\nlines").external_text(), r#""two\nlines""#);
        assert_eq!(TriState::from("gc").external_text(), "gc");
    }

    #[test]
    fn test_external_text_reads_back() {
        for s in ["", "t", "42", "a: b", "# not a comment", " padded ", "say \"hi\""] {
            let text = TriState::from(s).external_text();
            let back: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
            assert_eq!(back, serde_yaml::Value::String(s.to_string()), "for {s:?}");
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(TriState::True.plain_text(), "true");
        assert_eq!(TriState::from("").plain_text(), "");
    }

    #[test]
    fn test_conform() {
        assert_eq!(TriState::True.conform(Kind::String), TriState::from("true"));
        assert_eq!(TriState::False.conform(Kind::String), TriState::from(""));
        assert_eq!(TriState::from("True").conform(Kind::Tag), TriState::True);
        assert_eq!(TriState::from("maybe").conform(Kind::Tag), TriState::False);
        assert_eq!(TriState::from("x").conform(Kind::String), TriState::from("x"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("tRuE"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_serialize_as_scalar() {
        assert_eq!(serde_yaml::to_string(&TriState::True).unwrap(), "true\n");
        assert_eq!(serde_yaml::to_string(&TriState::from("x")).unwrap(), "x\n");
    }
}
