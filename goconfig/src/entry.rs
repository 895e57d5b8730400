//! A single configurable parameter.

use std::collections::BTreeMap;

use crate::value::{Kind, TriState};

/// Values assigned to other entries when an entry is set or reset.
pub type Cascade = BTreeMap<String, TriState>;

/// One configurable build parameter.
///
/// The declared initial value fixes the entry's kind for its whole
/// lifetime: the current value is always conformed to that kind.
///
/// # Examples
///
/// ```
/// use goconfig::{Entry, TriState};
///
/// let mut entry = Entry::new(TriState::True).with_help("Enable the widget");
/// assert!(entry.is_tag());
/// assert_eq!(entry.value(), &TriState::True);
///
/// entry.reinitialize();
/// assert_eq!(entry.value(), entry.init());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    init: TriState,
    value: TriState,
    help: String,
    choices: Vec<String>,
    set: Cascade,
    reset: Cascade,
    pub(crate) next: Option<usize>,
    pub(crate) prev: Option<usize>,
    pub(crate) linked: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Self::new(TriState::default())
    }
}

impl Entry {
    /// Creates an entry whose current value starts at `init`.
    #[must_use]
    pub fn new(init: TriState) -> Self {
        Self {
            name: String::new(),
            value: init.clone(),
            init,
            help: String::new(),
            choices: Vec::new(),
            set: Cascade::new(),
            reset: Cascade::new(),
            next: None,
            prev: None,
            linked: false,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the allowed string choices.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    /// Sets the values applied to other entries when this one is set.
    #[must_use]
    pub fn with_set(mut self, set: Cascade) -> Self {
        self.set = set;
        self
    }

    /// Sets the values applied to other entries when this one is reset.
    #[must_use]
    pub fn with_reset(mut self, reset: Cascade) -> Self {
        self.reset = reset;
        self
    }

    /// Registry key of this entry.
    ///
    /// Empty until the entry has been added to a registry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared default.
    #[must_use]
    pub fn init(&self) -> &TriState {
        &self.init
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &TriState {
        &self.value
    }

    /// Help text, possibly empty.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Allowed string values; informational only.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Assignments made when this entry becomes true or non-empty.
    #[must_use]
    pub fn set_cascade(&self) -> &Cascade {
        &self.set
    }

    /// Assignments made when this entry becomes false or empty.
    #[must_use]
    pub fn reset_cascade(&self) -> &Cascade {
        &self.reset
    }

    /// Permanent kind implied by the declared default.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.init.kind()
    }

    /// Returns true for boolean entries.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.kind() == Kind::Tag
    }

    /// Returns true if the current value differs from the declared default.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.value != self.init
    }

    /// Restores the current value from the declared default.
    ///
    /// This never consults the set or reset cascades.
    pub fn reinitialize(&mut self) {
        self.value.copy_from(&self.init);
    }

    /// Replaces the current value, conformed to this entry's kind.
    pub(crate) fn assign(&mut self, value: TriState) {
        self.value = value.conform(self.kind());
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        if self.name != name {
            self.name = name.to_string();
        }
    }

    pub(crate) fn unlink(&mut self) {
        self.next = None;
        self.prev = None;
        self.linked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry_is_empty_string() {
        let entry = Entry::default();
        assert_eq!(entry.init(), &TriState::from(""));
        assert_eq!(entry.value(), &TriState::from(""));
        assert_eq!(entry.kind(), Kind::String);
    }

    #[test]
    fn test_reinitialize_is_idempotent() {
        let mut entry = Entry::new(TriState::from("init"));
        entry.assign(TriState::from("changed"));
        assert!(entry.is_modified());

        entry.reinitialize();
        let once = entry.value().clone();
        entry.reinitialize();
        assert_eq!(entry.value(), &once);
        assert_eq!(entry.value(), &TriState::from("init"));
        assert!(!entry.is_modified());
    }

    #[test]
    fn test_assign_keeps_kind() {
        let mut tag = Entry::new(TriState::False);
        tag.assign(TriState::from("true"));
        assert_eq!(tag.value(), &TriState::True);

        let mut string = Entry::new(TriState::from("x"));
        string.assign(TriState::False);
        assert_eq!(string.value(), &TriState::from(""));
    }

    #[test]
    fn test_builder_fields() {
        let mut set = Cascade::new();
        set.insert("b".to_string(), TriState::False);
        let entry = Entry::new(TriState::True)
            .with_help("help")
            .with_choices(vec!["x".to_string()])
            .with_set(set.clone())
            .with_reset(Cascade::new());
        assert_eq!(entry.help(), "help");
        assert_eq!(entry.choices(), ["x".to_string()]);
        assert_eq!(entry.set_cascade(), &set);
        assert!(entry.reset_cascade().is_empty());
    }
}
