//! Ordered collection of configurable entries.
//!
//! Entries live in an arena addressed by stable indices and are threaded
//! into a doubly linked traversal order. The order is total: every tag
//! entry precedes every string entry, and each group is sorted byte-wise by
//! name. Build-tag and linker-define synthesis each rely on a single forward
//! walk of this order.
//!
//! # Examples
//!
//! ```
//! use goconfig::{Entry, Registry, TriState};
//!
//! let mut registry = Registry::new();
//! registry.declare("main.s", Entry::new(TriState::from("hello")));
//! registry.declare("b", Entry::new(TriState::False));
//! registry.declare("a", Entry::new(TriState::True));
//! registry.materialize();
//!
//! let names: Vec<&str> = registry.entries().map(|e| e.name()).collect();
//! assert_eq!(names, ["a", "b", "main.s"]);
//! ```

use std::collections::HashMap;

use crate::entry::{Cascade, Entry};
use crate::value::{parse_bool, TriState};

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// An ordered, name-keyed collection of entries.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    slots: Vec<Entry>,
    index: HashMap<String, usize>,
    begin: Option<usize>,
    end: Option<usize>,
    order: Vec<usize>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, linked or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if an entry named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&slot| &self.slots[slot])
    }

    /// Name of the first entry in traversal order.
    #[must_use]
    pub fn begin(&self) -> Option<&str> {
        self.begin.map(|slot| self.slots[slot].name())
    }

    /// Name of the last entry in traversal order.
    #[must_use]
    pub fn end(&self) -> Option<&str> {
        self.end.map(|slot| self.slots[slot].name())
    }

    /// Name of the entry following `name` in traversal order.
    #[must_use]
    pub fn next_name(&self, name: &str) -> Option<&str> {
        let slot = *self.index.get(name)?;
        self.slots[slot].next.map(|next| self.slots[next].name())
    }

    /// Name of the entry preceding `name` in traversal order.
    #[must_use]
    pub fn prev_name(&self, name: &str) -> Option<&str> {
        let slot = *self.index.get(name)?;
        self.slots[slot].prev.map(|prev| self.slots[prev].name())
    }

    /// Adds an entry under `name` without linking it into the order.
    ///
    /// Returns false, leaving the registry untouched, if the name is taken.
    pub fn add(&mut self, name: &str, mut entry: Entry) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        entry.set_name(name);
        entry.unlink();
        self.index.insert(name.to_string(), self.slots.len());
        self.slots.push(entry);
        true
    }

    /// Adds an entry and links it into the order.
    ///
    /// Returns false if the name is taken.
    pub fn declare(&mut self, name: &str, entry: Entry) -> bool {
        if !self.add(name, entry) {
            return false;
        }
        self.insert(name);
        true
    }

    /// Links an added entry into its sorted position.
    ///
    /// The entry goes immediately before the first linked entry that sorts
    /// after it, or at the end. Unknown or already linked names are logged
    /// and ignored.
    pub fn insert(&mut self, name: &str) {
        let Some(&subject) = self.index.get(name) else {
            log::warn!("{name} has no entry");
            return;
        };
        if self.slots[subject].linked {
            log::warn!("{name} is already linked");
            return;
        }

        let mut cursor = self.begin;
        while let Some(target) = cursor {
            if self.sorts_before(subject, target) {
                let prev = self.slots[target].prev;
                self.slots[subject].next = Some(target);
                self.slots[subject].prev = prev;
                self.slots[target].prev = Some(subject);
                match prev {
                    Some(prev) => self.slots[prev].next = Some(subject),
                    None => self.begin = Some(subject),
                }
                self.slots[subject].linked = true;
                return;
            }
            cursor = self.slots[target].next;
        }

        self.slots[subject].next = None;
        self.slots[subject].prev = self.end;
        match self.end {
            Some(end) => self.slots[end].next = Some(subject),
            None => self.begin = Some(subject),
        }
        self.end = Some(subject);
        self.slots[subject].linked = true;
    }

    fn sorts_before(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.slots[a], &self.slots[b]);
        (a.kind(), a.name()) < (b.kind(), b.name())
    }

    /// Rebuilds the materialized sequence by walking the linked order.
    ///
    /// The loader calls this once a registry is fully populated; iteration
    /// through [`Registry::entries`] reflects the order at that time.
    pub fn materialize(&mut self) {
        self.order.clear();
        let mut cursor = self.begin;
        while let Some(slot) = cursor {
            self.order.push(slot);
            cursor = self.slots[slot].next;
        }
    }

    /// Entries in materialized order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.order.iter().map(move |&slot| &self.slots[slot])
    }

    /// Entries in linked order, walked from the beginning.
    pub fn walk(&self) -> impl Iterator<Item = &Entry> + '_ {
        std::iter::successors(self.begin, move |&slot| self.slots[slot].next)
            .map(move |slot| &self.slots[slot])
    }

    /// Applies operator text to an entry and runs its cascade.
    ///
    /// Tag entries accept boolean spellings; anything else leaves them
    /// untouched. String entries take the text with one matching pair of
    /// surrounding quotes removed. The set cascade runs when the result is
    /// true or non-empty, the reset cascade otherwise, on every call.
    ///
    /// Returns true if a cascade was applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use goconfig::{Entry, Registry, TriState};
    /// use std::collections::BTreeMap;
    ///
    /// let mut registry = Registry::new();
    /// let set = BTreeMap::from([("b".to_string(), TriState::False)]);
    /// registry.declare("a", Entry::new(TriState::False).with_set(set));
    /// registry.declare("b", Entry::new(TriState::True));
    ///
    /// assert!(registry.set("a", "true"));
    /// assert_eq!(registry.get("b").unwrap().value(), &TriState::False);
    /// ```
    pub fn set(&mut self, name: &str, raw: &str) -> bool {
        let Some(&slot) = self.index.get(name) else {
            log::warn!("{name} not found");
            return false;
        };
        let entry = &mut self.slots[slot];
        let value = if entry.is_tag() {
            match parse_bool(raw) {
                Some(b) => TriState::from(b),
                None => {
                    log::warn!("{name}: {raw:?} is not a boolean");
                    return false;
                }
            }
        } else {
            TriState::from(strip_quotes(raw))
        };
        entry.assign(value);

        let cascade = if entry.value().is_set() {
            entry.set_cascade().clone()
        } else {
            entry.reset_cascade().clone()
        };
        self.apply_cascade(name, &cascade);
        !cascade.is_empty()
    }

    fn apply_cascade(&mut self, name: &str, cascade: &Cascade) {
        for (target, value) in cascade {
            match self.index.get(target) {
                Some(&slot) => self.slots[slot].assign(value.clone()),
                None => log::warn!("{name}: cascade target {target} not found"),
            }
        }
    }

    /// Replaces an entry's value without running any cascade.
    ///
    /// Returns false if the entry does not exist.
    pub fn set_value(&mut self, name: &str, value: TriState) -> bool {
        match self.index.get(name) {
            Some(&slot) => {
                self.slots[slot].assign(value);
                true
            }
            None => false,
        }
    }

    /// Restores every entry from its declared default.
    pub fn reinitialize_all(&mut self) {
        for entry in &mut self.slots {
            entry.reinitialize();
        }
    }

    /// Restores one entry from its declared default.
    ///
    /// Returns false if the entry does not exist.
    pub fn reinitialize_one(&mut self, name: &str) -> bool {
        match self.index.get(name) {
            Some(&slot) => {
                self.slots[slot].reinitialize();
                true
            }
            None => false,
        }
    }

    /// Discards every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.order.clear();
        self.begin = None;
        self.end = None;
    }

    /// Consumes the registry, yielding its linked entries in order.
    #[must_use]
    pub fn into_entries(mut self) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.slots.len());
        let mut cursor = self.begin;
        while let Some(slot) = cursor {
            cursor = self.slots[slot].next;
            entries.push(std::mem::take(&mut self.slots[slot]));
        }
        entries
    }
}

fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if raw.len() >= 2 => {
            &raw[1..raw.len() - 1]
        }
        _ => raw,
    }
}
