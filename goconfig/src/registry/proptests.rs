//! Property-based tests for registry ordering and cascades.

use super::Registry;
use crate::entry::Entry;
use crate::value::TriState;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Unique names, each paired with whether the entry is a tag.
fn declarations_strategy() -> impl Strategy<Value = Vec<(String, bool)>> {
    prop::collection::btree_map("[a-zA-Z._/]{1,8}", any::<bool>(), 0..40)
        .prop_map(|m| m.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn build(declarations: &[(String, bool)]) -> Registry {
    let mut registry = Registry::new();
    for (name, is_tag) in declarations {
        let init = if *is_tag {
            TriState::False
        } else {
            TriState::from("")
        };
        registry.declare(name, Entry::new(init));
    }
    registry
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Walking from begin visits every entry exactly once and stops at end.
    #[test]
    fn walk_visits_every_entry_once(declarations in declarations_strategy()) {
        let registry = build(&declarations);
        let walked: Vec<&str> = registry.walk().map(Entry::name).collect();
        prop_assert_eq!(walked.len(), declarations.len());

        let unique: std::collections::BTreeSet<&str> = walked.iter().copied().collect();
        prop_assert_eq!(unique.len(), walked.len());
        prop_assert_eq!(registry.end(), walked.last().copied());
        prop_assert_eq!(registry.begin(), walked.first().copied());
    }

    // Tags come first, then strings, each group in byte-wise name order.
    #[test]
    fn walk_is_sorted_by_kind_then_name(declarations in declarations_strategy()) {
        let registry = build(&declarations);
        let keys: Vec<(bool, String)> = registry
            .walk()
            .map(|e| (!e.is_tag(), e.name().to_string()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    // prev links mirror next links.
    #[test]
    fn prev_mirrors_next(declarations in declarations_strategy()) {
        let registry = build(&declarations);
        let walked: Vec<&str> = registry.walk().map(Entry::name).collect();
        for pair in walked.windows(2) {
            prop_assert_eq!(registry.next_name(pair[0]), Some(pair[1]));
            prop_assert_eq!(registry.prev_name(pair[1]), Some(pair[0]));
        }
    }

    // Reinitializing twice yields the same values as once.
    #[test]
    fn reinitialize_is_idempotent(
        declarations in declarations_strategy(),
        raw in "[a-z]{0,6}|true|false",
    ) {
        let mut registry = build(&declarations);
        for (name, _) in &declarations {
            registry.set(name, &raw);
        }
        registry.reinitialize_all();
        let once: BTreeMap<String, TriState> = registry
            .walk()
            .map(|e| (e.name().to_string(), e.value().clone()))
            .collect();
        registry.reinitialize_all();
        let twice: BTreeMap<String, TriState> = registry
            .walk()
            .map(|e| (e.name().to_string(), e.value().clone()))
            .collect();
        prop_assert_eq!(once, twice);
    }

    // Set keeps every value's kind equal to its entry's declared kind.
    #[test]
    fn set_preserves_kind(
        declarations in declarations_strategy(),
        raw in "[a-z\"']{0,6}|true|false|1|0",
    ) {
        let mut registry = build(&declarations);
        for (name, _) in &declarations {
            registry.set(name, &raw);
        }
        for entry in registry.walk() {
            prop_assert_eq!(entry.value().kind(), entry.kind());
        }
    }
}
