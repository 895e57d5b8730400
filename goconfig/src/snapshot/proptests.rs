//! Property-based tests for snapshot text.

use super::{overlay, serialize_snapshot};
use crate::entry::Entry;
use crate::registry::Registry;
use crate::value::TriState;
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = TriState> {
    prop_oneof![
        Just(TriState::True),
        Just(TriState::False),
        "[ -~]{0,12}".prop_map(TriState::from),
        "[a-z]{1,4}\n[a-z]{1,4}".prop_map(TriState::from),
    ]
}

// Unique names, each with a declared default and a current value of the
// same kind.
fn registry_strategy() -> impl Strategy<Value = Registry> {
    let name = "[a-z][a-z0-9._]{0,7}".prop_filter("null key", |s| s != "null");
    prop::collection::btree_map(name, (value_strategy(), value_strategy()), 0..20)
        .prop_map(|map| {
            let mut registry = Registry::new();
            for (name, (init, value)) in map {
                let kind = init.kind();
                registry.declare(&name, Entry::new(init));
                registry.set_value(&name, value.conform(kind));
            }
            registry
        })
}

fn values(registry: &Registry) -> Vec<(String, TriState)> {
    registry
        .walk()
        .map(|e| (e.name().to_string(), e.value().clone()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Overlaying a snapshot onto freshly reinitialized entries restores
    // every current value.
    #[test]
    fn overlay_restores_serialized_values(registry in registry_strategy()) {
        let text = serialize_snapshot(&registry);
        let mut fresh = registry.clone();
        fresh.reinitialize_all();
        overlay(&mut fresh, &text).unwrap();
        prop_assert_eq!(values(&fresh), values(&registry));
    }

    // Serializing twice yields identical text.
    #[test]
    fn serialize_is_stable(registry in registry_strategy()) {
        let text = serialize_snapshot(&registry);
        let mut again = registry.clone();
        again.reinitialize_all();
        overlay(&mut again, &text).unwrap();
        prop_assert_eq!(serialize_snapshot(&again), text);
    }
}
