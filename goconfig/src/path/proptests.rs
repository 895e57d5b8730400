//! Property-based tests for lexical path cleaning.

use super::clean;
use proptest::prelude::*;
use std::path::{Component, PathBuf};

fn component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z0-9_-]{1,8}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn path_strategy() -> impl Strategy<Value = PathBuf> {
    (any::<bool>(), prop::collection::vec(component_strategy(), 0..10)).prop_map(
        |(absolute, parts)| {
            let mut path = if absolute {
                PathBuf::from("/")
            } else {
                PathBuf::new()
            };
            for part in parts {
                path.push(part);
            }
            path
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 5000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Cleaning is idempotent.
    #[test]
    fn clean_is_idempotent(path in path_strategy()) {
        let once = clean(&path);
        prop_assert_eq!(clean(&once), once);
    }

    // Cleaned paths contain no `.` components and `..` only as a prefix.
    #[test]
    fn clean_leaves_only_leading_parent_refs(path in path_strategy()) {
        let cleaned = clean(&path);
        let components: Vec<Component<'_>> = cleaned.components().collect();
        if components != [Component::CurDir] {
            prop_assert!(!components.contains(&Component::CurDir));
        }
        let first_normal = components
            .iter()
            .position(|c| matches!(c, Component::Normal(_)))
            .unwrap_or(components.len());
        prop_assert!(!components[first_normal..].contains(&Component::ParentDir));
    }

    // Absolute paths stay absolute.
    #[test]
    fn clean_preserves_absoluteness(path in path_strategy()) {
        prop_assert_eq!(clean(&path).is_absolute(), path.is_absolute());
    }
}
