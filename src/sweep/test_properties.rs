//! Property tests for the forbidden-name matcher.

use std::ffi::OsStr;

use proptest::prelude::*;

use super::patterns::{DEFAULT_FORBIDDEN, ForbiddenSet};

// ──────────────────── strategies ────────────────────

// Needle and safe-name alphabets are disjoint, so a safe name can never
// contain a generated needle by accident.

fn arb_needle_with_casing() -> impl Strategy<Value = (String, String)> {
    "[a-m][a-m0-5]{1,4}"
        .prop_flat_map(|needle| {
            let len = needle.len();
            (Just(needle), proptest::collection::vec(any::<bool>(), len))
        })
        .prop_map(|(needle, mask)| {
            let cased = needle
                .chars()
                .zip(mask)
                .map(|(ch, upper)| {
                    if upper {
                        ch.to_ascii_uppercase()
                    } else {
                        ch
                    }
                })
                .collect();
            (needle, cased)
        })
}

fn arb_safe_name() -> impl Strategy<Value = String> {
    "[n-z6-9._-]{0,12}"
}

// ──────────────────── properties ────────────────────

proptest! {
    #[test]
    fn embedded_needle_always_matches(
        (needle, cased) in arb_needle_with_casing(),
        prefix in arb_safe_name(),
        suffix in arb_safe_name(),
    ) {
        let set = ForbiddenSet::new([needle.as_str()]);
        let name = format!("{prefix}{cased}{suffix}");
        prop_assert!(
            set.is_forbidden(OsStr::new(&name)),
            "{name:?} should match needle {needle:?}"
        );
    }

    #[test]
    fn needle_free_names_never_match(name in arb_safe_name()) {
        // The safe alphabet carries no 'a' and no '2', so neither default
        // needle can appear.
        let set = ForbiddenSet::default();
        prop_assert!(!set.is_forbidden(OsStr::new(&name)));
    }

    #[test]
    fn matching_ignores_name_casing(name in "[a-zA-Z0-9._-]{1,24}") {
        let set = ForbiddenSet::default();
        let lower = name.to_ascii_lowercase();
        let upper = name.to_ascii_uppercase();
        prop_assert_eq!(
            set.is_forbidden(OsStr::new(&name)),
            set.is_forbidden(OsStr::new(&lower))
        );
        prop_assert_eq!(
            set.is_forbidden(OsStr::new(&upper)),
            set.is_forbidden(OsStr::new(&lower))
        );
    }

    #[test]
    fn matched_needle_agrees_with_substring_search(name in "[a-z0-9._-]{1,24}") {
        let set = ForbiddenSet::default();
        match set.matched_needle(OsStr::new(&name)) {
            Some(needle) => {
                prop_assert!(DEFAULT_FORBIDDEN.contains(&needle));
                prop_assert!(name.contains(needle));
            }
            None => {
                for needle in DEFAULT_FORBIDDEN {
                    prop_assert!(!name.contains(needle));
                }
            }
        }
    }
}
