//! Property-based test generators using proptest.

use crate::fixtures::TestEntry;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Strategy for entry names, including characters that need JSON escaping.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _\\-\"\\\\é]{0,16}").expect("Invalid regex")
}

/// Strategy for a single entry with a small id range, so collisions happen.
pub fn entry_strategy() -> impl Strategy<Value = TestEntry> {
    (0u32..32, name_strategy()).prop_map(|(id, name)| TestEntry { id, name })
}

/// Strategy for sequences that may contain several entries with the same id.
pub fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<TestEntry>> {
    prop::collection::vec(entry_strategy(), 0..=max_len)
}

/// Strategy for sequences whose ids are all distinct.
pub fn distinct_entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<TestEntry>> {
    prop::collection::btree_map(any::<u32>(), name_strategy(), 0..=max_len).prop_map(
        |map: BTreeMap<u32, String>| {
            map.into_iter()
                .map(|(id, name)| TestEntry { id, name })
                .collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn distinct_entries_have_unique_ids(entries in distinct_entries_strategy(20)) {
            let ids: HashSet<_> = entries.iter().map(|e| e.id).collect();
            prop_assert_eq!(ids.len(), entries.len());
        }

        #[test]
        fn entries_respect_max_len(entries in entries_strategy(8)) {
            prop_assert!(entries.len() <= 8);
        }
    }
}
