//! Comparator-driven lookup over entry sequences.
//!
//! These functions are the single definition of "is this the same logical
//! entry" used by the store. They scan linearly and the first match wins,
//! which matters when a sequence holds duplicates.

use crate::entry::Entry;

/// What [`add_or_replace`] did with the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// No matching entry existed; the entry was appended.
    Appended,
    /// A matching entry existed and was overwritten in place.
    Replaced,
    /// A matching entry existed and overwriting was disabled; the entry was dropped.
    Skipped,
}

/// Returns the first entry in `source` that is the same logical entry as `target`.
pub fn find_direct<'a, T: Entry>(target: &T, source: &'a [T]) -> Option<&'a T> {
    source.iter().find(|candidate| candidate.same_entry(target))
}

/// Returns the index of the first entry in `source` matching `target`.
pub fn position_of<T: Entry>(target: &T, source: &[T]) -> Option<usize> {
    source.iter().position(|candidate| candidate.same_entry(target))
}

/// Returns true if any entry in `targets` matches `candidate`.
pub fn matches_any<T: Entry>(candidate: &T, targets: &[T]) -> bool {
    find_direct(candidate, targets).is_some()
}

/// Adds `entry` to `entries`, or replaces its existing match.
///
/// With no match the entry is appended. With a match it replaces the stored
/// entry at the same position when `overwrite` is true, and is dropped
/// otherwise (first write wins).
pub fn add_or_replace<T: Entry>(entry: T, entries: &mut Vec<T>, overwrite: bool) -> AddOutcome {
    match position_of(&entry, entries) {
        None => {
            entries.push(entry);
            AddOutcome::Appended
        }
        Some(idx) if overwrite => {
            entries[idx] = entry;
            AddOutcome::Replaced
        }
        Some(_) => AddOutcome::Skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: &'static str,
    }

    impl Entry for Item {
        fn compare(&self, other: &Self) -> Ordering {
            self.id.cmp(&other.id)
        }
    }

    fn item(id: u32, name: &'static str) -> Item {
        Item { id, name }
    }

    #[test]
    fn find_uses_comparator_not_fields() {
        let source = vec![item(1, "a"), item(2, "b")];
        let found = find_direct(&item(2, "other name"), &source);
        assert_eq!(found, Some(&item(2, "b")));
    }

    #[test]
    fn first_match_wins() {
        let source = vec![item(1, "first"), item(2, "x"), item(1, "second")];
        assert_eq!(find_direct(&item(1, ""), &source).unwrap().name, "first");
        assert_eq!(position_of(&item(1, ""), &source), Some(0));
    }

    #[test]
    fn no_match() {
        let source = vec![item(1, "a")];
        assert!(find_direct(&item(9, "a"), &source).is_none());
        assert!(position_of(&item(9, "a"), &source).is_none());
        assert!(find_direct(&item(1, "a"), &[]).is_none());
    }

    #[test]
    fn matches_any_target() {
        let targets = vec![item(3, ""), item(5, "")];
        assert!(matches_any(&item(5, "z"), &targets));
        assert!(!matches_any(&item(4, "z"), &targets));
    }

    #[test]
    fn add_appends_when_missing() {
        let mut entries = vec![item(1, "a")];
        assert_eq!(add_or_replace(item(2, "b"), &mut entries, false), AddOutcome::Appended);
        assert_eq!(entries, vec![item(1, "a"), item(2, "b")]);
    }

    #[test]
    fn add_replaces_in_place_with_overwrite() {
        let mut entries = vec![item(1, "a"), item(2, "b"), item(3, "c")];
        assert_eq!(add_or_replace(item(2, "B"), &mut entries, true), AddOutcome::Replaced);
        assert_eq!(entries, vec![item(1, "a"), item(2, "B"), item(3, "c")]);
    }

    #[test]
    fn add_skips_without_overwrite() {
        let mut entries = vec![item(1, "a")];
        assert_eq!(add_or_replace(item(1, "z"), &mut entries, false), AddOutcome::Skipped);
        assert_eq!(entries, vec![item(1, "a")]);
    }
}
