//! Write path.
//!
//! Each mutation reads the current document, computes the new sequence, and
//! rewrites the document under one guard acquisition. When the computation
//! changes nothing, no write happens.

use super::{Change, EntryStore};
use crate::channel::Operation;
use crate::entry::Entry;
use crate::matcher::{self, AddOutcome};
use entrystore_codec::DocumentCodec;

impl<T, C> EntryStore<T, C>
where
    T: Entry,
    C: DocumentCodec<T>,
{
    /// Overwrites the document with `entries`.
    ///
    /// If the backing file has gone missing it is recreated and the write is
    /// attempted once more. Any failure is reported and the write abandoned.
    pub fn write_all(&self, entries: &[T]) {
        self.overwrite(Operation::WriteAll, entries);
    }

    /// Overwrites the document with `entries`, whatever it held before.
    pub fn replace_all(&self, entries: &[T]) {
        self.overwrite(Operation::ReplaceAll, entries);
    }

    fn overwrite(&self, operation: Operation, entries: &[T]) {
        let result = {
            let guard = self.file().lock();
            self.store(&guard, entries)
        };
        self.absorb(operation, result, || ());
    }

    /// Adds `entry` to an in-memory sequence, or replaces its match there.
    ///
    /// Applies the same rule as [`add_entry`](Self::add_entry) without
    /// touching any file: append when nothing matches, replace in place when
    /// `overwrite` is set, otherwise drop `entry`.
    pub fn add_or_replace(entry: T, entries: &mut Vec<T>, overwrite: bool) -> AddOutcome {
        matcher::add_or_replace(entry, entries, overwrite)
    }

    /// Adds `entry`, or replaces its existing match when `overwrite` is set.
    ///
    /// With `overwrite` unset an entry that already has a match is dropped.
    ///
    /// ```rust,compile_fail
    /// # use entrystore_core::{EntryStore, JsonCodec};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let store: EntryStore<u32, JsonCodec> =
    /// #     EntryStore::open(dir.path().join("n.json"), JsonCodec::default()).unwrap();
    /// store.add_entry(None, false);
    /// ```
    pub fn add_entry(&self, entry: T, overwrite: bool) {
        self.add_entries(std::iter::once(entry), overwrite);
    }

    /// Adds each entry in order, as [`add_entry`](Self::add_entry) would.
    ///
    /// Later entries see the effect of earlier ones, so two entries with the
    /// same identity in one call resolve by the `overwrite` rule. The
    /// document is written once, and not at all when `entries` is empty.
    pub fn add_entries<I>(&self, entries: I, overwrite: bool)
    where
        I: IntoIterator<Item = T>,
    {
        let incoming: Vec<T> = entries.into_iter().collect();
        if incoming.is_empty() {
            return;
        }

        let result = self.modify(|stored| {
            let mut changed = false;
            for entry in incoming {
                if Self::add_or_replace(entry, stored, overwrite) != AddOutcome::Skipped {
                    changed = true;
                }
            }
            if changed {
                Change::Dirty(())
            } else {
                Change::Clean(())
            }
        });
        self.absorb(Operation::AddEntries, result, || ());
    }

    /// Removes the first stored entry matching `entry`.
    ///
    /// Returns true if an entry was removed. Nothing is written otherwise.
    pub fn delete_entry(&self, entry: &T) -> bool {
        self.delete_first(|stored| stored.same_entry(entry))
    }

    /// Removes the first stored entry satisfying `predicate`.
    ///
    /// Returns true if an entry was removed. Nothing is written otherwise.
    pub fn delete_entry_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.delete_first(predicate)
    }

    fn delete_first<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        let result = self.modify(|stored| match stored.iter().position(|e| predicate(e)) {
            Some(idx) => {
                stored.remove(idx);
                Change::Dirty(true)
            }
            None => Change::Clean(false),
        });
        self.absorb(Operation::DeleteEntries, result, || false)
    }

    /// Removes every stored entry satisfying `predicate` in one rewrite.
    ///
    /// Returns the number of entries removed.
    pub fn delete_entries_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let result = self.modify(|stored| {
            let before = stored.len();
            stored.retain(|e| !predicate(e));
            let removed = before - stored.len();
            if removed > 0 {
                Change::Dirty(removed)
            } else {
                Change::Clean(0)
            }
        });
        self.absorb(Operation::DeleteEntries, result, || 0)
    }

    /// Removes every stored entry matching any of `entries` by comparator.
    ///
    /// Returns the number of entries removed.
    pub fn delete_entries(&self, entries: &[T]) -> usize {
        if entries.is_empty() {
            return 0;
        }
        self.delete_entries_where(|stored| matcher::matches_any(stored, entries))
    }

    /// Applies `mutate` to the stored entry matching `entry` and persists it.
    ///
    /// Returns the stored entry after mutation. If nothing matches, or the
    /// read or write fails, returns a copy of `entry` unchanged; that value
    /// does not reflect anything persisted.
    pub fn edit_entry<F>(&self, entry: &T, mutate: F) -> T
    where
        F: FnOnce(&mut T),
    {
        let result = self.modify(|stored| match matcher::position_of(entry, stored) {
            Some(idx) => {
                mutate(&mut stored[idx]);
                Change::Dirty(stored[idx].clone())
            }
            None => Change::Clean(entry.clone()),
        });
        self.absorb(Operation::EditEntry, result, || entry.clone())
    }

    /// Like [`edit_entry`](Self::edit_entry), against a caller-held sequence.
    ///
    /// The matching entry is mutated inside `source` and the whole of
    /// `source` becomes the new document. When nothing matches, neither
    /// `source` nor the file is touched.
    pub fn edit_entry_in<F>(&self, source: &mut [T], entry: &T, mutate: F) -> T
    where
        F: FnOnce(&mut T),
    {
        let Some(idx) = matcher::position_of(entry, source) else {
            return entry.clone();
        };
        mutate(&mut source[idx]);

        let result = {
            let guard = self.file().lock();
            self.store(&guard, source)
        };
        match result {
            Ok(()) => source[idx].clone(),
            Err(err) => {
                self.report(Operation::EditEntry, &err);
                entry.clone()
            }
        }
    }

    /// Substitutes `new_entry` for the stored entry matching `old_entry`.
    ///
    /// Does nothing if either is absent or nothing matches. Returns true if a
    /// replacement was written.
    pub fn replace_entry(&self, old_entry: Option<&T>, new_entry: Option<T>) -> bool {
        let (Some(old_entry), Some(new_entry)) = (old_entry, new_entry) else {
            return false;
        };

        let result = self.modify(|stored| match matcher::position_of(old_entry, stored) {
            Some(idx) => {
                stored[idx] = new_entry;
                Change::Dirty(true)
            }
            None => Change::Clean(false),
        });
        self.absorb(Operation::ReplaceEntry, result, || false)
    }
}
