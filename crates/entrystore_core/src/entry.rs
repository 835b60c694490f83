//! The entry capability required by the store.

use std::cmp::Ordering;

/// A record type that can be kept in an [`EntryStore`](crate::EntryStore).
///
/// The store never looks inside an entry. Everything it needs to know about
/// identity comes from [`compare`](Entry::compare): two entries for which it
/// returns [`Ordering::Equal`] are the same logical entry, and every lookup,
/// delete, edit, and add-or-replace is decided by that answer alone.
///
/// The comparison usually looks at a key field only, so two entries can be
/// the same logical entry while their other fields differ.
///
/// ```rust
/// use entrystore_core::Entry;
/// use std::cmp::Ordering;
///
/// #[derive(Clone)]
/// struct Setting {
///     key: String,
///     value: String,
/// }
///
/// impl Entry for Setting {
///     fn compare(&self, other: &Self) -> Ordering {
///         self.key.cmp(&other.key)
///     }
/// }
///
/// let a = Setting { key: "theme".into(), value: "dark".into() };
/// let b = Setting { key: "theme".into(), value: "light".into() };
/// assert!(a.same_entry(&b));
/// ```
pub trait Entry: Clone + Send + Sync + 'static {
    /// Orders two entries; `Equal` means they are the same logical entry.
    fn compare(&self, other: &Self) -> Ordering;

    /// Returns true if both values denote the same logical entry.
    fn same_entry(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

macro_rules! impl_entry_for_ord {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entry for $ty {
                fn compare(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

impl_entry_for_ord!(String, bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
