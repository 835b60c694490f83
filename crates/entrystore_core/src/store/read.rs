//! Read path.

use super::EntryStore;
use crate::channel::Operation;
use crate::entry::Entry;
use crate::error::StoreResult;
use crate::matcher;
use entrystore_codec::DocumentCodec;

impl<T, C> EntryStore<T, C>
where
    T: Entry,
    C: DocumentCodec<T>,
{
    /// Returns every entry in document order.
    ///
    /// A missing backing file is recreated and reads as empty. Any other
    /// failure is reported through the error channel and also yields an
    /// empty sequence; use [`try_get_all`](Self::try_get_all) or an
    /// [`ErrorLog`](crate::ErrorLog) to tell the two apart.
    pub fn get_all(&self) -> Vec<T> {
        let result = self.try_get_all();
        self.absorb(Operation::GetAll, result, Vec::new)
    }

    /// Returns every entry in document order, or the error that prevented it.
    ///
    /// Nothing is reported through the error channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or created, or if the
    /// document cannot be decoded.
    pub fn try_get_all(&self) -> StoreResult<Vec<T>> {
        let guard = self.file().lock();
        self.load(&guard)
    }

    /// Returns the first entry satisfying `predicate`.
    pub fn get<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.get_all().into_iter().find(|e| predicate(e))
    }

    /// Returns the first entry of `source` satisfying `predicate`.
    ///
    /// Does not touch the file.
    pub fn get_in<P>(&self, source: &[T], predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        source.iter().find(|e| predicate(e)).cloned()
    }

    /// Returns every entry satisfying `predicate`, in document order.
    pub fn get_many<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.get_all().into_iter().filter(|e| predicate(e)).collect()
    }

    /// Returns every entry of `source` satisfying `predicate`.
    ///
    /// Does not touch the file.
    pub fn get_many_in<P>(&self, source: &[T], predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        source.iter().filter(|e| predicate(e)).cloned().collect()
    }

    /// Returns the stored entry that is the same logical entry as `target`.
    ///
    /// Searches `source` when given, otherwise the current document.
    ///
    /// `target` must be present; there is no way to pass an absent one:
    ///
    /// ```rust,compile_fail
    /// # use entrystore_core::{EntryStore, JsonCodec};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let store: EntryStore<u32, JsonCodec> =
    /// #     EntryStore::open(dir.path().join("n.json"), JsonCodec::default()).unwrap();
    /// store.find_direct(None, None);
    /// ```
    pub fn find_direct(&self, target: &T, source: Option<&[T]>) -> Option<T> {
        match source {
            Some(source) => matcher::find_direct(target, source).cloned(),
            None => matcher::find_direct(target, &self.get_all()).cloned(),
        }
    }

    /// Returns true if the document holds an entry matching `entry`.
    ///
    /// ```rust,compile_fail
    /// # use entrystore_core::{EntryStore, JsonCodec};
    /// # let dir = tempfile::tempdir().unwrap();
    /// # let store: EntryStore<u32, JsonCodec> =
    /// #     EntryStore::open(dir.path().join("n.json"), JsonCodec::default()).unwrap();
    /// store.exists(None);
    /// ```
    pub fn exists(&self, entry: &T) -> bool {
        self.find_direct(entry, None).is_some()
    }

    /// Returns true if `source` holds an entry matching `entry`.
    pub fn exists_in(&self, entry: &T, source: &[T]) -> bool {
        self.find_direct(entry, Some(source)).is_some()
    }

    /// Returns true if any entry satisfies `predicate`.
    pub fn exists_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.get(predicate).is_some()
    }

    /// Looks up the first entry satisfying `predicate`.
    ///
    /// Returns whether one was found together with the entry.
    pub fn try_get<P>(&self, predicate: P) -> (bool, Option<T>)
    where
        P: Fn(&T) -> bool,
    {
        let found = self.get(predicate);
        (found.is_some(), found)
    }

    /// Returns the number of entries in the document.
    pub fn count(&self) -> usize {
        self.get_all().len()
    }
}

#[cfg(feature = "async")]
impl<T, C> EntryStore<T, C>
where
    T: Entry,
    C: DocumentCodec<T> + 'static,
{
    /// Returns every entry in document order without blocking the caller's task.
    ///
    /// The read runs on tokio's blocking pool and takes the same file guard
    /// as every synchronous operation, so it never observes a partial write.
    /// Failures are handled exactly as in [`get_all`](Self::get_all).
    pub async fn get_all_async(&self) -> Vec<T> {
        let store = self.clone();
        let result = match tokio::task::spawn_blocking(move || store.try_get_all()).await {
            Ok(result) => result,
            Err(join) => Err(crate::error::StoreError::background(join.to_string())),
        };
        self.absorb(Operation::GetAllAsync, result, Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{item, open_store, Item};
    use crate::channel::Operation;
    use crate::config::StoreConfig;
    use crate::error::StoreError;
    use crate::store::EntryStore;
    use crate::ErrorLog;
    use entrystore_codec::JsonCodec;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn unopened_store(path: &Path, config: StoreConfig) -> (EntryStore<Item, JsonCodec>, ErrorLog) {
        let store = EntryStore::open_with_config(path, JsonCodec::default(), config.create_if_missing(false))
            .unwrap();
        let log = ErrorLog::new();
        store.on_error(log.clone());
        (store, log)
    }

    #[test]
    fn fresh_store_is_empty() {
        let (_dir, store, log) = open_store();
        assert!(store.get_all().is_empty());
        assert_eq!(store.count(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn blank_document_is_empty() {
        let (_dir, store, log) = open_store();
        fs::write(store.path(), "  \n\t\n").unwrap();
        assert!(store.get_all().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn reads_existing_document() {
        let (_dir, store, _log) = open_store();
        fs::write(
            store.path(),
            r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#,
        )
        .unwrap();
        assert_eq!(store.get_all(), vec![item(1, "a"), item(2, "b")]);
    }

    #[test]
    fn missing_file_is_recreated() {
        let (_dir, store, log) = open_store();
        store.add_entry(item(1, "a"), false);
        fs::remove_file(store.path()).unwrap();

        assert!(store.get_all().is_empty());
        assert!(store.path().is_file());
        assert!(log.is_empty());
        assert_eq!(store.stats().initializations, 2);
    }

    #[test]
    fn malformed_document_reports_and_reads_empty() {
        let (_dir, store, log) = open_store();
        fs::write(store.path(), "[{\"id\":").unwrap();

        assert!(store.get_all().is_empty());

        let reports = log.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, Operation::GetAll);
        assert!(reports[0].detail.starts_with("codec error"));
        assert_eq!(reports[0].path, store.path());
    }

    #[test]
    fn read_under_file_blocked_parent_reports_and_reads_empty() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let (store, log) = unopened_store(&blocker.join("items.json"), StoreConfig::new());

        assert!(store.get_all().is_empty());

        let reports = log.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, Operation::GetAll);
        assert_eq!(store.stats().errors, 1);
    }

    #[test]
    fn read_reports_when_missing_file_cannot_be_recreated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone").join("items.json");
        let (store, log) = unopened_store(&path, StoreConfig::new().create_parent_dirs(false));

        assert!(store.get_all().is_empty());

        let reports = log.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, Operation::GetAll);
        assert!(reports[0].detail.contains("failed to create document file"));
        assert!(!path.exists());
        assert_eq!(store.stats().initializations, 0);
    }

    #[test]
    fn try_get_all_returns_error_without_reporting() {
        let (_dir, store, log) = open_store();
        fs::write(store.path(), "not json").unwrap();

        let err = store.try_get_all().unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
        assert!(log.is_empty());
    }

    #[test]
    fn predicate_lookups() {
        let (_dir, store, _log) = open_store();
        store.add_entries(vec![item(1, "apple"), item(2, "banana"), item(3, "avocado")], false);

        assert_eq!(store.get(|i| i.name.starts_with('a')), Some(item(1, "apple")));
        assert_eq!(store.get(|i| i.id > 10), None);
        assert_eq!(
            store.get_many(|i| i.name.starts_with('a')),
            vec![item(1, "apple"), item(3, "avocado")]
        );
        assert!(store.exists_where(|i| i.name == "banana"));
        assert!(!store.exists_where(|i| i.name == "cherry"));

        let (found, entry) = store.try_get(|i| i.id == 2);
        assert!(found);
        assert_eq!(entry, Some(item(2, "banana")));
        assert_eq!(store.try_get(|i| i.id == 7), (false, None));
    }

    #[test]
    fn guard_free_lookups_use_given_source() {
        let (_dir, store, _log) = open_store();
        let source = vec![item(5, "x"), item(6, "y")];
        let reads = store.stats().reads;

        assert_eq!(store.get_in(&source, |i| i.id == 6), Some(item(6, "y")));
        assert_eq!(store.get_many_in(&source, |i| i.id >= 5).len(), 2);
        assert!(store.exists_in(&item(5, "other"), &source));
        assert_eq!(store.find_direct(&item(6, ""), Some(&source)), Some(item(6, "y")));
        assert_eq!(store.stats().reads, reads);
    }

    #[test]
    fn find_direct_reads_document_when_no_source() {
        let (_dir, store, _log) = open_store();
        store.add_entry(item(1, "stored"), false);

        let found: Option<Item> = store.find_direct(&item(1, "probe"), None);
        assert_eq!(found, Some(item(1, "stored")));
        assert!(store.exists(&item(1, "probe")));
        assert!(!store.exists(&item(2, "probe")));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_read_matches_sync_read() {
        let (_dir, store, log) = open_store();
        store.add_entries(vec![item(1, "a"), item(2, "b")], false);

        assert_eq!(store.get_all_async().await, store.get_all());
        assert!(log.is_empty());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_read_reports_failures() {
        let (_dir, store, log) = open_store();
        fs::write(store.path(), "{").unwrap();

        assert!(store.get_all_async().await.is_empty());
        assert_eq!(log.reports()[0].operation, Operation::GetAllAsync);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_read_recreates_missing_file() {
        let (_dir, store, log) = open_store();
        fs::remove_file(store.path()).unwrap();

        assert!(store.get_all_async().await.is_empty());
        assert!(store.path().is_file());
        assert!(log.is_empty());
    }
}
