use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use blobd_types::{ObjectId, Repository};

use crate::error::{StoreError, StoreResult};
use crate::object::StoredBlob;
use crate::traits::{DeleteOutcome, ObjectTable, TableStats};

type Objects = HashMap<Repository, HashMap<ObjectId, StoredBlob>>;

/// In-memory, HashMap-based object table.
///
/// One map per repository behind a single `RwLock`: reads share the lock,
/// creates and deletes take it exclusively for the duration of one map
/// operation. Blobs are cloned out by reference count, so the lock is never
/// held while a payload is copied or sent.
pub struct InMemoryObjectTable {
    objects: RwLock<Objects>,
}

impl InMemoryObjectTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    fn read_lock(&self) -> StoreResult<RwLockReadGuard<'_, Objects>> {
        self.objects.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_lock(&self) -> StoreResult<RwLockWriteGuard<'_, Objects>> {
        self.objects.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Number of objects across all repositories.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.stats()?.objects)
    }

    /// Returns `true` if no repository holds any object.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_lock()?.is_empty())
    }
}

impl Default for InMemoryObjectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTable for InMemoryObjectTable {
    fn put(&self, repository: &Repository, id: ObjectId, blob: StoredBlob) -> StoreResult<()> {
        let size = blob.size();
        let replaced = self
            .write_lock()?
            .entry(repository.clone())
            .or_default()
            .insert(id, blob)
            .is_some();
        tracing::trace!(%repository, oid = %id.short_hex(), size, replaced, "object stored");
        Ok(())
    }

    fn get(&self, repository: &Repository, id: &ObjectId) -> StoreResult<Option<StoredBlob>> {
        let blob = self
            .read_lock()?
            .get(repository)
            .and_then(|objects| objects.get(id))
            .cloned();

        // Verified after the guard is dropped so hashing never blocks writers.
        match blob {
            Some(blob) if !blob.verify() => Err(StoreError::HashMismatch {
                repository: repository.clone(),
                id: *id,
            }),
            other => Ok(other),
        }
    }

    fn delete(&self, repository: &Repository, id: &ObjectId) -> StoreResult<DeleteOutcome> {
        let mut map = self.write_lock()?;
        let Some(objects) = map.get_mut(repository) else {
            return Ok(DeleteOutcome::NotFound);
        };
        if objects.remove(id).is_none() {
            return Ok(DeleteOutcome::NotFound);
        }
        if objects.is_empty() {
            map.remove(repository);
        }
        Ok(DeleteOutcome::Deleted)
    }

    fn stats(&self) -> StoreResult<TableStats> {
        let map = self.read_lock()?;
        Ok(TableStats {
            objects: map.values().map(HashMap::len).sum(),
            bytes: map.values().flat_map(HashMap::values).map(StoredBlob::size).sum(),
        })
    }

    fn contains(&self, repository: &Repository, id: &ObjectId) -> StoreResult<bool> {
        Ok(self
            .read_lock()?
            .get(repository)
            .is_some_and(|objects| objects.contains_key(id)))
    }
}

impl std::fmt::Debug for InMemoryObjectTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("InMemoryObjectTable");
        match self.read_lock() {
            Ok(map) => debug
                .field("repository_count", &map.len())
                .field("object_count", &map.values().map(HashMap::len).sum::<usize>()),
            Err(_) => debug.field("poisoned", &true),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use blobd_crypto::{OidGenerator, RandomOidGenerator};
    use bytes::Bytes;

    use super::*;

    fn repo(name: &str) -> Repository {
        Repository::new(name).unwrap()
    }

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    fn blob(content: &'static [u8]) -> StoredBlob {
        StoredBlob::new(content)
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let table = InMemoryObjectTable::new();
        let r = repo("codingtest");
        table.put(&r, oid(1), blob(b"something")).unwrap();

        let read_back = table.get(&r, &oid(1)).unwrap().expect("should exist");
        assert_eq!(read_back.data().as_ref(), b"something");
        assert_eq!(read_back.size(), 9);
    }

    #[test]
    fn get_missing_returns_none() {
        let table = InMemoryObjectTable::new();
        assert!(table.get(&repo("r"), &oid(9)).unwrap().is_none());
    }

    #[test]
    fn put_overwrites() {
        let table = InMemoryObjectTable::new();
        let r = repo("r");
        table.put(&r, oid(1), blob(b"first")).unwrap();
        table.put(&r, oid(1), blob(b"second")).unwrap();
        assert_eq!(table.get(&r, &oid(1)).unwrap().unwrap().data().as_ref(), b"second");
        assert_eq!(table.len().unwrap(), 1);
    }

    #[test]
    fn delete_reports_outcome() {
        let table = InMemoryObjectTable::new();
        let r = repo("r");
        table.put(&r, oid(1), blob(b"to-delete")).unwrap();

        assert_eq!(table.delete(&r, &oid(1)).unwrap(), DeleteOutcome::Deleted);
        assert!(!table.contains(&r, &oid(1)).unwrap());
        assert_eq!(table.delete(&r, &oid(1)).unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn delete_never_created() {
        let table = InMemoryObjectTable::new();
        assert_eq!(table.delete(&repo("r"), &oid(3)).unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn deleting_last_object_drops_repository() {
        let table = InMemoryObjectTable::new();
        let r = repo("r");
        table.put(&r, oid(1), blob(b"x")).unwrap();
        table.delete(&r, &oid(1)).unwrap();
        assert!(table.is_empty().unwrap());
        assert_eq!(table.stats().unwrap(), TableStats::default());
    }

    // -----------------------------------------------------------------------
    // Repository scoping
    // -----------------------------------------------------------------------

    #[test]
    fn repositories_do_not_collide() {
        let table = InMemoryObjectTable::new();
        let (a, b) = (repo("alpha"), repo("beta"));
        table.put(&a, oid(1), blob(b"in alpha")).unwrap();
        table.put(&b, oid(1), blob(b"in beta")).unwrap();

        assert_eq!(table.get(&a, &oid(1)).unwrap().unwrap().data().as_ref(), b"in alpha");
        assert_eq!(table.get(&b, &oid(1)).unwrap().unwrap().data().as_ref(), b"in beta");

        assert_eq!(table.delete(&a, &oid(1)).unwrap(), DeleteOutcome::Deleted);
        assert!(table.contains(&b, &oid(1)).unwrap());
    }

    #[test]
    fn lookup_in_other_repository_misses() {
        let table = InMemoryObjectTable::new();
        table.put(&repo("alpha"), oid(1), blob(b"x")).unwrap();
        assert!(table.get(&repo("beta"), &oid(1)).unwrap().is_none());
        assert_eq!(table.delete(&repo("beta"), &oid(1)).unwrap(), DeleteOutcome::NotFound);
    }

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------

    #[test]
    fn corrupted_entry_is_an_error() {
        let table = InMemoryObjectTable::new();
        let r = repo("r");
        let bad = blob(b"original").with_data_unchecked(Bytes::from_static(b"tampered"));
        table.put(&r, oid(1), bad).unwrap();
        assert!(matches!(
            table.get(&r, &oid(1)),
            Err(StoreError::HashMismatch { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_stats() {
        let table = InMemoryObjectTable::default();
        assert!(table.is_empty().unwrap());

        table.put(&repo("a"), oid(1), blob(b"12345")).unwrap();
        table.put(&repo("b"), oid(2), blob(b"123456789")).unwrap();
        assert_eq!(table.len().unwrap(), 2);
        assert_eq!(
            table.stats().unwrap(),
            TableStats {
                objects: 2,
                bytes: 14
            }
        );
    }

    #[test]
    fn debug_format() {
        let table = InMemoryObjectTable::new();
        table.put(&repo("r"), oid(1), blob(b"x")).unwrap();
        let debug = format!("{table:?}");
        assert!(debug.contains("InMemoryObjectTable"));
        assert!(debug.contains("object_count: 1"));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let table = Arc::new(InMemoryObjectTable::new());
        let t = Arc::clone(&table);
        let _ = thread::spawn(move || {
            let _guard = t.objects.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(table.get(&repo("r"), &oid(1)), Err(StoreError::LockPoisoned)));
        assert!(matches!(table.put(&repo("r"), oid(1), blob(b"x")), Err(StoreError::LockPoisoned)));
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_puts_lose_nothing() {
        let table = Arc::new(InMemoryObjectTable::new());
        let r = repo("codingtest");

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let table = Arc::clone(&table);
                let r = r.clone();
                thread::spawn(move || {
                    (0..100)
                        .map(|i| {
                            let payload = Bytes::from(format!("thread-{t}-object-{i}"));
                            let id = RandomOidGenerator.generate(&payload);
                            table.put(&r, id, StoredBlob::new(payload.clone())).unwrap();
                            (id, payload)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let written: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread should not panic"))
            .collect();

        assert_eq!(table.len().unwrap(), 800);
        for (id, payload) in written {
            assert_eq!(table.get(&r, &id).unwrap().unwrap().data(), &payload);
        }
    }

    #[test]
    fn concurrent_deletes_succeed_exactly_once() {
        let table = Arc::new(InMemoryObjectTable::new());
        let r = repo("r");
        table.put(&r, oid(7), blob(b"contended")).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let table = Arc::clone(&table);
                let r = r.clone();
                thread::spawn(move || table.delete(&r, &oid(7)).unwrap())
            })
            .collect();

        let deleted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|o| *o == DeleteOutcome::Deleted)
            .count();
        assert_eq!(deleted, 1);
    }
}
