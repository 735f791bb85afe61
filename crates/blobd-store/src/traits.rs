use blobd_types::{ObjectId, Repository};

use crate::error::StoreResult;
use crate::object::StoredBlob;

/// What a delete found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The entry existed and has been removed.
    Deleted,
    /// No entry existed under the key.
    NotFound,
}

/// Occupancy summary of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Objects across all repositories.
    pub objects: usize,
    /// Payload bytes across all objects.
    pub bytes: u64,
}

/// Object table keyed by `(repository, oid)`.
///
/// All implementations must satisfy these invariants:
/// - Every present key maps to exactly one complete blob; a partially
///   written entry is never observable.
/// - Operations are safe under concurrent invocation.
/// - No lock is held across I/O; callers read request bodies before `put`
///   and write responses after `get` returns.
/// - Keys in different repositories never collide.
pub trait ObjectTable: Send + Sync {
    /// Insert or overwrite an entry. Succeeds unless the table is unusable.
    fn put(&self, repository: &Repository, id: ObjectId, blob: StoredBlob) -> StoreResult<()>;

    /// Read an entry.
    ///
    /// Returns `Ok(None)` if the entry does not exist.
    /// Returns `Err` if the stored bytes fail digest verification.
    fn get(&self, repository: &Repository, id: &ObjectId) -> StoreResult<Option<StoredBlob>>;

    /// Remove an entry and report whether it existed.
    fn delete(&self, repository: &Repository, id: &ObjectId) -> StoreResult<DeleteOutcome>;

    /// Count objects and payload bytes.
    fn stats(&self) -> StoreResult<TableStats>;

    /// Check whether an entry exists.
    fn contains(&self, repository: &Repository, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.get(repository, id)?.is_some())
    }
}
