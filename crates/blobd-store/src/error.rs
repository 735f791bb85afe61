use blobd_types::{ObjectId, Repository};

/// Errors from object table operations.
///
/// A missing key is not an error: lookups return `Ok(None)` and deletes
/// return [`DeleteOutcome::NotFound`](crate::DeleteOutcome::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Stored bytes no longer match the digest recorded at creation.
    #[error("digest mismatch for {repository}/{id}")]
    HashMismatch { repository: Repository, id: ObjectId },

    /// A thread panicked while holding the table lock.
    #[error("object table lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
