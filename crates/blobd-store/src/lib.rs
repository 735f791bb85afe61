//! Object table for blobd.
//!
//! Maps `(repository, oid)` to an immutable blob. The table owns every
//! stored blob; callers receive cheap `Bytes` clones and never touch the
//! underlying container.
//!
//! # Design Rules
//!
//! 1. Blobs are immutable once written; there is no update operation.
//! 2. A blob becomes visible only after it is fully read and hashed; the
//!    table never holds a partially written entry.
//! 3. Locks are held for the map operation only, never across I/O.
//! 4. Objects in different repositories never collide.
//! 5. Lock poisoning is reported as an error, never a panic.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectTable;
pub use object::StoredBlob;
pub use traits::{DeleteOutcome, ObjectTable, TableStats};
