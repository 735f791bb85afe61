//! Hashing and identifier generation for blobd.
//!
//! Provides domain-separated BLAKE3 hashing for blob integrity digests and
//! the [`OidGenerator`] strategies that assign object identifiers on create.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod hasher;
pub mod oid;

pub use hasher::ContentHasher;
pub use oid::{ContentOidGenerator, OidGenerator, OidStrategy, RandomOidGenerator, UnknownOidStrategy};
