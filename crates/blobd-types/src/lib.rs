//! Foundation types for blobd.
//!
//! Every other blobd crate depends on `blobd-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`]: 256-bit object identifier, hex-encoded on the wire
//! - [`Repository`]: validated namespace that scopes a group of objects

pub mod error;
pub mod object;
pub mod repository;

pub use error::TypeError;
pub use object::ObjectId;
pub use repository::Repository;
