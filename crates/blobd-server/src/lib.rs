//! HTTP server for blobd.
//!
//! Serves a repository-scoped blob store:
//!
//! - `PUT /data/{repository}` stores the request body and returns `{"oid", "size"}` (201)
//! - `GET /data/{repository}/{objectID}` returns the raw bytes (200) or 404
//! - `DELETE /data/{repository}/{objectID}` removes the object (200) or reports 404
//!
//! Malformed `/data` paths are 400, other methods 405.

pub mod config;
pub mod error;
pub mod handler;
pub mod path;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod state;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use handler::CreateResponse;
pub use path::DataPath;
pub use server::BlobServer;
pub use state::AppState;
