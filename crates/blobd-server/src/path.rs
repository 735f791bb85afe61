//! Parsing of `/data/...` request paths.
//!
//! Exactly two shapes are routable:
//! - `/data/{repository}` (a trailing `/` is tolerated)
//! - `/data/{repository}/{objectID}`
//!
//! Anything else under `/data` is [`DataPath::Malformed`]. Paths outside
//! `/data` are [`DataPath::Outside`] and are not part of the blob API.

use blobd_types::Repository;

pub const DATA_PREFIX: &str = "/data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataPath {
    /// `/data/{repository}`
    Repository(Repository),
    /// `/data/{repository}/{objectID}`; the object ID is non-empty but unvalidated.
    Object {
        repository: Repository,
        object_id: String,
    },
    /// Under `/data` but not one of the two shapes.
    Malformed(&'static str),
    /// Not under `/data` at all.
    Outside,
}

impl DataPath {
    pub fn parse(path: &str) -> Self {
        let Some(rest) = path.strip_prefix(DATA_PREFIX) else {
            return Self::Outside;
        };
        let rest = match rest.strip_prefix('/') {
            Some(rest) => rest,
            None if rest.is_empty() => return Self::Malformed("missing repository segment"),
            // e.g. `/database`
            None => return Self::Outside,
        };

        let segments: Vec<&str> = rest.split('/').collect();
        let (repository, object_id) = match segments.as_slice() {
            [repository] | [repository, ""] => (*repository, None),
            [repository, object_id] => (*repository, Some(*object_id)),
            _ => return Self::Malformed("too many path segments"),
        };

        let Ok(repository) = Repository::new(repository) else {
            return Self::Malformed("missing repository segment");
        };
        match object_id {
            None => Self::Repository(repository),
            Some(object_id) => Self::Object {
                repository,
                object_id: object_id.to_string(),
            },
        }
    }
}
