//! Object identifier assignment.
//!
//! Two strategies are available and they differ in observable behavior:
//!
//! - [`RandomOidGenerator`] (default) draws 256 bits from the thread-local
//!   CSPRNG. Every create yields a fresh OID, independent of content, and an
//!   OID is never handed out again after its object is deleted.
//! - [`ContentOidGenerator`] hashes the payload. Identical payloads share an
//!   OID, so a repeated create is idempotent and re-creating deleted content
//!   re-issues the same OID.

use std::fmt;
use std::str::FromStr;

use blobd_types::ObjectId;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::hasher::ContentHasher;

/// Assigns an [`ObjectId`] to a payload on create.
pub trait OidGenerator: Send + Sync {
    fn generate(&self, data: &[u8]) -> ObjectId;

    /// The strategy this generator implements.
    fn strategy(&self) -> OidStrategy;
}

/// Random 256-bit identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomOidGenerator;

impl OidGenerator for RandomOidGenerator {
    fn generate(&self, _data: &[u8]) -> ObjectId {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        ObjectId::from_hash(bytes)
    }

    fn strategy(&self) -> OidStrategy {
        OidStrategy::Random
    }
}

/// Identifiers derived from a domain-separated BLAKE3 hash of the payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentOidGenerator;

impl OidGenerator for ContentOidGenerator {
    fn generate(&self, data: &[u8]) -> ObjectId {
        ObjectId::from_hash(ContentHasher::OID.hash(data))
    }

    fn strategy(&self) -> OidStrategy {
        OidStrategy::Content
    }
}

/// Configurable choice of [`OidGenerator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OidStrategy {
    #[default]
    Random,
    Content,
}

impl OidStrategy {
    pub fn generator(self) -> Box<dyn OidGenerator> {
        match self {
            Self::Random => Box::new(RandomOidGenerator),
            Self::Content => Box::new(ContentOidGenerator),
        }
    }
}

impl fmt::Display for OidStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Returned when parsing an unrecognized strategy name.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown OID strategy {0:?} (expected \"random\" or \"content\")")]
pub struct UnknownOidStrategy(pub String);

impl FromStr for OidStrategy {
    type Err = UnknownOidStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "content" => Ok(Self::Content),
            other => Err(UnknownOidStrategy(other.to_string())),
        }
    }
}
