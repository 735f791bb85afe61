/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"blobd-blob-v1"`) that is
/// prepended to every hash computation, so an integrity digest and a
/// content-derived OID over the same bytes never coincide.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for blob integrity digests.
    pub const BLOB: Self = Self {
        domain: "blobd-blob-v1",
    };
    /// Hasher for content-derived object identifiers.
    pub const OID: Self = Self {
        domain: "blobd-oid-v1",
    };

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &[u8; 32]) -> bool {
        // blake3::Hash equality is constant-time.
        blake3::Hash::from(self.hash(data)) == blake3::Hash::from(*expected)
    }
}
