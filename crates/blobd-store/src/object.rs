use blobd_crypto::ContentHasher;
use bytes::Bytes;

/// A stored blob: immutable bytes plus size and integrity digest.
///
/// `StoredBlob` is the unit of storage. Cloning is cheap (the payload is a
/// reference-counted [`Bytes`]), so readers copy the entry out of the table
/// and release the lock before writing a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredBlob {
    data: Bytes,
    size: u64,
    digest: [u8; 32],
}

impl StoredBlob {
    /// Wrap a fully received payload, recording its size and digest.
    pub fn new(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        let digest = ContentHasher::BLOB.hash(&data);
        Self { data, size, digest }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume the blob and return its payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Byte length of the payload at creation.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` if the payload still matches its recorded size and digest.
    pub fn verify(&self) -> bool {
        self.data.len() as u64 == self.size && ContentHasher::BLOB.verify(&self.data, &self.digest)
    }

    #[cfg(test)]
    pub(crate) fn with_data_unchecked(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }
}
