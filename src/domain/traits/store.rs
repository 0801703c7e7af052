use crate::application::errors::StorageError;

/// BlobStore trait - durable storage of named serialized blobs
///
/// Implementations write synchronously; `save` returns only after the blob is
/// durable.
pub trait BlobStore: Send {
    /// Returns `None` when no blob with that name has been written yet
    fn load(&self, name: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, name: &str, blob: &str) -> Result<(), StorageError>;
}
