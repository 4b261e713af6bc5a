//! Traits for the external capabilities the batch pipeline depends on

use crate::archive::Archive;
use crate::types::{Blob, FileRecord, RecordId};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Backend query service that returns the files attached to records
///
/// The batch pipeline always calls this with exactly one identifier.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Return every file belonging to the given records
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the request.
    async fn get_files(&self, record_ids: &[RecordId]) -> crate::Result<Vec<FileRecord>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Compression capability: turns an [`Archive`] description into bytes
#[async_trait]
pub trait ArchiveBackend: Send + Sync {
    /// Serialize the archive into a binary blob
    ///
    /// Entry contents are decoded here, so malformed bodies surface as
    /// serialization errors.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be decoded or the writer fails.
    async fn generate(&self, archive: Archive) -> crate::Result<Blob>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Save capability: persists a named blob for the user
#[async_trait]
pub trait BlobSaver: Send + Sync {
    /// Persist `blob` under `file_name`, returning where it landed
    ///
    /// The returned path may differ from the requested name when the saver
    /// resolves collisions by renaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be written.
    async fn save(&self, blob: Blob, file_name: &str) -> crate::Result<PathBuf>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Resolves the archive and save capabilities on demand
///
/// Used by [`DependencyLoader`](crate::loader::DependencyLoader), which
/// caches the first successful resolution.
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Load the archive capability
    async fn load_archive_backend(&self) -> crate::Result<Arc<dyn ArchiveBackend>>;

    /// Load the save capability
    async fn load_blob_saver(&self) -> crate::Result<Arc<dyn BlobSaver>>;
}
