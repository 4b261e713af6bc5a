//! ZIP archive backend built on the `zip` crate

use super::traits::ArchiveBackend;
use crate::archive::Archive;
use crate::config::CompressionMethod;
use crate::error::{ArchiveError, Error, Result};
use crate::types::Blob;
use async_trait::async_trait;
use std::io::{Cursor, Write};
use tokio::task::spawn_blocking;
use tracing::debug;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Serializes archives to in-memory ZIP files
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipArchiveBackend {
    compression: CompressionMethod,
}

impl ZipArchiveBackend {
    /// Create a backend using the given compression method
    pub fn new(compression: CompressionMethod) -> Self {
        Self { compression }
    }

    /// Write the archive synchronously into a byte vector
    pub fn write_zip(archive: &Archive, compression: CompressionMethod) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options = FileOptions::default()
            .compression_method(compression.into())
            .unix_permissions(0o644);

        if !archive.folder().is_empty() {
            writer
                .add_directory(archive.folder(), FileOptions::default())
                .map_err(ArchiveError::Zip)?;
        }

        for entry in archive.entries() {
            let bytes = entry.content.decode(&entry.name)?;
            writer
                .start_file(archive.entry_path(entry), file_options)
                .map_err(ArchiveError::Zip)?;
            writer.write_all(&bytes)?;
        }

        let cursor = writer.finish().map_err(ArchiveError::Zip)?;
        Ok(cursor.into_inner())
    }
}

#[async_trait]
impl ArchiveBackend for ZipArchiveBackend {
    async fn generate(&self, archive: Archive) -> Result<Blob> {
        let compression = self.compression;
        let folder = archive.folder().to_string();
        let entries = archive.len();

        // Compression is CPU-bound; keep it off the async workers
        let data = spawn_blocking(move || Self::write_zip(&archive, compression))
            .await
            .map_err(|e| Error::Archive(ArchiveError::TaskFailed(e.to_string())))??;

        debug!(
            folder = %folder,
            entries,
            size_bytes = data.len(),
            "ZIP archive generated"
        );

        Ok(Blob::zip(data))
    }

    fn name(&self) -> &'static str {
        "zip"
    }
}
